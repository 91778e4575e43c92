//! `VarType`/`BaseKind` (spec §3) and the two type-equality modes §4.3.3
//! requires. Decoded here, not in `spacec-par`: the builder only ever emits
//! a generic `NodeKind::Type` syntax node (a base name plus `ArrayDim`
//! children); turning that into a `base`/`dimension`/`classRef` triple is
//! this crate's job, since only the analyzer knows which base names are
//! declared classes versus built-ins versus `include`d externals.

use std::fmt;

use spacec_par::{NodeKind, ParseNode};

/// The closed set of type bases spec §3 names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseKind {
    Integer,
    Long,
    Short,
    Double,
    Float,
    Char,
    String,
    Boolean,
    Void,
    Null,
    ClassRef,
    Custom,
    External,
    /// Tags the callee side of a function-call check (spec §4.3.5); never
    /// appears as a declared variable's type.
    FunctionCallMarker,
    NonFunctionCallMarker,
}

/// A fully resolved type: base kind, array rank, and (for `ClassRef`) the
/// referenced class's name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarType {
    pub base: BaseKind,
    pub dimension: i32,
    pub class_ref: Option<String>,
    pub constant: bool,
}

impl VarType {
    pub fn scalar(base: BaseKind) -> Self {
        Self {
            base,
            dimension: 0,
            class_ref: None,
            constant: false,
        }
    }

    pub fn class_ref(name: impl Into<String>) -> Self {
        Self {
            base: BaseKind::ClassRef,
            dimension: 0,
            class_ref: Some(name.into()),
            constant: false,
        }
    }

    pub fn custom() -> Self {
        Self::scalar(BaseKind::Custom)
    }

    pub fn external() -> Self {
        Self::scalar(BaseKind::External)
    }

    pub fn boolean() -> Self {
        Self::scalar(BaseKind::Boolean)
    }

    pub const fn with_constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    /// Array access decrements `dimension` by one per `[...]` layer (spec
    /// §4.3.3). Returns `None` when the result would go negative — the
    /// caller turns that into a `NoSuchArrayDimension` diagnostic rather
    /// than constructing an invalid `VarType`.
    pub fn indexed(&self) -> Option<VarType> {
        if self.dimension <= 0 {
            return None;
        }
        Some(VarType {
            dimension: self.dimension - 1,
            ..self.clone()
        })
    }

    /// Strict equality: exact `base`/`dimension`/`classRef` match. Used for
    /// constructor-overload collision checks (spec §4.3.8) and new
    /// constructor declarations. `External` still matches anything, per
    /// §4.3.3 ("accesses into included modules are not further checked").
    pub fn strict_eq(&self, other: &VarType) -> bool {
        if self.base == BaseKind::External || other.base == BaseKind::External {
            return true;
        }
        self.base == other.base
            && self.dimension == other.dimension
            && (self.base != BaseKind::ClassRef || self.class_ref == other.class_ref)
    }

    /// Lenient equality: `Double`⇄`Float` compatible, `Custom` a wildcard
    /// matching any type of the same dimension, `External` matching
    /// anything. Used for assignments, call-argument checks, and condition
    /// evaluation (spec §4.3.3).
    pub fn lenient_eq(&self, other: &VarType) -> bool {
        if self.base == BaseKind::External || other.base == BaseKind::External {
            return true;
        }
        if self.dimension != other.dimension {
            return false;
        }
        if self.base == BaseKind::Custom || other.base == BaseKind::Custom {
            return true;
        }
        match (self.base, other.base) {
            (BaseKind::Double, BaseKind::Float) | (BaseKind::Float, BaseKind::Double) => true,
            (BaseKind::ClassRef, BaseKind::ClassRef) => self.class_ref == other.class_ref,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for VarType {
    /// Renders the human-readable type name spec §7 requires for
    /// `TypeMismatch` pairs: `INTEGER[][]`, `STRING`, `CLASS_REF<Foo>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            BaseKind::Integer => write!(f, "INTEGER")?,
            BaseKind::Long => write!(f, "LONG")?,
            BaseKind::Short => write!(f, "SHORT")?,
            BaseKind::Double => write!(f, "DOUBLE")?,
            BaseKind::Float => write!(f, "FLOAT")?,
            BaseKind::Char => write!(f, "CHAR")?,
            BaseKind::String => write!(f, "STRING")?,
            BaseKind::Boolean => write!(f, "BOOLEAN")?,
            BaseKind::Void => write!(f, "VOID")?,
            BaseKind::Null => write!(f, "NULL")?,
            BaseKind::Custom => write!(f, "CUSTOM")?,
            BaseKind::External => write!(f, "EXTERNAL")?,
            BaseKind::FunctionCallMarker => write!(f, "FUNCTION_CALL")?,
            BaseKind::NonFunctionCallMarker => write!(f, "NON_FUNCTION_CALL")?,
            BaseKind::ClassRef => {
                write!(f, "CLASS_REF<{}>", self.class_ref.as_deref().unwrap_or("?"))?
            }
        }
        for _ in 0..self.dimension.max(0) {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Maps a built-in type name to its `BaseKind`; returns `None` for anything
/// that must instead be resolved against the declared-class registry
/// (handled by the caller).
fn builtin_base(name: &str) -> Option<BaseKind> {
    Some(match name {
        "int" => BaseKind::Integer,
        "long" => BaseKind::Long,
        "short" => BaseKind::Short,
        "double" => BaseKind::Double,
        "float" => BaseKind::Float,
        "char" => BaseKind::Char,
        "string" => BaseKind::String,
        "bool" | "boolean" => BaseKind::Boolean,
        "void" => BaseKind::Void,
        "null" => BaseKind::Null,
        "custom" => BaseKind::Custom,
        "external" => BaseKind::External,
        _ => return None,
    })
}

/// Decodes a `NodeKind::Type` syntax node into a `VarType`. `is_class`
/// tests whether a non-builtin name is a known declared class; anything
/// that is neither a builtin nor a known class still decodes to `ClassRef`
/// optimistically (forward references across classes are common and the
/// registry pre-pass, not this function, is responsible for catching
/// genuinely unknown names as `NotDefined`).
pub fn decode_type(node: &ParseNode, is_class: impl Fn(&str) -> bool) -> VarType {
    debug_assert_eq!(node.kind, NodeKind::Type);
    let dimension = node.details.len() as i32;
    let base = builtin_base(&node.value);
    match base {
        Some(base) => VarType {
            base,
            dimension,
            class_ref: None,
            constant: false,
        },
        None if is_class(&node.value) || !node.value.is_empty() => VarType {
            base: BaseKind::ClassRef,
            dimension,
            class_ref: Some(node.value.clone()),
            constant: false,
        },
        None => VarType::custom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_eq_requires_exact_dimension_and_base() {
        let a = VarType::scalar(BaseKind::Integer);
        let b = VarType {
            dimension: 1,
            ..VarType::scalar(BaseKind::Integer)
        };
        assert!(!a.strict_eq(&b));
    }

    #[test]
    fn lenient_eq_allows_double_float_coercion() {
        let d = VarType::scalar(BaseKind::Double);
        let f = VarType::scalar(BaseKind::Float);
        assert!(d.lenient_eq(&f));
        assert!(!d.strict_eq(&f));
    }

    #[test]
    fn lenient_eq_custom_is_wildcard_at_matching_dimension() {
        let custom = VarType::custom();
        let string_arr = VarType {
            dimension: 1,
            ..VarType::scalar(BaseKind::String)
        };
        assert!(custom.lenient_eq(&string_arr));
        let string_scalar = VarType::scalar(BaseKind::String);
        assert!(!custom.lenient_eq(&string_scalar) || custom.dimension == string_scalar.dimension);
    }

    #[test]
    fn class_ref_strict_eq_compares_name() {
        let a = VarType::class_ref("Foo");
        let b = VarType::class_ref("Bar");
        assert!(!a.strict_eq(&b));
        assert!(a.strict_eq(&VarType::class_ref("Foo")));
    }

    #[test]
    fn indexed_decrements_dimension_and_rejects_negative() {
        let arr = VarType {
            dimension: 1,
            ..VarType::scalar(BaseKind::Integer)
        };
        let scalar = arr.indexed().unwrap();
        assert_eq!(scalar.dimension, 0);
        assert!(scalar.indexed().is_none());
    }

    #[test]
    fn display_renders_array_suffixes_and_class_ref() {
        let arr = VarType {
            dimension: 2,
            ..VarType::scalar(BaseKind::Integer)
        };
        assert_eq!(arr.to_string(), "INTEGER[][]");
        assert_eq!(VarType::class_ref("Foo").to_string(), "CLASS_REF<Foo>");
    }
}
