//! Symbol-table model (spec §3): `SymbolEntry`/`SymbolTable`, `Visibility`,
//! `ScopeKind`.
//!
//! Spec §3 writes `SymbolTable.parent` as an owned back-reference, but an
//! owned cycle is impossible in this tree's ownership scheme (spec §9
//! "ownership tree instead of raw pointers" — entries own their child
//! tables, so a table owning a pointer back up to its own owner would be a
//! cycle). `parent` is dropped from the persisted struct; the open-scope
//! chain that `parent` would have threaded is instead a stack the analyzer
//! holds only for the duration of the walk (see `analyzer::SemanticAnalyzer`).
//! Once a scope closes, its `SymbolTable` is moved into the owning entry's
//! `reference` and the stack frame is gone — matching the lifecycle spec §3
//! describes ("symbol tables are built during analysis and released as one
//! subtree when analysis completes").

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use spacec_util::Span;

use crate::types::VarType;

/// Visibility modifiers (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    PackageGlobal,
    Global,
    Secure,
    Private,
}

impl Visibility {
    pub fn from_modifier_text(text: &str) -> Visibility {
        match text {
            "global" => Visibility::Global,
            "secure" => Visibility::Secure,
            "private" => Visibility::Private,
            _ => Visibility::PackageGlobal,
        }
    }
}

/// The syntactic form that introduced a scope or a declared symbol (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Main,
    Class,
    Function,
    Constructor,
    Enum,
    Enumerator,
    Variable,
    If,
    ElseIf,
    Else,
    While,
    Do,
    For,
    Try,
    Catch,
    Is,
    External,
    FunctionCall,
}

impl ScopeKind {
    /// Loop-bearing scope kinds a `break`/`continue` may legally target
    /// (spec §4.3.7).
    pub fn is_loop(self) -> bool {
        matches!(self, ScopeKind::For | ScopeKind::While | ScopeKind::Do | ScopeKind::Is)
    }

    /// Scope kinds a `break`/`continue` search must not cross (spec §4.3.7:
    /// "NOT escaping a function/class boundary").
    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            ScopeKind::Function | ScopeKind::Constructor | ScopeKind::Class | ScopeKind::Main
        )
    }
}

/// A single declared name: its type, visibility, the scope kind that
/// declared it, and (for scope-introducing declarations) the child table it
/// owns.
#[derive(Clone, Debug)]
pub struct SymbolEntry {
    pub name: String,
    pub declared_type: VarType,
    pub visibility: Visibility,
    pub kind: ScopeKind,
    pub reference: Option<Box<SymbolTable>>,
    pub line: u32,
    pub column: u32,
}

impl SymbolEntry {
    pub fn new(name: impl Into<String>, declared_type: VarType, kind: ScopeKind, span: Span) -> Self {
        Self {
            name: name.into(),
            declared_type,
            visibility: Visibility::PackageGlobal,
            kind,
            reference: None,
            line: span.line,
            column: span.column,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_reference(mut self, table: SymbolTable) -> Self {
        self.reference = Some(Box::new(table));
        self
    }
}

/// One scope's symbol table: an unordered hash map of declared names plus
/// an ordered parameter list (spec §3 "Parameters are ordered... symbols
/// are unordered"). Parameters are an `IndexMap` rather than a `Vec` so
/// positional iteration (for overload/argument matching) and name lookup
/// (for ordinary in-scope use of a parameter) are both O(1)-ish without
/// a second index structure.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    pub name: Option<String>,
    pub kind: ScopeKind,
    pub params: IndexMap<String, SymbolEntry>,
    pub symbols: FxHashMap<String, SymbolEntry>,
    pub line: u32,
    pub column: u32,
}

impl SymbolTable {
    pub fn new(name: Option<String>, kind: ScopeKind, span: Span) -> Self {
        Self {
            name,
            kind,
            params: IndexMap::new(),
            symbols: FxHashMap::default(),
            line: span.line,
            column: span.column,
        }
    }

    /// Looks up `name` in this table's own symbols and parameter list only
    /// (spec §4.3.2: "consulting both the hash map and the ordered
    /// parameter list at each level"). Callers walk the enclosing-scope
    /// stack themselves for the full lookup.
    pub fn lookup_local(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(name).or_else(|| self.params.get(name))
    }

    pub fn declare(&mut self, entry: SymbolEntry) {
        self.symbols.insert(entry.name.clone(), entry);
    }

    pub fn declare_param(&mut self, entry: SymbolEntry) {
        self.params.insert(entry.name.clone(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseKind;

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    #[test]
    fn lookup_local_checks_symbols_then_params() {
        let mut table = SymbolTable::new(Some("f".into()), ScopeKind::Function, span());
        table.declare_param(SymbolEntry::new(
            "x",
            VarType::scalar(BaseKind::Integer),
            ScopeKind::Variable,
            span(),
        ));
        assert!(table.lookup_local("x").is_some());
        assert!(table.lookup_local("y").is_none());
    }

    #[test]
    fn visibility_from_modifier_text_defaults_to_package_global() {
        assert_eq!(Visibility::from_modifier_text(""), Visibility::PackageGlobal);
        assert_eq!(Visibility::from_modifier_text("private"), Visibility::Private);
    }

    #[test]
    fn scope_kind_loop_and_boundary_classification() {
        assert!(ScopeKind::For.is_loop());
        assert!(!ScopeKind::If.is_loop());
        assert!(ScopeKind::Function.is_boundary());
        assert!(!ScopeKind::While.is_boundary());
    }
}
