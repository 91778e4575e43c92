//! The parse tree's node model (spec §3, "ParseNode").
//!
//! One closed tagged type instead of one struct per construct: `left`/
//! `right` carry the two "main" slots a binary or compound construct needs
//! (condition + body, receiver + accessor, init + step…) and `details`
//! carries everything whose count is construct-dependent (parameters,
//! enumerators, array dimensions, statements). This mirrors the teacher's
//! `Item`/`Stmt`/`Expr` split conceptually (one tag per grammatical role)
//! but collapses it to the single schema spec.md §3 mandates, since a
//! closed `Node` that owns its own children through `Box` replaces the
//! source's pointer-and-cast `Node` struct without needing per-construct
//! Rust types.

use spacec_util::Span;

/// Every grammatical construct the builder can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The top-level program and every block body; `details` holds its
    /// ordered statement children.
    Runnable,

    Identifier,
    This,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    NullLiteral,

    /// `left`/`right` operands, `value` holds the operator spelling
    /// (`"+"`, `"=="`, `"and"`, …).
    BinaryOp,
    /// Unary prefix, operand in `left`.
    UnaryOp,

    /// A parenthesized group retained only long enough to be unwrapped by
    /// the caller; never appears in the finished tree.
    Paren,

    /// `left`: receiver, `right`: accessed member. `value` is `"."` or
    /// `"->"` so the analyzer can tell which accessor form was used.
    MemberAccess,
    /// Root of a chain with ≥1 accessor (spec §4.2.3); `left` is the first
    /// accessor node, chains are left-deep.
    MemClassAcc,
    /// `left`: callee, `details`: arguments.
    FunctionCall,
    /// `value`: class name, `details`: arguments (`new Foo(...)`).
    ConstructorCall,
    /// `left`: receiver (the array value or the previous `ArrayAccess`
    /// layer), `right`: this layer's index expression. See DESIGN.md for
    /// why this reads left-to-right as receiver/index rather than the
    /// index/next-dimension wording the distilled grammar uses.
    ArrayAccess,

    /// `left`: condition, `right`: true-branch, `details[0]`: false-branch.
    Ternary,

    /// A type annotation: `value` is the base type name; `details` holds
    /// one `ArrayDim` per `[]` suffix.
    Type,
    ArrayDim,

    /// Variable/constant declarations all share one shape: `value` is the
    /// name, `left` is always a `Modifier` node (empty `value` for
    /// package-global), `details[0]` is the `Type` annotation, and `right`
    /// is the initializer expression when present. The four kinds below
    /// differ only in what shape that initializer took — generalizing
    /// class's `left: modifier` slot (spec §4.2.4) to every declaration
    /// kind instead of just `class`, since nothing else in the grammar
    /// needs `left` for these nodes.
    Variable,
    Constant,
    ArrayVariable,
    ConditionalVariable,
    InstanceVariable,
    /// `details`: one `ArrayAssignment` per element. Appears as a value
    /// wherever an expression can (a `var`'s initializer, a `return`'s
    /// operand); the *declaration* it initializes is tagged
    /// `ArrayVariable` based on this node's presence, not this kind
    /// itself.
    ArrayLiteral,
    /// One array element initializer inside an `ArrayLiteral`.
    ArrayAssignment,

    /// `value`: name, `left`: `Modifier`, `details[0]`: `ReturnType`,
    /// `details[1..]`: `Parameter`s, `right`: body.
    Function,
    /// A formal parameter: `value` is the name, `details[0]` its `Type`.
    Parameter,
    /// Wraps the function's declared `Type` in `details[0]`.
    ReturnType,

    /// `value`: name, `left`: `Modifier`, `details[0]` (optional):
    /// `Inheritance`, `details[1..]` (optional): `Interface`s, `right`: body.
    Class,
    /// A single name referenced from `class`'s inheritance/interface
    /// lists.
    Inheritance,
    Interface,
    /// `value` is the modifier keyword (`"global"`, `"secure"`,
    /// `"private"`) or empty for package-global.
    Modifier,
    /// `details[0]`: `ConstructorParamMarker`, `details[1..]`:
    /// `Parameter`s, `right`: body.
    Constructor,
    /// Marks a constructor's parameter list as distinct from a regular
    /// function's, so overload resolution never confuses the two (spec
    /// §4.2.4 "Constructors").
    ConstructorParamMarker,

    If,
    ElseIf,
    Else,
    While,
    Do,
    For,
    Try,
    Catch,
    /// `check (expr is Type) {...}` — `left` is the `is`-condition (a
    /// `BinaryOp` valued `"is"` whose `right` is a `Type` node), `right` the
    /// body. Neither `check` nor `is` gets a grammar anywhere in spec §4.2;
    /// only their keywords and the `Is` scope kind are on record, so this
    /// shape is an implementer decision (see DESIGN.md).
    Is,

    Return,
    Break,
    Continue,

    Enum,
    /// `value` is the enumerator's name; `right`, if present, is its
    /// explicit `Value` node.
    Enumerator,
    Value,

    /// `value` holds the dotted include path's final display form.
    Include,
}

/// A node in the parse tree.
///
/// Children are exclusively owned: `left`/`right` are the two "main"
/// slots a construct needs, `details` is an ordered, construct-dependent
/// list. Forbidding shared ownership keeps the tree a strict DAG, matching
/// spec §3's "sharing is forbidden" invariant for free via Rust's
/// ownership rules rather than by convention.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseNode {
    pub kind: NodeKind,
    pub value: String,
    pub span: Span,
    pub left: Option<Box<ParseNode>>,
    pub right: Option<Box<ParseNode>>,
    pub details: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            value: String::new(),
            span,
            left: None,
            right: None,
            details: Vec::new(),
        }
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            left: None,
            right: None,
            details: Vec::new(),
        }
    }

    pub fn with_left(mut self, left: ParseNode) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: ParseNode) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    pub fn with_details(mut self, details: Vec<ParseNode>) -> Self {
        self.details = details;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}
