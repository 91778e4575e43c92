//! spacec-sem - the semantic analyzer (spec §4.3).
//!
//! Consumes the root `Runnable` tree `spacec-par` produces and walks it
//! once, building a scope-structured symbol-table forest and accumulating
//! diagnostics in a `spacec_util::Handler` as it goes (spec §9 "error
//! reporting is data, not control flow"). The walk never aborts on a
//! recoverable error; only a malformed tree (which cannot occur from a
//! successful parse) would panic it.

pub mod analyzer;
pub mod registry;
pub mod symbol;
pub mod types;

pub use analyzer::{analyze, analyze_with_externals, SemanticAnalyzer};
pub use registry::{build_class_registry, ClassSignature, MemberSignature};
pub use symbol::{ScopeKind, SymbolEntry, SymbolTable, Visibility};
pub use types::{decode_type, BaseKind, VarType};
