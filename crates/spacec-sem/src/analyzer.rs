//! The semantic analyzer (spec §4.3): walks the parse tree once, building
//! the symbol-table forest and emitting recoverable diagnostics as it goes.
//!
//! Structurally grounded on the teacher's `SemanticAnalyzer` in
//! `faxc-sem/src/analysis.rs`: a struct holding the shared sink (`Handler`
//! here, the teacher's own diagnostic bag there) plus per-walk state, one
//! `analyze_*` method per tree shape, and a `collect_items`-style pre-pass
//! (here, `registry::build_class_registry`) feeding the real walk. Unlike
//! the teacher, there is no HIR lowering — this walk's output *is* the
//! symbol table, not a separate typed IR, since spec §3 names the table
//! itself as the deliverable.

use std::collections::HashMap;

use spacec_par::{NodeKind, ParseNode};
use spacec_util::diagnostic::{DiagnosticBuilder, DiagnosticCategory};
use spacec_util::{Handler, Span};

use crate::registry::{build_class_registry, ClassSignature};
use crate::symbol::{ScopeKind, SymbolEntry, SymbolTable, Visibility};
use crate::types::{decode_type, BaseKind, VarType};

/// Runs the full semantic pass over a parsed program, returning the
/// populated `Main` table. Diagnostics accumulate in `handler` and never
/// abort the walk (spec §9 "error reporting is data, not control flow").
pub fn analyze(root: &ParseNode, handler: &Handler) -> SymbolTable {
    analyze_with_externals(root, handler).0
}

/// Same walk as [`analyze`], additionally handing back the external-access
/// list (spec §3) instead of discarding it. Split out as its own entry point
/// so callers who only want the table (every test in this crate) don't have
/// to destructure a tuple, while a driver that needs both (`spacec-front`)
/// can ask for them together without re-running the walk.
pub fn analyze_with_externals(root: &ParseNode, handler: &Handler) -> (SymbolTable, Vec<Span>) {
    let registry = build_class_registry(root);
    tracing::debug!(classes = registry.len(), "class registry built");
    let mut analyzer = SemanticAnalyzer::new(registry, handler);
    let table = analyzer.run(root);
    (table, analyzer.external_accesses)
}

/// One open scope's symbol table plus the external-access accumulator and
/// class registry, threaded through the recursive walk. `scopes` is the
/// open-scope stack spec §3's dropped `SymbolTable.parent` field would have
/// threaded (see `symbol` module doc comment): lookups and shadowing checks
/// walk it top-to-bottom, and a finished scope is popped and installed into
/// its owning entry before the stack frame disappears.
pub struct SemanticAnalyzer<'a> {
    handler: &'a Handler,
    registry: HashMap<String, ClassSignature>,
    scopes: Vec<SymbolTable>,
    /// `include` targets collected during the walk (spec §3 "External-access
    /// list").
    pub external_accesses: Vec<Span>,
}

impl<'a> SemanticAnalyzer<'a> {
    fn new(registry: HashMap<String, ClassSignature>, handler: &'a Handler) -> Self {
        Self {
            handler,
            registry,
            scopes: Vec::new(),
            external_accesses: Vec::new(),
        }
    }

    fn is_class(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    fn decode(&self, ty: &ParseNode) -> VarType {
        decode_type(ty, |name| self.is_class(name))
    }

    fn emit(&self, category: DiagnosticCategory, message: impl Into<String>, span: Span) {
        DiagnosticBuilder::new(category, message).span(span).emit(self.handler);
    }

    /// Spec §4.3.1: "anonymous scopes... are given synthetic names unique
    /// within their parent". Uniqueness is checked against the current
    /// scope's own symbol map rather than a separate counter, so it stays
    /// correct even when scopes close and reopen siblings.
    fn synthetic_name(&mut self, prefix: &'static str) -> String {
        let scope = self.scopes.last().expect("at least the Main scope is always open");
        if !scope.symbols.contains_key(prefix) {
            return prefix.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{prefix}_{n}");
            if !scope.symbols.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn current_scope(&mut self) -> &mut SymbolTable {
        self.scopes.last_mut().expect("at least the Main scope is always open")
    }

    /// Entry point: opens `Main`, walks the top-level statement list, and
    /// returns the finished table (spec §4.3 "Output: a fully populated
    /// `Main` symbol table rooted at the program").
    fn run(&mut self, root: &ParseNode) -> SymbolTable {
        let main = SymbolTable::new(Some("Main".to_string()), ScopeKind::Main, root.span);
        self.scopes.push(main);
        self.analyze_block(&root.details);
        self.scopes.pop().expect("Main scope pushed at entry")
    }

    /// Walks a `RUNNABLE`'s statement list, looking at index-adjacent
    /// siblings for the pairing rules spec §4.3.7 requires (`try`/`catch`
    /// and `if`/`else-if`/`else` chains).
    fn analyze_block(&mut self, statements: &[ParseNode]) {
        for (index, statement) in statements.iter().enumerate() {
            self.check_placement(statement, statements, index);
            self.analyze_statement(statement);
        }
    }

    /// Spec §4.3.7's ordering and scope-membership rules. Emitted as
    /// `StatementMisplacement` without otherwise interrupting the walk.
    fn check_placement(&mut self, node: &ParseNode, siblings: &[ParseNode], index: usize) {
        let current_kind = self.scopes.last().map(|s| s.kind);
        match node.kind {
            NodeKind::Class | NodeKind::Enum | NodeKind::Include => {
                if current_kind != Some(ScopeKind::Main) {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        format!("{:?} may only appear at Main scope", node.kind),
                        node.span,
                    );
                }
            }
            NodeKind::Function => {
                if !matches!(current_kind, Some(ScopeKind::Main) | Some(ScopeKind::Class)) {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "functions may only appear at Main or Class scope",
                        node.span,
                    );
                }
            }
            NodeKind::Constructor => {
                if current_kind != Some(ScopeKind::Class) {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "constructors may only appear at Class scope",
                        node.span,
                    );
                }
            }
            NodeKind::Variable | NodeKind::Constant | NodeKind::ArrayVariable
            | NodeKind::ConditionalVariable | NodeKind::InstanceVariable => {
                if current_kind == Some(ScopeKind::Enum) {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "'var'/'const' are forbidden inside 'enum'",
                        node.span,
                    );
                }
            }
            NodeKind::Catch => {
                let preceded_by_try = index > 0 && siblings[index - 1].kind == NodeKind::Try;
                if !preceded_by_try {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "'catch' requires an immediately preceding 'try'",
                        node.span,
                    );
                }
            }
            NodeKind::Try => {
                let followed_by_catch =
                    siblings.get(index + 1).map(|n| n.kind) == Some(NodeKind::Catch);
                if !followed_by_catch {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "'try' requires an immediately following 'catch'",
                        node.span,
                    );
                }
            }
            NodeKind::ElseIf | NodeKind::Else => {
                let preceded_by_if_chain = index > 0
                    && matches!(siblings[index - 1].kind, NodeKind::If | NodeKind::ElseIf);
                if !preceded_by_if_chain {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        "'else if'/'else' requires an immediately preceding 'if' or 'else if'",
                        node.span,
                    );
                }
            }
            NodeKind::Break | NodeKind::Continue => {
                if !self.has_enclosing_loop() {
                    self.emit(
                        DiagnosticCategory::StatementMisplacement,
                        format!("'{:?}' must lie inside an enclosing loop", node.kind),
                        node.span,
                    );
                }
            }
            _ => {}
        }
    }

    /// Scans the open-scope stack backward for a loop-bearing scope kind,
    /// stopping at the first function/class/Main boundary (spec §4.3.7:
    /// "possibly nested through if/try/catch, but NOT escaping a
    /// function/class boundary").
    fn has_enclosing_loop(&self) -> bool {
        for scope in self.scopes.iter().rev() {
            if scope.kind.is_loop() {
                return true;
            }
            if scope.kind.is_boundary() {
                return false;
            }
        }
        false
    }

    fn analyze_statement(&mut self, node: &ParseNode) {
        match node.kind {
            NodeKind::Variable | NodeKind::Constant | NodeKind::ArrayVariable
            | NodeKind::ConditionalVariable | NodeKind::InstanceVariable => {
                self.analyze_declaration(node)
            }
            NodeKind::Function => self.analyze_function(node),
            NodeKind::Constructor => self.analyze_constructor(node),
            NodeKind::Class => self.analyze_class(node),
            NodeKind::Enum => self.analyze_enum(node),
            NodeKind::If => self.analyze_condition_scope(node, ScopeKind::If, "if"),
            NodeKind::ElseIf => self.analyze_condition_scope(node, ScopeKind::ElseIf, "else_if"),
            NodeKind::Else => self.analyze_body_only_scope(node, ScopeKind::Else, "else"),
            NodeKind::While => self.analyze_condition_scope(node, ScopeKind::While, "while"),
            NodeKind::Do => self.analyze_condition_scope(node, ScopeKind::Do, "do"),
            NodeKind::For => self.analyze_for(node),
            NodeKind::Try => self.analyze_body_only_scope(node, ScopeKind::Try, "try"),
            NodeKind::Catch => self.analyze_catch(node),
            NodeKind::Is => self.analyze_is(node),
            NodeKind::Return => {
                if let Some(expr) = node.left.as_deref() {
                    self.infer_expr_type(expr);
                }
            }
            NodeKind::Break | NodeKind::Continue => {}
            NodeKind::Include => self.analyze_include(node),
            _ => {
                // A bare expression statement (assignment, compound
                // assignment, or call) — evaluated for its diagnostics, the
                // resulting type is unused at statement position.
                self.infer_expr_type(node);
            }
        }
    }

    fn open_scope(&mut self, kind: ScopeKind, name: Option<String>, span: Span) {
        self.scopes.push(SymbolTable::new(name, kind, span));
    }

    /// Closes the innermost scope and installs it as `reference` on the
    /// entry named `owner_name` in the now-current scope.
    fn close_scope_into(&mut self, owner_name: &str) {
        let finished = self.scopes.pop().expect("matching open_scope call");
        if let Some(entry) = self.current_scope().symbols.get_mut(owner_name) {
            entry.reference = Some(Box::new(finished));
        }
    }

    /// Closes the innermost scope without installing it anywhere (for
    /// anonymous control-flow scopes that spec §3's `SymbolEntry` has no
    /// slot to own, since only declarations get entries).
    fn close_scope_discard(&mut self) {
        self.scopes.pop().expect("matching open_scope call");
    }

    /// Spec §4.3.2: checks the full enclosing-scope chain (shadowing
    /// included) before inserting, emitting `AlreadyDefined` on a hit.
    fn declare(&mut self, entry: SymbolEntry) {
        if let Some(existing) = self.lookup(&entry.name) {
            self.emit(
                DiagnosticCategory::AlreadyDefined,
                format!(
                    "'{}' is already defined at line {}",
                    entry.name, existing.line
                ),
                Span::synthetic(entry.line, entry.column),
            );
        }
        self.current_scope().declare(entry);
    }

    /// Declares without the duplicate check, returning whether a collision
    /// existed — used by constructor overloading, which has its own
    /// strict-match collision rule instead of plain name shadowing (spec
    /// §4.3.8).
    fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        for scope in self.scopes.iter().rev() {
            if let Some(entry) = scope.lookup_local(name) {
                return Some(entry);
            }
        }
        None
    }

    fn lookup_or_not_defined(&mut self, name: &str, span: Span) -> Option<VarType> {
        if let Some(entry) = self.lookup(name) {
            Some(entry.declared_type.clone())
        } else {
            self.emit(
                DiagnosticCategory::NotDefined,
                format!("'{name}' is not defined"),
                span,
            );
            None
        }
    }

    fn analyze_declaration(&mut self, node: &ParseNode) {
        let ty_node = node.details.first();
        let declared_type = ty_node.map(|ty| self.decode(ty)).unwrap_or_else(VarType::custom);
        let declared_type = declared_type.with_constant(node.kind == NodeKind::Constant);
        let visibility = node
            .left
            .as_deref()
            .map(|m| Visibility::from_modifier_text(&m.value))
            .unwrap_or(Visibility::PackageGlobal);

        if let Some(init) = node.right.as_deref() {
            if let Some(actual) = self.infer_expr_type(init) {
                if !declared_type.lenient_eq(&actual) {
                    self.emit(
                        DiagnosticCategory::TypeMismatch,
                        format!("expected {declared_type}, got {actual}"),
                        init.span,
                    );
                }
            }
        }

        let entry = SymbolEntry::new(node.value.clone(), declared_type, ScopeKind::Variable, node.span)
            .with_visibility(visibility);
        self.declare(entry);
    }

    fn analyze_function(&mut self, node: &ParseNode) {
        let return_type = node
            .details
            .first()
            .and_then(|rt| rt.details.first())
            .map(|ty| self.decode(ty))
            .unwrap_or_else(VarType::custom);
        let visibility = node
            .left
            .as_deref()
            .map(|m| Visibility::from_modifier_text(&m.value))
            .unwrap_or(Visibility::PackageGlobal);

        let entry = SymbolEntry::new(node.value.clone(), return_type, ScopeKind::Function, node.span)
            .with_visibility(visibility);
        self.declare(entry);

        self.open_scope(ScopeKind::Function, Some(node.value.clone()), node.span);
        for param in node.details.iter().skip(1).filter(|d| d.kind == NodeKind::Parameter) {
            self.declare_parameter(param);
        }
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_into(&node.value);
    }

    fn declare_parameter(&mut self, param: &ParseNode) {
        let ty = param.details.first().map(|ty| self.decode(ty)).unwrap_or_else(VarType::custom);
        let entry = SymbolEntry::new(param.value.clone(), ty, ScopeKind::Variable, param.span);
        self.current_scope().declare_param(entry);
    }

    /// Constructor overloading (spec §4.3.8): the new declaration's
    /// parameter-type tuple is strictly matched against every constructor
    /// already declared in the enclosing class's table; a full strict match
    /// emits `AlreadyDefined` instead of the ordinary name-collision check
    /// (constructors are all named `constructor`, so name-based shadowing
    /// would otherwise reject every overload).
    fn analyze_constructor(&mut self, node: &ParseNode) {
        let params: Vec<&ParseNode> = node
            .details
            .iter()
            .filter(|d| d.kind == NodeKind::Parameter)
            .collect();
        let param_types: Vec<VarType> = params
            .iter()
            .map(|p| p.details.first().map(|ty| self.decode(ty)).unwrap_or_else(VarType::custom))
            .collect();

        let collides = self.constructor_tuples().into_iter().any(|tuple| {
            tuple.len() == param_types.len()
                && tuple.iter().zip(&param_types).all(|(a, b)| a.strict_eq(b))
        });
        if collides {
            self.emit(
                DiagnosticCategory::AlreadyDefined,
                "a constructor with this parameter signature is already defined",
                node.span,
            );
        }

        let synthetic_name = self.synthetic_name("constructor");
        let entry = SymbolEntry::new(
            synthetic_name.clone(),
            VarType::custom(),
            ScopeKind::Constructor,
            node.span,
        );
        self.current_scope().declare(entry);

        self.open_scope(ScopeKind::Constructor, Some(synthetic_name.clone()), node.span);
        for param in params {
            self.declare_parameter(param);
        }
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_into(&synthetic_name);
    }

    /// Constructor parameter tuples recorded so far in the current class
    /// scope, keyed off entries named with the `constructor`/`constructor_N`
    /// synthetic scheme — reconstructed from each constructor entry's
    /// parameter list rather than a separate side table, keeping
    /// `SymbolTable` itself the single source of truth.
    fn constructor_tuples(&self) -> Vec<Vec<VarType>> {
        let Some(scope) = self.scopes.last() else {
            return Vec::new();
        };
        scope
            .symbols
            .values()
            .filter(|e| e.kind == ScopeKind::Constructor)
            .filter_map(|e| e.reference.as_deref())
            .map(|table| table.params.values().map(|p| p.declared_type.clone()).collect())
            .collect()
    }

    fn analyze_class(&mut self, node: &ParseNode) {
        let visibility = node
            .left
            .as_deref()
            .map(|m| Visibility::from_modifier_text(&m.value))
            .unwrap_or(Visibility::PackageGlobal);
        let entry = SymbolEntry::new(
            node.value.clone(),
            VarType::class_ref(node.value.clone()),
            ScopeKind::Class,
            node.span,
        )
        .with_visibility(visibility);
        self.declare(entry);

        self.open_scope(ScopeKind::Class, Some(node.value.clone()), node.span);
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_into(&node.value);
    }

    fn analyze_enum(&mut self, node: &ParseNode) {
        let entry = SymbolEntry::new(node.value.clone(), VarType::custom(), ScopeKind::Enum, node.span);
        self.declare(entry);

        self.open_scope(ScopeKind::Enum, Some(node.value.clone()), node.span);
        for enumerator in &node.details {
            let enumerator_entry = SymbolEntry::new(
                enumerator.value.clone(),
                VarType::scalar(BaseKind::Integer),
                ScopeKind::Enumerator,
                enumerator.span,
            );
            self.current_scope().declare(enumerator_entry);
        }
        self.close_scope_into(&node.value);
    }

    fn analyze_condition_scope(&mut self, node: &ParseNode, kind: ScopeKind, prefix: &'static str) {
        if let Some(condition) = node.left.as_deref() {
            if let Some(actual) = self.infer_expr_type(condition) {
                if !VarType::boolean().lenient_eq(&actual) {
                    self.emit(
                        DiagnosticCategory::TypeMismatch,
                        format!("expected {}, got {actual}", VarType::boolean()),
                        condition.span,
                    );
                }
            }
        }
        let name = self.synthetic_name(prefix);
        self.open_scope(kind, Some(name), node.span);
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_discard();
    }

    fn analyze_body_only_scope(&mut self, node: &ParseNode, kind: ScopeKind, prefix: &'static str) {
        let name = self.synthetic_name(prefix);
        self.open_scope(kind, Some(name), node.span);
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_discard();
    }

    fn analyze_for(&mut self, node: &ParseNode) {
        let name = self.synthetic_name("for");
        self.open_scope(ScopeKind::For, Some(name), node.span);
        if let Some(initializer) = node.left.as_deref() {
            self.analyze_statement(initializer);
        }
        if let Some(condition) = node.details.first() {
            self.infer_expr_type(condition);
        }
        if let Some(step) = node.details.get(1) {
            self.infer_expr_type(step);
        }
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_discard();
    }

    fn analyze_catch(&mut self, node: &ParseNode) {
        let name = self.synthetic_name("catch");
        self.open_scope(ScopeKind::Catch, Some(name), node.span);
        if let Some(param) = node.details.first() {
            self.declare_parameter(param);
        }
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_discard();
    }

    fn analyze_is(&mut self, node: &ParseNode) {
        if let Some(condition) = node.left.as_deref() {
            self.infer_expr_type(condition);
        }
        let name = self.synthetic_name("is");
        self.open_scope(ScopeKind::Is, Some(name), node.span);
        if let Some(body) = node.right.as_deref() {
            self.analyze_block(&body.details);
        }
        self.close_scope_discard();
    }

    fn analyze_include(&mut self, node: &ParseNode) {
        self.external_accesses.push(node.span);
        let entry = SymbolEntry::new(node.value.clone(), VarType::external(), ScopeKind::External, node.span);
        self.declare(entry);
    }

    /// Evaluates an expression subtree to its `VarType`, emitting
    /// diagnostics for member/class-access, function-call, and array-access
    /// violations along the way (spec §4.3.3-4.3.5). Returns `None` when the
    /// type is genuinely unknown (an undeclared name, or a subtree whose own
    /// error already prevents further inference).
    fn infer_expr_type(&mut self, node: &ParseNode) -> Option<VarType> {
        match node.kind {
            NodeKind::IntegerLiteral => Some(VarType::scalar(BaseKind::Integer)),
            NodeKind::FloatLiteral => Some(VarType::scalar(BaseKind::Float)),
            NodeKind::StringLiteral => Some(VarType::scalar(BaseKind::String)),
            NodeKind::CharLiteral => Some(self.decode_char_literal(&node.value)),
            NodeKind::BoolLiteral => Some(VarType::boolean()),
            NodeKind::NullLiteral => Some(VarType::scalar(BaseKind::Null)),
            NodeKind::This => self.current_class_type(),
            NodeKind::Identifier => self.lookup_or_not_defined(&node.value, node.span),
            NodeKind::UnaryOp => node.left.as_deref().and_then(|n| self.infer_expr_type(n)),
            NodeKind::BinaryOp => self.analyze_binary_op(node),
            NodeKind::Ternary => self.analyze_ternary(node),
            NodeKind::ArrayLiteral => self.analyze_array_literal(node),
            NodeKind::ArrayAssignment => node.left.as_deref().and_then(|n| self.infer_expr_type(n)),
            NodeKind::ArrayAccess => self.analyze_array_access(node),
            NodeKind::FunctionCall => self.analyze_function_call(node),
            NodeKind::ConstructorCall => self.analyze_constructor_call(node),
            NodeKind::MemClassAcc => node.left.as_deref().and_then(|n| self.infer_expr_type(n)),
            NodeKind::MemberAccess => self.analyze_member_access(node),
            _ => None,
        }
    }

    /// Spec §9's Open Question resolution: a one-character decoded literal
    /// is `Char`, anything longer is `String` (recorded in DESIGN.md).
    fn decode_char_literal(&self, text: &str) -> VarType {
        let decoded_len = unescape_len(text);
        if decoded_len == 1 {
            VarType::scalar(BaseKind::Char)
        } else {
            VarType::scalar(BaseKind::String)
        }
    }

    fn current_class_type(&self) -> Option<VarType> {
        self.scopes
            .iter()
            .rev()
            .find(|s| s.kind == ScopeKind::Class)
            .and_then(|s| s.name.clone())
            .map(VarType::class_ref)
    }

    fn analyze_binary_op(&mut self, node: &ParseNode) -> Option<VarType> {
        let op = node.value.as_str();
        let left = node.left.as_deref().and_then(|n| self.infer_expr_type(n));
        let right = node.right.as_deref().and_then(|n| self.infer_expr_type(n));

        if op == "is" {
            return Some(VarType::boolean());
        }
        if matches!(op, "==" | "!=" | "<" | ">" | "<=" | ">=" | "and" | "or") {
            return Some(VarType::boolean());
        }

        match (left, right) {
            (Some(l), Some(r)) => {
                if !l.lenient_eq(&r) {
                    self.emit(
                        DiagnosticCategory::TypeMismatch,
                        format!("expected {l}, got {r}"),
                        node.span,
                    );
                }
                Some(l)
            }
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    fn analyze_ternary(&mut self, node: &ParseNode) -> Option<VarType> {
        if let Some(condition) = node.left.as_deref() {
            self.infer_expr_type(condition);
        }
        let true_ty = node.right.as_deref().and_then(|n| self.infer_expr_type(n));
        let false_ty = node.details.first().and_then(|n| self.infer_expr_type(n));
        match (&true_ty, &false_ty) {
            (Some(t), Some(f)) if !t.lenient_eq(f) => {
                self.emit(
                    DiagnosticCategory::TypeMismatch,
                    format!("expected {t}, got {f}"),
                    node.span,
                );
            }
            _ => {}
        }
        true_ty.or(false_ty)
    }

    fn analyze_array_literal(&mut self, node: &ParseNode) -> Option<VarType> {
        let mut element_type = None;
        for element in &node.details {
            let ty = self.infer_expr_type(element);
            if element_type.is_none() {
                element_type = ty;
            }
        }
        element_type.map(|t| VarType {
            dimension: t.dimension + 1,
            ..t
        })
    }

    /// Spec §4.3.3: each `[...]` layer decrements `dimension`; going
    /// negative emits `NoSuchArrayDimension`.
    fn analyze_array_access(&mut self, node: &ParseNode) -> Option<VarType> {
        let receiver = node.left.as_deref().and_then(|n| self.infer_expr_type(n));
        if let Some(index) = node.right.as_deref() {
            self.infer_expr_type(index);
        }
        match receiver {
            Some(ty) => match ty.indexed() {
                Some(indexed) => Some(indexed),
                None => {
                    self.emit(
                        DiagnosticCategory::NoSuchArrayDimension,
                        format!("'{ty}' has no further array dimension to index"),
                        node.span,
                    );
                    None
                }
            },
            None => None,
        }
    }

    /// Spec §4.3.4: validates `.`/`->` usage and resolves the segment
    /// against the receiver's class/enum table, enforcing visibility (spec
    /// §4.3.6) along the way. `External` receivers short-circuit with the
    /// whole chain accepted and appended to the external-access list.
    fn analyze_member_access(&mut self, node: &ParseNode) -> Option<VarType> {
        let left_node = node.left.as_deref();
        let accessor = node.value.as_str();

        // `EnumName->Enumerator`: the receiver names the enum itself, not a
        // value of some field's type, so its member table lives on the
        // receiver's own entry rather than in the class registry.
        if let Some(enum_entry) = left_node
            .filter(|n| n.kind == NodeKind::Identifier)
            .and_then(|n| self.lookup(&n.value))
            .filter(|e| e.kind == ScopeKind::Enum)
            .cloned()
        {
            if accessor != "->" {
                self.emit(
                    DiagnosticCategory::WrongAccessor,
                    "enum values are reached with '->', not '.'",
                    node.span,
                );
            }
            if let Some(name) = segment_identifier_name(node.right.as_deref()) {
                let found = enum_entry
                    .reference
                    .as_deref()
                    .is_some_and(|t| t.symbols.contains_key(&name));
                if !found {
                    self.emit(
                        DiagnosticCategory::NotDefined,
                        format!("'{name}' is not defined on '{}'", enum_entry.name),
                        node.span,
                    );
                }
            }
            return Some(VarType::scalar(BaseKind::Integer));
        }

        let receiver_ty = left_node.and_then(|n| self.infer_expr_type(n))?;

        if receiver_ty.base == BaseKind::External {
            self.external_accesses.push(node.span);
            return Some(VarType::external());
        }

        let Some(class_name) = receiver_ty.class_ref.clone() else {
            // Not a class reference: only `.` is legal here (a plain field
            // or local lookup), never `->`.
            if accessor == "->" {
                self.emit(
                    DiagnosticCategory::WrongAccessor,
                    "'->' may only be used for class-scoped access",
                    node.span,
                );
            }
            return node.right.as_deref().and_then(|n| self.infer_expr_type(n));
        };

        // `ClassName->member` (the receiver is the bare class name itself,
        // naming the type, not an instance of it) is class-scoped access;
        // `instance.member` is ordinary instance access (spec §4.3.4).
        let receiver_is_class_name = left_node.is_some_and(|n| {
            n.kind == NodeKind::Identifier
                && self.lookup(&n.value).is_some_and(|e| e.kind == ScopeKind::Class)
        });

        let segment_name = segment_identifier_name(node.right.as_deref());
        let Some(signature) = self.registry.get(&class_name).cloned() else {
            self.emit(
                DiagnosticCategory::NotDefined,
                format!("'{class_name}' is not defined"),
                node.span,
            );
            return None;
        };

        let Some(segment_name) = segment_name else {
            return node.right.as_deref().and_then(|n| self.infer_expr_type(n));
        };

        let Some(member) = signature.members.get(&segment_name) else {
            self.emit(
                DiagnosticCategory::NotDefined,
                format!("'{segment_name}' is not defined on '{class_name}'"),
                node.span,
            );
            return None;
        };

        let correct_accessor = if receiver_is_class_name { "->" } else { "." };
        if accessor != correct_accessor {
            self.emit(
                DiagnosticCategory::WrongAccessor,
                format!("'{segment_name}' must be accessed with '{correct_accessor}'"),
                node.span,
            );
        }

        if !self.member_visible(&class_name, member.visibility) {
            self.emit(
                DiagnosticCategory::Modifier,
                format!("'{segment_name}' is not accessible from outside '{class_name}'"),
                node.span,
            );
        }

        if member.kind == ScopeKind::Function {
            if let Some(right) = node.right.as_deref() {
                if right.kind == NodeKind::FunctionCall {
                    self.check_call_arguments(right, &member.param_types);
                }
            }
        }

        Some(member.declared_type.clone())
    }

    /// Spec §4.3.6: same-class access is always permitted; from outside,
    /// only `PackageGlobal`/`Global` members are visible.
    fn member_visible(&self, class_name: &str, visibility: Visibility) -> bool {
        let in_same_class = self
            .scopes
            .iter()
            .any(|s| s.kind == ScopeKind::Class && s.name.as_deref() == Some(class_name));
        in_same_class || matches!(visibility, Visibility::PackageGlobal | Visibility::Global)
    }

    /// Spec §4.3.5: normal function calls use lenient argument matching.
    fn analyze_function_call(&mut self, node: &ParseNode) -> Option<VarType> {
        let name = &node.value;
        let Some(entry) = self.lookup(name).cloned() else {
            self.emit(
                DiagnosticCategory::NotDefined,
                format!("'{name}' is not defined"),
                node.span,
            );
            for arg in &node.details {
                self.infer_expr_type(arg);
            }
            return None;
        };

        if entry.kind != ScopeKind::Function {
            self.emit(
                DiagnosticCategory::TypeMismatch,
                format!(
                    "expected {}, got {}",
                    VarType::scalar(BaseKind::FunctionCallMarker),
                    VarType::scalar(BaseKind::NonFunctionCallMarker)
                ),
                node.span,
            );
        }

        let param_types: Vec<VarType> = entry
            .reference
            .as_deref()
            .map(|table| table.params.values().map(|p| p.declared_type.clone()).collect())
            .unwrap_or_default();
        self.check_call_arguments(node, &param_types);
        Some(entry.declared_type)
    }

    /// Spec §4.3.5: constructor calls (`new Foo(...)`) match strictly.
    fn analyze_constructor_call(&mut self, node: &ParseNode) -> Option<VarType> {
        let class_name = &node.value;
        let Some(signature) = self.registry.get(class_name).cloned() else {
            self.emit(
                DiagnosticCategory::NotDefined,
                format!("'{class_name}' is not defined"),
                node.span,
            );
            for arg in &node.details {
                self.infer_expr_type(arg);
            }
            return None;
        };

        let arg_types: Vec<Option<VarType>> =
            node.details.iter().map(|arg| self.infer_expr_type(arg)).collect();

        if signature.constructors.is_empty() && !node.details.is_empty() {
            self.emit(
                DiagnosticCategory::WrongArgument,
                format!("'{class_name}' declares no constructor accepting arguments"),
                node.span,
            );
        } else if !signature.constructors.is_empty() {
            let matches_strict = signature.constructors.iter().any(|tuple| {
                tuple.len() == arg_types.len()
                    && tuple.iter().zip(&arg_types).all(|(expected, actual)| {
                        actual.as_ref().map_or(true, |a| expected.strict_eq(a))
                    })
            });
            if !matches_strict {
                self.emit(
                    DiagnosticCategory::WrongArgument,
                    format!(
                        "no constructor of '{class_name}' accepts {} argument(s) of the given types",
                        node.details.len()
                    ),
                    node.span,
                );
            }
        }

        Some(VarType::class_ref(class_name.clone()))
    }

    /// Spec §4.3.5's per-argument check, shared by normal function calls and
    /// the function-typed side of a member-access call — both use lenient
    /// matching (strict matching is only for constructor resolution, handled
    /// separately in `analyze_constructor_call`).
    fn check_call_arguments(&mut self, call: &ParseNode, param_types: &[VarType]) {
        if call.details.len() != param_types.len() {
            self.emit(
                DiagnosticCategory::WrongArgument,
                format!(
                    "expected {} argument(s), got {}",
                    param_types.len(),
                    call.details.len()
                ),
                call.span,
            );
        }
        for (arg, expected) in call.details.iter().zip(param_types) {
            if let Some(actual) = self.infer_expr_type(arg) {
                if !expected.lenient_eq(&actual) {
                    self.emit(
                        DiagnosticCategory::TypeMismatch,
                        format!("expected {expected}, got {actual}"),
                        arg.span,
                    );
                }
            }
        }
    }
}

/// Pulls the bare identifier/call name out of a member-access segment, for
/// registry lookups. Returns `None` for a further `MemberAccess`/`MemClassAcc`
/// nested segment, whose own recursive `infer_expr_type` call handles it.
fn segment_identifier_name(segment: Option<&ParseNode>) -> Option<String> {
    match segment?.kind {
        NodeKind::Identifier | NodeKind::FunctionCall => Some(segment.unwrap().value.clone()),
        _ => None,
    }
}

/// Counts decoded characters in a char-array literal's raw text, honoring
/// `\`-escapes the same way the lexer consumed them (spec §9 Open Question).
fn unescape_len(raw: &str) -> usize {
    let mut count = 0;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacec_lex::Lexer;
    use spacec_par::parse_program;
    use spacec_util::Config;

    fn run(source: &str) -> (SymbolTable, Handler) {
        let tokens = Lexer::tokenize(source, Config::default()).unwrap();
        let root = parse_program(&tokens).unwrap();
        let handler = Handler::new();
        let table = analyze(&root, &handler);
        (table, handler)
    }

    #[test]
    fn assignment_type_check_produces_no_diagnostics() {
        let (table, handler) = run("var a:int = 3 + 4;");
        assert!(handler.is_empty());
        assert!(table.symbols.contains_key("a"));
    }

    #[test]
    fn type_mismatch_on_string_to_int_assignment() {
        let (_, handler) = run("var a:int = \"hi\";");
        assert!(!handler.is_empty());
    }

    #[test]
    fn constructor_overloading_flags_duplicate_signature() {
        let (_, handler) = run(
            "class Foo { this::constructor(x:int){} this::constructor(x:int){} }",
        );
        assert!(!handler.is_empty());
    }

    #[test]
    fn private_field_access_from_other_class_is_flagged() {
        let (_, handler) = run(
            "class A { private var x:int = 0; } class B { function:int f(){ return A->x; } }",
        );
        let diags = handler.into_diagnostics();
        assert!(diags.iter().any(|d| d.category == DiagnosticCategory::Modifier));
    }

    #[test]
    fn stray_break_outside_loop_is_flagged() {
        let (_, handler) = run("function:void f() { break; }");
        assert!(!handler.is_empty());
    }

    #[test]
    fn array_over_index_is_flagged() {
        let (_, handler) = run("var a:int[] = [1,2]; var b:int = a[0][0];");
        assert!(!handler.is_empty());
    }

    #[test]
    fn declare_before_use_allows_enclosing_scope_lookup() {
        let (_, handler) = run("var x:int = 1; function:int f(){ return x; }");
        assert!(handler.is_empty());
    }

    #[test]
    fn undefined_identifier_is_flagged() {
        let (_, handler) = run("var a:int = y;");
        assert!(!handler.is_empty());
    }
}
