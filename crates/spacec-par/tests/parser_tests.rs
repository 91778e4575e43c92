use spacec_lex::Lexer;
use spacec_par::{parse_program, NodeKind, ParseNode};
use spacec_util::Config;

fn parse(source: &str) -> ParseNode {
    let tokens = Lexer::tokenize(source, Config::default()).expect("lexing should succeed");
    parse_program(&tokens).expect("parsing should succeed")
}

fn only_statement(source: &str) -> ParseNode {
    let mut root = parse(source);
    assert_eq!(root.details.len(), 1, "expected exactly one top-level statement");
    root.details.remove(0)
}

#[test]
fn assignment_type_check_shape() {
    // spec §8 scenario 1.
    let decl = only_statement("var a:int = 3 + 4;");
    assert_eq!(decl.kind, NodeKind::Variable);
    assert_eq!(decl.value, "a");
    assert_eq!(decl.left.as_ref().unwrap().kind, NodeKind::Modifier);
    assert_eq!(decl.left.as_ref().unwrap().value, "");
    assert_eq!(decl.details[0].kind, NodeKind::Type);
    assert_eq!(decl.details[0].value, "int");

    let init = decl.right.unwrap();
    assert_eq!(init.kind, NodeKind::BinaryOp);
    assert_eq!(init.value, "+");
    assert_eq!(init.left.unwrap().value, "3");
    assert_eq!(init.right.unwrap().value, "4");
}

#[test]
fn type_mismatch_initializer_is_still_a_plain_string_literal_syntactically() {
    // spec §8 scenario 2 — type checking itself is the analyzer's job; the
    // builder only needs to produce a normal `Variable` with a string
    // initializer for the analyzer to later reject.
    let decl = only_statement(r#"var a:int = "hi";"#);
    assert_eq!(decl.kind, NodeKind::Variable);
    assert_eq!(decl.right.unwrap().kind, NodeKind::StringLiteral);
}

#[test]
fn multiplication_binds_tighter_than_a_deferred_addition() {
    let expr = only_statement("1 + 2 * 3;");
    assert_eq!(expr.kind, NodeKind::BinaryOp);
    assert_eq!(expr.value, "+");
    assert_eq!(expr.left.unwrap().value, "1");
    let rhs = expr.right.unwrap();
    assert_eq!(rhs.kind, NodeKind::BinaryOp);
    assert_eq!(rhs.value, "*");
    assert_eq!(rhs.left.unwrap().value, "2");
    assert_eq!(rhs.right.unwrap().value, "3");
}

#[test]
fn parenthesized_term_is_built_recursively() {
    let expr = only_statement("(1 + 2) * 3;");
    assert_eq!(expr.kind, NodeKind::BinaryOp);
    assert_eq!(expr.value, "*");
    let lhs = expr.left.unwrap();
    assert_eq!(lhs.kind, NodeKind::BinaryOp);
    assert_eq!(lhs.value, "+");
}

#[test]
fn and_or_chain_without_parens_associates_left_to_right() {
    let if_node = only_statement("if (a and b or c) { return true; }");
    assert_eq!(if_node.kind, NodeKind::If);
    let condition = if_node.left.unwrap();
    // `((a and b) or c)`
    assert_eq!(condition.kind, NodeKind::BinaryOp);
    assert_eq!(condition.value, "or");
    let lhs = condition.left.unwrap();
    assert_eq!(lhs.kind, NodeKind::BinaryOp);
    assert_eq!(lhs.value, "and");
    assert_eq!(condition.right.unwrap().value, "c");
}

#[test]
fn leading_paren_recurses_one_full_level_into_the_chain_grammar() {
    let if_node = only_statement("if ((a or b) and c) { return true; }");
    let condition = if_node.left.unwrap();
    assert_eq!(condition.kind, NodeKind::BinaryOp);
    assert_eq!(condition.value, "and");
    let lhs = condition.left.unwrap();
    assert_eq!(lhs.kind, NodeKind::BinaryOp);
    assert_eq!(lhs.value, "or");
    assert_eq!(lhs.left.unwrap().value, "a");
    assert_eq!(lhs.right.unwrap().value, "b");
    assert_eq!(condition.right.unwrap().value, "c");
}

#[test]
fn relational_comparison_is_a_condition_leaf() {
    let while_node = only_statement("while (x <= 10) { break; }");
    let condition = while_node.left.unwrap();
    assert_eq!(condition.kind, NodeKind::BinaryOp);
    assert_eq!(condition.value, "<=");
}

#[test]
fn not_eq_is_a_condition_leaf() {
    let while_node = only_statement("while (x != 10) { break; }");
    let condition = while_node.left.unwrap();
    assert_eq!(condition.kind, NodeKind::BinaryOp);
    assert_eq!(condition.value, "!=");
}

#[test]
fn member_and_class_access_chain_is_left_deep_under_one_root() {
    let expr = only_statement("a.b->c;");
    assert_eq!(expr.kind, NodeKind::MemClassAcc);
    let outer = expr.left.unwrap();
    assert_eq!(outer.kind, NodeKind::MemberAccess);
    assert_eq!(outer.value, "->");
    assert_eq!(outer.right.unwrap().value, "c");
    let inner = outer.left.unwrap();
    assert_eq!(inner.kind, NodeKind::MemberAccess);
    assert_eq!(inner.value, ".");
    assert_eq!(inner.left.unwrap().value, "a");
    assert_eq!(inner.right.unwrap().value, "b");
}

#[test]
fn bare_identifier_is_never_wrapped_in_a_mem_class_acc_root() {
    let expr = only_statement("a;");
    assert_eq!(expr.kind, NodeKind::Identifier);
}

#[test]
fn call_inside_an_access_chain_is_supported() {
    let expr = only_statement("foo.bar().baz;");
    assert_eq!(expr.kind, NodeKind::MemClassAcc);
    let outer = expr.left.unwrap(); // `.baz`
    assert_eq!(outer.value, ".");
    assert_eq!(outer.right.unwrap().kind, NodeKind::Identifier);
    let inner = outer.left.unwrap(); // `foo.bar()`
    assert_eq!(inner.value, ".");
    let call = inner.right.unwrap();
    assert_eq!(call.kind, NodeKind::FunctionCall);
    assert_eq!(call.value, "bar");
}

#[test]
fn array_accesses_chain_receiver_and_index_left_deep() {
    let expr = only_statement("a[0][1];");
    assert_eq!(expr.kind, NodeKind::ArrayAccess);
    assert_eq!(expr.right.as_ref().unwrap().value, "1");
    let inner = expr.left.unwrap();
    assert_eq!(inner.kind, NodeKind::ArrayAccess);
    assert_eq!(inner.left.unwrap().kind, NodeKind::Identifier);
    assert_eq!(inner.right.unwrap().value, "0");
}

#[test]
fn over_indexed_array_access_is_still_syntactically_valid() {
    // spec §8 scenario 6 — the dimension bound is a semantic property; the
    // builder has no notion of a declared dimension to reject against.
    let decl = only_statement("var b:int = a[0][0];");
    assert_eq!(decl.kind, NodeKind::Variable);
}

#[test]
fn function_call_produces_a_function_call_node() {
    let expr = only_statement("foo(1, 2);");
    assert_eq!(expr.kind, NodeKind::FunctionCall);
    assert_eq!(expr.value, "foo");
    assert_eq!(expr.details.len(), 2);
}

#[test]
fn new_on_the_right_hand_side_makes_an_instance_variable() {
    let decl = only_statement("var a:Foo = new Foo(1);");
    assert_eq!(decl.kind, NodeKind::InstanceVariable);
    let init = decl.right.unwrap();
    assert_eq!(init.kind, NodeKind::ConstructorCall);
    assert_eq!(init.value, "Foo");
    assert_eq!(init.details.len(), 1);
}

#[test]
fn bracketed_initializer_makes_an_array_variable() {
    let decl = only_statement("var a:int = [1, 2, 3];");
    assert_eq!(decl.kind, NodeKind::ArrayVariable);
    let init = decl.right.unwrap();
    assert_eq!(init.kind, NodeKind::ArrayLiteral);
    assert_eq!(init.details.len(), 3);
    assert_eq!(init.details[0].kind, NodeKind::ArrayAssignment);
}

#[test]
fn question_mark_initializer_makes_a_conditional_variable() {
    let decl = only_statement("var a:int = b ? 1 : 2;");
    assert_eq!(decl.kind, NodeKind::ConditionalVariable);
    let init = decl.right.unwrap();
    assert_eq!(init.kind, NodeKind::Ternary);
    assert_eq!(init.right.unwrap().value, "1");
    assert_eq!(init.details[0].value, "2");
}

#[test]
fn enum_values_auto_assign_from_zero_and_restart_after_an_explicit_value() {
    let enum_node = only_statement("enum Color { Red, Green : 5, Blue }");
    assert_eq!(enum_node.kind, NodeKind::Enum);
    assert_eq!(enum_node.value, "Color");
    assert_eq!(enum_node.details.len(), 3);
    assert_eq!(enum_node.details[0].value, "Red");
    assert_eq!(enum_node.details[0].right.as_ref().unwrap().value, "0");
    assert_eq!(enum_node.details[1].value, "Green");
    assert_eq!(enum_node.details[1].right.as_ref().unwrap().value, "5");
    assert_eq!(enum_node.details[2].value, "Blue");
    assert_eq!(enum_node.details[2].right.as_ref().unwrap().value, "6");
}

#[test]
fn include_path_is_a_left_deep_member_access_tree() {
    let node = only_statement("include std.io.file;");
    assert_eq!(node.kind, NodeKind::Include);
    assert_eq!(node.value, "std.io.file");
    let path = node.left.unwrap();
    assert_eq!(path.kind, NodeKind::MemberAccess);
    assert_eq!(path.right.unwrap().value, "file");
}

#[test]
fn constructor_overloading_syntax_produces_two_constructor_nodes() {
    // spec §8 scenario 3 — detecting the collision is the analyzer's job;
    // the builder just needs to hand it two distinguishable constructors.
    let class_node = only_statement(
        "class Foo { this::constructor(x:int){} this::constructor(x:int){} }",
    );
    assert_eq!(class_node.kind, NodeKind::Class);
    let body = class_node.right.unwrap();
    assert_eq!(body.details.len(), 2);
    for constructor in &body.details {
        assert_eq!(constructor.kind, NodeKind::Constructor);
        assert_eq!(constructor.details[0].kind, NodeKind::ConstructorParamMarker);
        assert_eq!(constructor.details[1].kind, NodeKind::Parameter);
        assert_eq!(constructor.details[1].value, "x");
    }
}

#[test]
fn private_field_and_cross_class_arrow_access_parse_shape() {
    // spec §8 scenario 4.
    let mut root = parse(
        "class A { private var x:int = 0; } \
         class B { function:int f(){ return A->x; } }",
    );
    assert_eq!(root.details.len(), 2);
    let class_a = root.details.remove(0);
    let field = &class_a.right.as_ref().unwrap().details[0];
    assert_eq!(field.kind, NodeKind::Variable);
    assert_eq!(field.left.as_ref().unwrap().value, "private");

    let class_b = &root.details[0];
    let function = &class_b.right.as_ref().unwrap().details[0];
    assert_eq!(function.kind, NodeKind::Function);
    let return_stmt = &function.right.as_ref().unwrap().details[0];
    assert_eq!(return_stmt.kind, NodeKind::Return);
    let access = return_stmt.left.as_ref().unwrap();
    assert_eq!(access.kind, NodeKind::MemClassAcc);
    assert_eq!(access.left.as_ref().unwrap().value, "->");
}

#[test]
fn stray_break_still_parses_the_function_body() {
    // spec §8 scenario 5 — placement is checked by the analyzer.
    let function = only_statement("function:void f() { break; }");
    assert_eq!(function.kind, NodeKind::Function);
    assert_eq!(function.details[0].kind, NodeKind::ReturnType);
    let body = function.right.unwrap();
    assert_eq!(body.details[0].kind, NodeKind::Break);
}

#[test]
fn for_loop_places_init_condition_step_and_body_in_their_slots() {
    let for_node = only_statement("for (var i:int = 0; i <= 10; i = i + 1) { break; }");
    assert_eq!(for_node.kind, NodeKind::For);
    assert_eq!(for_node.left.unwrap().kind, NodeKind::Variable);
    assert_eq!(for_node.details[0].kind, NodeKind::BinaryOp); // condition
    assert_eq!(for_node.details[1].kind, NodeKind::BinaryOp); // step
    assert_eq!(for_node.right.unwrap().kind, NodeKind::Runnable);
}

#[test]
fn try_catch_puts_the_caught_parameter_in_catchs_details() {
    let mut root = parse("try { foo(); } catch (e:Exception) { bar(); }");
    assert_eq!(root.details.len(), 2);
    let try_node = root.details.remove(0);
    assert_eq!(try_node.kind, NodeKind::Try);
    let catch_node = &root.details[0];
    assert_eq!(catch_node.kind, NodeKind::Catch);
    assert_eq!(catch_node.details[0].kind, NodeKind::Parameter);
    assert_eq!(catch_node.details[0].value, "e");
}

#[test]
fn compound_assignment_is_folded_into_an_expression_statement() {
    let node = only_statement("a += 1;");
    assert_eq!(node.kind, NodeKind::BinaryOp);
    assert_eq!(node.value, "+=");
}

#[test]
fn class_with_inheritance_and_interfaces_places_them_in_details() {
    let class_node = only_statement("class Dog extends Animal with Runnable, Named { }");
    assert_eq!(class_node.kind, NodeKind::Class);
    assert_eq!(class_node.details[0].kind, NodeKind::Inheritance);
    assert_eq!(class_node.details[0].value, "Animal");
    assert_eq!(class_node.details[1].kind, NodeKind::Interface);
    assert_eq!(class_node.details[1].value, "Runnable");
    assert_eq!(class_node.details[2].kind, NodeKind::Interface);
    assert_eq!(class_node.details[2].value, "Named");
}

#[test]
fn check_is_narrows_to_an_is_typed_condition() {
    let check_node = only_statement("check (a is Animal) { bark(); }");
    assert_eq!(check_node.kind, NodeKind::Is);
    let condition = check_node.left.unwrap();
    assert_eq!(condition.kind, NodeKind::BinaryOp);
    assert_eq!(condition.value, "is");
    assert_eq!(condition.left.unwrap().kind, NodeKind::Identifier);
    assert_eq!(condition.right.unwrap().kind, NodeKind::Type);
    assert_eq!(check_node.right.unwrap().kind, NodeKind::Runnable);
}
