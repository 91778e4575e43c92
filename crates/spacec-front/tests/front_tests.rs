use spacec_front::{compile, Stage};
use spacec_util::Config;
use spacec_util::diagnostic::DiagnosticCategory;

#[test]
fn assignment_type_check_end_to_end() {
    let out = compile("var a:int = 3 + 4;", Config::default(), Stage::Analyze).unwrap();
    assert!(!out.has_errors());
    let table = out.symbol_table.expect("analysis ran");
    assert!(table.symbols.contains_key("a"));
}

#[test]
fn type_mismatch_end_to_end() {
    let out = compile(r#"var a:int = "hi";"#, Config::default(), Stage::Analyze).unwrap();
    assert!(out.has_errors());
}

#[test]
fn constructor_overloading_end_to_end() {
    let out = compile(
        "class Foo { this::constructor(x:int){} this::constructor(x:int){} }",
        Config::default(),
        Stage::Analyze,
    )
    .unwrap();
    assert!(out.has_errors());
}

#[test]
fn private_access_across_classes_end_to_end() {
    let out = compile(
        "class A { private var x:int = 0; } class B { function:int f(){ return A->x; } }",
        Config::default(),
        Stage::Analyze,
    )
    .unwrap();
    assert!(out.diagnostics.iter().any(|d| d.category == DiagnosticCategory::Modifier));
}

#[test]
fn stray_break_end_to_end() {
    let out = compile("function:void f() { break; }", Config::default(), Stage::Analyze).unwrap();
    assert!(out.has_errors());
}

#[test]
fn array_over_index_end_to_end() {
    let out = compile(
        "var a:int[] = [1, 2]; var b:int = a[0][0];",
        Config::default(),
        Stage::Analyze,
    )
    .unwrap();
    assert!(out.has_errors());
}

#[test]
fn unterminated_string_is_a_fatal_error_not_a_diagnostic() {
    let err = compile("var a:int = \"oops", Config::default(), Stage::Analyze).unwrap_err();
    assert!(matches!(err, spacec_util::FrontEndError::Lex(_)));
}

#[test]
fn unterminated_block_comment_is_a_fatal_error() {
    let err = compile("/* never closed", Config::default(), Stage::Analyze).unwrap_err();
    assert!(matches!(err, spacec_util::FrontEndError::Lex(_)));
}

#[test]
fn tokens_stage_never_touches_the_parser_or_analyzer() {
    let out = compile("class A { }", Config::default(), Stage::Tokens).unwrap();
    assert!(out.tree.is_none());
    assert!(out.symbol_table.is_none());
    assert!(out.diagnostics.is_empty());
}

#[test]
fn external_accesses_accumulate_in_declaration_order() {
    let out = compile(
        "include std.io; include std.collections;",
        Config::default(),
        Stage::Analyze,
    )
    .unwrap();
    assert_eq!(out.external_accesses.len(), 2);
    assert!(out.external_accesses[0].start < out.external_accesses[1].start);
}
