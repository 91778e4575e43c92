use spacec_lex::{Lexer, TokenKind};
use spacec_util::Config;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize(source, Config::default())
        .expect("lex")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("var x"),
        vec![TokenKind::KwVar, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn reference_declaration_joins_ampersand_to_identifier() {
    // `&Foo` is a reference type, not `&` followed by `Foo`.
    assert_eq!(
        kinds("&Foo"),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
    let tokens = Lexer::tokenize("&Foo", Config::default()).unwrap();
    assert_eq!(tokens[0].text, "&Foo");
}

#[test]
fn standalone_ampersand_when_not_followed_by_identifier() {
    assert_eq!(
        kinds("a & 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Ampersand,
            TokenKind::IntegerLiteral,
            TokenKind::Eof
        ]
    );
}

#[test]
fn pointer_declaration_joins_stars_to_identifier() {
    assert_eq!(
        kinds("**Node"),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
    let tokens = Lexer::tokenize("**Node", Config::default()).unwrap();
    assert_eq!(tokens[0].text, "**Node");
}

#[test]
fn star_stays_an_operator_before_a_number() {
    assert_eq!(
        kinds("a * 2"),
        vec![
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::IntegerLiteral,
            TokenKind::Eof
        ]
    );
}

#[test]
fn minus_joins_a_following_digit_as_a_sign() {
    let tokens = Lexer::tokenize("-5", Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].text, "-5");
}

#[test]
fn minus_stays_an_operator_between_two_expressions() {
    assert_eq!(
        kinds("a - 5"),
        vec![
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::IntegerLiteral,
            TokenKind::Eof
        ]
    );
}

#[test]
fn dot_between_digits_is_a_decimal_point() {
    let tokens = Lexer::tokenize("3.14", Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[0].text, "3.14");
}

#[test]
fn dot_after_identifier_is_member_access() {
    assert_eq!(
        kinds("a.b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn nested_block_comments_are_skipped() {
    assert_eq!(
        kinds("/* outer /* inner */ still outer */ var"),
        vec![TokenKind::KwVar, TokenKind::Eof]
    );
}

#[test]
fn unterminated_nested_comment_is_an_error() {
    let err = Lexer::tokenize("/* outer /* inner */ var", Config::default()).unwrap_err();
    assert!(matches!(
        err,
        spacec_util::error::LexError::UnterminatedComment(_)
    ));
}

#[test]
fn line_comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("var x; // trailing\nconst y;"),
        vec![
            TokenKind::KwVar,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::KwConst,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn string_literal_with_escaped_quote() {
    let tokens = Lexer::tokenize(r#""say \"hi\"""#, Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].text, r#""say \"hi\"""#);
}

#[test]
fn unterminated_string_is_an_error() {
    let err = Lexer::tokenize("\"never closed", Config::default()).unwrap_err();
    assert!(matches!(
        err,
        spacec_util::error::LexError::UnterminatedString(_)
    ));
}

#[test]
fn char_array_literal_of_any_length_is_one_token_kind() {
    assert_eq!(kinds("'a'"), vec![TokenKind::CharArrayLiteral, TokenKind::Eof]);
    assert_eq!(
        kinds("'abc'"),
        vec![TokenKind::CharArrayLiteral, TokenKind::Eof]
    );
}

#[test]
fn multi_char_operators_prefer_the_longest_match() {
    assert_eq!(
        kinds("a == b"),
        vec![
            TokenKind::Identifier,
            TokenKind::EqEq,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("a -> b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn slash_is_division_outside_of_a_comment() {
    assert_eq!(
        kinds("a / b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("a /= b"),
        vec![
            TokenKind::Identifier,
            TokenKind::SlashEq,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn bang_eq_lexes_as_not_eq() {
    assert_eq!(
        kinds("a != b"),
        vec![
            TokenKind::Identifier,
            TokenKind::NotEq,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn bare_bang_is_an_error() {
    let err = Lexer::tokenize("!", Config::default()).unwrap_err();
    assert!(matches!(
        err,
        spacec_util::error::LexError::UnknownCharacter { character: '!', .. }
    ));
}

#[test]
fn unknown_character_is_an_error() {
    let err = Lexer::tokenize("@", Config::default()).unwrap_err();
    assert!(matches!(
        err,
        spacec_util::error::LexError::UnknownCharacter { character: '@', .. }
    ));
}

#[test]
fn token_exceeding_max_length_is_an_error() {
    let config = Config { max_token_len: 4 };
    let err = Lexer::tokenize("identifier_too_long", config).unwrap_err();
    assert!(matches!(
        err,
        spacec_util::error::LexError::TokenTooLong { .. }
    ));
}

#[test]
fn lines_and_columns_are_tracked_across_newlines() {
    let tokens = Lexer::tokenize("var\nx;", Config::default()).unwrap();
    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[1].column(), 1);
}

quickcheck::quickcheck! {
    /// Any nonempty run of ASCII digits lexes as a single `IntegerLiteral`
    /// carrying exactly that text back out, whatever digits it is (spec
    /// §4.1 "a maximal run of digits").
    fn integer_literal_round_trips_its_digits(digits: Vec<u8>) -> bool {
        let text: String = digits
            .into_iter()
            .map(|b| (b'0' + b % 10) as char)
            .collect();
        if text.is_empty() {
            return true;
        }
        let tokens = Lexer::tokenize(&text, Config::default()).expect("digits always lex");
        tokens.len() == 2
            && tokens[0].kind == TokenKind::IntegerLiteral
            && tokens[0].text == text
            && tokens[1].kind == TokenKind::Eof
    }
}
