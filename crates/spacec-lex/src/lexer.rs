//! The lexer: character stream to token stream (spec §4.1).
//!
//! Implemented as a single forward pass that pushes tokens into a growable
//! `Vec` as they're recognized. The distilled spec describes a
//! sizing-then-materializing two-pass scheme, which is how the C original
//! had to work (it must `malloc` the token array up front); a `Vec` makes
//! that preallocation step unnecessary, so this lexer collapses it to one
//! pass — the same kind of C-memory-management artifact the "ownership
//! tree instead of raw pointers" design note (spec §9) asks to be
//! generalized away elsewhere. See DESIGN.md.

use spacec_util::error::LexError;
use spacec_util::{Config, Span};

use crate::cursor::Cursor;
use crate::token::{keyword_kind_for, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    config: Config,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: Config) -> Self {
        Self {
            cursor: Cursor::new(source),
            config,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Tokenize the whole buffer, producing an ordered token sequence
    /// terminated by `TokenKind::Eof`.
    pub fn tokenize(source: &'a str, config: Config) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source, config);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tracing::debug!(tokens = tokens.len(), "lexing complete");
        Ok(tokens)
    }

    fn start_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    fn mark_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    fn check_length(&self) -> Result<(), LexError> {
        let len = self.cursor.position() - self.token_start;
        if len > self.config.max_token_len {
            return Err(LexError::TokenTooLong {
                span: self.start_span(),
                max: self.config.max_token_len,
            });
        }
        Ok(())
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.mark_start();

        if self.cursor.is_at_end() {
            return Ok(Token::eof(self.start_span()));
        }

        let token = match self.cursor.current() {
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'?' => self.single(TokenKind::Question),

            b':' => self.single(TokenKind::Colon),
            b'.' => self.single(TokenKind::Dot),

            b'+' => self.lex_plus(),
            b'-' => self.lex_minus(),
            b'*' => self.lex_star_or_pointer(),
            b'/' => self.lex_slash(),
            b'%' => self.single(TokenKind::Percent),
            b'=' => self.lex_equals(),
            b'<' => self.lex_less(),
            b'>' => self.lex_greater(),
            b'&' => self.lex_ampersand(),
            b'!' => return self.lex_bang(),

            b'"' => return self.lex_string(),
            b'\'' => return self.lex_char_array(),

            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),

            c => {
                return Err(LexError::UnknownCharacter {
                    character: c as char,
                    span: self.start_span(),
                })
            }
        };

        self.check_length()?;
        Ok(token)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.make(kind)
    }

    fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.eat(b'+') {
            self.make(TokenKind::PlusPlus)
        } else if self.cursor.eat(b'=') {
            self.make(TokenKind::PlusEq)
        } else {
            self.make(TokenKind::Plus)
        }
    }

    /// `-` is a sign (joins a following numeric literal) rather than the
    /// subtraction operator whenever a digit immediately follows it (spec
    /// §4.1 disambiguation rule).
    fn lex_minus(&mut self) -> Token {
        if self.cursor.peek(1).is_ascii_digit() {
            return self.lex_number();
        }

        self.cursor.advance();
        if self.cursor.eat(b'-') {
            self.make(TokenKind::MinusMinus)
        } else if self.cursor.eat(b'=') {
            self.make(TokenKind::MinusEq)
        } else if self.cursor.eat(b'>') {
            self.make(TokenKind::Arrow)
        } else {
            self.make(TokenKind::Minus)
        }
    }

    /// `*` joins a following identifier run (pointer-declaration form,
    /// possibly through more `*`s) instead of acting as the multiplication
    /// operator whenever an identifier-start character eventually follows.
    fn lex_star_or_pointer(&mut self) -> Token {
        let mut lookahead = 0usize;
        while self.cursor.peek(lookahead) == b'*' {
            lookahead += 1;
        }
        if is_ident_start(self.cursor.peek(lookahead)) {
            return self.lex_identifier();
        }

        self.cursor.advance();
        if self.cursor.eat(b'=') {
            self.make(TokenKind::StarEq)
        } else {
            self.make(TokenKind::Star)
        }
    }

    /// Reached only for a bare `/`: `skip_whitespace_and_comments` has
    /// already consumed `//` and `/* */` forms before dispatch runs.
    fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.eat(b'=') {
            self.make(TokenKind::SlashEq)
        } else {
            self.make(TokenKind::Slash)
        }
    }

    fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.eat(b'=') {
            self.make(TokenKind::EqEq)
        } else if self.cursor.eat(b'>') {
            self.make(TokenKind::FatArrow)
        } else {
            self.make(TokenKind::Assign)
        }
    }

    fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.eat(b'=') {
            self.make(TokenKind::LtEq)
        } else {
            self.make(TokenKind::Lt)
        }
    }

    fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.eat(b'=') {
            self.make(TokenKind::GtEq)
        } else {
            self.make(TokenKind::Gt)
        }
    }

    /// `&` joins a following identifier run (reference-to-expression form)
    /// instead of standing alone whenever an identifier-start character
    /// follows.
    fn lex_ampersand(&mut self) -> Token {
        if is_ident_start(self.cursor.peek(1)) {
            return self.lex_identifier();
        }
        self.cursor.advance();
        self.make(TokenKind::Ampersand)
    }

    /// `!=` is the only token a leading `!` can form — bare `!` is not in
    /// the language's operator set (spec §6), so it is a lex error rather
    /// than a standalone token.
    fn lex_bang(&mut self) -> Result<Token, LexError> {
        let start = self.start_span();
        self.cursor.advance();
        if self.cursor.eat(b'=') {
            let token = self.make(TokenKind::NotEq);
            self.check_length()?;
            Ok(token)
        } else {
            Err(LexError::UnknownCharacter {
                character: '!',
                span: start,
            })
        }
    }

    fn lex_identifier(&mut self) -> Token {
        // Consume any leading &/* run first (reference/pointer joining),
        // then the identifier body itself.
        while matches!(self.cursor.current(), b'&' | b'*') {
            self.cursor.advance();
        }
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }

        let span = self.start_span();
        let text = self.cursor.slice_from(self.token_start);
        let kind = keyword_kind_for(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, span)
    }

    /// Consumes an integer or float literal, including a leading `-` sign
    /// when this was reached via `lex_minus`'s disambiguation.
    fn lex_number(&mut self) -> Token {
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let span = self.start_span();
        let text = self.cursor.slice_from(self.token_start);
        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        Token::new(kind, text, span)
    }

    /// Consumes a double-quoted string literal. No token boundaries apply
    /// inside it until the matching unescaped `"`; a preceding `\` escapes
    /// the next character (spec §4.1).
    fn lex_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString(self.start_span()));
            }
            match self.cursor.advance() {
                b'\\' => {
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                }
                b'"' => break,
                _ => {}
            }
        }

        let span = self.start_span();
        let text = self.cursor.slice_from(self.token_start);
        self.check_length()?;
        Ok(Token::new(TokenKind::StringLiteral, text, span))
    }

    /// Consumes a single-quoted character-array literal, with the same
    /// escaping rule as strings.
    fn lex_char_array(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString(self.start_span()));
            }
            match self.cursor.advance() {
                b'\\' => {
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                }
                b'\'' => break,
                _ => {}
            }
        }

        let span = self.start_span();
        let text = self.cursor.slice_from(self.token_start);
        self.check_length()?;
        Ok(Token::new(TokenKind::CharArrayLiteral, text, span))
    }

    fn make(&mut self, kind: TokenKind) -> Token {
        let span = self.start_span();
        let text = self.cursor.slice_from(self.token_start);
        Token::new(kind, text, span)
    }

    /// Skips whitespace, `//` line comments, and (possibly nested) `/* */`
    /// block comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                }
                b'/' if self.cursor.peek(1) == b'/' => {
                    while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
                        self.cursor.advance();
                    }
                }
                b'/' if self.cursor.peek(1) == b'*' => {
                    let comment_start = self.cursor.line();
                    let comment_col = self.cursor.column();
                    self.cursor.advance();
                    self.cursor.advance();
                    let mut depth = 1u32;

                    while depth > 0 {
                        if self.cursor.is_at_end() {
                            return Err(LexError::UnterminatedComment(Span::new(
                                0,
                                0,
                                comment_start,
                                comment_col,
                            )));
                        }
                        if self.cursor.current() == b'/' && self.cursor.peek(1) == b'*' {
                            self.cursor.advance();
                            self.cursor.advance();
                            depth += 1;
                        } else if self.cursor.current() == b'*' && self.cursor.peek(1) == b'/' {
                            self.cursor.advance();
                            self.cursor.advance();
                            depth -= 1;
                        } else {
                            self.cursor.advance();
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
