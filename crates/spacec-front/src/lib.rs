//! spacec-front - the driver that threads the three phases together.
//!
//! Grounded on the teacher's `faxc-drv::Session`/`Session::compile` shape: a
//! struct holding shared configuration, one `compile` method running every
//! phase in order with an early-return per stage (the teacher's own
//! `EmitType::Tokens`/`Ast`/... short-circuits become this crate's
//! `Stage::Tokens`/`Tree`/`Analyze`). Unlike the teacher, nothing here reads
//! a file or parses a CLI flag — spec §1 treats file I/O and argument
//! parsing as external collaborators, so `Context` carries only the one
//! configuration knob (`spacec_util::Config`) this system actually has, and
//! `compile` takes an in-memory source buffer rather than a path.

use spacec_lex::{Lexer, Token};
use spacec_par::{parse_program, ParseNode};
use spacec_sem::{analyze_with_externals, SymbolTable};
use spacec_util::error::FrontEndError;
use spacec_util::{Config, Diagnostic, Handler, Span};

/// How far through the pipeline to run before returning, mirroring the
/// teacher's `EmitType` early-return stages but narrowed to this spec's
/// three phases (no HIR/MIR/LIR/asm — spec §1 excludes downstream codegen
/// entirely).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Stop after lexing; only the token stream is produced.
    Tokens,
    /// Stop after tree building; no symbol table or diagnostics.
    Tree,
    /// Run the full pipeline, including semantic analysis.
    Analyze,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Analyze
    }
}

/// Everything a successful run through `Stage::Analyze` produces. Earlier
/// stages leave the fields they didn't reach at their default.
pub struct CompileOutcome {
    pub tokens: Vec<Token>,
    pub tree: Option<ParseNode>,
    pub symbol_table: Option<SymbolTable>,
    pub external_accesses: Vec<Span>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }
}

/// The driver's only piece of shared state: the lexer/builder configuration
/// knob. A fresh `Handler` is opened per `compile` call rather than carried
/// on `Context` itself — diagnostics belong to one run, not to the driver's
/// lifetime — so there is nothing left for `Context` to own across calls
/// except `Config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline over an in-memory source buffer up to `stage`,
    /// threading lexer → tree builder → analyzer (spec §2). A fatal lexer or
    /// parser error short-circuits the whole run (spec §9: "fatal errors are
    /// a distinct failure result"); semantic errors never do — they
    /// accumulate in `CompileOutcome::diagnostics` and the run still returns
    /// `Ok`.
    pub fn compile(&self, source: &str, stage: Stage) -> Result<CompileOutcome, FrontEndError> {
        tracing::debug!(stage = ?stage, bytes = source.len(), "compilation starting");

        let tokens = Lexer::tokenize(source, self.config)?;
        tracing::debug!(tokens = tokens.len(), "lexing complete");
        if stage == Stage::Tokens {
            return Ok(CompileOutcome {
                tokens,
                tree: None,
                symbol_table: None,
                external_accesses: Vec::new(),
                diagnostics: Vec::new(),
            });
        }

        let tree = parse_program(&tokens)?;
        tracing::debug!(top_level_statements = tree.details.len(), "parse tree built");
        if stage == Stage::Tree {
            return Ok(CompileOutcome {
                tokens,
                tree: Some(tree),
                symbol_table: None,
                external_accesses: Vec::new(),
                diagnostics: Vec::new(),
            });
        }

        let handler = Handler::new();
        let (symbol_table, external_accesses) = analyze_with_externals(&tree, &handler);
        let diagnostics = handler.into_diagnostics();
        tracing::debug!(diagnostics = diagnostics.len(), "semantic analysis complete");

        Ok(CompileOutcome {
            tokens,
            tree: Some(tree),
            symbol_table: Some(symbol_table),
            external_accesses,
            diagnostics,
        })
    }
}

/// Convenience wrapper for callers that don't need a reusable `Context`
/// (most tests, one-shot embeddings).
pub fn compile(source: &str, config: Config, stage: Stage) -> Result<CompileOutcome, FrontEndError> {
    Context::new(config).compile(source, stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_stage_stops_before_parsing() {
        let out = compile("var a:int = 1;", Config::default(), Stage::Tokens).unwrap();
        assert!(!out.tokens.is_empty());
        assert!(out.tree.is_none());
    }

    #[test]
    fn tree_stage_stops_before_analysis() {
        let out = compile("var a:int = 1;", Config::default(), Stage::Tree).unwrap();
        assert!(out.tree.is_some());
        assert!(out.symbol_table.is_none());
    }

    #[test]
    fn analyze_stage_runs_the_full_pipeline() {
        let out = compile("var a:int = 1;", Config::default(), Stage::Analyze).unwrap();
        assert!(out.symbol_table.is_some());
        assert!(!out.has_errors());
    }

    #[test]
    fn fatal_lexer_error_short_circuits_the_whole_run() {
        let err = compile("\"never closed", Config::default(), Stage::Analyze).unwrap_err();
        assert!(matches!(err, FrontEndError::Lex(_)));
    }

    #[test]
    fn semantic_errors_do_not_fail_the_run() {
        let out = compile(r#"var a:int = "hi";"#, Config::default(), Stage::Analyze).unwrap();
        assert!(out.has_errors());
    }

    #[test]
    fn include_targets_are_collected_into_the_external_access_list() {
        let out = compile("include std.io;", Config::default(), Stage::Analyze).unwrap();
        assert_eq!(out.external_accesses.len(), 1);
    }

    #[test]
    fn a_context_can_be_reused_across_multiple_compiles() {
        let ctx = Context::new(Config::default());
        let a = ctx.compile("var a:int = 1;", Stage::Analyze).unwrap();
        let b = ctx.compile("var b:int = 2;", Stage::Analyze).unwrap();
        assert!(!a.has_errors());
        assert!(!b.has_errors());
    }
}
