//! The `compile` entry point
//!
//! Runs Lexer → Parser → Semantic Analyzer → Code Generator over one source
//! text. Each stage consumes its predecessor's full output, and the first
//! failure stops the pipeline.

use crate::codegen::generator;
use crate::codegen::Instruction;
use crate::parser::ast::SourceLocation;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::parser::{ParseError, Parser};
use crate::semantic::analyzer;
use crate::semantic::symbol_table::SymbolTable;
use crate::semantic::SemanticError;
use thiserror::Error;
use tracing::debug;

/// The single error value a failed compilation produces
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(ParseError),

    #[error("{0}")]
    Semantic(#[from] SemanticError),
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => CompileError::Lex(lex),
            other => CompileError::Parse(other),
        }
    }
}

impl CompileError {
    /// Short classification string used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "LexError",
            CompileError::Parse(_) => "ParseError",
            CompileError::Semantic(_) => "SemanticError",
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            CompileError::Lex(err) => err.location(),
            CompileError::Parse(err) => err.location(),
            CompileError::Semantic(err) => err.location(),
        }
    }
}

/// Output of a successful compilation
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub instructions: Vec<Instruction>,
    pub symbols: SymbolTable,
}

impl CompiledProgram {
    /// Instructions rendered as three-address text, one entry per line
    pub fn listing(&self) -> Vec<String> {
        self.instructions.iter().map(|i| i.to_string()).collect()
    }
}

/// Compile `source` into three-address code plus its symbol table.
///
/// A failure is returned to the caller, which decides how to report it; it
/// is only logged at debug level here.
pub fn compile(source: &str) -> Result<CompiledProgram, CompileError> {
    let result = run_pipeline(source);
    if let Err(err) = &result {
        debug!(kind = err.kind(), error = %err, "compilation failed");
    }
    result
}

fn run_pipeline(source: &str) -> Result<CompiledProgram, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(), "lexed source");

    let program = Parser::from_tokens(tokens).parse_program()?;

    let mut symbols = SymbolTable::new();
    analyzer::analyze(&program, &mut symbols)?;

    let instructions = generator::generate(&program);

    Ok(CompiledProgram {
        instructions,
        symbols,
    })
}
