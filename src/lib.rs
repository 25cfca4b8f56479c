//! # Introduction
//!
//! minicalc compiles a tiny imperative language of integer variables into
//! linear three-address code.
//!
//! ```text
//! var x = 3 + 4 * 2;      t1 = 4 * 2
//! x = x - 1;         →    t2 = 3 + t1
//!                         x = t2
//!                         t3 = x - 1
//!                         x = t3
//! ```
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Analyzer → Code Generator
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST.
//! 2. [`semantic`] — enforces declaration-before-use and builds the
//!    [`semantic::symbol_table::SymbolTable`].
//! 3. [`codegen`] — walks the same AST and emits
//!    [`codegen::Instruction`]s with fresh temporaries.
//! 4. [`compiler`] — [`compile`], the entry point tying the stages together.
//!
//! Compilation stops at the first error, reported as a
//! [`compiler::CompileError`].

pub mod codegen;
pub mod compiler;
pub mod parser;
pub mod semantic;

pub use compiler::{compile, CompileError, CompiledProgram};
