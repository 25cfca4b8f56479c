//! minicalc source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! A program is a sequence of statements, each either `var name = expr;` or
//! `name = expr;`. Expressions are integer literals, variable references,
//! `+ - * /` with the usual precedence, and parentheses.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser; precedence comes from layering the
//! `expr`/`term`/`factor` rules. No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;
