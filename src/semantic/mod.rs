//! Semantic analysis
//!
//! - [`symbol_table`]: declared names and their metadata
//! - [`analyzer`]: declaration-before-use checking over a parsed program
//! - [`errors`]: [`SemanticError`]

pub mod analyzer;
pub mod errors;
pub mod symbol_table;

pub use errors::SemanticError;
