//! Semantic error types
//!
//! [`SemanticError`] covers the declaration-before-use rule: a name may be
//! declared once, and must be declared before it is read or assigned.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Errors raised while checking declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// `var name = ...;` for a name that is already in the symbol table
    #[error("Variable {name} already declared at {location} (first declared at {previous})")]
    AlreadyDeclared {
        name: String,
        location: SourceLocation,
        previous: SourceLocation,
    },

    /// Read or assignment of a name that was never declared
    #[error("Variable {name} not declared at {location}")]
    NotDeclared {
        name: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn name(&self) -> &str {
        match self {
            SemanticError::AlreadyDeclared { name, .. } => name,
            SemanticError::NotDeclared { name, .. } => name,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            SemanticError::AlreadyDeclared { location, .. } => location,
            SemanticError::NotDeclared { location, .. } => location,
        }
    }
}
