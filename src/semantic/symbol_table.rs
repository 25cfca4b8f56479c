//! Symbol table
//!
//! One flat, program-wide namespace. Entries are only ever added, and
//! iteration follows declaration order.

use super::errors::SemanticError;
use crate::parser::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::trace;

/// Declared type of a symbol. The language only has integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolType {
    #[default]
    Int,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::Int => write!(f, "int"),
        }
    }
}

/// Metadata recorded for a declared variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub symbol_type: SymbolType,
    /// Compile-time value. Analysis never evaluates expressions, so this
    /// stays `None` for every symbol produced by `compile`.
    pub value: Option<i64>,
    pub declared_at: SourceLocation,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{{type: {}, value: {}}}", self.symbol_type, v),
            None => write!(f, "{{type: {}, value: None}}", self.symbol_type),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` to the table. Fails if it is already present.
    pub fn declare(
        &mut self,
        name: &str,
        symbol_type: SymbolType,
        location: SourceLocation,
    ) -> Result<&Symbol, SemanticError> {
        if let Some(existing) = self.lookup(name) {
            return Err(SemanticError::AlreadyDeclared {
                name: name.to_string(),
                location,
                previous: existing.declared_at,
            });
        }

        trace!(name, %symbol_type, "declared symbol");
        let slot = self.symbols.len();
        self.symbols.push(Symbol {
            name: name.to_string(),
            symbol_type,
            value: None,
            declared_at: location,
        });
        self.index.insert(name.to_string(), slot);
        Ok(&self.symbols[slot])
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    /// Like [`lookup`](Self::lookup), but a missing name is a
    /// [`SemanticError::NotDeclared`] reported at `location`.
    pub fn get(&self, name: &str, location: SourceLocation) -> Result<&Symbol, SemanticError> {
        self.lookup(name).ok_or_else(|| SemanticError::NotDeclared {
            name: name.to_string(),
            location,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.symbols.iter().map(|s| s.name.as_str()).collect()
    }
}
