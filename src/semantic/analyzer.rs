//! Declaration-before-use checking
//!
//! A pre-order walk over each statement in order. The symbol table is passed
//! down explicitly and is the only state the walk touches.

use super::errors::SemanticError;
use super::symbol_table::{SymbolTable, SymbolType};
use crate::parser::ast::{Expr, Program, Statement};
use tracing::debug;

/// Check every statement of `program`, declaring names into `symbols` as
/// `var` statements are reached. Stops at the first error.
pub fn analyze(program: &Program, symbols: &mut SymbolTable) -> Result<(), SemanticError> {
    for stmt in &program.statements {
        visit_statement(stmt, symbols)?;
    }

    debug!(symbols = symbols.len(), "semantic analysis complete");
    Ok(())
}

fn visit_statement(stmt: &Statement, symbols: &mut SymbolTable) -> Result<(), SemanticError> {
    match stmt {
        // Declared before the initializer is checked, so `var x = x;` passes.
        Statement::VarDecl {
            name,
            init,
            location,
        } => {
            symbols.declare(name, SymbolType::Int, *location)?;
            visit_expr(init, symbols)
        }
        Statement::Assignment {
            target,
            expr,
            location,
        } => {
            symbols.get(target, *location)?;
            visit_expr(expr, symbols)
        }
    }
}

/// Pre-order, left before right, using a work list so deep operator chains
/// do not grow the call stack.
fn visit_expr(expr: &Expr, symbols: &SymbolTable) -> Result<(), SemanticError> {
    let mut pending = vec![expr];

    while let Some(expr) = pending.pop() {
        match expr {
            Expr::Number(..) => {}
            Expr::Variable(name, location) => {
                symbols.get(name, *location)?;
            }
            Expr::BinaryOp { left, right, .. } => {
                pending.push(&**right);
                pending.push(&**left);
            }
        }
    }

    Ok(())
}
