//! Three-address code generation
//!
//! - [`instruction`]: [`Instruction`] and [`Operand`] definitions
//! - [`generator`]: post-order AST walk that emits instructions
//!
//! Each binary operator gets a fresh temporary (`t1`, `t2`, ...), numbered in
//! the order the operators are evaluated, left operand first. Temporaries are
//! never reused within one compilation.

pub mod generator;
pub mod instruction;

pub use instruction::{Instruction, Operand};
