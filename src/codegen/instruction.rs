use crate::parser::ast::BinOp;
use std::fmt;

/// Right-hand side value of an instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Variable(String),
    /// Compiler temporary `t<n>`, numbered from 1
    Temp(usize),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(n) => write!(f, "{}", n),
            Operand::Variable(name) => f.write_str(name),
            Operand::Temp(n) => write!(f, "t{}", n),
        }
    }
}

/// A single three-address instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `name = operand`
    Copy { dest: String, src: Operand },
    /// `tN = left op right`
    Binary {
        temp: usize,
        left: Operand,
        op: BinOp,
        right: Operand,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            Instruction::Binary {
                temp,
                left,
                op,
                right,
            } => write!(f, "t{} = {} {} {}", temp, left, op, right),
        }
    }
}
