use super::instruction::{Instruction, Operand};
use crate::parser::ast::{BinOp, Expr, Program, Statement};
use tracing::{debug, trace};

/// Generate three-address code for an analyzed program.
///
/// Declarations are not re-checked here; run
/// [`analyze`](crate::semantic::analyzer::analyze) first.
pub fn generate(program: &Program) -> Vec<Instruction> {
    let mut generator = CodeGenerator::new();
    generator.generate_program(program);
    debug!(
        instructions = generator.code.len(),
        temporaries = generator.temp_count(),
        "generated intermediate code"
    );
    generator.finish()
}

/// Owns the instruction buffer and the temporary counter for one compilation
#[derive(Debug, Default)]
pub struct CodeGenerator {
    code: Vec<Instruction>,
    temp_count: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.generate_statement(stmt);
        }
    }

    /// Emit code for one statement. Statements leave no result operand.
    pub fn generate_statement(&mut self, stmt: &Statement) {
        let (dest, value) = match stmt {
            Statement::VarDecl { name, init, .. } => (name, init),
            Statement::Assignment { target, expr, .. } => (target, expr),
        };

        let src = self.generate_expr(value);
        self.emit(Instruction::Copy {
            dest: dest.clone(),
            src,
        });
    }

    /// Emit code for `expr` and return the operand holding its value.
    /// Literals and variables are returned as-is without emitting anything.
    ///
    /// Post-order, left operand first, driven by an explicit task stack so a
    /// long operator chain does not recurse once per level.
    pub fn generate_expr(&mut self, expr: &Expr) -> Operand {
        let mut tasks = vec![Task::Visit(expr)];
        let mut operands: Vec<Operand> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(Expr::Number(n, _)) => operands.push(Operand::Literal(*n)),
                Task::Visit(Expr::Variable(name, _)) => {
                    operands.push(Operand::Variable(name.clone()))
                }
                Task::Visit(Expr::BinaryOp {
                    op, left, right, ..
                }) => {
                    tasks.push(Task::Combine(*op));
                    tasks.push(Task::Visit(&**right));
                    tasks.push(Task::Visit(&**left));
                }
                Task::Combine(op) => {
                    // Both operands of `op` were pushed by the visits queued
                    // above its `Combine`.
                    let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
                        unreachable!("operand stack underflow combining {}", op);
                    };
                    let temp = self.new_temp();
                    self.emit(Instruction::Binary {
                        temp,
                        left,
                        op,
                        right,
                    });
                    operands.push(Operand::Temp(temp));
                }
            }
        }

        match operands.pop() {
            Some(result) => result,
            None => unreachable!("expression produced no operand"),
        }
    }

    /// Number of temporaries allocated so far
    pub fn temp_count(&self) -> usize {
        self.temp_count
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.code
    }

    fn new_temp(&mut self) -> usize {
        self.temp_count += 1;
        self.temp_count
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!(%instruction, "emit");
        self.code.push(instruction);
    }
}

/// Pending work for [`CodeGenerator::generate_expr`]
enum Task<'a> {
    Visit(&'a Expr),
    /// Pop the two topmost operands and emit `tN = left op right`
    Combine(BinOp),
}
