//! Lowering from typed HIR to three-address code.
//!
//! The builder keeps monotonically increasing temporary and label
//! counters. Each binary expression lowers to one instruction into a fresh
//! temporary; literals lower to constant operands with no instruction, and
//! variable references lower to `Name` operands.

use psc_sem::hir;

use crate::tac::{BinOp, Instr, Label, Operand};

/// Lower a type-checked program into a flat TAC list.
pub fn lower_program(program: &[hir::Stmt]) -> Vec<Instr> {
    let mut builder = Builder::new();
    for stmt in program {
        builder.lower_stmt(stmt);
    }
    builder.finish()
}

struct Builder {
    instrs: Vec<Instr>,
    next_temp: usize,
    next_label: usize,
}

impl Builder {
    fn new() -> Self {
        Self {
            instrs: Vec::new(),
            next_temp: 0,
            next_label: 0,
        }
    }

    fn finish(self) -> Vec<Instr> {
        self.instrs
    }

    fn fresh_temp(&mut self) -> Operand {
        let temp = Operand::Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    fn fresh_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    fn emit(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    fn lower_stmt(&mut self, stmt: &hir::Stmt) {
        match stmt {
            hir::Stmt::Assign { name, value, .. } => {
                let src = self.lower_expr(value);
                self.emit(Instr::Copy {
                    dst: Operand::Name(name.clone()),
                    src,
                });
            }

            hir::Stmt::Display { value, .. } => {
                let value = self.lower_expr(value);
                self.emit(Instr::Display { value });
            }

            hir::Stmt::Give { value, .. } => {
                let value = self.lower_expr(value);
                self.emit(Instr::Give { value });
            }

            hir::Stmt::Check {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let cond = self.lower_expr(cond);
                let else_label = self.fresh_label();
                let end_label = self.fresh_label();

                self.emit(Instr::IfFalse {
                    cond,
                    target: else_label,
                });
                for stmt in then_body {
                    self.lower_stmt(stmt);
                }
                self.emit(Instr::Goto(end_label));
                self.emit(Instr::Label(else_label));
                for stmt in else_body {
                    self.lower_stmt(stmt);
                }
                self.emit(Instr::Label(end_label));
            }

            hir::Stmt::Loop {
                var,
                start,
                end,
                body,
                ..
            } => {
                let start = self.lower_expr(start);
                let end = self.lower_expr(end);
                // The end bound is evaluated once. Capture it if it is a
                // variable, so reassigning that variable in the body does
                // not move the bound.
                let end = self.capture(end);

                let var_op = Operand::Name(var.clone());
                self.emit(Instr::Copy {
                    dst: var_op.clone(),
                    src: start,
                });

                let head = self.fresh_label();
                let done = self.fresh_label();

                self.emit(Instr::Label(head));
                let cond = self.fresh_temp();
                self.emit(Instr::Bin {
                    op: BinOp::CmpLe,
                    dst: cond.clone(),
                    lhs: var_op.clone(),
                    rhs: end,
                });
                self.emit(Instr::IfFalse {
                    cond,
                    target: done,
                });
                for stmt in body {
                    self.lower_stmt(stmt);
                }
                self.emit(Instr::Bin {
                    op: BinOp::Add,
                    dst: var_op.clone(),
                    lhs: var_op,
                    rhs: Operand::IntConst(1),
                });
                self.emit(Instr::Goto(head));
                self.emit(Instr::Label(done));
            }

            hir::Stmt::Choose {
                scrutinee,
                cases,
                default_body,
                ..
            } => {
                let scrutinee = self.lower_expr(scrutinee);
                let end_label = self.fresh_label();

                for case in cases {
                    let next = self.fresh_label();
                    let constant = match &case.lit {
                        hir::CaseLit::Int(v) => Operand::IntConst(*v),
                        hir::CaseLit::Str(s) => Operand::StrConst(s.clone()),
                    };
                    self.emit(Instr::IfNeqConst {
                        value: scrutinee.clone(),
                        constant,
                        target: next,
                    });
                    for stmt in &case.body {
                        self.lower_stmt(stmt);
                    }
                    self.emit(Instr::Goto(end_label));
                    self.emit(Instr::Label(next));
                }

                for stmt in default_body {
                    self.lower_stmt(stmt);
                }
                self.emit(Instr::Label(end_label));
            }
        }
    }

    fn lower_expr(&mut self, expr: &hir::Expr) -> Operand {
        match expr {
            hir::Expr::Int { value, .. } => Operand::IntConst(*value),
            hir::Expr::Str { value, .. } => Operand::StrConst(value.clone()),
            hir::Expr::Var { name, .. } => Operand::Name(name.clone()),
            hir::Expr::Binary {
                op, left, right, ..
            } => {
                let lhs = self.lower_expr(left);
                let rhs = self.lower_expr(right);
                let dst = self.fresh_temp();
                self.emit(Instr::Bin {
                    op: convert_binop(*op),
                    dst: dst.clone(),
                    lhs,
                    rhs,
                });
                dst
            }
        }
    }

    /// Copy a variable operand into a fresh temporary; constants and
    /// temporaries are already stable.
    fn capture(&mut self, operand: Operand) -> Operand {
        match operand {
            Operand::Name(_) => {
                let temp = self.fresh_temp();
                self.emit(Instr::Copy {
                    dst: temp.clone(),
                    src: operand,
                });
                temp
            }
            other => other,
        }
    }
}

fn convert_binop(op: hir::BinOp) -> BinOp {
    match op {
        hir::BinOp::Add => BinOp::Add,
        hir::BinOp::Sub => BinOp::Sub,
        hir::BinOp::Mul => BinOp::Mul,
        hir::BinOp::Mod => BinOp::Mod,
        hir::BinOp::Stitch => BinOp::Stitch,
        hir::BinOp::Repeat => BinOp::Repeat,
        hir::BinOp::Eq => BinOp::CmpEq,
        hir::BinOp::Ne => BinOp::CmpNe,
        hir::BinOp::Lt => BinOp::CmpLt,
        hir::BinOp::Gt => BinOp::CmpGt,
        hir::BinOp::Le => BinOp::CmpLe,
        hir::BinOp::Ge => BinOp::CmpGe,
    }
}
