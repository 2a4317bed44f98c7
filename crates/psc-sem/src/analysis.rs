//! The semantic analysis walk.
//!
//! A single AST traversal that resolves every expression's type, maintains
//! the scope stack, resolves the `*` overload, and rejects statically
//! known negative repeat counts.

use psc_par::ast;

use crate::error::SemError;
use crate::hir;
use crate::scope::{Binding, ScopeBindings, ScopeStack};
use crate::types::Type;

/// Analyze a parsed program, producing typed HIR or the first semantic
/// error.
pub fn analyze(program: ast::Program) -> Result<Vec<hir::Stmt>, SemError> {
    let mut analyzer = Analyzer::new();
    let result = analyzer.check_stmts(program);
    debug_assert_eq!(analyzer.scopes.depth(), 1, "scopes must balance");
    result
}

struct Analyzer {
    scopes: ScopeStack,
}

impl Analyzer {
    fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
        }
    }

    fn check_stmts(&mut self, stmts: Vec<ast::Stmt>) -> Result<Vec<hir::Stmt>, SemError> {
        stmts.into_iter().map(|s| self.check_stmt(s)).collect()
    }

    fn check_stmt(&mut self, stmt: ast::Stmt) -> Result<hir::Stmt, SemError> {
        match stmt {
            ast::Stmt::Assign { name, value, span } => {
                let value = self.check_expr(value)?;
                match self.scopes.lookup(&name) {
                    Some(binding) if binding.is_loop_var => {
                        return Err(SemError::LoopVariableAssignment { name, span });
                    }
                    Some(binding) if binding.ty != value.ty() => {
                        return Err(SemError::TypeMismatch {
                            expected: binding.ty,
                            found: value.ty(),
                            name,
                            span,
                        });
                    }
                    Some(_) => {}
                    None => {
                        self.scopes.insert(
                            name.clone(),
                            Binding {
                                ty: value.ty(),
                                defined_at: span,
                                is_loop_var: false,
                            },
                        );
                    }
                }
                Ok(hir::Stmt::Assign { name, value, span })
            }

            ast::Stmt::Display { value, span } => {
                let value = self.check_expr(value)?;
                Ok(hir::Stmt::Display { value, span })
            }

            ast::Stmt::Give { value, span } => {
                let value = self.check_expr(value)?;
                Ok(hir::Stmt::Give { value, span })
            }

            ast::Stmt::Loop {
                var,
                start,
                end,
                body,
                span,
            } => {
                let start = self.check_expr(start)?;
                if start.ty() != Type::Int {
                    return Err(SemError::LoopBoundType {
                        which: "start",
                        found: start.ty(),
                        span: start.span(),
                    });
                }
                let end = self.check_expr(end)?;
                if end.ty() != Type::Int {
                    return Err(SemError::LoopBoundType {
                        which: "end",
                        found: end.ty(),
                        span: end.span(),
                    });
                }

                self.scopes.push();
                self.scopes.insert(
                    var.clone(),
                    Binding {
                        ty: Type::Int,
                        defined_at: span,
                        is_loop_var: true,
                    },
                );
                // Pop on every exit path, error or not.
                let body = self.check_stmts(body);
                self.scopes.pop();
                let body = body?;

                Ok(hir::Stmt::Loop {
                    var,
                    start,
                    end,
                    body,
                    span,
                })
            }

            ast::Stmt::Check {
                cond,
                then_body,
                else_body,
                span,
            } => {
                let cond = self.check_expr(cond)?;
                if cond.ty() != Type::Int {
                    return Err(SemError::CheckCondType {
                        found: cond.ty(),
                        span: cond.span(),
                    });
                }
                // Exactly one branch runs, so each is checked against the
                // scope as it stood before the check; a name only becomes
                // visible afterwards if both branches assign it.
                let before = self.scopes.save_current();
                let (then_body, then_new) = self.check_branch(then_body, &before)?;
                let (else_body, else_new) = self.check_branch(else_body, &before)?;
                self.promote_common(&[then_new, else_new]);

                Ok(hir::Stmt::Check {
                    cond,
                    then_body,
                    else_body,
                    span,
                })
            }

            ast::Stmt::Choose {
                scrutinee,
                cases,
                default_body,
                span,
            } => {
                let scrutinee = self.check_expr(scrutinee)?;
                let scrutinee_ty = scrutinee.ty();

                // Exactly one arm runs; same branch isolation and merge as
                // for check, across every case body and the default.
                let before = self.scopes.save_current();
                let mut arm_bindings = Vec::with_capacity(cases.len() + 1);

                let mut checked_cases = Vec::with_capacity(cases.len());
                for case in cases {
                    let lit = match case.lit {
                        ast::CaseLit::Int(v) => hir::CaseLit::Int(v),
                        ast::CaseLit::Str(s) => hir::CaseLit::Str(s),
                    };
                    if lit.ty() != scrutinee_ty {
                        return Err(SemError::CaseTypeMismatch {
                            expected: scrutinee_ty,
                            found: lit.ty(),
                            span: case.span,
                        });
                    }
                    let (body, new_bindings) = self.check_branch(case.body, &before)?;
                    arm_bindings.push(new_bindings);
                    checked_cases.push(hir::CaseArm {
                        lit,
                        body,
                        span: case.span,
                    });
                }

                let (default_body, new_bindings) = self.check_branch(default_body, &before)?;
                arm_bindings.push(new_bindings);
                self.promote_common(&arm_bindings);

                Ok(hir::Stmt::Choose {
                    scrutinee,
                    cases: checked_cases,
                    default_body,
                    span,
                })
            }
        }
    }

    /// Check one branch body of a `check`/`choose` in isolation.
    ///
    /// The body is walked against the current scope, then the names it
    /// inserted are collected and the scope is restored to `before` - on
    /// the error path too, so the stack stays balanced.
    fn check_branch(
        &mut self,
        body: Vec<ast::Stmt>,
        before: &ScopeBindings,
    ) -> Result<(Vec<hir::Stmt>, ScopeBindings), SemError> {
        let result = self.check_stmts(body);
        let new_bindings = self
            .scopes
            .save_current()
            .into_iter()
            .filter(|(name, _)| !before.contains_key(name))
            .collect();
        self.scopes.restore_current(before.clone());
        Ok((result?, new_bindings))
    }

    /// Bind the names that every branch assigned, with one agreed type.
    ///
    /// A name some branch skips, or that two branches assign with
    /// different types, stays unbound: a read after the construct cannot
    /// be given a type that holds on every path, so it is rejected as
    /// undefined rather than left to fail at runtime.
    fn promote_common(&mut self, branches: &[ScopeBindings]) {
        let Some((first, rest)) = branches.split_first() else {
            return;
        };
        for (name, binding) in first {
            let on_every_path = rest
                .iter()
                .all(|other| other.get(name).is_some_and(|b| b.ty == binding.ty));
            if on_every_path {
                self.scopes.insert(name.clone(), *binding);
            }
        }
    }

    fn check_expr(&mut self, expr: ast::Expr) -> Result<hir::Expr, SemError> {
        match expr {
            ast::Expr::Num { value, span } => Ok(hir::Expr::Int { value, span }),
            ast::Expr::Str { value, span } => Ok(hir::Expr::Str { value, span }),

            ast::Expr::Var { name, span } => match self.scopes.lookup(&name) {
                Some(binding) => Ok(hir::Expr::Var {
                    name,
                    ty: binding.ty,
                    span,
                }),
                None => Err(SemError::UndefinedVariable { name, span }),
            },

            ast::Expr::Binary {
                op,
                left,
                right,
                span,
            } => {
                let left = self.check_expr(*left)?;
                let right = self.check_expr(*right)?;
                let (op, ty) = self.type_binary(op, &left, &right, span)?;
                Ok(hir::Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    ty,
                    span,
                })
            }
        }
    }

    /// Apply the operator typing table, resolving the `*` overload.
    fn type_binary(
        &self,
        op: ast::BinOp,
        left: &hir::Expr,
        right: &hir::Expr,
        span: psc_util::Span,
    ) -> Result<(hir::BinOp, Type), SemError> {
        use Type::{Int, Str};

        let tys = (left.ty(), right.ty());
        let invalid = || SemError::InvalidOperandTypes {
            op: op.symbol(),
            lhs: left.ty(),
            rhs: right.ty(),
            span,
        };

        match op {
            ast::BinOp::Add | ast::BinOp::Sub | ast::BinOp::Mod => match tys {
                (Int, Int) => {
                    let op = match op {
                        ast::BinOp::Add => hir::BinOp::Add,
                        ast::BinOp::Sub => hir::BinOp::Sub,
                        _ => hir::BinOp::Mod,
                    };
                    Ok((op, Int))
                }
                _ => Err(invalid()),
            },

            ast::BinOp::Star => match tys {
                (Int, Int) => Ok((hir::BinOp::Mul, Int)),
                (Str, Int) => {
                    self.reject_negative_count(right)?;
                    Ok((hir::BinOp::Repeat, Str))
                }
                (Int, Str) => {
                    self.reject_negative_count(left)?;
                    Ok((hir::BinOp::Repeat, Str))
                }
                _ => Err(invalid()),
            },

            // Stitch accepts any operand types and always yields a string.
            ast::BinOp::Stitch => Ok((hir::BinOp::Stitch, Str)),

            ast::BinOp::Eq
            | ast::BinOp::Ne
            | ast::BinOp::Lt
            | ast::BinOp::Gt
            | ast::BinOp::Le
            | ast::BinOp::Ge => match tys {
                (Int, Int) => {
                    let op = match op {
                        ast::BinOp::Eq => hir::BinOp::Eq,
                        ast::BinOp::Ne => hir::BinOp::Ne,
                        ast::BinOp::Lt => hir::BinOp::Lt,
                        ast::BinOp::Gt => hir::BinOp::Gt,
                        ast::BinOp::Le => hir::BinOp::Le,
                        _ => hir::BinOp::Ge,
                    };
                    Ok((op, Int))
                }
                // Relational operators on strings are explicitly rejected.
                _ => Err(invalid()),
            },
        }
    }

    /// Reject a repeat whose count is a statically known negative literal.
    fn reject_negative_count(&self, count: &hir::Expr) -> Result<(), SemError> {
        if let hir::Expr::Int { value, span } = count {
            if *value < 0 {
                return Err(SemError::NegativeRepeat {
                    count: *value,
                    span: *span,
                });
            }
        }
        Ok(())
    }
}
