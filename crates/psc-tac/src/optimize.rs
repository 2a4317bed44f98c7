//! TAC optimization: a fixed-point pass.
//!
//! Three rule families run until none fires:
//!
//! - constant folding, using the exact runtime semantics from
//!   `psc_util::value` (never folds `% 0` or a negative repeat - those
//!   must keep their runtime error),
//! - algebraic identities (`x + 0`, `x * 1`, `x * 0`, `s * 1`, `s * 0`,
//!   `"" ~ x` for operands provably of string type),
//! - dead-code elimination: instructions strictly between an unconditional
//!   transfer (`give`, `goto`) and the next label are removed.
//!
//! Labels are never pruned and temporaries are never renumbered, so the
//! jump-target invariant survives optimization.

use psc_util::value::{self, ArithOp, CompareOp};
use psc_util::Value;
use rustc_hash::FxHashMap;

use crate::tac::{BinOp, Instr, Operand};

/// Optimize a program in place until no rule fires.
pub fn optimize(program: &mut Vec<Instr>) {
    loop {
        let mut changed = false;
        changed |= fold_constants(program);
        changed |= apply_identities(program);
        changed |= eliminate_dead_code(program);
        if !changed {
            break;
        }
    }
}

/// Convert a constant operand to its runtime value.
fn const_value(operand: &Operand) -> Option<Value> {
    match operand {
        Operand::IntConst(v) => Some(Value::Int(*v)),
        Operand::StrConst(s) => Some(Value::Str(s.clone())),
        _ => None,
    }
}

/// Convert a folded value back to a constant operand.
fn value_operand(value: Value) -> Operand {
    match value {
        Value::Int(v) => Operand::IntConst(v),
        Value::Str(s) => Operand::StrConst(s),
    }
}

/// Fold instructions whose operands are both constants.
///
/// Folding only happens when the runtime is guaranteed not to raise an
/// error, and only for operand types the instruction is defined on; a
/// malformed instruction is left for the interpreter to report.
fn fold_constants(program: &mut [Instr]) -> bool {
    let mut changed = false;

    for instr in program.iter_mut() {
        let (op, dst, left, right) = match instr {
            Instr::Bin { op, dst, lhs, rhs } => {
                match (const_value(lhs), const_value(rhs)) {
                    (Some(left), Some(right)) => (*op, dst.clone(), left, right),
                    _ => continue,
                }
            }
            _ => continue,
        };

        let folded = match (op, &left, &right) {
            (BinOp::Add, Value::Int(a), Value::Int(b)) => {
                Some(Value::Int(value::arith(ArithOp::Add, *a, *b)))
            }
            (BinOp::Sub, Value::Int(a), Value::Int(b)) => {
                Some(Value::Int(value::arith(ArithOp::Sub, *a, *b)))
            }
            (BinOp::Mul, Value::Int(a), Value::Int(b)) => {
                Some(Value::Int(value::arith(ArithOp::Mul, *a, *b)))
            }
            // Modulo by zero keeps its runtime error.
            (BinOp::Mod, Value::Int(a), Value::Int(b)) if *b != 0 => {
                Some(Value::Int(a.wrapping_rem(*b)))
            }
            (BinOp::Stitch, _, _) => Some(value::stitch(&left, &right)),
            // A negative repeat keeps its runtime error.
            (BinOp::Repeat, Value::Str(s), Value::Int(n))
            | (BinOp::Repeat, Value::Int(n), Value::Str(s))
                if *n >= 0 =>
            {
                Some(value::repeat_str(s, *n))
            }
            (op, Value::Int(a), Value::Int(b)) => {
                compare_op(op).map(|cmp| Value::Int(value::compare(cmp, *a, *b)))
            }
            _ => None,
        };

        if let Some(result) = folded {
            *instr = Instr::Copy {
                dst,
                src: value_operand(result),
            };
            changed = true;
        }
    }

    changed
}

fn compare_op(op: BinOp) -> Option<CompareOp> {
    match op {
        BinOp::CmpEq => Some(CompareOp::Eq),
        BinOp::CmpNe => Some(CompareOp::Ne),
        BinOp::CmpLt => Some(CompareOp::Lt),
        BinOp::CmpGt => Some(CompareOp::Gt),
        BinOp::CmpLe => Some(CompareOp::Le),
        BinOp::CmpGe => Some(CompareOp::Ge),
        _ => None,
    }
}

/// Apply the algebraic identities.
fn apply_identities(program: &mut [Instr]) -> bool {
    let defs = temp_defs(program);
    let mut rewrites: Vec<(usize, Instr)> = Vec::new();

    for (idx, instr) in program.iter().enumerate() {
        let Instr::Bin { op, dst, lhs, rhs } = instr else {
            continue;
        };

        let copy_of = |src: &Operand| Instr::Copy {
            dst: dst.clone(),
            src: src.clone(),
        };

        let replacement = match op {
            // x + 0 and 0 + x.
            BinOp::Add => {
                if matches!(rhs, Operand::IntConst(0)) {
                    Some(copy_of(lhs))
                } else if matches!(lhs, Operand::IntConst(0)) {
                    Some(copy_of(rhs))
                } else {
                    None
                }
            }

            // x * 1, 1 * x, x * 0, 0 * x (integer multiplication).
            BinOp::Mul => {
                if matches!(rhs, Operand::IntConst(1)) {
                    Some(copy_of(lhs))
                } else if matches!(lhs, Operand::IntConst(1)) {
                    Some(copy_of(rhs))
                } else if matches!(lhs, Operand::IntConst(0))
                    || matches!(rhs, Operand::IntConst(0))
                {
                    Some(Instr::Copy {
                        dst: dst.clone(),
                        src: Operand::IntConst(0),
                    })
                } else {
                    None
                }
            }

            // s * 1 -> s, s * 0 -> "". An `IntConst` operand of a repeat is
            // necessarily the count, since exactly one side is the string.
            // Negative constant counts are left for the runtime error.
            BinOp::Repeat => {
                let (count, string_side) = match (lhs, rhs) {
                    (Operand::IntConst(n), other) | (other, Operand::IntConst(n)) => {
                        (Some(*n), other)
                    }
                    _ => (None, lhs),
                };
                match count {
                    Some(1) => Some(copy_of(string_side)),
                    Some(0) => Some(Instr::Copy {
                        dst: dst.clone(),
                        src: Operand::StrConst(String::new()),
                    }),
                    _ => None,
                }
            }

            // "" ~ x -> x and x ~ "" -> x, only when the kept operand is
            // provably a string (stitching an int changes its
            // representation, so it must stay).
            BinOp::Stitch => {
                if is_empty_str(lhs) && is_string_operand(rhs, program, &defs) {
                    Some(copy_of(rhs))
                } else if is_empty_str(rhs) && is_string_operand(lhs, program, &defs) {
                    Some(copy_of(lhs))
                } else {
                    None
                }
            }

            _ => None,
        };

        if let Some(new_instr) = replacement {
            rewrites.push((idx, new_instr));
        }
    }

    let changed = !rewrites.is_empty();
    for (idx, instr) in rewrites {
        program[idx] = instr;
    }
    changed
}

fn is_empty_str(operand: &Operand) -> bool {
    matches!(operand, Operand::StrConst(s) if s.is_empty())
}

/// Map each temporary to the index of its single defining instruction.
fn temp_defs(program: &[Instr]) -> FxHashMap<usize, usize> {
    let mut defs = FxHashMap::default();
    for (idx, instr) in program.iter().enumerate() {
        if let Instr::Copy {
            dst: Operand::Temp(n),
            ..
        }
        | Instr::Bin {
            dst: Operand::Temp(n),
            ..
        } = instr
        {
            defs.insert(*n, idx);
        }
    }
    defs
}

/// Whether an operand provably holds a string: a string constant, or a
/// temporary whose defining instruction produces a string. Variables are
/// never assumed, since TAC carries no type information for them.
fn is_string_operand(
    operand: &Operand,
    program: &[Instr],
    defs: &FxHashMap<usize, usize>,
) -> bool {
    match operand {
        Operand::StrConst(_) => true,
        Operand::Temp(n) => match defs.get(n).map(|&idx| &program[idx]) {
            Some(Instr::Bin {
                op: BinOp::Stitch | BinOp::Repeat,
                ..
            }) => true,
            Some(Instr::Copy { src, .. }) => is_string_operand(src, program, defs),
            _ => false,
        },
        _ => false,
    }
}

/// Remove instructions strictly between an unconditional transfer and the
/// next label (or the end of the program).
fn eliminate_dead_code(program: &mut Vec<Instr>) -> bool {
    let mut changed = false;
    let mut i = 0;

    while i < program.len() {
        if matches!(program[i], Instr::Give { .. } | Instr::Goto(_)) {
            let start = i + 1;
            let mut end = start;
            while end < program.len() && !matches!(program[end], Instr::Label(_)) {
                end += 1;
            }
            if end > start {
                program.drain(start..end);
                changed = true;
            }
        }
        i += 1;
    }

    changed
}
