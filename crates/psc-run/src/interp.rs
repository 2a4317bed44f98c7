//! The TAC interpreter.
//!
//! Executes a TAC list against a value store keyed by variable names and
//! temporary indices. Execution is single-threaded, sequential and
//! deterministic: a program counter walks the instruction list, with a
//! label-to-index map built once at start. Execution ends at `give` or at
//! the end of the list.

use indexmap::IndexMap;
use psc_tac::{tac, BinOp, Instr, Label, Operand};
use psc_util::value::{self, ArithOp, CompareOp};
use psc_util::Value;
use rustc_hash::FxHashMap;

use crate::error::RuntimeError;

/// The result of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// Display output, one entry per line, in order.
    pub lines: Vec<String>,
    /// The value given to `give`, if the program ended that way. Recorded
    /// but never printed.
    pub give_value: Option<Value>,
}

/// Execute a program, collecting its output.
///
/// Convenience wrapper around [`Interpreter`]; partial output produced
/// before a runtime error is dropped here, use the interpreter directly to
/// keep it.
pub fn execute(program: &[Instr]) -> Result<RunOutput, RuntimeError> {
    let mut interp = Interpreter::new(program);
    interp.run()?;
    Ok(interp.into_output())
}

/// A single-use TAC interpreter.
pub struct Interpreter<'a> {
    program: &'a [Instr],
    labels: FxHashMap<Label, usize>,
    /// Variable store, in definition order.
    vars: IndexMap<String, Value>,
    /// Temporary store.
    temps: FxHashMap<usize, Value>,
    output: Vec<String>,
    give_value: Option<Value>,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter for `program`, building the label map.
    pub fn new(program: &'a [Instr]) -> Self {
        Self {
            program,
            labels: tac::label_map(program),
            vars: IndexMap::new(),
            temps: FxHashMap::default(),
            output: Vec::new(),
            give_value: None,
        }
    }

    /// Run to completion or to the first runtime error. Output produced
    /// before an error remains available via [`Interpreter::output`].
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let mut pc = 0;

        while pc < self.program.len() {
            match &self.program[pc] {
                Instr::Copy { dst, src } => {
                    let val = self.read(src)?;
                    self.write(dst, val)?;
                }

                Instr::Bin { op, dst, lhs, rhs } => {
                    let val = self.eval_bin(*op, lhs, rhs)?;
                    self.write(dst, val)?;
                }

                Instr::Display { value } => {
                    let val = self.read(value)?;
                    self.output.push(val.to_text());
                }

                Instr::Give { value } => {
                    let val = self.read(value)?;
                    self.give_value = Some(val);
                    return Ok(());
                }

                Instr::Label(_) => {}

                Instr::Goto(target) => {
                    pc = self.jump(*target)?;
                    continue;
                }

                Instr::IfFalse { cond, target } => {
                    if self.read_int(cond)? == 0 {
                        pc = self.jump(*target)?;
                        continue;
                    }
                }

                Instr::IfNeqConst {
                    value,
                    constant,
                    target,
                } => {
                    // Structural inequality: same tag and value match.
                    if self.read(value)? != self.read(constant)? {
                        pc = self.jump(*target)?;
                        continue;
                    }
                }
            }
            pc += 1;
        }

        Ok(())
    }

    /// Output lines produced so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The `give` value, if execution reached one.
    pub fn give_value(&self) -> Option<&Value> {
        self.give_value.as_ref()
    }

    /// Consume the interpreter, returning the collected output.
    pub fn into_output(self) -> RunOutput {
        RunOutput {
            lines: self.output,
            give_value: self.give_value,
        }
    }

    fn jump(&self, target: Label) -> Result<usize, RuntimeError> {
        self.labels
            .get(&target)
            .copied()
            .ok_or(RuntimeError::MissingLabel(target))
    }

    fn read(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        match operand {
            Operand::IntConst(v) => Ok(Value::Int(*v)),
            Operand::StrConst(s) => Ok(Value::Str(s.clone())),
            Operand::Name(name) => self.vars.get(name).cloned().ok_or_else(|| {
                RuntimeError::TypeError(format!("read of unassigned variable `{}`", name))
            }),
            Operand::Temp(n) => self.temps.get(n).cloned().ok_or_else(|| {
                RuntimeError::TypeError(format!("read of unassigned temporary t{}", n))
            }),
        }
    }

    fn read_int(&self, operand: &Operand) -> Result<i64, RuntimeError> {
        match self.read(operand)? {
            Value::Int(v) => Ok(v),
            Value::Str(_) => Err(RuntimeError::TypeError(format!(
                "expected int operand, got string ({})",
                operand,
            ))),
        }
    }

    fn write(&mut self, dst: &Operand, val: Value) -> Result<(), RuntimeError> {
        match dst {
            Operand::Name(name) => {
                self.vars.insert(name.clone(), val);
                Ok(())
            }
            Operand::Temp(n) => {
                self.temps.insert(*n, val);
                Ok(())
            }
            other => Err(RuntimeError::TypeError(format!(
                "constant destination {}",
                other,
            ))),
        }
    }

    fn eval_bin(
        &self,
        op: BinOp,
        lhs: &Operand,
        rhs: &Operand,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add => self.eval_arith(ArithOp::Add, lhs, rhs),
            BinOp::Sub => self.eval_arith(ArithOp::Sub, lhs, rhs),
            BinOp::Mul => self.eval_arith(ArithOp::Mul, lhs, rhs),

            BinOp::Mod => {
                let a = self.read_int(lhs)?;
                let b = self.read_int(rhs)?;
                if b == 0 {
                    Err(RuntimeError::DivideByZero)
                } else {
                    Ok(Value::Int(a.wrapping_rem(b)))
                }
            }

            BinOp::Stitch => {
                let a = self.read(lhs)?;
                let b = self.read(rhs)?;
                Ok(value::stitch(&a, &b))
            }

            BinOp::Repeat => {
                let a = self.read(lhs)?;
                let b = self.read(rhs)?;
                let (s, count) = match (&a, &b) {
                    (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => (s, *n),
                    _ => {
                        return Err(RuntimeError::TypeError(format!(
                            "repeat needs one string and one int, got {} and {}",
                            a.type_name(),
                            b.type_name(),
                        )));
                    }
                };
                if count < 0 {
                    Err(RuntimeError::NegativeRepeat { count })
                } else {
                    Ok(value::repeat_str(s, count))
                }
            }

            BinOp::CmpEq => self.eval_compare(CompareOp::Eq, lhs, rhs),
            BinOp::CmpNe => self.eval_compare(CompareOp::Ne, lhs, rhs),
            BinOp::CmpLt => self.eval_compare(CompareOp::Lt, lhs, rhs),
            BinOp::CmpGt => self.eval_compare(CompareOp::Gt, lhs, rhs),
            BinOp::CmpLe => self.eval_compare(CompareOp::Le, lhs, rhs),
            BinOp::CmpGe => self.eval_compare(CompareOp::Ge, lhs, rhs),
        }
    }

    fn eval_arith(
        &self,
        op: ArithOp,
        lhs: &Operand,
        rhs: &Operand,
    ) -> Result<Value, RuntimeError> {
        let a = self.read_int(lhs)?;
        let b = self.read_int(rhs)?;
        Ok(Value::Int(value::arith(op, a, b)))
    }

    fn eval_compare(
        &self,
        op: CompareOp,
        lhs: &Operand,
        rhs: &Operand,
    ) -> Result<Value, RuntimeError> {
        let a = self.read_int(lhs)?;
        let b = self.read_int(rhs)?;
        Ok(Value::Int(value::compare(op, a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lower a source program (unoptimized) and run it.
    fn run_source(source: &str) -> Result<RunOutput, RuntimeError> {
        let ast = psc_par::parse(psc_lex::tokenize(source).unwrap()).unwrap();
        let tac = psc_tac::lower_program(&psc_sem::analyze(ast).unwrap());
        execute(&tac)
    }

    fn lines(source: &str) -> Vec<String> {
        run_source(source).unwrap().lines
    }

    #[test]
    fn test_arithmetic_and_display() {
        assert_eq!(lines("x = 4: y = x * 5: display y:"), ["20"]);
    }

    #[test]
    fn test_stitch_chain() {
        assert_eq!(lines("display \"ID=\" ~ 1 ~ 2 ~ 3:"), ["ID=123"]);
    }

    #[test]
    fn test_repeat_both_orders() {
        assert_eq!(
            lines("display \"*\" * 5: display 3 * \"Yo\":"),
            ["*****", "YoYoYo"],
        );
    }

    #[test]
    fn test_check_branches() {
        assert_eq!(
            lines(
                "name = \"Love\": score = 8: \
                 check score > 5 { display name ~ \" passed!\": } \
                 else { display name ~ \" failed!\": }",
            ),
            ["Love passed!"],
        );
    }

    #[test]
    fn test_loop_inclusive_range() {
        assert_eq!(
            lines("loop i in 1..3 { display \"Step \" ~ i ~ \": \" ~ (\"-\" * i): }"),
            ["Step 1: -", "Step 2: --", "Step 3: ---"],
        );
    }

    #[test]
    fn test_loop_single_iteration_when_equal() {
        assert_eq!(lines("loop i in 2..2 { display i: }"), ["2"]);
    }

    #[test]
    fn test_loop_zero_iterations_when_reversed() {
        assert_eq!(lines("loop i in 3..1 { display i: }"), Vec::<String>::new());
    }

    #[test]
    fn test_choose_dispatch() {
        let source = "day = 3: choose day { 1: display \"Mon\": 2: display \"Tue\": \
                      3: display \"Wed\": default: display \"Unknown\": }";
        assert_eq!(lines(source), ["Wed"]);
    }

    #[test]
    fn test_choose_default() {
        let source = "day = 9: choose day { 1: display \"Mon\": default: display \"Unknown\": }";
        assert_eq!(lines(source), ["Unknown"]);
    }

    #[test]
    fn test_choose_string_scrutinee() {
        let source = "tag = \"b\": choose tag { \"a\": display 1: \"b\": display 2: \
                      default: display 0: }";
        assert_eq!(lines(source), ["2"]);
    }

    #[test]
    fn test_give_halts_immediately() {
        let out = run_source(
            "loop i in 1..10 { display i: check i == 2 { give i: } else { } }",
        )
        .unwrap();
        assert_eq!(out.lines, ["1", "2"]);
        assert_eq!(out.give_value, Some(Value::Int(2)));
    }

    #[test]
    fn test_give_value_not_printed() {
        let out = run_source("give \"result\":").unwrap();
        assert_eq!(out.lines, Vec::<String>::new());
        assert_eq!(out.give_value, Some(Value::Str("result".to_string())));
    }

    #[test]
    fn test_mod_by_zero() {
        let err = run_source("display 1 % 0:").unwrap_err();
        assert_eq!(err, RuntimeError::DivideByZero);
    }

    #[test]
    fn test_dynamic_negative_repeat() {
        let err = run_source("n = 0 - 2: display \"hi\" * n:").unwrap_err();
        assert_eq!(err, RuntimeError::NegativeRepeat { count: -2 });
    }

    #[test]
    fn test_partial_output_kept_on_error() {
        let ast = psc_par::parse(
            psc_lex::tokenize("display \"before\": display 1 % 0:").unwrap(),
        )
        .unwrap();
        let tac = psc_tac::lower_program(&psc_sem::analyze(ast).unwrap());

        let mut interp = Interpreter::new(&tac);
        let err = interp.run().unwrap_err();
        assert_eq!(err, RuntimeError::DivideByZero);
        assert_eq!(interp.output(), ["before"]);
    }

    #[test]
    fn test_left_operand_fails_first() {
        // Both sides of the stitch would fail; left-to-right evaluation
        // means the negative repeat wins over the modulo by zero.
        let err = run_source("n = 0 - 1: display (\"x\" * n) ~ (1 % 0):").unwrap_err();
        assert_eq!(err, RuntimeError::NegativeRepeat { count: -1 });
    }

    #[test]
    fn test_comparison_values() {
        assert_eq!(lines("display 1 < 2: display 2 < 1:"), ["1", "0"]);
    }

    #[test]
    fn test_display_int_uses_decimal_coercion() {
        assert_eq!(lines("display 0 - 7:"), ["-7"]);
    }
}
