//! Runtime values and shared operator semantics.
//!
//! PatternScript has exactly two value shapes: 64-bit signed integers and
//! strings. Booleans are represented as `Int` with `0 = false`, `1 = true`.
//!
//! The free functions in this module implement the observable semantics of
//! the stitch, repeat and arithmetic operators. Both the TAC optimizer
//! (when folding constants) and the interpreter call these, which is what
//! guarantees that an optimized and an unoptimized run produce identical
//! output.

use std::fmt;

/// A runtime value: a 64-bit signed integer or a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    /// Convert the value to its text form using the stitch coercion:
    /// integers become their base-10 decimal rendering, strings are
    /// unchanged. This is also how `display` renders a line.
    ///
    /// # Examples
    ///
    /// ```
    /// use psc_util::Value;
    ///
    /// assert_eq!(Value::Int(-42).to_text(), "-42");
    /// assert_eq!(Value::Str("hi".into()).to_text(), "hi");
    /// ```
    pub fn to_text(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    /// Short name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Stitch two values: coerce each to text and concatenate. Always a string.
pub fn stitch(lhs: &Value, rhs: &Value) -> Value {
    let mut out = lhs.to_text();
    out.push_str(&rhs.to_text());
    Value::Str(out)
}

/// Repeat a string `count` times. Zero yields the empty string.
///
/// The caller must have already rejected negative counts; this function is
/// only defined for `count >= 0`.
pub fn repeat_str(s: &str, count: i64) -> Value {
    debug_assert!(count >= 0);
    Value::Str(s.repeat(count as usize))
}

/// Integer arithmetic with two's-complement wraparound.
///
/// `%` is not handled here: modulo needs a zero check whose failure mode
/// (fold refusal vs. runtime error) differs between the two callers.
pub fn arith(op: ArithOp, lhs: i64, rhs: i64) -> i64 {
    match op {
        ArithOp::Add => lhs.wrapping_add(rhs),
        ArithOp::Sub => lhs.wrapping_sub(rhs),
        ArithOp::Mul => lhs.wrapping_mul(rhs),
    }
}

/// The always-defined integer operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

/// Integer comparison producing `Int` 0/1.
pub fn compare(op: CompareOp, lhs: i64, rhs: i64) -> i64 {
    let holds = match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Le => lhs <= rhs,
        CompareOp::Ge => lhs >= rhs,
    };
    holds as i64
}

/// The six relational operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}
