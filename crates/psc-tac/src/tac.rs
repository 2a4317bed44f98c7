//! The three-address code instruction set.
//!
//! A program is a flat `Vec<Instr>`. Operands are temporaries, variable
//! names, or constants; control flow is labels and (conditional) gotos.
//!
//! Invariants maintained by the generator and preserved by the optimizer:
//!
//! - every `Temp(n)` is assigned exactly once before use (temporaries may
//!   be deleted but are never renumbered),
//! - every jump target exists as a `Label` in the same list.

use std::fmt;

use rustc_hash::FxHashMap;

/// A TAC operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A compiler temporary, numbered from zero per program.
    Temp(usize),
    /// A source-level variable.
    Name(String),
    /// An integer constant.
    IntConst(i64),
    /// A string constant.
    StrConst(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(n) => write!(f, "t{}", n),
            Operand::Name(name) => write!(f, "{}", name),
            Operand::IntConst(v) => write!(f, "{}", v),
            Operand::StrConst(s) => write!(f, "\"{}\"", s.escape_default()),
        }
    }
}

/// A branch target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub usize);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Binary operations. Comparisons produce `Int` 0/1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Mod,
    /// Concatenate with coercion to text.
    Stitch,
    /// String repetition: one operand is the string, the other the count.
    Repeat,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpGt,
    CmpLe,
    CmpGe,
}

impl BinOp {
    /// Rendering symbol. `Mul` and `Repeat` share `*`, like the surface
    /// syntax.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul | BinOp::Repeat => "*",
            BinOp::Mod => "%",
            BinOp::Stitch => "~",
            BinOp::CmpEq => "==",
            BinOp::CmpNe => "!=",
            BinOp::CmpLt => "<",
            BinOp::CmpGt => ">",
            BinOp::CmpLe => "<=",
            BinOp::CmpGe => ">=",
        }
    }
}

/// One TAC instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    /// `dst = src`
    Copy { dst: Operand, src: Operand },

    /// `dst = lhs op rhs`
    Bin {
        op: BinOp,
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },

    /// `display value` - emit one output line.
    Display { value: Operand },

    /// `give value` - halt with the value.
    Give { value: Operand },

    /// `Lk:` - branch target.
    Label(Label),

    /// `goto Lk`
    Goto(Label),

    /// `if_false cond goto Lk` - branch iff `cond == 0`.
    IfFalse { cond: Operand, target: Label },

    /// `if value != constant goto Lk` - case dispatch; structural
    /// inequality.
    IfNeqConst {
        value: Operand,
        constant: Operand,
        target: Label,
    },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Copy { dst, src } => write!(f, "{} = {}", dst, src),
            Instr::Bin { op, dst, lhs, rhs } => {
                write!(f, "{} = {} {} {}", dst, lhs, op.symbol(), rhs)
            }
            Instr::Display { value } => write!(f, "display {}", value),
            Instr::Give { value } => write!(f, "give {}", value),
            Instr::Label(label) => write!(f, "{}:", label),
            Instr::Goto(label) => write!(f, "goto {}", label),
            Instr::IfFalse { cond, target } => write!(f, "if_false {} goto {}", cond, target),
            Instr::IfNeqConst {
                value,
                constant,
                target,
            } => write!(f, "if {} != {} goto {}", value, constant, target),
        }
    }
}

/// Render a whole program, one instruction per line, labels unindented.
pub fn render(program: &[Instr]) -> String {
    let mut out = String::new();
    for instr in program {
        if !matches!(instr, Instr::Label(_)) {
            out.push_str("    ");
        }
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

/// Build the label-to-index map for a program.
pub fn label_map(program: &[Instr]) -> FxHashMap<Label, usize> {
    program
        .iter()
        .enumerate()
        .filter_map(|(idx, instr)| match instr {
            Instr::Label(label) => Some((*label, idx)),
            _ => None,
        })
        .collect()
}

/// Whether every jump target resolves to a unique label in `program`.
pub fn jumps_resolve(program: &[Instr]) -> bool {
    let labels = label_map(program);
    let defined = program
        .iter()
        .filter(|i| matches!(i, Instr::Label(_)))
        .count();
    if labels.len() != defined {
        return false; // duplicate label
    }

    program.iter().all(|instr| match instr {
        Instr::Goto(target)
        | Instr::IfFalse { target, .. }
        | Instr::IfNeqConst { target, .. } => labels.contains_key(target),
        _ => true,
    })
}
