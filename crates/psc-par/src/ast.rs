//! Abstract syntax tree for PatternScript.
//!
//! The AST is a plain tagged-union data model: a program is a list of
//! statements, statements contain expressions, and every node carries the
//! span it was parsed from. Types are not resolved here; that is the
//! semantic analyzer's job.

use psc_util::Span;

/// A parsed program: the top-level statement list.
pub type Program = Vec<Stmt>;

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `name = expr:`
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },

    /// `display expr:`
    Display { value: Expr, span: Span },

    /// `give expr:` - halts the program, recording the value.
    Give { value: Expr, span: Span },

    /// `loop var in start..end { body }` - inclusive range.
    Loop {
        var: String,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
        span: Span,
    },

    /// `check cond { then } else { else }` - the else branch is mandatory.
    Check {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
        span: Span,
    },

    /// `choose expr { cases default: body }` - the default is mandatory
    /// and must appear last.
    Choose {
        scrutinee: Expr,
        cases: Vec<CaseArm>,
        default_body: Vec<Stmt>,
        span: Span,
    },
}

/// One `literal: body` arm of a `choose` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseArm {
    pub lit: CaseLit,
    pub body: Vec<Stmt>,
    /// Span of the case label.
    pub span: Span,
}

/// A case label: a number or string literal only.
#[derive(Clone, Debug, PartialEq)]
pub enum CaseLit {
    Int(i64),
    Str(String),
}

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Integer literal. Negative when written with a leading `-`.
    Num { value: i64, span: Span },

    /// String literal (quotes stripped).
    Str { value: String, span: Span },

    /// Variable reference.
    Var { name: String, span: Span },

    /// Binary operation.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Source location of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Num { span, .. }
            | Expr::Str { span, .. }
            | Expr::Var { span, .. }
            | Expr::Binary { span, .. } => *span,
        }
    }
}

/// Binary operators as written in the source.
///
/// `Star` is kept unresolved here: whether it means integer multiplication
/// or string repetition depends on operand types, which the semantic
/// analyzer decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*` (multiplication or repetition)
    Star,
    /// `%`
    Mod,
    /// `~` (stitch: concatenate with coercion to text)
    Stitch,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl BinOp {
    /// The operator's source symbol, for diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Star => "*",
            BinOp::Mod => "%",
            BinOp::Stitch => "~",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
        }
    }
}
