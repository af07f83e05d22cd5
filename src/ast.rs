use crate::span::Spanned;
use crate::types::PrimTy;

pub mod display;
pub mod navigate;

/// A parsed `.lp` file — a flat list of function definitions.
#[derive(Clone, Debug)]
pub struct File {
    pub functions: Vec<Spanned<FnDef>>,
}

#[derive(Clone, Debug)]
pub struct FnDef {
    pub return_ty: Spanned<PrimTy>,
    pub name: Spanned<String>,
    pub params: Vec<Param>,
    pub body: Spanned<Block>,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub ty: Spanned<PrimTy>,
    pub name: Spanned<String>,
}

/// A braced sequence of statements.
#[derive(Clone, Debug)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

/// Statements.
#[derive(Clone, Debug)]
pub enum Stmt {
    Decl(DeclStmt),
    Expr(Spanned<Expr>),
    If {
        cond: Spanned<Expr>,
        then_branch: Box<Spanned<Stmt>>,
        else_branch: Option<Box<Spanned<Stmt>>>,
    },
    While {
        cond: Spanned<Expr>,
        body: Box<Spanned<Stmt>>,
    },
    For(ForStmt),
    Return(Option<Spanned<Expr>>),
    Block(Block),
    Empty,
}

/// A local declaration: one type, one or more declarators.
/// `int i = 0, j, k = 2;`
#[derive(Clone, Debug)]
pub struct DeclStmt {
    pub ty: Spanned<PrimTy>,
    pub declarators: Vec<Declarator>,
}

#[derive(Clone, Debug)]
pub struct Declarator {
    pub name: Spanned<String>,
    pub init: Option<Spanned<Expr>>,
}

/// A C-style `for (init; cond; update) body` loop.
///
/// All three header clauses are optional; the update clause is a
/// comma-separated expression list.
#[derive(Clone, Debug)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub cond: Option<Spanned<Expr>>,
    pub update: Vec<Spanned<Expr>>,
    pub body: Box<Spanned<Stmt>>,
}

#[derive(Clone, Debug)]
pub enum ForInit {
    Decl(DeclStmt),
    Exprs(Vec<Spanned<Expr>>),
}

/// Expressions.
///
/// Parenthesized sub-expressions are kept as explicit `Paren` nodes:
/// the analyses reason about surface syntax and unwrap them deliberately.
#[derive(Clone, Debug)]
pub enum Expr {
    IntLit {
        value: i64,
        long: bool,
    },
    BoolLit(bool),
    Var(String),
    Paren(Box<Spanned<Expr>>),
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    IncDec {
        op: IncDecOp,
        fixity: Fixity,
        target: Box<Spanned<Expr>>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    Assign {
        op: AssignOp,
        target: Box<Spanned<Expr>>,
        value: Box<Spanned<Expr>>,
    },
    Call {
        name: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -
    Not, // !
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncDecOp {
    Inc, // ++
    Dec, // --
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Rem, // %
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
    Eq,  // ==
    Ne,  // !=
    And, // &&
    Or,  // ||
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl IncDecOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Binding powers for Pratt parsing; higher binds tighter.
    pub fn binding_power(&self) -> (u8, u8) {
        match self {
            BinOp::Or => (3, 4),
            BinOp::And => (5, 6),
            BinOp::Eq | BinOp::Ne => (7, 8),
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => (9, 10),
            BinOp::Add | BinOp::Sub => (11, 12),
            BinOp::Mul | BinOp::Div | BinOp::Rem => (13, 14),
        }
    }
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}
