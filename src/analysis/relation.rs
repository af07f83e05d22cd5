//! Relation algebra over comparison operators: classification, operand
//! flipping, and logical-implication queries.

use crate::ast::BinOp;

/// The kind of a binary comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Relation {
    /// Classify a binary operator; arithmetic and logical operators are
    /// not relations.
    pub fn from_bin_op(op: BinOp) -> Option<Relation> {
        match op {
            BinOp::Lt => Some(Relation::Lt),
            BinOp::Le => Some(Relation::Le),
            BinOp::Gt => Some(Relation::Gt),
            BinOp::Ge => Some(Relation::Ge),
            BinOp::Eq => Some(Relation::Eq),
            BinOp::Ne => Some(Relation::Ne),
            _ => None,
        }
    }

    /// The relation that holds when the operands are swapped:
    /// `a < b` ⟺ `b > a`.
    pub fn flipped(self) -> Relation {
        match self {
            Relation::Lt => Relation::Gt,
            Relation::Le => Relation::Ge,
            Relation::Gt => Relation::Lt,
            Relation::Ge => Relation::Le,
            Relation::Eq => Relation::Eq,
            Relation::Ne => Relation::Ne,
        }
    }

    /// True for every relation except plain equality: `{<, <=, >, >=, !=}`
    /// are inequalities, `==` is not.
    pub fn is_inequality(self) -> bool {
        self != Relation::Eq
    }

    /// True if `self` holding between two values implies `other` holds
    /// between them. `Lt` implies `Le` and `Ne`; `Eq` implies `Le` and
    /// `Ge`; every relation implies itself.
    pub fn is_sub_relation_of(self, other: Relation) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (Relation::Lt, Relation::Le)
                | (Relation::Lt, Relation::Ne)
                | (Relation::Gt, Relation::Ge)
                | (Relation::Gt, Relation::Ne)
                | (Relation::Eq, Relation::Le)
                | (Relation::Eq, Relation::Ge)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Lt => "<",
            Relation::Le => "<=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
            Relation::Eq => "==",
            Relation::Ne => "!=",
        }
    }
}
