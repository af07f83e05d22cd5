//! AST navigation: function lookup and the small expression utilities
//! the analyses are built on.

use super::{Expr, File, FnDef};
use crate::span::Spanned;

/// Find a function by name in a parsed file.
pub fn find_function<'a>(file: &'a File, name: &str) -> Option<&'a FnDef> {
    file.functions
        .iter()
        .map(|f| &f.node)
        .find(|f| f.name.node == name)
}

/// Strip any nesting of parentheses: `((x))` → `x`.
pub fn unwrap_parens(expr: &Spanned<Expr>) -> &Spanned<Expr> {
    let mut current = expr;
    while let Expr::Paren(inner) = &current.node {
        current = inner;
    }
    current
}

/// The identifier of a variable reference, looking through parentheses.
pub fn as_variable(expr: &Spanned<Expr>) -> Option<&str> {
    match &unwrap_parens(expr).node {
        Expr::Var(name) => Some(name),
        _ => None,
    }
}

/// Which operand of a binary expression a variable occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSide {
    Left,
    Right,
}

/// Of a comparison's two operands, return the one that is NOT the named
/// variable, together with the side the variable sits on.
///
/// `None` when neither operand is the variable, or both are.
pub fn other_operand<'a>(
    lhs: &'a Spanned<Expr>,
    rhs: &'a Spanned<Expr>,
    name: &str,
) -> Option<(&'a Spanned<Expr>, OperandSide)> {
    let on_left = as_variable(lhs) == Some(name);
    let on_right = as_variable(rhs) == Some(name);
    match (on_left, on_right) {
        (true, false) => Some((rhs, OperandSide::Left)),
        (false, true) => Some((lhs, OperandSide::Right)),
        _ => None,
    }
}
