//! Variable access utilities: unit-step classification for loop update
//! clauses and the write-interference check over statement subtrees.

use crate::ast::navigate::{as_variable, unwrap_parens};
use crate::ast::{AssignOp, BinOp, Block, DeclStmt, Expr, ForInit, ForStmt, IncDecOp, Stmt};
use crate::span::Spanned;

/// The direction a counter moves per iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Classify a loop's update clause as a unit step of the named variable.
///
/// Accepted shapes: `x++`, `++x`, `x--`, `--x`, `x += 1`, `x -= 1`,
/// `x = x + 1`, `x = 1 + x`, `x = x - 1` (literal one, `1` or `1L`).
/// Anything else — other step sizes, another variable, more than one
/// update expression — is not a unit step.
pub fn counting_step(name: &str, update: &[Spanned<Expr>]) -> Option<StepDirection> {
    let [only] = update else {
        return None;
    };

    match &unwrap_parens(only).node {
        Expr::IncDec { op, target, .. } if as_variable(target) == Some(name) => Some(match op {
            IncDecOp::Inc => StepDirection::Up,
            IncDecOp::Dec => StepDirection::Down,
        }),
        Expr::Assign {
            op: AssignOp::AddAssign,
            target,
            value,
        } if as_variable(target) == Some(name) && is_literal_one(value) => Some(StepDirection::Up),
        Expr::Assign {
            op: AssignOp::SubAssign,
            target,
            value,
        } if as_variable(target) == Some(name) && is_literal_one(value) => {
            Some(StepDirection::Down)
        }
        Expr::Assign {
            op: AssignOp::Assign,
            target,
            value,
        } if as_variable(target) == Some(name) => match &unwrap_parens(value).node {
            Expr::Binary {
                op: BinOp::Add,
                lhs,
                rhs,
            } => {
                if as_variable(lhs) == Some(name) && is_literal_one(rhs) {
                    Some(StepDirection::Up)
                } else if is_literal_one(lhs) && as_variable(rhs) == Some(name) {
                    Some(StepDirection::Up)
                } else {
                    None
                }
            }
            Expr::Binary {
                op: BinOp::Sub,
                lhs,
                rhs,
            } if as_variable(lhs) == Some(name) && is_literal_one(rhs) => {
                Some(StepDirection::Down)
            }
            _ => None,
        },
        _ => None,
    }
}

fn is_literal_one(expr: &Spanned<Expr>) -> bool {
    matches!(unwrap_parens(expr).node, Expr::IntLit { value: 1, .. })
}

/// Is the named variable the target of any write — assignment, compound
/// assignment, or `++`/`--` — anywhere within the statement subtree?
///
/// Scope-aware: a nested declaration of the same name shadows the outer
/// variable, so writes beyond that point in the inner scope do not count.
pub fn is_assigned(name: &str, stmt: &Spanned<Stmt>) -> bool {
    assigned_in_stmt(name, &stmt.node)
}

fn assigned_in_stmt(name: &str, stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Decl(decl) => assigned_in_decl(name, decl).0,
        Stmt::Expr(expr) => assigned_in_expr(name, expr),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            assigned_in_expr(name, cond)
                || assigned_in_stmt(name, &then_branch.node)
                || else_branch
                    .as_ref()
                    .is_some_and(|e| assigned_in_stmt(name, &e.node))
        }
        Stmt::While { cond, body } => {
            assigned_in_expr(name, cond) || assigned_in_stmt(name, &body.node)
        }
        Stmt::For(for_stmt) => assigned_in_for(name, for_stmt),
        Stmt::Return(Some(expr)) => assigned_in_expr(name, expr),
        Stmt::Return(None) | Stmt::Empty => false,
        Stmt::Block(block) => assigned_in_block(name, block),
    }
}

fn assigned_in_block(name: &str, block: &Block) -> bool {
    for stmt in &block.stmts {
        if let Stmt::Decl(decl) = &stmt.node {
            let (writes, shadows) = assigned_in_decl(name, decl);
            if writes {
                return true;
            }
            if shadows {
                // the rest of the block refers to the inner variable
                return false;
            }
        } else if assigned_in_stmt(name, &stmt.node) {
            return true;
        }
    }
    false
}

/// Scan a declaration's initializers for writes to `name`; also report
/// whether the declaration itself introduces a shadowing `name`.
fn assigned_in_decl(name: &str, decl: &DeclStmt) -> (bool, bool) {
    let mut shadows = false;
    for declarator in &decl.declarators {
        if !shadows
            && declarator
                .init
                .as_ref()
                .is_some_and(|e| assigned_in_expr(name, e))
        {
            return (true, shadows);
        }
        if declarator.name.node == name {
            shadows = true;
        }
    }
    (false, shadows)
}

fn assigned_in_for(name: &str, for_stmt: &ForStmt) -> bool {
    let mut shadowed = false;
    match &for_stmt.init {
        Some(ForInit::Decl(decl)) => {
            let (writes, shadows) = assigned_in_decl(name, decl);
            if writes {
                return true;
            }
            shadowed = shadows;
        }
        Some(ForInit::Exprs(exprs)) => {
            if exprs.iter().any(|e| assigned_in_expr(name, e)) {
                return true;
            }
        }
        None => {}
    }
    if shadowed {
        // the loop's own counter shadows the outer name
        return false;
    }
    for_stmt
        .cond
        .as_ref()
        .is_some_and(|e| assigned_in_expr(name, e))
        || for_stmt.update.iter().any(|e| assigned_in_expr(name, e))
        || assigned_in_stmt(name, &for_stmt.body.node)
}

fn assigned_in_expr(name: &str, expr: &Spanned<Expr>) -> bool {
    match &expr.node {
        Expr::Assign { target, value, .. } => {
            as_variable(target) == Some(name) || assigned_in_expr(name, value)
        }
        Expr::IncDec { target, .. } => as_variable(target) == Some(name),
        Expr::Paren(inner) => assigned_in_expr(name, inner),
        Expr::Unary { operand, .. } => assigned_in_expr(name, operand),
        Expr::Binary { lhs, rhs, .. } => {
            assigned_in_expr(name, lhs) || assigned_in_expr(name, rhs)
        }
        Expr::Call { args, .. } => args.iter().any(|a| assigned_in_expr(name, a)),
        Expr::IntLit { .. } | Expr::BoolLit(_) | Expr::Var(_) => false,
    }
}
