//! Render expressions back to source text, for reports and diagnostics.

use super::{Expr, Fixity};

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::IntLit { value, long: false } => value.to_string(),
        Expr::IntLit { value, long: true } => format!("{}L", value),
        Expr::BoolLit(b) => b.to_string(),
        Expr::Var(name) => name.clone(),
        Expr::Paren(inner) => format!("({})", render_expr(&inner.node)),
        Expr::Unary { op, operand } => format!("{}{}", op.as_str(), render_expr(&operand.node)),
        Expr::IncDec {
            op,
            fixity: Fixity::Prefix,
            target,
        } => format!("{}{}", op.as_str(), render_expr(&target.node)),
        Expr::IncDec {
            op,
            fixity: Fixity::Postfix,
            target,
        } => format!("{}{}", render_expr(&target.node), op.as_str()),
        Expr::Binary { op, lhs, rhs } => format!(
            "{} {} {}",
            render_expr(&lhs.node),
            op.as_str(),
            render_expr(&rhs.node)
        ),
        Expr::Assign { op, target, value } => format!(
            "{} {} {}",
            render_expr(&target.node),
            op.as_str(),
            render_expr(&value.node)
        ),
        Expr::Call { name, args } => {
            let rendered: Vec<String> = args.iter().map(|a| render_expr(&a.node)).collect();
            format!("{}({})", name.node, rendered.join(", "))
        }
    }
}
