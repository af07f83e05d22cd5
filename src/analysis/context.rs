//! Lexical scopes and expression typing for the analysis pass.

use std::collections::HashMap;

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::span::Spanned;
use crate::types::{self, PrimTy};

/// A function signature visible to expression typing.
#[derive(Clone, Debug)]
pub struct FnSig {
    pub params: Vec<PrimTy>,
    pub return_ty: PrimTy,
}

/// A stack of lexical scopes plus the file's function signatures.
///
/// Answers "what is the static type of this expression here" for the
/// recognizer's bound-compatibility check.
#[derive(Debug)]
pub struct TypeContext {
    scopes: Vec<HashMap<String, PrimTy>>,
    functions: HashMap<String, FnSig>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            functions: HashMap::new(),
        }
    }

    pub fn declare_function(&mut self, name: &str, sig: FnSig) {
        self.functions.insert(name.to_string(), sig);
    }

    pub fn function(&self, name: &str) -> Option<&FnSig> {
        self.functions.get(name)
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn declare(&mut self, name: &str, ty: PrimTy) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    /// Innermost declaration wins.
    pub fn lookup(&self, name: &str) -> Option<PrimTy> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .copied()
    }

    /// Infer the static type of an expression; `None` when it cannot be
    /// determined (unknown identifier, unresolved call, ill-typed
    /// operation).
    pub fn infer(&self, expr: &Spanned<Expr>) -> Option<PrimTy> {
        match &expr.node {
            Expr::IntLit { long: true, .. } => Some(PrimTy::Long),
            Expr::IntLit { long: false, .. } => Some(PrimTy::Int),
            Expr::BoolLit(_) => Some(PrimTy::Boolean),
            Expr::Var(name) => self.lookup(name),
            Expr::Paren(inner) => self.infer(inner),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => types::unary_numeric_promotion(self.infer(operand)?),
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => (self.infer(operand)? == PrimTy::Boolean).then_some(PrimTy::Boolean),
            Expr::IncDec { target, .. } => self.infer(target),
            Expr::Binary { op, lhs, rhs } => {
                let lhs_ty = self.infer(lhs)?;
                let rhs_ty = self.infer(rhs)?;
                match op {
                    BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                        types::binary_numeric_promotion(lhs_ty, rhs_ty)
                    }
                    BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => (lhs_ty.is_numeric()
                        && rhs_ty.is_numeric())
                    .then_some(PrimTy::Boolean),
                    BinOp::Eq | BinOp::Ne => ((lhs_ty.is_numeric() && rhs_ty.is_numeric())
                        || (lhs_ty == PrimTy::Boolean && rhs_ty == PrimTy::Boolean))
                    .then_some(PrimTy::Boolean),
                    BinOp::And | BinOp::Or => (lhs_ty == PrimTy::Boolean
                        && rhs_ty == PrimTy::Boolean)
                        .then_some(PrimTy::Boolean),
                }
            }
            Expr::Assign { target, .. } => self.infer(target),
            Expr::Call { name, .. } => self.functions.get(&name.node).map(|sig| sig.return_ty),
        }
    }
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::navigate::find_function;
    use crate::ast::{File, Stmt};

    /// Type the initializer of the last declaration in `f`, with every
    /// earlier declaration and parameter in scope.
    fn infer_last_init(source: &str) -> Option<PrimTy> {
        let file: File = crate::parse_source_silent(source).expect("test source must parse");
        let mut cx = TypeContext::new();
        for func in &file.functions {
            cx.declare_function(
                &func.node.name.node,
                FnSig {
                    params: func.node.params.iter().map(|p| p.ty.node).collect(),
                    return_ty: func.node.return_ty.node,
                },
            );
        }
        let func = find_function(&file, "f").expect("no function 'f'");
        cx.push_scope();
        for param in &func.params {
            cx.declare(&param.name.node, param.ty.node);
        }
        let mut result = None;
        for stmt in &func.body.node.stmts {
            if let Stmt::Decl(decl) = &stmt.node {
                for declarator in &decl.declarators {
                    result = declarator.init.as_ref().map(|init| cx.infer(init));
                    cx.declare(&declarator.name.node, decl.ty.node);
                }
            }
        }
        result.expect("no declaration with initializer")
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(
            infer_last_init("void f() { int x = 3; }"),
            Some(PrimTy::Int)
        );
        assert_eq!(
            infer_last_init("void f() { long x = 3L; }"),
            Some(PrimTy::Long)
        );
        assert_eq!(
            infer_last_init("void f() { boolean x = true; }"),
            Some(PrimTy::Boolean)
        );
    }

    #[test]
    fn test_variable_lookup_and_shadowing() {
        assert_eq!(
            infer_last_init("void f(long n) { long x = n; }"),
            Some(PrimTy::Long)
        );
        assert_eq!(infer_last_init("void f() { int x = missing; }"), None);
    }

    #[test]
    fn test_promotion_in_arithmetic() {
        assert_eq!(
            infer_last_init("void f(short a, byte b) { int x = a + b; }"),
            Some(PrimTy::Int)
        );
        assert_eq!(
            infer_last_init("void f(int a, long b) { long x = a * b; }"),
            Some(PrimTy::Long)
        );
    }

    #[test]
    fn test_negation_promotes() {
        assert_eq!(
            infer_last_init("void f(short a) { int x = -a; }"),
            Some(PrimTy::Int)
        );
        assert_eq!(infer_last_init("void f(boolean a) { int x = -a; }"), None);
    }

    #[test]
    fn test_comparisons_are_boolean() {
        assert_eq!(
            infer_last_init("void f(int a) { boolean x = a < 3; }"),
            Some(PrimTy::Boolean)
        );
        assert_eq!(
            infer_last_init("void f(boolean a, boolean b) { boolean x = a && b; }"),
            Some(PrimTy::Boolean)
        );
        assert_eq!(infer_last_init("void f(int a, boolean b) { boolean x = a == b; }"), None);
    }

    #[test]
    fn test_call_types_from_signature() {
        assert_eq!(
            infer_last_init("long size() { return 0; }\nvoid f() { long x = size(); }"),
            Some(PrimTy::Long)
        );
        assert_eq!(infer_last_init("void f() { int x = mystery(); }"), None);
    }
}
