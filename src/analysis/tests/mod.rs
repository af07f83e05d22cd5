//! Counting-loop recognizer test suites.

mod recognize;

use crate::analysis::context::{FnSig, TypeContext};
use crate::analysis::counting_loop::CountingLoop;
use crate::ast::{File, ForInit, ForStmt, Stmt};

fn parse(source: &str) -> File {
    crate::parse_source_silent(source).expect("test source must parse")
}

/// Recognize the first for loop in the first function, with parameters,
/// earlier top-level declarations, and the loop's own counter in scope —
/// the same environment the analyzer builds.
fn recognize(file: &File) -> Option<CountingLoop<'_>> {
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

    let func = &file.functions[0].node;
    for param in &func.params {
        cx.declare(&param.name.node, param.ty.node);
    }

    let for_stmt = find_for(file, &mut cx)?;
    if let Some(ForInit::Decl(decl)) = &for_stmt.init {
        for declarator in &decl.declarators {
            cx.declare(&declarator.name.node, decl.ty.node);
        }
    }
    CountingLoop::from_for(for_stmt, &cx)
}

fn find_for<'a>(file: &'a File, cx: &mut TypeContext) -> Option<&'a ForStmt> {
    for stmt in &file.functions[0].node.body.node.stmts {
        match &stmt.node {
            Stmt::Decl(decl) => {
                for declarator in &decl.declarators {
                    cx.declare(&declarator.name.node, decl.ty.node);
                }
            }
            Stmt::For(for_stmt) => return Some(for_stmt),
            _ => {}
        }
    }
    None
}

/// Whether the first for loop in `source` is recognized at all.
fn recognizes(source: &str) -> bool {
    let file = parse(source);
    recognize(&file).is_some()
}
