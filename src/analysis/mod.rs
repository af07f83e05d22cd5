//! Static analysis over parsed files: counting-loop recognition and the
//! lints built on top of it.

pub mod access;
pub mod context;
pub mod counting_loop;
pub mod relation;

#[cfg(test)]
mod tests;

use crate::ast::{display, Block, DeclStmt, File, FnDef, ForInit, ForStmt, Stmt};
use crate::diagnostic::Diagnostic;
use crate::report::{AnalysisReport, LoopSummary};

use context::{FnSig, TypeContext};
use counting_loop::CountingLoop;

/// Walks a file, recognizes counting loops, and produces the report
/// plus lint warnings.
pub struct Analyzer<'src> {
    source: &'src str,
    file_name: String,
    cx: TypeContext,
    current_fn: String,
    loops: Vec<LoopSummary>,
    warnings: Vec<Diagnostic>,
}

impl<'src> Analyzer<'src> {
    pub fn new(source: &'src str, file_name: &str) -> Self {
        Self {
            source,
            file_name: file_name.to_string(),
            cx: TypeContext::new(),
            current_fn: String::new(),
            loops: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn analyze(mut self, file: &File) -> (AnalysisReport, Vec<Diagnostic>) {
        // Signatures first, so bounds may call functions declared later.
        for func in &file.functions {
            self.cx.declare_function(
                &func.node.name.node,
                FnSig {
                    params: func.node.params.iter().map(|p| p.ty.node).collect(),
                    return_ty: func.node.return_ty.node,
                },
            );
        }

        for func in &file.functions {
            self.analyze_fn(&func.node);
        }

        (AnalysisReport { loops: self.loops }, self.warnings)
    }

    fn analyze_fn(&mut self, func: &FnDef) {
        self.current_fn = func.name.node.clone();
        self.cx.push_scope();
        for param in &func.params {
            self.cx.declare(&param.name.node, param.ty.node);
        }
        self.walk_block(&func.body.node);
        self.cx.pop_scope();
    }

    fn walk_block(&mut self, block: &Block) {
        self.cx.push_scope();
        for stmt in &block.stmts {
            self.walk_stmt(&stmt.node);
        }
        self.cx.pop_scope();
    }

    fn walk_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.bind_decl(decl),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.walk_substmt(&then_branch.node);
                if let Some(else_branch) = else_branch {
                    self.walk_substmt(&else_branch.node);
                }
            }
            Stmt::While { body, .. } => self.walk_substmt(&body.node),
            Stmt::For(for_stmt) => self.walk_for(for_stmt),
            Stmt::Block(block) => self.walk_block(block),
            Stmt::Expr(_) | Stmt::Return(_) | Stmt::Empty => {}
        }
    }

    /// A branch or loop body is its own scope even when it is not a
    /// braced block.
    fn walk_substmt(&mut self, stmt: &Stmt) {
        self.cx.push_scope();
        self.walk_stmt(stmt);
        self.cx.pop_scope();
    }

    fn bind_decl(&mut self, decl: &DeclStmt) {
        for declarator in &decl.declarators {
            self.cx.declare(&declarator.name.node, decl.ty.node);
        }
    }

    fn walk_for(&mut self, for_stmt: &ForStmt) {
        self.cx.push_scope();
        if let Some(ForInit::Decl(decl)) = &for_stmt.init {
            self.bind_decl(decl);
        }

        if let Some(found) = CountingLoop::from_for(for_stmt, &self.cx) {
            self.record(&found, for_stmt);
        }

        self.walk_substmt(&for_stmt.body.node);
        self.cx.pop_scope();
    }

    fn record(&mut self, found: &CountingLoop, for_stmt: &ForStmt) {
        self.loops.push(LoopSummary {
            file: self.file_name.clone(),
            function: self.current_fn.clone(),
            line: found.counter_span().line(self.source),
            counter: found.counter_name().to_string(),
            counter_ty: found.counter_ty().display().to_string(),
            descending: found.is_descending(),
            including: found.is_including(),
            may_overflow: found.may_overflow(),
            initializer: display::render_expr(&found.initializer().node),
            bound: display::render_expr(&found.bound().node),
        });

        if found.may_overflow() {
            if let Some(cond) = &for_stmt.cond {
                self.warnings.push(
                    Diagnostic::warning(
                        format!(
                            "counter '{}' may wrap past the numeric range before reaching \
                             its bound",
                            found.counter_name()
                        ),
                        cond.span,
                    )
                    .note("the loop terminates on '!=' rather than an ordered comparison"
                        .to_string())
                    .help("prefer '<' or '>' so the bound cannot be stepped over".to_string()),
                );
            }
        }
    }
}
