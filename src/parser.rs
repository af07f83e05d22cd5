use crate::ast::navigate::as_variable;
use crate::ast::*;
use crate::diagnostic::Diagnostic;
use crate::lexeme::Lexeme;
use crate::span::{Span, Spanned};
use crate::types::PrimTy;

const MAX_NESTING_DEPTH: u32 = 256;

/// Assignment binds loosest and associates to the right.
const ASSIGN_BINDING: (u8, u8) = (2, 1);

pub(crate) struct Parser {
    tokens: Vec<Spanned<Lexeme>>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Spanned<Lexeme>>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn parse_file(mut self) -> Result<File, Vec<Diagnostic>> {
        let mut functions = Vec::new();
        while !self.at(&Lexeme::Eof) {
            let before = self.pos;
            if let Some(func) = self.parse_function() {
                functions.push(func);
            }
            if self.pos == before {
                // error recovery: skip the offending token
                self.advance();
            }
        }

        if !self.diagnostics.is_empty() {
            return Err(self.diagnostics);
        }
        Ok(File { functions })
    }

    fn parse_function(&mut self) -> Option<Spanned<FnDef>> {
        let start = self.current_span();
        let return_ty = self.parse_type()?;
        let name = self.expect_ident();
        self.expect(&Lexeme::LParen);
        let params = self.parse_params();
        self.expect(&Lexeme::RParen);
        let body = self.parse_block();
        let span = start.merge(self.prev_span());
        Some(Spanned::new(
            FnDef {
                return_ty,
                name,
                params,
                body,
            },
            span,
        ))
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        if self.at(&Lexeme::RParen) {
            return params;
        }
        loop {
            let Some(ty) = self.parse_type() else {
                break;
            };
            let name = self.expect_ident();
            params.push(Param { ty, name });
            if !self.eat(&Lexeme::Comma) {
                break;
            }
        }
        params
    }

    fn parse_type(&mut self) -> Option<Spanned<PrimTy>> {
        let span = self.current_span();
        match type_of_lexeme(self.peek()) {
            Some(ty) => {
                self.advance();
                Some(Spanned::new(ty, span))
            }
            None => {
                self.diagnostics.push(
                    Diagnostic::error(
                        format!("expected a type, found {}", self.peek().description()),
                        span,
                    )
                    .help(
                        "types are 'boolean', 'byte', 'char', 'short', 'int', 'long', \
                         'float', 'double', or 'void'"
                            .to_string(),
                    ),
                );
                None
            }
        }
    }

    fn parse_block(&mut self) -> Spanned<Block> {
        let start = self.current_span();
        self.expect(&Lexeme::LBrace);
        let mut stmts = Vec::new();
        while !self.at(&Lexeme::RBrace) && !self.at(&Lexeme::Eof) {
            stmts.push(self.parse_stmt());
        }
        self.expect(&Lexeme::RBrace);
        Spanned::new(Block { stmts }, start.merge(self.prev_span()))
    }

    fn parse_stmt(&mut self) -> Spanned<Stmt> {
        if !self.enter_nesting() {
            self.exit_nesting();
            let span = self.current_span();
            self.advance();
            return Spanned::new(Stmt::Empty, span);
        }
        let stmt = self.parse_stmt_inner();
        self.exit_nesting();
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Spanned<Stmt> {
        let start = self.current_span();

        if type_of_lexeme(self.peek()).is_some() {
            let stmt = match self.parse_decl() {
                Some(decl) => Stmt::Decl(decl),
                None => Stmt::Empty,
            };
            self.expect(&Lexeme::Semicolon);
            return Spanned::new(stmt, start.merge(self.prev_span()));
        }

        match self.peek() {
            Lexeme::If => {
                self.advance();
                self.expect(&Lexeme::LParen);
                let cond = self.parse_expr();
                self.expect(&Lexeme::RParen);
                let then_branch = Box::new(self.parse_stmt());
                let else_branch = if self.eat(&Lexeme::Else) {
                    Some(Box::new(self.parse_stmt()))
                } else {
                    None
                };
                Spanned::new(
                    Stmt::If {
                        cond,
                        then_branch,
                        else_branch,
                    },
                    start.merge(self.prev_span()),
                )
            }
            Lexeme::While => {
                self.advance();
                self.expect(&Lexeme::LParen);
                let cond = self.parse_expr();
                self.expect(&Lexeme::RParen);
                let body = Box::new(self.parse_stmt());
                Spanned::new(Stmt::While { cond, body }, start.merge(self.prev_span()))
            }
            Lexeme::For => self.parse_for(),
            Lexeme::Return => {
                self.advance();
                let value = if self.at(&Lexeme::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(&Lexeme::Semicolon);
                Spanned::new(Stmt::Return(value), start.merge(self.prev_span()))
            }
            Lexeme::LBrace => {
                let block = self.parse_block();
                let span = block.span;
                Spanned::new(Stmt::Block(block.node), span)
            }
            Lexeme::Semicolon => {
                self.advance();
                Spanned::new(Stmt::Empty, start)
            }
            _ => {
                let expr = self.parse_expr();
                self.expect(&Lexeme::Semicolon);
                Spanned::new(Stmt::Expr(expr), start.merge(self.prev_span()))
            }
        }
    }

    /// Parse `type declarator (, declarator)*` — the caller consumes the
    /// terminating `;` (a for-loop header has its own).
    fn parse_decl(&mut self) -> Option<DeclStmt> {
        let ty = self.parse_type()?;
        let mut declarators = Vec::new();
        loop {
            let name = self.expect_ident();
            let init = if self.eat(&Lexeme::Assign) {
                Some(self.parse_expr())
            } else {
                None
            };
            declarators.push(Declarator { name, init });
            if !self.eat(&Lexeme::Comma) {
                break;
            }
        }
        Some(DeclStmt { ty, declarators })
    }

    fn parse_for(&mut self) -> Spanned<Stmt> {
        let start = self.current_span();
        self.expect(&Lexeme::For);
        self.expect(&Lexeme::LParen);

        let init = if self.at(&Lexeme::Semicolon) {
            None
        } else if type_of_lexeme(self.peek()).is_some() {
            self.parse_decl().map(ForInit::Decl)
        } else {
            Some(ForInit::Exprs(self.parse_expr_list()))
        };
        self.expect(&Lexeme::Semicolon);

        let cond = if self.at(&Lexeme::Semicolon) {
            None
        } else {
            Some(self.parse_expr())
        };
        self.expect(&Lexeme::Semicolon);

        let update = if self.at(&Lexeme::RParen) {
            Vec::new()
        } else {
            self.parse_expr_list()
        };
        self.expect(&Lexeme::RParen);

        let body = Box::new(self.parse_stmt());
        Spanned::new(
            Stmt::For(ForStmt {
                init,
                cond,
                update,
                body,
            }),
            start.merge(self.prev_span()),
        )
    }

    fn parse_expr_list(&mut self) -> Vec<Spanned<Expr>> {
        let mut exprs = vec![self.parse_expr()];
        while self.eat(&Lexeme::Comma) {
            exprs.push(self.parse_expr());
        }
        exprs
    }

    pub(crate) fn parse_expr(&mut self) -> Spanned<Expr> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Spanned<Expr> {
        let mut lhs = self.parse_unary();

        loop {
            if let Some(op) = assign_op_of_lexeme(self.peek()) {
                let (l_bp, r_bp) = ASSIGN_BINDING;
                if l_bp < min_bp {
                    break;
                }
                if as_variable(&lhs).is_none() {
                    self.diagnostics.push(
                        Diagnostic::error(
                            "invalid assignment target".to_string(),
                            lhs.span,
                        )
                        .help("only variables can be assigned to".to_string()),
                    );
                }
                self.advance();
                let value = self.parse_expr_bp(r_bp);
                let span = lhs.span.merge(value.span);
                lhs = Spanned::new(
                    Expr::Assign {
                        op,
                        target: Box::new(lhs),
                        value: Box::new(value),
                    },
                    span,
                );
                continue;
            }

            let op = match self.peek() {
                Lexeme::OrOr => BinOp::Or,
                Lexeme::AndAnd => BinOp::And,
                Lexeme::EqEq => BinOp::Eq,
                Lexeme::NotEq => BinOp::Ne,
                Lexeme::Lt => BinOp::Lt,
                Lexeme::Le => BinOp::Le,
                Lexeme::Gt => BinOp::Gt,
                Lexeme::Ge => BinOp::Ge,
                Lexeme::Plus => BinOp::Add,
                Lexeme::Minus => BinOp::Sub,
                Lexeme::Star => BinOp::Mul,
                Lexeme::Slash => BinOp::Div,
                Lexeme::Percent => BinOp::Rem,
                _ => break,
            };

            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }

            self.advance();
            let rhs = self.parse_expr_bp(r_bp);
            let span = lhs.span.merge(rhs.span);
            lhs = Spanned::new(
                Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        lhs
    }

    fn parse_unary(&mut self) -> Spanned<Expr> {
        let start = self.current_span();
        let prefix = match self.peek() {
            Lexeme::Minus => Some(PrefixOp::Unary(UnaryOp::Neg)),
            Lexeme::Bang => Some(PrefixOp::Unary(UnaryOp::Not)),
            Lexeme::PlusPlus => Some(PrefixOp::IncDec(IncDecOp::Inc)),
            Lexeme::MinusMinus => Some(PrefixOp::IncDec(IncDecOp::Dec)),
            _ => None,
        };

        match prefix {
            Some(PrefixOp::Unary(op)) => {
                self.advance();
                let operand = self.parse_unary();
                let span = start.merge(operand.span);
                Spanned::new(
                    Expr::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                )
            }
            Some(PrefixOp::IncDec(op)) => {
                self.advance();
                let target = self.parse_unary();
                self.check_incdec_target(&target, op);
                let span = start.merge(target.span);
                Spanned::new(
                    Expr::IncDec {
                        op,
                        fixity: Fixity::Prefix,
                        target: Box::new(target),
                    },
                    span,
                )
            }
            None => {
                let primary = self.parse_primary();
                self.parse_postfix(primary)
            }
        }
    }

    fn parse_postfix(&mut self, mut expr: Spanned<Expr>) -> Spanned<Expr> {
        loop {
            let op = match self.peek() {
                Lexeme::PlusPlus => IncDecOp::Inc,
                Lexeme::MinusMinus => IncDecOp::Dec,
                _ => break,
            };
            self.advance();
            self.check_incdec_target(&expr, op);
            let span = expr.span.merge(self.prev_span());
            expr = Spanned::new(
                Expr::IncDec {
                    op,
                    fixity: Fixity::Postfix,
                    target: Box::new(expr),
                },
                span,
            );
        }
        expr
    }

    fn check_incdec_target(&mut self, target: &Spanned<Expr>, op: IncDecOp) {
        if as_variable(target).is_none() {
            self.diagnostics.push(
                Diagnostic::error(
                    format!("'{}' target must be a variable", op.as_str()),
                    target.span,
                )
                .help("increment and decrement modify a variable in place".to_string()),
            );
        }
    }

    fn parse_primary(&mut self) -> Spanned<Expr> {
        let start = self.current_span();

        match self.peek().clone() {
            Lexeme::Integer { value, long } => {
                self.advance();
                Spanned::new(Expr::IntLit { value, long }, start)
            }
            Lexeme::True => {
                self.advance();
                Spanned::new(Expr::BoolLit(true), start)
            }
            Lexeme::False => {
                self.advance();
                Spanned::new(Expr::BoolLit(false), start)
            }
            Lexeme::LParen => {
                if !self.enter_nesting() {
                    self.exit_nesting();
                    self.advance();
                    return Spanned::new(Expr::IntLit { value: 0, long: false }, start);
                }
                self.advance();
                let inner = self.parse_expr();
                self.expect(&Lexeme::RParen);
                self.exit_nesting();
                let span = start.merge(self.prev_span());
                Spanned::new(Expr::Paren(Box::new(inner)), span)
            }
            Lexeme::Ident(name) => {
                self.advance();
                if self.at(&Lexeme::LParen) {
                    self.advance();
                    let args = if self.at(&Lexeme::RParen) {
                        Vec::new()
                    } else {
                        self.parse_expr_list()
                    };
                    self.expect(&Lexeme::RParen);
                    let span = start.merge(self.prev_span());
                    Spanned::new(
                        Expr::Call {
                            name: Spanned::new(name, start),
                            args,
                        },
                        span,
                    )
                } else {
                    Spanned::new(Expr::Var(name), start)
                }
            }
            other => {
                self.diagnostics.push(Diagnostic::error(
                    format!("expected an expression, found {}", other.description()),
                    start,
                ));
                self.advance();
                Spanned::new(Expr::IntLit { value: 0, long: false }, start)
            }
        }
    }

    fn enter_nesting(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            self.diagnostics.push(
                Diagnostic::error(
                    "nesting depth exceeded (maximum 256 levels)".to_string(),
                    self.current_span(),
                )
                .help("split deeply nested code into smaller functions".to_string()),
            );
            return false;
        }
        true
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> &Lexeme {
        &self.tokens[self.pos].node
    }

    fn at(&self, lexeme: &Lexeme) -> bool {
        self.peek() == lexeme
    }

    fn eat(&mut self, lexeme: &Lexeme) -> bool {
        if self.at(lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Spanned<Lexeme> {
        let tok = self.tokens[self.pos].clone();
        if tok.node != Lexeme::Eof {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Lexeme) {
        if self.at(expected) {
            self.advance();
        } else {
            self.diagnostics.push(Diagnostic::error(
                format!(
                    "expected {}, found {}",
                    expected.description(),
                    self.peek().description()
                ),
                self.current_span(),
            ));
        }
    }

    fn expect_ident(&mut self) -> Spanned<String> {
        if let Lexeme::Ident(name) = self.peek() {
            let name = name.clone();
            let tok = self.advance();
            Spanned::new(name, tok.span)
        } else {
            self.diagnostics.push(Diagnostic::error(
                format!("expected identifier, found {}", self.peek().description()),
                self.current_span(),
            ));
            Spanned::new(String::new(), self.current_span())
        }
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }
}

enum PrefixOp {
    Unary(UnaryOp),
    IncDec(IncDecOp),
}

fn type_of_lexeme(lexeme: &Lexeme) -> Option<PrimTy> {
    match lexeme {
        Lexeme::Boolean => Some(PrimTy::Boolean),
        Lexeme::Byte => Some(PrimTy::Byte),
        Lexeme::Char => Some(PrimTy::Char),
        Lexeme::Short => Some(PrimTy::Short),
        Lexeme::Int => Some(PrimTy::Int),
        Lexeme::Long => Some(PrimTy::Long),
        Lexeme::Float => Some(PrimTy::Float),
        Lexeme::Double => Some(PrimTy::Double),
        Lexeme::Void => Some(PrimTy::Void),
        _ => None,
    }
}

fn assign_op_of_lexeme(lexeme: &Lexeme) -> Option<AssignOp> {
    match lexeme {
        Lexeme::Assign => Some(AssignOp::Assign),
        Lexeme::PlusAssign => Some(AssignOp::AddAssign),
        Lexeme::MinusAssign => Some(AssignOp::SubAssign),
        Lexeme::StarAssign => Some(AssignOp::MulAssign),
        Lexeme::SlashAssign => Some(AssignOp::DivAssign),
        _ => None,
    }
}
