use crate::diagnostic::Diagnostic;
use crate::lexeme::Lexeme;
use crate::span::{Span, Spanned};

pub struct Lexer<'src> {
    source: &'src [u8],
    file_id: u16,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file_id: u16) -> Self {
        Self {
            source: source.as_bytes(),
            file_id,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> (Vec<Spanned<Lexeme>>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.node == Lexeme::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Spanned<Lexeme> {
        loop {
            self.skip_whitespace_and_comments();

            if self.pos >= self.source.len() {
                return self.make_token(Lexeme::Eof, self.pos, self.pos);
            }

            let start = self.pos;
            let ch = self.source[self.pos];

            if is_ident_start(ch) {
                return self.scan_ident_or_keyword();
            }

            if ch.is_ascii_digit() {
                return self.scan_number();
            }

            if let Some(tok) = self.scan_symbol(start) {
                return tok;
            }
            // scan_symbol returned None → error was recorded, try again
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            // Line comments
            if self.pos + 1 < self.source.len()
                && self.source[self.pos] == b'/'
                && self.source[self.pos + 1] == b'/'
            {
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            break;
        }
    }

    fn scan_ident_or_keyword(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        while self.pos < self.source.len() && is_ident_continue(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        let token = Lexeme::from_keyword(text).unwrap_or_else(|| Lexeme::Ident(text.to_string()));
        self.make_token(token, start, self.pos)
    }

    /// Scan a decimal integer literal with an optional `l`/`L` suffix.
    fn scan_number(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();

        let long = if self.pos < self.source.len() && matches!(self.source[self.pos], b'l' | b'L')
        {
            self.pos += 1;
            true
        } else {
            false
        };

        let value = match text.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                self.diagnostics.push(
                    Diagnostic::error(
                        format!("integer literal '{}' is too large", text),
                        Span::new(self.file_id, start as u32, self.pos as u32),
                    )
                    .help("the largest representable literal is 9223372036854775807".to_string()),
                );
                0 // error recovery
            }
        };

        self.make_token(Lexeme::Integer { value, long }, start, self.pos)
    }

    fn scan_symbol(&mut self, start: usize) -> Option<Spanned<Lexeme>> {
        let ch = self.source[self.pos];
        self.pos += 1;

        let token = match ch {
            b'(' => Lexeme::LParen,
            b')' => Lexeme::RParen,
            b'{' => Lexeme::LBrace,
            b'}' => Lexeme::RBrace,
            b',' => Lexeme::Comma,
            b';' => Lexeme::Semicolon,
            b'%' => Lexeme::Percent,
            b'+' => match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    Lexeme::PlusPlus
                }
                Some(b'=') => {
                    self.pos += 1;
                    Lexeme::PlusAssign
                }
                _ => Lexeme::Plus,
            },
            b'-' => match self.peek() {
                Some(b'-') => {
                    self.pos += 1;
                    Lexeme::MinusMinus
                }
                Some(b'=') => {
                    self.pos += 1;
                    Lexeme::MinusAssign
                }
                _ => Lexeme::Minus,
            },
            b'*' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::StarAssign
                } else {
                    Lexeme::Star
                }
            }
            b'/' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::SlashAssign
                } else {
                    Lexeme::Slash
                }
            }
            b'=' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::EqEq
                } else {
                    Lexeme::Assign
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::NotEq
                } else {
                    Lexeme::Bang
                }
            }
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::Le
                } else {
                    Lexeme::Lt
                }
            }
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Lexeme::Ge
                } else {
                    Lexeme::Gt
                }
            }
            b'&' => {
                if self.peek() == Some(b'&') {
                    self.pos += 1;
                    Lexeme::AndAnd
                } else {
                    self.diagnostics.push(
                        Diagnostic::error(
                            "unexpected '&'; bitwise operators are not supported".to_string(),
                            Span::new(self.file_id, start as u32, self.pos as u32),
                        )
                        .help("use '&&' for logical and".to_string()),
                    );
                    return None;
                }
            }
            b'|' => {
                if self.peek() == Some(b'|') {
                    self.pos += 1;
                    Lexeme::OrOr
                } else {
                    self.diagnostics.push(
                        Diagnostic::error(
                            "unexpected '|'; bitwise operators are not supported".to_string(),
                            Span::new(self.file_id, start as u32, self.pos as u32),
                        )
                        .help("use '||' for logical or".to_string()),
                    );
                    return None;
                }
            }
            _ => {
                self.diagnostics.push(Diagnostic::error(
                    format!("unexpected character '{}'", ch as char),
                    Span::new(self.file_id, start as u32, self.pos as u32),
                ));
                return None;
            }
        };

        Some(self.make_token(token, start, self.pos))
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn make_token(&self, token: Lexeme, start: usize, end: usize) -> Spanned<Lexeme> {
        Spanned::new(token, Span::new(self.file_id, start as u32, end as u32))
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Lexeme> {
        let (tokens, diagnostics) = Lexer::new(source, 0).tokenize();
        assert!(diagnostics.is_empty(), "unexpected errors: {:?}", diagnostics);
        tokens.into_iter().map(|t| t.node).collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        let tokens = lex("int counter for forty");
        assert_eq!(
            tokens,
            vec![
                Lexeme::Int,
                Lexeme::Ident("counter".to_string()),
                Lexeme::For,
                Lexeme::Ident("forty".to_string()),
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        let tokens = lex("++ -- += -= <= >= == != && ||");
        assert_eq!(
            tokens,
            vec![
                Lexeme::PlusPlus,
                Lexeme::MinusMinus,
                Lexeme::PlusAssign,
                Lexeme::MinusAssign,
                Lexeme::Le,
                Lexeme::Ge,
                Lexeme::EqEq,
                Lexeme::NotEq,
                Lexeme::AndAnd,
                Lexeme::OrOr,
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_adjacent_single_char_operators() {
        let tokens = lex("i + +j");
        assert_eq!(
            tokens,
            vec![
                Lexeme::Ident("i".to_string()),
                Lexeme::Plus,
                Lexeme::Plus,
                Lexeme::Ident("j".to_string()),
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_integer_literals() {
        let tokens = lex("0 42 10L 7l");
        assert_eq!(
            tokens,
            vec![
                Lexeme::Integer {
                    value: 0,
                    long: false
                },
                Lexeme::Integer {
                    value: 42,
                    long: false
                },
                Lexeme::Integer {
                    value: 10,
                    long: true
                },
                Lexeme::Integer {
                    value: 7,
                    long: true
                },
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_integer_overflow_recovers() {
        let (tokens, diagnostics) = Lexer::new("99999999999999999999", 0).tokenize();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            tokens[0].node,
            Lexeme::Integer {
                value: 0,
                long: false
            }
        );
    }

    #[test]
    fn test_line_comments_are_skipped() {
        let tokens = lex("int i; // counter\nint j;");
        assert_eq!(
            tokens,
            vec![
                Lexeme::Int,
                Lexeme::Ident("i".to_string()),
                Lexeme::Semicolon,
                Lexeme::Int,
                Lexeme::Ident("j".to_string()),
                Lexeme::Semicolon,
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_character_recovers() {
        let (tokens, diagnostics) = Lexer::new("i @ j", 0).tokenize();
        assert_eq!(diagnostics.len(), 1);
        let nodes: Vec<Lexeme> = tokens.into_iter().map(|t| t.node).collect();
        assert_eq!(
            nodes,
            vec![
                Lexeme::Ident("i".to_string()),
                Lexeme::Ident("j".to_string()),
                Lexeme::Eof,
            ]
        );
    }

    #[test]
    fn test_for_header_token_stream() {
        let tokens = lex("for (int i = 0; i < 10; i++)");
        assert_eq!(
            tokens,
            vec![
                Lexeme::For,
                Lexeme::LParen,
                Lexeme::Int,
                Lexeme::Ident("i".to_string()),
                Lexeme::Assign,
                Lexeme::Integer {
                    value: 0,
                    long: false
                },
                Lexeme::Semicolon,
                Lexeme::Ident("i".to_string()),
                Lexeme::Lt,
                Lexeme::Integer {
                    value: 10,
                    long: false
                },
                Lexeme::Semicolon,
                Lexeme::Ident("i".to_string()),
                Lexeme::PlusPlus,
                Lexeme::RParen,
                Lexeme::Eof,
            ]
        );
    }
}
