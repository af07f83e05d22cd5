pub mod analysis;
pub mod ast;
pub mod diagnostic;
pub mod lexeme;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod span;
pub mod types;

use std::path::{Path, PathBuf};

use analysis::Analyzer;
use diagnostic::{render_all, Diagnostic};
use lexer::Lexer;
use parser::Parser;
use report::AnalysisReport;

/// Parse a source string, rendering any diagnostics to stderr.
pub fn parse_source(source: &str, filename: &str) -> Result<ast::File, Vec<Diagnostic>> {
    let (tokens, lex_errors) = Lexer::new(source, 0).tokenize();
    if !lex_errors.is_empty() {
        render_all(&lex_errors, filename, source);
        return Err(lex_errors);
    }

    match Parser::new(tokens).parse_file() {
        Ok(file) => Ok(file),
        Err(errors) => {
            render_all(&errors, filename, source);
            Err(errors)
        }
    }
}

/// Parse without rendering (library and test use).
pub fn parse_source_silent(source: &str) -> Result<ast::File, Vec<Diagnostic>> {
    let (tokens, lex_errors) = Lexer::new(source, 0).tokenize();
    if !lex_errors.is_empty() {
        return Err(lex_errors);
    }
    Parser::new(tokens).parse_file()
}

/// Parse and analyze one source: the counting-loop report plus any lint
/// warnings. Parse errors are the `Err` case; warnings are not.
pub fn analyze_source(
    source: &str,
    filename: &str,
) -> Result<(AnalysisReport, Vec<Diagnostic>), Vec<Diagnostic>> {
    let file = parse_source_silent(source)?;
    Ok(Analyzer::new(source, filename).analyze(&file))
}

/// Recursively collect `.lp` files under `root`, sorted for
/// deterministic output.
pub fn find_sources(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_sources(root, &mut found);
    found.sort();
    found
}

fn collect_sources(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, found);
        } else if path.extension().is_some_and(|e| e == "lp") {
            found.push(path);
        }
    }
}
