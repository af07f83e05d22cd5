pub mod check;
pub mod lint;
pub mod loops;

use std::path::{Path, PathBuf};
use std::process;

use rayon::prelude::*;

use loupe::diagnostic::{render_all, Diagnostic};
use loupe::report::AnalysisReport;

/// One analyzed source file.
pub struct Analyzed {
    pub path: PathBuf,
    pub source: String,
    pub report: AnalysisReport,
    pub warnings: Vec<Diagnostic>,
}

/// Resolve the input to a list of `.lp` files: the file itself, or a
/// recursive directory walk.
pub fn resolve_inputs(input: &Path) -> Vec<PathBuf> {
    if input.is_dir() {
        let found = loupe::find_sources(input);
        if found.is_empty() {
            eprintln!("error: no .lp files found under '{}'", input.display());
            process::exit(1);
        }
        return found;
    }

    if !input.extension().is_some_and(|e| e == "lp") {
        eprintln!("error: input must be a .lp file or a directory");
        process::exit(1);
    }

    vec![input.to_path_buf()]
}

/// Parse and analyze every input in parallel; render errors in input
/// order afterwards. Exits 1 if any file fails to read or parse.
pub fn analyze_all(paths: &[PathBuf]) -> Vec<Analyzed> {
    let results: Vec<Result<Analyzed, (String, String, Vec<Diagnostic>)>> = paths
        .par_iter()
        .map(|path| {
            let filename = path.display().to_string();
            let source = match std::fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    return Err((
                        filename,
                        String::new(),
                        vec![Diagnostic::error(
                            format!("cannot read file: {}", e),
                            loupe::span::Span::dummy(),
                        )],
                    ))
                }
            };
            match loupe::analyze_source(&source, &filename) {
                Ok((report, warnings)) => Ok(Analyzed {
                    path: path.clone(),
                    source,
                    report,
                    warnings,
                }),
                Err(errors) => Err((filename, source, errors)),
            }
        })
        .collect();

    let mut failed = false;
    let mut analyzed = Vec::new();
    for result in results {
        match result {
            Ok(a) => analyzed.push(a),
            Err((filename, source, errors)) => {
                if source.is_empty() {
                    for error in &errors {
                        eprintln!("error: {}: {}", filename, error.message);
                    }
                } else {
                    render_all(&errors, &filename, &source);
                }
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
    analyzed
}

/// Render every file's lint warnings; true if there were any.
pub fn render_warnings(analyzed: &[Analyzed]) -> bool {
    let mut any = false;
    for a in analyzed {
        if !a.warnings.is_empty() {
            render_all(&a.warnings, &a.path.display().to_string(), &a.source);
            any = true;
        }
    }
    any
}
