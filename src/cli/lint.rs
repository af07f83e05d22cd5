use std::path::Path;
use std::process;

use super::{analyze_all, render_warnings, resolve_inputs};

pub fn cmd_lint(input: &Path) {
    let paths = resolve_inputs(input);
    let analyzed = analyze_all(&paths);

    if render_warnings(&analyzed) {
        process::exit(1);
    }
    eprintln!("OK: no lint warnings");
}
