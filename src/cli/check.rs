use std::path::Path;

use super::{analyze_all, render_warnings, resolve_inputs};

pub fn cmd_check(input: &Path) {
    let paths = resolve_inputs(input);
    let analyzed = analyze_all(&paths);
    render_warnings(&analyzed);

    let loop_count: usize = analyzed.iter().map(|a| a.report.loops.len()).sum();
    eprintln!(
        "OK: {} file(s), {} counting loop(s)",
        analyzed.len(),
        loop_count
    );
}
