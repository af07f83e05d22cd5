use std::path::Path;

use loupe::report::AnalysisReport;

use super::{analyze_all, resolve_inputs};

pub fn cmd_loops(input: &Path, json: bool) {
    let paths = resolve_inputs(input);
    let analyzed = analyze_all(&paths);

    let mut merged = AnalysisReport::default();
    for a in analyzed {
        merged.merge(a.report);
    }

    if json {
        print!("{}", merged.to_json());
    } else {
        print!("{}", merged.format_report());
    }
}
