//! The counting-loop report: a human-readable table and a JSON
//! rendering for downstream tooling.

/// One recognized counting loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopSummary {
    pub file: String,
    pub function: String,
    pub line: u32,
    pub counter: String,
    pub counter_ty: String,
    pub descending: bool,
    pub including: bool,
    pub may_overflow: bool,
    pub initializer: String,
    pub bound: String,
}

impl LoopSummary {
    /// Compact range notation: `0 .. 10`, `10 ..= 0 (down)`.
    pub fn range_display(&self) -> String {
        let op = if self.including { "..=" } else { ".." };
        let dir = if self.descending { " (down)" } else { "" };
        format!("{} {} {}{}", self.initializer, op, self.bound, dir)
    }
}

/// All counting loops recognized across one or more files.
#[derive(Clone, Debug, Default)]
pub struct AnalysisReport {
    pub loops: Vec<LoopSummary>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn merge(&mut self, other: AnalysisReport) {
        self.loops.extend(other.loops);
    }

    pub fn format_report(&self) -> String {
        let mut out = String::new();
        if self.loops.is_empty() {
            out.push_str("No counting loops recognized.\n");
            return out;
        }

        out.push_str(&format!(
            "{:<20} {:<12} {:<8} {:<6} {:<24} {}\n",
            "Location", "Function", "Counter", "Type", "Range", "Overflow"
        ));
        out.push_str(&"-".repeat(80));
        out.push('\n');

        for entry in &self.loops {
            out.push_str(&format!(
                "{:<20} {:<12} {:<8} {:<6} {:<24} {}\n",
                format!("{}:{}", entry.file, entry.line),
                entry.function,
                entry.counter,
                entry.counter_ty,
                entry.range_display(),
                if entry.may_overflow { "may wrap" } else { "-" },
            ));
        }

        out.push_str(&"-".repeat(80));
        out.push('\n');
        out.push_str(&format!("{} counting loop(s)\n", self.loops.len()));
        out
    }

    /// Serialize the report to a JSON string.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str(&format!("  \"count\": {},\n", self.loops.len()));
        out.push_str("  \"loops\": [\n");
        for (i, entry) in self.loops.iter().enumerate() {
            out.push_str("    {\n");
            out.push_str(&format!("      \"file\": \"{}\",\n", entry.file));
            out.push_str(&format!("      \"function\": \"{}\",\n", entry.function));
            out.push_str(&format!("      \"line\": {},\n", entry.line));
            out.push_str(&format!("      \"counter\": \"{}\",\n", entry.counter));
            out.push_str(&format!("      \"type\": \"{}\",\n", entry.counter_ty));
            out.push_str(&format!(
                "      \"direction\": \"{}\",\n",
                if entry.descending { "down" } else { "up" }
            ));
            out.push_str(&format!("      \"inclusive\": {},\n", entry.including));
            out.push_str(&format!("      \"may_overflow\": {},\n", entry.may_overflow));
            out.push_str(&format!("      \"initializer\": \"{}\",\n", entry.initializer));
            out.push_str(&format!("      \"bound\": \"{}\"\n", entry.bound));
            out.push_str("    }");
            if i + 1 < self.loops.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("  ]\n}\n");
        out
    }
}
