//! Report rendering.
//!
//! The default output is pretty-printed JSON on stdout so the report can be
//! piped into other tools; `render_text` produces a terminal-friendly
//! summary instead.

use std::fmt::Write;

use fgacov_domain::coverage::{CoverageReport, RelationCoverage};

/// Serialize the report as indented JSON.
pub fn render_json(report: &CoverageReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render a human-readable summary of the report.
pub fn render_text(report: &CoverageReport) -> String {
    let total = report.untested_relations.len()
        + report.partially_tested.len()
        + report.fully_tested.len();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Relation coverage: {} untested, {} partially tested, {} fully tested ({} total)",
        report.untested_relations.len(),
        report.partially_tested.len(),
        report.fully_tested.len(),
        total,
    );

    render_bucket(&mut out, "untested", &report.untested_relations);
    render_bucket(&mut out, "partially tested", &report.partially_tested);
    render_bucket(&mut out, "fully tested", &report.fully_tested);
    out
}

fn render_bucket(out: &mut String, title: &str, records: &[RelationCoverage]) {
    if records.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for record in records {
        let _ = writeln!(
            out,
            "  {}#{}{}",
            record.type_name,
            record.relation,
            coverage_notes(record)
        );
    }
}

/// Short annotation of how a relation was exercised.
fn coverage_notes(record: &RelationCoverage) -> String {
    let mut notes = Vec::new();
    if record.tested_directly {
        notes.push("direct");
    }
    if record.tested_indirectly {
        notes.push("indirect");
    }
    if record.has_positive_test {
        notes.push("allow");
    }
    if record.has_negative_test {
        notes.push("deny");
    }
    if notes.is_empty() {
        String::new()
    } else {
        format!("  [{}]", notes.join(", "))
    }
}
