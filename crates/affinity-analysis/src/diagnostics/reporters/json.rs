//! JSON reporter: structured JSON output.

use serde_json::json;

use super::Reporter;
use crate::diagnostics::types::Diagnostic;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, diagnostics: &[Diagnostic]) -> Result<String, String> {
        let entries: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|d| {
                json!({
                    "rule_id": d.rule_id,
                    "severity": format!("{}", d.severity),
                    "message": d.message,
                    "file": d.span.file,
                    "line": d.span.start_line,
                    "column": d.span.start_column,
                    "end_line": d.span.end_line,
                    "end_column": d.span.end_column,
                    "node_kind": d.node_kind,
                    "part": d.entry_point.part.to_string(),
                    "entry_point": d.entry_point.member,
                    "entry_point_kind": d.entry_point.kind,
                    "matched_rule": d.matched_rule.rule,
                    "matched_rule_source": d.matched_rule.source,
                    "matched_rule_position": d.matched_rule.position,
                    "operation": format!("{}::{}", d.matched_rule.type_name, d.matched_rule.member),
                })
            })
            .collect();

        let files: std::collections::BTreeSet<&str> =
            diagnostics.iter().map(|d| d.span.file.as_str()).collect();

        let output = json!({
            "total_diagnostics": diagnostics.len(),
            "file_count": files.len(),
            "diagnostics": entries,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
