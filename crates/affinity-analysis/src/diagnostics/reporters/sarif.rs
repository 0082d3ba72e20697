//! SARIF 2.1.0 reporter for code-scanning integrations.

use serde_json::{json, Value};

use affinity_core::constants::VERSION;
use affinity_core::types::FxHashSet;

use super::Reporter;
use crate::diagnostics::types::{Diagnostic, DiagnosticDescriptor, Severity};

/// SARIF 2.1.0 reporter.
pub struct SarifReporter {
    pub tool_name: String,
    pub tool_version: String,
}

impl SarifReporter {
    pub fn new() -> Self {
        Self {
            tool_name: "affinity".to_string(),
            tool_version: VERSION.to_string(),
        }
    }

    fn severity_to_sarif_level(severity: &Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "note",
            Severity::Hint => "note",
        }
    }

    fn build_results(&self, diagnostics: &[Diagnostic]) -> Vec<Value> {
        diagnostics
            .iter()
            .map(|d| {
                json!({
                    "ruleId": d.rule_id,
                    "level": Self::severity_to_sarif_level(&d.severity),
                    "message": {
                        "text": d.message
                    },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": {
                                "uri": d.span.file,
                                "uriBaseId": "%SRCROOT%"
                            },
                            "region": Self::build_region(d)
                        },
                        "logicalLocations": [{
                            "fullyQualifiedName": format!("{}::{}", d.entry_point.part, d.entry_point.member),
                            "kind": "member"
                        }]
                    }],
                    "properties": {
                        "entryPointKind": d.entry_point.kind,
                        "nodeKind": d.node_kind,
                        "matchedRule": d.matched_rule.rule,
                        "operation": format!("{}::{}", d.matched_rule.type_name, d.matched_rule.member)
                    }
                })
            })
            .collect()
    }

    fn build_region(diagnostic: &Diagnostic) -> Value {
        let span = &diagnostic.span;
        let mut region = json!({
            "startLine": span.start_line.max(1)
        });
        if span.start_column > 0 {
            region["startColumn"] = json!(span.start_column);
        }
        if span.end_line >= span.start_line && span.end_line > 0 {
            region["endLine"] = json!(span.end_line);
        }
        if span.end_column > 0 {
            region["endColumn"] = json!(span.end_column);
        }
        region
    }

    fn build_rules(&self, diagnostics: &[Diagnostic]) -> Vec<Value> {
        let mut seen = FxHashSet::default();
        let mut rules = Vec::new();

        for d in diagnostics {
            if seen.insert(d.rule_id.as_str()) {
                rules.push(json!({
                    "id": d.rule_id,
                    "shortDescription": {
                        "text": DiagnosticDescriptor::TITLE
                    },
                    "defaultConfiguration": {
                        "level": Self::severity_to_sarif_level(&d.severity)
                    }
                }));
            }
        }

        rules
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SarifReporter {
    fn name(&self) -> &'static str {
        "sarif"
    }

    fn generate(&self, diagnostics: &[Diagnostic]) -> Result<String, String> {
        let sarif = json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "rules": self.build_rules(diagnostics)
                    }
                },
                "results": self.build_results(diagnostics)
            }]
        });

        serde_json::to_string_pretty(&sarif).map_err(|e| e.to_string())
    }
}
