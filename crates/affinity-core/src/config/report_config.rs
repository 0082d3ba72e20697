//! Diagnostic and report configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REPORT_FORMAT, DEFAULT_RULE_ID, DEFAULT_SEVERITY};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Stable identifier stamped on every diagnostic and used by suppressions.
    pub rule_id: Option<String>,
    /// One of `error`, `warning`, `info`, `hint`.
    pub severity: Option<String>,
    /// One of `json`, `sarif`.
    pub format: Option<String>,
}

impl ReportConfig {
    pub fn effective_rule_id(&self) -> &str {
        self.rule_id.as_deref().unwrap_or(DEFAULT_RULE_ID)
    }

    pub fn effective_severity(&self) -> &str {
        self.severity.as_deref().unwrap_or(DEFAULT_SEVERITY)
    }

    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_REPORT_FORMAT)
    }
}
