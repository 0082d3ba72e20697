//! Diagnostic records handed to the host.

use std::fmt;

use affinity_core::config::ReportConfig;
use affinity_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

use crate::exports::{EntryPoint, EntryPointKind};
use crate::model::{NodeKind, QualifiedName, Span};

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// The reported rule: identifier, severity, and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticDescriptor {
    pub rule_id: String,
    pub severity: Severity,
    pub title: String,
}

impl DiagnosticDescriptor {
    pub const TITLE: &'static str = "Thread-affine operation during part activation";

    pub fn new(rule_id: impl Into<String>, severity: Severity) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            title: Self::TITLE.to_string(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Result<Self, ConfigError> {
        let severity = Severity::parse_str(config.effective_severity()).ok_or_else(|| {
            ConfigError::ValidationFailed {
                field: "report.severity".to_string(),
                message: format!("unknown severity '{}'", config.effective_severity()),
            }
        })?;
        Ok(Self::new(config.effective_rule_id(), severity))
    }
}

impl Default for DiagnosticDescriptor {
    fn default() -> Self {
        Self::new(
            affinity_core::constants::DEFAULT_RULE_ID,
            Severity::Warning,
        )
    }
}

/// The activation entry point a diagnostic was found from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryPointRef {
    pub part: QualifiedName,
    pub member: String,
    pub kind: EntryPointKind,
}

impl From<&EntryPoint> for EntryPointRef {
    fn from(entry: &EntryPoint) -> Self {
        Self {
            part: entry.part_name.clone(),
            member: entry.member_name.clone(),
            kind: entry.kind,
        }
    }
}

/// The catalog rule that matched, and the operation it matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedRule {
    /// Rule in table syntax, e.g. `[NS.Helper]::AssertUi`.
    pub rule: String,
    pub source: String,
    pub position: usize,
    pub type_name: QualifiedName,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub node_kind: NodeKind,
    pub entry_point: EntryPointRef,
    pub matched_rule: MatchedRule,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]: {}",
            self.span, self.severity, self.rule_id, self.message
        )
    }
}
