//! Reporters: output formats for diagnostics.
//!
//! 2 reporter formats: JSON and SARIF 2.1.0.

pub mod json;
pub mod sarif;

use super::types::Diagnostic;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, diagnostics: &[Diagnostic]) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "sarif" => Some(Box::new(sarif::SarifReporter::new())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["sarif", "json"]
}
