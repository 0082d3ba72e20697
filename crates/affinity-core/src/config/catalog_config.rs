//! Symbol catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the unsafe-operation rule table comes from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Additional rule table (`.toml` or line format), relative to the project root.
    pub path: Option<PathBuf>,
    /// Prepend the built-in rule table. Default: true.
    pub include_defaults: Option<bool>,
}

impl CatalogConfig {
    pub fn effective_include_defaults(&self) -> bool {
        self.include_defaults.unwrap_or(true)
    }
}
