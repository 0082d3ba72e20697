//! Top-level Affinity configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, CatalogConfig, MarkersConfig, ReportConfig};
use crate::constants::{PROJECT_CONFIG_FILE, REPORT_FORMATS, SEVERITIES};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Host overrides (applied via `apply_overrides`)
/// 2. Environment variables (`AFFINITY_*`)
/// 3. Project config (`affinity.toml` in project root)
/// 4. User config (`~/.affinity/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AffinityConfig {
    pub catalog: CatalogConfig,
    pub markers: MarkersConfig,
    pub report: ReportConfig,
    pub analysis: AnalysisConfig,
}

/// Overrides a host can apply on top of every file and env layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub include_default_rules: Option<bool>,
    pub severity: Option<String>,
    pub format: Option<String>,
    pub threads: Option<usize>,
}

impl AffinityConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // User config: only a parse failure is fatal.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        // Relative catalog paths are anchored at the project root.
        if let Some(path) = config.catalog.path.take() {
            config.catalog.path = Some(if path.is_relative() { root.join(path) } else { path });
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AffinityConfig) -> Result<(), ConfigError> {
        if let Some(rule_id) = &config.report.rule_id {
            if rule_id.trim().is_empty() || rule_id.contains(char::is_whitespace) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.rule_id".to_string(),
                    message: "must be a non-empty identifier without whitespace".to_string(),
                });
            }
        }
        let severity = config.report.effective_severity();
        if !SEVERITIES.contains(&severity) {
            return Err(ConfigError::ValidationFailed {
                field: "report.severity".to_string(),
                message: format!("unknown severity '{severity}'"),
            });
        }
        let format = config.report.effective_format();
        if !REPORT_FORMATS.contains(&format) {
            return Err(ConfigError::ValidationFailed {
                field: "report.format".to_string(),
                message: format!("unknown report format '{format}'"),
            });
        }
        if config.markers.namespaces.iter().any(|ns| ns.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "markers.namespaces".to_string(),
                message: "namespace entries must not be empty".to_string(),
            });
        }
        if config.analysis.max_walk_nodes == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_walk_nodes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".affinity").join("config.toml"))
    }

    /// Unknown keys are ignored so older binaries accept newer files.
    fn merge_toml_file(config: &mut AffinityConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: AffinityConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// `other` wins wherever it carries a value.
    fn merge(base: &mut AffinityConfig, other: &AffinityConfig) {
        if other.catalog.path.is_some() {
            base.catalog.path = other.catalog.path.clone();
        }
        if other.catalog.include_defaults.is_some() {
            base.catalog.include_defaults = other.catalog.include_defaults;
        }

        if !other.markers.namespaces.is_empty() {
            base.markers.namespaces = other.markers.namespaces.clone();
        }
        let m = &other.markers;
        if m.export_attribute.is_some() {
            base.markers.export_attribute = m.export_attribute.clone();
        }
        if m.inherited_export_attribute.is_some() {
            base.markers.inherited_export_attribute = m.inherited_export_attribute.clone();
        }
        if m.importing_constructor_attribute.is_some() {
            base.markers.importing_constructor_attribute =
                m.importing_constructor_attribute.clone();
        }
        if m.imports_satisfied_interface.is_some() {
            base.markers.imports_satisfied_interface = m.imports_satisfied_interface.clone();
        }
        if m.imports_satisfied_member.is_some() {
            base.markers.imports_satisfied_member = m.imports_satisfied_member.clone();
        }
        if m.imports_satisfied_attribute.is_some() {
            base.markers.imports_satisfied_attribute = m.imports_satisfied_attribute.clone();
        }

        if other.report.rule_id.is_some() {
            base.report.rule_id = other.report.rule_id.clone();
        }
        if other.report.severity.is_some() {
            base.report.severity = other.report.severity.clone();
        }
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }

        if other.analysis.threads.is_some() {
            base.analysis.threads = other.analysis.threads;
        }
        if other.analysis.max_walk_nodes.is_some() {
            base.analysis.max_walk_nodes = other.analysis.max_walk_nodes;
        }
    }

    /// Pattern: `AFFINITY_CATALOG_PATH`, `AFFINITY_REPORT_SEVERITY`, etc.
    fn apply_env_overrides(config: &mut AffinityConfig) {
        if let Ok(val) = std::env::var("AFFINITY_CATALOG_PATH") {
            config.catalog.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("AFFINITY_CATALOG_INCLUDE_DEFAULTS") {
            if let Ok(v) = val.parse::<bool>() {
                config.catalog.include_defaults = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AFFINITY_REPORT_RULE_ID") {
            config.report.rule_id = Some(val);
        }
        if let Ok(val) = std::env::var("AFFINITY_REPORT_SEVERITY") {
            config.report.severity = Some(val);
        }
        if let Ok(val) = std::env::var("AFFINITY_REPORT_FORMAT") {
            config.report.format = Some(val);
        }
        if let Ok(val) = std::env::var("AFFINITY_ANALYSIS_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.threads = Some(v);
            }
        }
    }

    fn apply_overrides(config: &mut AffinityConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.catalog_path {
            config.catalog.path = Some(v.clone());
        }
        if let Some(v) = overrides.include_default_rules {
            config.catalog.include_defaults = Some(v);
        }
        if let Some(ref v) = overrides.severity {
            config.report.severity = Some(v.clone());
        }
        if let Some(ref v) = overrides.format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = overrides.threads {
            config.analysis.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
