//! Rule tables: editable without recompiling.
//!
//! Two formats are accepted. TOML:
//!
//! ```toml
//! [[rules]]
//! type = "Microsoft.VisualStudio.Shell.ThreadHelper"
//! member = "ThrowIfNotOnUIThread"
//!
//! [[rules]]
//! type = "System.Windows.Threading.Dispatcher"
//! wildcard = true
//! ```
//!
//! and the line format, one rule per line:
//!
//! ```text
//! # comment
//! [Microsoft.VisualStudio.Shell.ThreadHelper]::ThrowIfNotOnUIThread
//! [System.Windows.Threading.Dispatcher]
//! ![System.Windows.Threading.Dispatcher]::CheckAccess
//! [Microsoft.VisualStudio.Shell.Interop.*]
//! ```

use std::path::Path;

use affinity_core::errors::CatalogError;
use serde::{Deserialize, Serialize};

use super::rules::TypeMatchSpec;

/// One `[[rules]]` entry of a TOML table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    #[serde(rename = "type", default)]
    pub type_pattern: String,
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleTable {
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

pub struct RuleTableLoader;

impl RuleTableLoader {
    /// Load a TOML rule table. Disabled rules are skipped; positions count
    /// every entry so errors point at the right one.
    pub fn load_toml(source_name: &str, toml_str: &str) -> Result<Vec<TypeMatchSpec>, CatalogError> {
        let table: RuleTable = toml::from_str(toml_str).map_err(|e| CatalogError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

        let mut specs = Vec::with_capacity(table.rules.len());
        for (i, def) in table.rules.into_iter().enumerate() {
            let position = i + 1;
            if def.enabled == Some(false) {
                continue;
            }
            let spec = TypeMatchSpec::new(
                &def.type_pattern,
                def.member.as_deref(),
                def.wildcard,
                def.inverted,
            )
            .map_err(|reason| CatalogError::MalformedRule {
                index: position,
                source_name: source_name.to_string(),
                reason,
            })?;
            specs.push(spec.with_origin(source_name, position));
        }
        Ok(specs)
    }

    /// Load a line-format rule table.
    pub fn load_lines(source_name: &str, text: &str) -> Result<Vec<TypeMatchSpec>, CatalogError> {
        let mut specs = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let position = i + 1;
            let spec = Self::parse_line(line).map_err(|reason| CatalogError::MalformedRule {
                index: position,
                source_name: source_name.to_string(),
                reason,
            })?;
            specs.push(spec.with_origin(source_name, position));
        }
        Ok(specs)
    }

    /// `.toml` files use the TOML format, anything else the line format.
    pub fn load_file(path: &Path) -> Result<Vec<TypeMatchSpec>, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let source_name = path.display().to_string();
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::load_toml(&source_name, &content)
        } else {
            Self::load_lines(&source_name, &content)
        }
    }

    fn parse_line(line: &str) -> Result<TypeMatchSpec, String> {
        let (inverted, rest) = match line.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, line),
        };
        let rest = rest
            .strip_prefix('[')
            .ok_or_else(|| format!("expected '[' to open the type pattern in '{line}'"))?;
        let (type_pattern, tail) = rest
            .split_once(']')
            .ok_or_else(|| format!("unterminated type pattern in '{line}'"))?;

        let tail = tail.trim();
        let member = if tail.is_empty() {
            None
        } else {
            let member = tail
                .strip_prefix("::")
                .ok_or_else(|| format!("expected '::' after the type pattern in '{line}'"))?
                .trim();
            if member.is_empty() {
                return Err(format!("missing member after '::' in '{line}'"));
            }
            Some(member)
        };

        // `[NS.Type]` with no member covers the whole type.
        let wildcard = member.is_none() || member == Some("*");
        TypeMatchSpec::new(type_pattern, member, wildcard, inverted)
    }
}
