//! Symbol catalog: which (type, member) pairs are thread-affine.
//!
//! Built once per run and shared read-only by every analysis task.

pub mod loader;
pub mod rules;

use affinity_core::config::CatalogConfig;
use affinity_core::errors::CatalogError;

use crate::model::QualifiedName;

pub use loader::{RuleDef, RuleTable, RuleTableLoader};
pub use rules::{MatchRule, Polarity, RuleOrigin, TypeMatchSpec, TypeScope};

/// Built-in rule table.
pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");

const BUILTIN_SOURCE: &str = "<builtin>";

/// The rule that decided a lookup.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMatch<'a> {
    /// Position of the rule in the catalog.
    pub index: usize,
    pub rule: &'a TypeMatchSpec,
}

impl CatalogMatch<'_> {
    pub fn is_unsafe(&self) -> bool {
        self.rule.polarity.is_unsafe()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    rules: Vec<TypeMatchSpec>,
}

impl SymbolCatalog {
    pub fn new(rules: Vec<TypeMatchSpec>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(RuleTableLoader::load_toml(BUILTIN_SOURCE, DEFAULT_RULES_TOML)?))
    }

    /// Built-in rules (unless disabled) followed by the configured table.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut rules = Vec::new();
        if config.effective_include_defaults() {
            rules.extend(RuleTableLoader::load_toml(BUILTIN_SOURCE, DEFAULT_RULES_TOML)?);
        }
        if let Some(path) = &config.path {
            rules.extend(RuleTableLoader::load_file(path)?);
        }
        tracing::info!(rules = rules.len(), "symbol catalog built");
        Ok(Self::new(rules))
    }

    /// The rule deciding whether `member` of `type_name` is thread-affine.
    ///
    /// Rules are scanned in order. The first exact match decides at once.
    /// The first wildcard match is kept as a candidate and used only when
    /// no exact rule matches.
    pub fn find_match(&self, type_name: &QualifiedName, member: &str) -> Option<CatalogMatch<'_>> {
        let mut candidate = None;
        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.matches(type_name, member) {
                continue;
            }
            if !rule.is_wildcard() {
                return Some(CatalogMatch { index, rule });
            }
            if candidate.is_none() {
                candidate = Some(CatalogMatch { index, rule });
            }
        }
        candidate
    }

    /// `true` when the operation is thread-affine.
    pub fn lookup(&self, type_name: &QualifiedName, member: &str) -> bool {
        self.find_match(type_name, member)
            .is_some_and(|m| m.is_unsafe())
    }

    pub fn rules(&self) -> &[TypeMatchSpec] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
