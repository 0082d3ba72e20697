//! Catalog rules: a type scope, an optional member, and a polarity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{QualifiedMember, QualifiedName};

/// Whether a matching rule flags the operation or exempts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Thread-affine: flag the call.
    Unsafe,
    /// Inverted rule: presumed free-threaded.
    Exempt,
}

impl Polarity {
    pub fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Self::Exempt
        } else {
            Self::Unsafe
        }
    }

    pub fn is_unsafe(self) -> bool {
        self == Self::Unsafe
    }
}

/// Which types a wildcard rule covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeScope {
    /// One type, any member.
    Type(QualifiedName),
    /// Every type declared directly in a namespace (`[NS.*]`).
    Namespace(QualifiedName),
}

/// Closed set of rule shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchRule {
    /// A single member of a single type, compared by name only.
    Exact(QualifiedMember),
    /// Any member of the types in scope.
    Wildcard(TypeScope),
}

/// Where a rule came from, for diagnostics and error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleOrigin {
    pub source: String,
    /// 1-based line in line-format tables, 1-based entry in TOML tables.
    pub position: usize,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeMatchSpec {
    pub rule: MatchRule,
    pub polarity: Polarity,
    pub origin: RuleOrigin,
}

impl TypeMatchSpec {
    /// Build a rule from raw table fields.
    ///
    /// `type_pattern` may end in `.*` to cover a namespace. A member of `*`
    /// is the same as `wildcard = true`. An empty type pattern is accepted
    /// only together with the wildcard or inversion flag, and such a rule
    /// never matches.
    pub fn new(
        type_pattern: &str,
        member: Option<&str>,
        wildcard: bool,
        inverted: bool,
    ) -> Result<Self, String> {
        let type_pattern = type_pattern.trim();
        let member = member.map(str::trim).filter(|m| !m.is_empty());
        let wildcard = wildcard || member == Some("*");
        let polarity = Polarity::from_inverted(inverted);

        if type_pattern.is_empty() {
            if !(wildcard || inverted) {
                return Err("empty type pattern requires the wildcard or inverted flag".to_string());
            }
            return Ok(Self {
                rule: MatchRule::Wildcard(TypeScope::Type(QualifiedName::default())),
                polarity,
                origin: RuleOrigin::default(),
            });
        }

        let (scope_name, namespace_wide) = match type_pattern.strip_suffix(".*") {
            Some(ns) => (QualifiedName::parse(ns), true),
            None if type_pattern == "*" => {
                return Err("a bare `*` type pattern would match every type".to_string())
            }
            None => (QualifiedName::parse(type_pattern), false),
        };
        if scope_name.is_empty() || scope_name.has_blank_segment() {
            return Err(format!("malformed type pattern '{type_pattern}'"));
        }
        if scope_name.segments().iter().any(|s| s.contains('*')) {
            return Err(format!("`*` is only allowed as the last segment in '{type_pattern}'"));
        }

        let rule = if namespace_wide {
            if member.is_some_and(|m| m != "*") {
                return Err(format!("namespace pattern '{type_pattern}' cannot name a member"));
            }
            MatchRule::Wildcard(TypeScope::Namespace(scope_name))
        } else if wildcard {
            if member.is_some_and(|m| m != "*") {
                return Err(format!("wildcard rule for '{type_pattern}' cannot name a member"));
            }
            MatchRule::Wildcard(TypeScope::Type(scope_name))
        } else {
            match member {
                Some(m) => MatchRule::Exact(QualifiedMember::new(scope_name, m)),
                None => {
                    return Err(format!(
                        "rule for '{type_pattern}' needs a member or the wildcard flag"
                    ))
                }
            }
        };

        Ok(Self {
            rule,
            polarity,
            origin: RuleOrigin::default(),
        })
    }

    pub fn exact(type_name: &str, member: &str) -> Self {
        Self {
            rule: MatchRule::Exact(QualifiedMember::new(QualifiedName::parse(type_name), member)),
            polarity: Polarity::Unsafe,
            origin: RuleOrigin::default(),
        }
    }

    pub fn wildcard(type_name: &str) -> Self {
        Self {
            rule: MatchRule::Wildcard(TypeScope::Type(QualifiedName::parse(type_name))),
            polarity: Polarity::Unsafe,
            origin: RuleOrigin::default(),
        }
    }

    pub fn inverted(mut self) -> Self {
        self.polarity = Polarity::Exempt;
        self
    }

    pub fn with_origin(mut self, source: impl Into<String>, position: usize) -> Self {
        self.origin = RuleOrigin {
            source: source.into(),
            position,
        };
        self
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.rule, MatchRule::Wildcard(_))
    }

    pub fn is_inverted(&self) -> bool {
        self.polarity == Polarity::Exempt
    }

    /// An empty rule carries no type pattern and never matches.
    pub fn is_empty(&self) -> bool {
        match &self.rule {
            MatchRule::Exact(target) => target.type_name.is_empty(),
            MatchRule::Wildcard(TypeScope::Type(name) | TypeScope::Namespace(name)) => name.is_empty(),
        }
    }

    pub fn matches(&self, type_name: &QualifiedName, member: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        match &self.rule {
            MatchRule::Exact(target) => target.matches(type_name, member),
            MatchRule::Wildcard(TypeScope::Type(name)) => name == type_name,
            MatchRule::Wildcard(TypeScope::Namespace(ns)) => type_name.is_in_namespace(ns.segments()),
        }
    }
}

/// Rendered in the line-table syntax, e.g. `![NS.Type]::Member`.
impl fmt::Display for TypeMatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inverted() {
            f.write_str("!")?;
        }
        match &self.rule {
            MatchRule::Exact(target) => write!(f, "[{}]::{}", target.type_name, target.member),
            MatchRule::Wildcard(TypeScope::Type(name)) => write!(f, "[{name}]::*"),
            MatchRule::Wildcard(TypeScope::Namespace(ns)) => write!(f, "[{ns}.*]"),
        }
    }
}
