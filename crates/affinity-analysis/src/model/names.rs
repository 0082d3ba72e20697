//! Dotted type names and type-qualified member names.

use std::fmt;

use affinity_core::types::SmallVec4;
use serde::{Deserialize, Serialize};

/// A dotted type name: namespace segments followed by the simple type name.
///
/// `System.Windows.Threading.Dispatcher` has namespace
/// `System.Windows.Threading` and simple name `Dispatcher`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    segments: SmallVec4<String>,
}

impl QualifiedName {
    /// Split on `.`, trimming whitespace around each segment.
    /// Empty input yields the empty name.
    pub fn parse(dotted: &str) -> Self {
        let dotted = dotted.trim();
        if dotted.is_empty() {
            return Self::default();
        }
        Self {
            segments: dotted.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when a segment is blank, as in `A..B`.
    pub fn has_blank_segment(&self) -> bool {
        self.segments.iter().any(|s| s.is_empty())
    }

    /// The last segment, or `""` for the empty name.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Every segment but the last.
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, ns)) => ns,
            None => &[],
        }
    }

    /// Whether this type is declared directly in `namespace`.
    pub fn is_in_namespace(&self, namespace: &[String]) -> bool {
        !self.is_empty() && self.namespace() == namespace
    }

    /// `namespace` + `.` + `simple_name`.
    pub fn join(namespace: &str, simple_name: &str) -> Self {
        let mut name = Self::parse(namespace);
        name.segments.push(simple_name.trim().to_string());
        name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// A member addressed through its declaring type. Matching is by
/// structural name equality only; overload signatures are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedMember {
    pub type_name: QualifiedName,
    pub member: String,
}

impl QualifiedMember {
    pub fn new(type_name: QualifiedName, member: impl Into<String>) -> Self {
        Self {
            type_name,
            member: member.into(),
        }
    }

    /// Parse `Namespace.Type::Member`; falls back to splitting at the last
    /// `.` when there is no `::`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (type_part, member) = match text.split_once("::") {
            Some(parts) => parts,
            None => text.rsplit_once('.')?,
        };
        let member = member.trim();
        if member.is_empty() || type_part.trim().is_empty() {
            return None;
        }
        Some(Self::new(QualifiedName::parse(type_part), member))
    }

    pub fn matches(&self, type_name: &QualifiedName, member: &str) -> bool {
        self.member == member && &self.type_name == type_name
    }
}

impl fmt::Display for QualifiedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.member)
    }
}
