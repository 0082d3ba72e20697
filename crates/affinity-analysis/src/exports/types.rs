//! Exported parts and their activation entry points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{MemberId, NodeId, QualifiedName, Span, TypeId};

/// Why a declaration is an exported part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportReason {
    /// Carries the export marker itself.
    DirectMarker { attribute: QualifiedName },
    /// Carries an attribute deriving from the export marker.
    DerivedMarker { attribute: QualifiedName, depth: usize },
    /// An ancestor carries the inherited-export marker.
    InheritedFromBase {
        ancestor: QualifiedName,
        attribute: QualifiedName,
    },
}

impl fmt::Display for ExportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectMarker { attribute } => write!(f, "marked [{attribute}]"),
            Self::DerivedMarker { attribute, depth } => {
                write!(f, "marked [{attribute}] ({depth} levels from the export marker)")
            }
            Self::InheritedFromBase { ancestor, attribute } => {
                write!(f, "inherits [{attribute}] from {ancestor}")
            }
        }
    }
}

/// An exported declaration with the entry points the container runs
/// while activating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPart {
    pub declaration: TypeId,
    pub name: QualifiedName,
    pub reason: ExportReason,
    /// Empty until filled by `EntryPointEnumerator::resolve`.
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPointKind {
    /// Parameterless instance constructor, when no importing constructor exists.
    DefaultConstructor,
    ImportingConstructor,
    FieldInitializer,
    PropertyInitializer,
    /// Imports-satisfied notification.
    ImportsSatisfied,
}

impl EntryPointKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DefaultConstructor => "default constructor",
            Self::ImportingConstructor => "importing constructor",
            Self::FieldInitializer => "field initializer",
            Self::PropertyInitializer => "property initializer",
            Self::ImportsSatisfied => "imports-satisfied notification",
        }
    }
}

impl fmt::Display for EntryPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Code that runs synchronously while the container activates a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub part: TypeId,
    pub part_name: QualifiedName,
    pub member: MemberId,
    pub member_name: String,
    pub kind: EntryPointKind,
    /// Root of the body or initializer expression.
    pub body: NodeId,
    pub span: Span,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({})", self.part_name, self.member_name, self.kind)
    }
}
