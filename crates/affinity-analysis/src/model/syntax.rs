//! Declarations, members, and syntax nodes as supplied by the front-end.

use std::fmt;

use affinity_core::types::SmallVec2;
use serde::{Deserialize, Serialize};

use super::identifiers::{MemberId, NodeId, TypeId};
use super::names::QualifiedName;

/// Source range, 1-based lines and columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Span {
    pub fn new(
        file: impl Into<String>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Single-line span.
    pub fn line(file: impl Into<String>, line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(file, line, start_column, line, end_column)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        (self.start_line..=self.end_line.max(self.start_line)).contains(&line)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start_line, self.start_column)
    }
}

/// Closed set of syntax node kinds the front-end lowers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // ---- Statements ----
    Block,
    ExpressionStatement,
    LocalDeclaration,
    Return,
    If,
    Loop,
    Switch,
    Try,
    Throw,
    Using,
    Lock,

    // ---- Expressions ----
    Invocation,
    MemberAccess,
    ObjectCreation,
    Assignment,
    Await,
    Identifier,
    Literal,
    Argument,
    Conditional,
    Binary,
    Unary,
    Cast,

    /// Lambda, anonymous method, or delegate literal. Its body runs later,
    /// not during activation.
    AnonymousFunction,

    /// Anything else; children are still walked.
    Other,
}

impl NodeKind {
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::ExpressionStatement
                | Self::LocalDeclaration
                | Self::Return
                | Self::If
                | Self::Loop
                | Self::Switch
                | Self::Try
                | Self::Throw
                | Self::Using
                | Self::Lock
        )
    }

    /// Nodes whose resolved symbol is checked against the catalog.
    pub fn references_symbol(&self) -> bool {
        matches!(self, Self::Invocation | Self::MemberAccess | Self::ObjectCreation)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::AnonymousFunction)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::ExpressionStatement => "expression_statement",
            Self::LocalDeclaration => "local_declaration",
            Self::Return => "return",
            Self::If => "if",
            Self::Loop => "loop",
            Self::Switch => "switch",
            Self::Try => "try",
            Self::Throw => "throw",
            Self::Using => "using",
            Self::Lock => "lock",
            Self::Invocation => "invocation",
            Self::MemberAccess => "member_access",
            Self::ObjectCreation => "object_creation",
            Self::Assignment => "assignment",
            Self::Await => "await",
            Self::Identifier => "identifier",
            Self::Literal => "literal",
            Self::Argument => "argument",
            Self::Conditional => "conditional",
            Self::Binary => "binary",
            Self::Unary => "unary",
            Self::Cast => "cast",
            Self::AnonymousFunction => "anonymous_function",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of a code body. Children are in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Outcome of resolving the symbol an expression refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolResolution {
    Resolved(MemberId),
    /// Several candidates; the front-end could not pick one.
    Ambiguous,
    Unresolved,
    /// The node does not reference a symbol.
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub id: TypeId,
    pub name: QualifiedName,
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    /// Attribute classes applied to the declaration, in source order.
    pub attributes: SmallVec2<TypeId>,
    /// Members declared directly on this type, in source order.
    pub members: Vec<MemberId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor { parameter_count: u32, is_static: bool },
    Method,
    Field,
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub id: MemberId,
    pub declaring_type: TypeId,
    /// Constructors are named `.ctor`.
    pub name: String,
    pub kind: MemberKind,
    pub attributes: SmallVec2<TypeId>,
    /// Method/constructor body, or the initializer expression of a field
    /// or property. `None` for abstract members and uninitialized fields.
    pub body: Option<NodeId>,
    /// Interface members this member implements.
    pub implements: Vec<MemberId>,
}

impl MemberDescriptor {
    pub fn is_instance_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor { is_static: false, .. })
    }

    pub fn is_parameterless_constructor(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::Constructor {
                parameter_count: 0,
                is_static: false
            }
        )
    }
}
