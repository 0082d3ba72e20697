//! Front-end model: the declaration/symbol graph the engine consumes.

pub mod graph;
pub mod identifiers;
pub mod names;
pub mod syntax;
pub mod traits;

pub use graph::DeclarationGraph;
pub use identifiers::{MemberId, NodeId, TypeId};
pub use names::{QualifiedMember, QualifiedName};
pub use syntax::{MemberDescriptor, MemberKind, NodeKind, Span, SymbolResolution, SyntaxNode, TypeDescriptor};
pub use traits::{base_chain, derivation_depth, BaseChain, SemanticModel};
