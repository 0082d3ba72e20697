//! The front-end contract.

use affinity_core::types::FxHashSet;

use super::identifiers::{MemberId, NodeId, TypeId};
use super::names::QualifiedName;
use super::syntax::{MemberDescriptor, SymbolResolution, SyntaxNode, TypeDescriptor};

/// Read-only view of a compiled program's declarations and code bodies.
///
/// Implementations must be safe to share across analysis threads; the
/// engine never mutates the model.
pub trait SemanticModel: Send + Sync {
    fn type_descriptor(&self, id: TypeId) -> Option<&TypeDescriptor>;

    fn member(&self, id: MemberId) -> Option<&MemberDescriptor>;

    fn node(&self, id: NodeId) -> Option<&SyntaxNode>;

    fn find_type(&self, name: &QualifiedName) -> Option<TypeId>;

    /// Symbol referenced by an invocation, member access, or object creation.
    fn resolve_symbol(&self, node: NodeId) -> SymbolResolution;

    /// Whether `method` implements `interface_member`.
    fn implements(&self, method: MemberId, interface_member: MemberId) -> bool {
        self.member(method)
            .map(|m| m.implements.contains(&interface_member))
            .unwrap_or(false)
    }
}

/// Ancestors of `id`, nearest first, excluding `id` itself.
pub fn base_chain<M: SemanticModel + ?Sized>(model: &M, id: TypeId) -> BaseChain<'_, M> {
    BaseChain::new(model, id)
}

/// Number of base links from `ty` up to `target`: `Some(0)` when they are
/// the same type, `None` when `target` is not an ancestor.
pub fn derivation_depth<M: SemanticModel + ?Sized>(
    model: &M,
    ty: TypeId,
    target: TypeId,
) -> Option<usize> {
    if ty == target {
        return Some(0);
    }
    base_chain(model, ty)
        .position(|ancestor| ancestor == target)
        .map(|pos| pos + 1)
}

/// Iterative walk up the base-type links. Stops at the root, at a dangling
/// id, or on a cycle.
pub struct BaseChain<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    next: Option<TypeId>,
    seen: FxHashSet<TypeId>,
}

impl<'a, M: SemanticModel + ?Sized> BaseChain<'a, M> {
    pub fn new(model: &'a M, start: TypeId) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(start);
        Self {
            model,
            next: model.type_descriptor(start).and_then(|t| t.base),
            seen,
        }
    }
}

impl<M: SemanticModel + ?Sized> Iterator for BaseChain<'_, M> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next.take()?;
        if !self.seen.insert(current) {
            tracing::warn!(type_id = %current, "cycle in base-type chain");
            return None;
        }
        let descriptor = self.model.type_descriptor(current)?;
        self.next = descriptor.base;
        Some(current)
    }
}
