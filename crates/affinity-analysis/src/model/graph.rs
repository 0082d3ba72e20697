//! In-memory declaration graph.
//!
//! Hosts lower their front-end output into this table; ids are dense
//! indices into the type, member, and node vectors.

use affinity_core::constants::CONSTRUCTOR_MEMBER_NAME;
use affinity_core::types::{FxHashMap, SmallVec2};

use super::identifiers::{MemberId, NodeId, TypeId};
use super::names::QualifiedName;
use super::syntax::{
    MemberDescriptor, MemberKind, NodeKind, Span, SymbolResolution, SyntaxNode, TypeDescriptor,
};
use super::traits::SemanticModel;

#[derive(Debug, Default, Clone)]
pub struct DeclarationGraph {
    types: Vec<TypeDescriptor>,
    members: Vec<MemberDescriptor>,
    nodes: Vec<SyntaxNode>,
    type_index: FxHashMap<QualifiedName, TypeId>,
    symbols: FxHashMap<NodeId, SymbolResolution>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Types ----

    /// Add a type, or return the existing id when the name is already known.
    pub fn add_type(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        let name = QualifiedName::parse(name);
        if let Some(&existing) = self.type_index.get(&name) {
            return existing;
        }
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(TypeDescriptor {
            id,
            name: name.clone(),
            base,
            interfaces: Vec::new(),
            attributes: SmallVec2::new(),
            members: Vec::new(),
        });
        self.type_index.insert(name, id);
        id
    }

    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        if let Some(t) = self.types.get_mut(ty.index()) {
            t.base = Some(base);
        }
    }

    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) {
        if let Some(t) = self.types.get_mut(ty.index()) {
            t.interfaces.push(interface);
        }
    }

    /// Apply the attribute class `attribute` to a type declaration.
    pub fn attach_attribute(&mut self, ty: TypeId, attribute: TypeId) {
        if let Some(t) = self.types.get_mut(ty.index()) {
            t.attributes.push(attribute);
        }
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter().map(|t| t.id)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ---- Members ----

    pub fn add_member(&mut self, ty: TypeId, name: &str, kind: MemberKind) -> MemberId {
        let id = MemberId::new(self.members.len() as u32);
        self.members.push(MemberDescriptor {
            id,
            declaring_type: ty,
            name: name.to_string(),
            kind,
            attributes: SmallVec2::new(),
            body: None,
            implements: Vec::new(),
        });
        if let Some(t) = self.types.get_mut(ty.index()) {
            t.members.push(id);
        }
        id
    }

    pub fn add_constructor(&mut self, ty: TypeId, parameter_count: u32) -> MemberId {
        self.add_member(
            ty,
            CONSTRUCTOR_MEMBER_NAME,
            MemberKind::Constructor {
                parameter_count,
                is_static: false,
            },
        )
    }

    pub fn add_static_constructor(&mut self, ty: TypeId) -> MemberId {
        self.add_member(
            ty,
            CONSTRUCTOR_MEMBER_NAME,
            MemberKind::Constructor {
                parameter_count: 0,
                is_static: true,
            },
        )
    }

    pub fn add_method(&mut self, ty: TypeId, name: &str) -> MemberId {
        self.add_member(ty, name, MemberKind::Method)
    }

    pub fn add_field(&mut self, ty: TypeId, name: &str) -> MemberId {
        self.add_member(ty, name, MemberKind::Field)
    }

    pub fn add_property(&mut self, ty: TypeId, name: &str) -> MemberId {
        self.add_member(ty, name, MemberKind::Property)
    }

    /// Apply the attribute class `attribute` to a member.
    pub fn mark_member(&mut self, member: MemberId, attribute: TypeId) {
        if let Some(m) = self.members.get_mut(member.index()) {
            m.attributes.push(attribute);
        }
    }

    /// Record that `method` implements `interface_member`.
    pub fn add_implementation(&mut self, method: MemberId, interface_member: MemberId) {
        if let Some(m) = self.members.get_mut(method.index()) {
            m.implements.push(interface_member);
        }
    }

    /// Attach a body (or initializer expression) to a member.
    pub fn set_body(&mut self, member: MemberId, root: NodeId) {
        if let Some(m) = self.members.get_mut(member.index()) {
            m.body = Some(root);
        }
    }

    pub fn find_member(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        let t = self.types.get(ty.index())?;
        t.members
            .iter()
            .copied()
            .find(|m| self.members.get(m.index()).is_some_and(|d| d.name == name))
    }

    // ---- Syntax ----

    /// Add a parentless node, typically a body root.
    pub fn add_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            id,
            kind,
            span,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append a child to `parent`; children keep insertion (source) order.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = self.add_node(kind, span);
        if let Some(p) = self.nodes.get_mut(parent.index()) {
            p.children.push(id);
        }
        if let Some(n) = self.nodes.get_mut(id.index()) {
            n.parent = Some(parent);
        }
        id
    }

    /// Record the symbol an expression node refers to.
    pub fn bind_symbol(&mut self, node: NodeId, member: MemberId) {
        self.symbols.insert(node, SymbolResolution::Resolved(member));
    }

    pub fn mark_ambiguous(&mut self, node: NodeId) {
        self.symbols.insert(node, SymbolResolution::Ambiguous);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl SemanticModel for DeclarationGraph {
    fn type_descriptor(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    fn member(&self, id: MemberId) -> Option<&MemberDescriptor> {
        self.members.get(id.index())
    }

    fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    fn find_type(&self, name: &QualifiedName) -> Option<TypeId> {
        self.type_index.get(name).copied()
    }

    fn resolve_symbol(&self, node: NodeId) -> SymbolResolution {
        if let Some(resolution) = self.symbols.get(&node) {
            return *resolution;
        }
        match self.nodes.get(node.index()) {
            Some(n) if n.kind.references_symbol() => SymbolResolution::Unresolved,
            _ => SymbolResolution::NotApplicable,
        }
    }
}
