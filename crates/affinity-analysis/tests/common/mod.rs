//! Shared declaration-graph fixtures.
//!
//! Every node gets its own line in `Part.cs`, so spans identify nodes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use affinity_analysis::catalog::TypeMatchSpec;
use affinity_analysis::model::{DeclarationGraph, MemberId, NodeId, NodeKind, Span, TypeId};
use affinity_analysis::SymbolCatalog;
use affinity_core::traits::Cancellable;

pub const FILE: &str = "Part.cs";
pub const MEF: &str = "System.ComponentModel.Composition";

pub struct Fixture {
    pub graph: DeclarationGraph,
    pub attribute: TypeId,
    pub export: TypeId,
    pub inherited_export: TypeId,
    pub importing_constructor: TypeId,
    pub imports_satisfied_attribute: TypeId,
    pub imports_satisfied_interface: TypeId,
    pub on_imports_satisfied: MemberId,
    pub helper: TypeId,
    pub assert_ui: MemberId,
    pub safe: TypeId,
    pub log: MemberId,
    line: u32,
}

impl Fixture {
    /// Marker attributes in the MEF namespace, `NS.Helper.AssertUi`
    /// (thread-affine in [`Fixture::catalog`]) and `NS.Safe.Log` (not).
    pub fn new() -> Self {
        let mut graph = DeclarationGraph::new();
        let attribute = graph.add_type("System.Attribute", None);
        let export = graph.add_type(&format!("{MEF}.ExportAttribute"), Some(attribute));
        let inherited_export = graph.add_type(&format!("{MEF}.InheritedExportAttribute"), Some(export));
        let importing_constructor =
            graph.add_type(&format!("{MEF}.ImportingConstructorAttribute"), Some(attribute));
        let imports_satisfied_attribute =
            graph.add_type(&format!("{MEF}.OnImportsSatisfiedAttribute"), Some(attribute));
        let imports_satisfied_interface =
            graph.add_type(&format!("{MEF}.IPartImportsSatisfiedNotification"), None);
        let on_imports_satisfied = graph.add_method(imports_satisfied_interface, "OnImportsSatisfied");

        let helper = graph.add_type("NS.Helper", None);
        let assert_ui = graph.add_method(helper, "AssertUi");
        let safe = graph.add_type("NS.Safe", None);
        let log = graph.add_method(safe, "Log");

        Self {
            graph,
            attribute,
            export,
            inherited_export,
            importing_constructor,
            imports_satisfied_attribute,
            imports_satisfied_interface,
            on_imports_satisfied,
            helper,
            assert_ui,
            safe,
            log,
            line: 0,
        }
    }

    /// `[NS.Helper]::AssertUi` only.
    pub fn catalog() -> SymbolCatalog {
        SymbolCatalog::new(vec![TypeMatchSpec::exact("NS.Helper", "AssertUi")])
    }

    pub fn next_span(&mut self) -> Span {
        self.line += 1;
        Span::line(FILE, self.line, 9, 40)
    }

    pub fn class(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        self.graph.add_type(name, base)
    }

    pub fn exported_class(&mut self, name: &str) -> TypeId {
        let ty = self.graph.add_type(name, None);
        self.graph.attach_attribute(ty, self.export);
        ty
    }

    pub fn importing_constructor(&mut self, ty: TypeId, parameters: u32) -> MemberId {
        let ctor = self.graph.add_constructor(ty, parameters);
        self.graph.mark_member(ctor, self.importing_constructor);
        ctor
    }

    /// Give `member` an empty block body.
    pub fn body(&mut self, member: MemberId) -> NodeId {
        let span = self.next_span();
        let root = self.graph.add_node(NodeKind::Block, span);
        self.graph.set_body(member, root);
        root
    }

    pub fn node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let span = self.next_span();
        self.graph.add_child(parent, kind, span)
    }

    /// `target(...)` as an invocation under `parent`.
    pub fn call(&mut self, parent: NodeId, target: MemberId) -> NodeId {
        let call = self.node(parent, NodeKind::Invocation);
        self.graph.bind_symbol(call, target);
        call
    }

    /// `target(...);` as its own statement in `block`. Returns the invocation.
    pub fn call_statement(&mut self, block: NodeId, target: MemberId) -> NodeId {
        let statement = self.node(block, NodeKind::ExpressionStatement);
        self.call(statement, target)
    }

    /// `() => target(...)` as an argument of a `NS.Safe.Log` call.
    /// Returns the invocation inside the lambda.
    pub fn lambda_statement(&mut self, block: NodeId, target: MemberId) -> NodeId {
        let log = self.log;
        let outer = self.call_statement(block, log);
        let argument = self.node(outer, NodeKind::Argument);
        let lambda = self.node(argument, NodeKind::AnonymousFunction);
        self.call(lambda, target)
    }

    pub fn span_of(&self, node: NodeId) -> Span {
        use affinity_analysis::SemanticModel;
        self.graph.node(node).map(|n| n.span.clone()).unwrap_or_default()
    }

    pub fn types(&self) -> Vec<TypeId> {
        self.graph.type_ids().collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fires after a fixed number of checks.
pub struct CancelAfter {
    remaining: AtomicUsize,
}

impl CancelAfter {
    pub fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl Cancellable for CancelAfter {
    fn is_cancelled(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}
