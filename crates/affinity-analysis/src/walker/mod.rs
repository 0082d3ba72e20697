//! Reachability walker: finds the first thread-affine operation an entry
//! point executes synchronously.
//!
//! The walk covers the entry point's own body only. Calls into other
//! methods, including private helpers, are not followed.

pub mod body;

use affinity_core::constants::DEFAULT_MAX_WALK_NODES;
use affinity_core::errors::AnalysisError;
use affinity_core::traits::Cancellable;

use crate::catalog::SymbolCatalog;
use crate::diagnostics::{Diagnostic, DiagnosticDescriptor, EntryPointRef, MatchedRule};
use crate::exports::EntryPoint;
use crate::model::{NodeId, NodeKind, QualifiedName, SemanticModel, Span, SymbolResolution};

pub use body::{ActivationBody, BodyError};

/// A catalog rule matched by an expression in an entry point body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHit {
    pub node: NodeId,
    pub node_kind: NodeKind,
    pub span: Span,
    pub type_name: QualifiedName,
    pub member: String,
    pub rule_index: usize,
    pub matched_rule: MatchedRule,
}

pub struct ReachabilityWalker<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    catalog: &'a SymbolCatalog,
    max_nodes: usize,
}

impl<'a, M: SemanticModel + ?Sized> ReachabilityWalker<'a, M> {
    pub fn new(model: &'a M, catalog: &'a SymbolCatalog) -> Self {
        Self {
            model,
            catalog,
            max_nodes: DEFAULT_MAX_WALK_NODES,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// The first unsafe catalog match in source order, if any.
    ///
    /// The cancellation signal is checked before the walk and before
    /// descending into each statement.
    pub fn find_first_hit(
        &self,
        entry: &EntryPoint,
        cancel: &dyn Cancellable,
    ) -> Result<Option<CatalogHit>, AnalysisError> {
        cancel.checkpoint()?;
        let mut body = ActivationBody::new(self.model, entry.body, self.max_nodes);
        let mut last_span = entry.span.clone();
        let mut last_kind = NodeKind::Other;

        while let Some(next) = body.next() {
            let node = next.map_err(|err| AnalysisError::Internal {
                declaration: entry.to_string(),
                span: last_span.to_string(),
                node_kind: last_kind.to_string(),
                message: err.to_string(),
            })?;
            last_span = node.span.clone();
            last_kind = node.kind;

            if node.kind.is_statement() {
                cancel.checkpoint()?;
            }
            if !node.kind.references_symbol() {
                continue;
            }
            if let Some(hit) = self.check_node(node.id, node.kind, &node.span) {
                tracing::debug!(
                    entry = %entry,
                    span = %hit.span,
                    rule = %hit.matched_rule.rule,
                    visited = body.visited(),
                    "thread-affine operation reached"
                );
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    /// At most one diagnostic: the first hit for this entry point.
    pub fn walk(
        &self,
        entry: &EntryPoint,
        descriptor: &DiagnosticDescriptor,
        cancel: &dyn Cancellable,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        let Some(hit) = self.find_first_hit(entry, cancel)? else {
            return Ok(Vec::new());
        };
        let message = format!(
            "{} synchronously calls thread-affine {}::{} during activation of exported part {} (matched {})",
            entry.kind, hit.type_name, hit.member, entry.part_name, hit.matched_rule.rule
        );
        Ok(vec![Diagnostic {
            rule_id: descriptor.rule_id.clone(),
            severity: descriptor.severity,
            message,
            span: hit.span,
            node_kind: hit.node_kind,
            entry_point: EntryPointRef::from(entry),
            matched_rule: hit.matched_rule,
        }])
    }

    fn check_node(&self, node: NodeId, kind: NodeKind, span: &Span) -> Option<CatalogHit> {
        let member_id = match self.model.resolve_symbol(node) {
            SymbolResolution::Resolved(id) => id,
            SymbolResolution::Ambiguous => {
                tracing::debug!(node = %node, span = %span, "ambiguous symbol, treated as no match");
                return None;
            }
            SymbolResolution::Unresolved => {
                tracing::debug!(node = %node, span = %span, "unresolved symbol, treated as no match");
                return None;
            }
            SymbolResolution::NotApplicable => return None,
        };
        let Some(member) = self.model.member(member_id) else {
            tracing::debug!(node = %node, member = %member_id, "symbol bound to unknown member");
            return None;
        };
        let type_name = &self.model.type_descriptor(member.declaring_type)?.name;

        let found = self.catalog.find_match(type_name, &member.name)?;
        if !found.is_unsafe() {
            return None;
        }
        Some(CatalogHit {
            node,
            node_kind: kind,
            span: span.clone(),
            type_name: type_name.clone(),
            member: member.name.clone(),
            rule_index: found.index,
            matched_rule: MatchedRule {
                rule: found.rule.to_string(),
                source: found.rule.origin.source.clone(),
                position: found.rule.origin.position,
                type_name: type_name.clone(),
                member: member.name.clone(),
            },
        })
    }
}
