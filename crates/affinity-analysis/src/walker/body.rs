//! Pre-order traversal of an activation body.
//!
//! Anonymous function subtrees are pruned before descent: their code runs
//! whenever the delegate is invoked, not during activation.

use crate::model::{NodeId, SemanticModel, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("dangling syntax node {id} (parent {parent:?})")]
    DanglingNode { id: NodeId, parent: Option<NodeId> },

    /// Usually a cyclic child list.
    #[error("walk exceeded {visited} nodes")]
    BudgetExceeded { visited: usize },
}

/// Iterative pre-order walk in source order. Stops after the first error.
pub struct ActivationBody<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    stack: Vec<(NodeId, Option<NodeId>)>,
    visited: usize,
    budget: usize,
    skipped: usize,
    failed: bool,
}

impl<'a, M: SemanticModel + ?Sized> ActivationBody<'a, M> {
    pub fn new(model: &'a M, root: NodeId, budget: usize) -> Self {
        Self {
            model,
            stack: vec![(root, None)],
            visited: 0,
            budget,
            skipped: 0,
            failed: false,
        }
    }

    /// Nodes yielded so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Anonymous function subtrees pruned so far.
    pub fn skipped_subtrees(&self) -> usize {
        self.skipped
    }
}

impl<'a, M: SemanticModel + ?Sized> Iterator for ActivationBody<'a, M> {
    type Item = Result<&'a SyntaxNode, BodyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let (id, parent) = self.stack.pop()?;
            let Some(node) = self.model.node(id) else {
                self.failed = true;
                return Some(Err(BodyError::DanglingNode { id, parent }));
            };
            if node.kind.is_deferred() {
                self.skipped += 1;
                tracing::debug!(node = %id, span = %node.span, "skipping anonymous function body");
                continue;
            }
            if self.visited >= self.budget {
                self.failed = true;
                return Some(Err(BodyError::BudgetExceeded { visited: self.visited }));
            }
            self.visited += 1;
            self.stack
                .extend(node.children.iter().rev().map(|&child| (child, Some(id))));
            return Some(Ok(node));
        }
    }
}
