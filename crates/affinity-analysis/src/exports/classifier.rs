//! Decides whether a declaration is an exported composition part.

use crate::model::{base_chain, SemanticModel, TypeId};

use super::markers::{marker_depth, ExportMarkers};
use super::types::{ExportReason, ExportedPart};

pub struct ExportClassifier<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    markers: &'a ExportMarkers,
}

impl<'a, M: SemanticModel + ?Sized> ExportClassifier<'a, M> {
    pub fn new(model: &'a M, markers: &'a ExportMarkers) -> Self {
        Self { model, markers }
    }

    /// `None` when the declaration carries no export marker (direct or
    /// derived) and no ancestor carries the inherited-export marker.
    pub fn classify(&self, declaration: TypeId) -> Option<ExportedPart> {
        let descriptor = self.model.type_descriptor(declaration)?;
        let reason = self
            .own_marker(declaration)
            .or_else(|| self.inherited_marker(declaration))?;
        Some(ExportedPart {
            declaration,
            name: descriptor.name.clone(),
            reason,
            entry_points: Vec::new(),
        })
    }

    /// First attribute, in source order, that is or derives from an export
    /// marker. The inherited-export marker counts here as well since it
    /// exports the declaration it sits on.
    fn own_marker(&self, declaration: TypeId) -> Option<ExportReason> {
        let descriptor = self.model.type_descriptor(declaration)?;
        descriptor.attributes.iter().find_map(|&attr| {
            let (_, depth) = marker_depth(self.model, attr, &self.markers.export)
                .or_else(|| marker_depth(self.model, attr, &self.markers.inherited_export))?;
            let attribute = self.model.type_descriptor(attr)?.name.clone();
            Some(if depth == 0 {
                ExportReason::DirectMarker { attribute }
            } else {
                ExportReason::DerivedMarker { attribute, depth }
            })
        })
    }

    /// Nearest ancestor carrying the inherited-export marker.
    fn inherited_marker(&self, declaration: TypeId) -> Option<ExportReason> {
        if self.markers.inherited_export.is_empty() {
            return None;
        }
        base_chain(self.model, declaration).find_map(|ancestor| {
            let descriptor = self.model.type_descriptor(ancestor)?;
            let attr = descriptor.attributes.iter().copied().find(|&a| {
                marker_depth(self.model, a, &self.markers.inherited_export).is_some()
            })?;
            Some(ExportReason::InheritedFromBase {
                ancestor: descriptor.name.clone(),
                attribute: self.model.type_descriptor(attr)?.name.clone(),
            })
        })
    }
}
