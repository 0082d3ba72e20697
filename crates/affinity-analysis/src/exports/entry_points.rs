//! Enumerates the code a composition container runs while activating a part.

use crate::model::{MemberDescriptor, MemberKind, SemanticModel};

use super::markers::{carries_marker, ExportMarkers};
use super::types::{EntryPoint, EntryPointKind, ExportedPart};

pub struct EntryPointEnumerator<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    markers: &'a ExportMarkers,
}

impl<'a, M: SemanticModel + ?Sized> EntryPointEnumerator<'a, M> {
    pub fn new(model: &'a M, markers: &'a ExportMarkers) -> Self {
        Self { model, markers }
    }

    /// `part` with its entry points filled in.
    pub fn resolve(&self, mut part: ExportedPart) -> ExportedPart {
        part.entry_points = self.enumerate(&part);
        part
    }

    /// Entry points in member declaration order. Only members declared on
    /// the part itself are considered; members without a body are skipped.
    pub fn enumerate(&self, part: &ExportedPart) -> Vec<EntryPoint> {
        let Some(descriptor) = self.model.type_descriptor(part.declaration) else {
            return Vec::new();
        };
        let members: Vec<&MemberDescriptor> = descriptor
            .members
            .iter()
            .filter_map(|&id| self.model.member(id))
            .collect();

        let has_importing_constructor = members
            .iter()
            .any(|m| self.is_importing_constructor(m));

        let mut entry_points = Vec::new();
        for member in members {
            let Some(kind) = self.entry_kind(member, has_importing_constructor) else {
                continue;
            };
            let Some(body) = member.body else {
                tracing::debug!(
                    part = %part.name,
                    member = %member.name,
                    kind = %kind,
                    "entry point has no body"
                );
                continue;
            };
            let span = self
                .model
                .node(body)
                .map(|n| n.span.clone())
                .unwrap_or_default();
            entry_points.push(EntryPoint {
                part: part.declaration,
                part_name: part.name.clone(),
                member: member.id,
                member_name: member.name.clone(),
                kind,
                body,
                span,
            });
        }
        entry_points
    }

    fn entry_kind(
        &self,
        member: &MemberDescriptor,
        has_importing_constructor: bool,
    ) -> Option<EntryPointKind> {
        match member.kind {
            MemberKind::Constructor { is_static: true, .. } => None,
            MemberKind::Constructor { .. } => {
                if self.is_importing_constructor(member) {
                    Some(EntryPointKind::ImportingConstructor)
                } else if !has_importing_constructor && member.is_parameterless_constructor() {
                    Some(EntryPointKind::DefaultConstructor)
                } else {
                    None
                }
            }
            MemberKind::Field => Some(EntryPointKind::FieldInitializer),
            MemberKind::Property => Some(EntryPointKind::PropertyInitializer),
            MemberKind::Method => self
                .is_imports_satisfied(member)
                .then_some(EntryPointKind::ImportsSatisfied),
        }
    }

    fn is_importing_constructor(&self, member: &MemberDescriptor) -> bool {
        member.is_instance_constructor()
            && carries_marker(self.model, &member.attributes, &self.markers.importing_constructor)
    }

    fn is_imports_satisfied(&self, member: &MemberDescriptor) -> bool {
        let implements = self
            .markers
            .imports_satisfied_members
            .iter()
            .any(|&iface_member| self.model.implements(member.id, iface_member));
        implements
            || carries_marker(
                self.model,
                &member.attributes,
                &self.markers.imports_satisfied_attribute,
            )
    }
}
