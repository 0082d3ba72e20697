//! Composition marker names and their resolution against a model.

use affinity_core::config::MarkersConfig;
use affinity_core::types::SmallVec2;

use crate::model::{derivation_depth, MemberId, QualifiedName, SemanticModel, TypeId};

/// Simple names of the marker attributes and the imports-satisfied
/// capability, plus the namespaces they may live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerNames {
    pub namespaces: Vec<String>,
    pub export_attribute: String,
    pub inherited_export_attribute: String,
    pub importing_constructor_attribute: String,
    pub imports_satisfied_interface: String,
    pub imports_satisfied_member: String,
    pub imports_satisfied_attribute: String,
}

impl MarkerNames {
    pub fn from_config(config: &MarkersConfig) -> Self {
        Self {
            namespaces: config.effective_namespaces(),
            export_attribute: config.effective_export_attribute().to_string(),
            inherited_export_attribute: config.effective_inherited_export_attribute().to_string(),
            importing_constructor_attribute: config
                .effective_importing_constructor_attribute()
                .to_string(),
            imports_satisfied_interface: config.effective_imports_satisfied_interface().to_string(),
            imports_satisfied_member: config.effective_imports_satisfied_member().to_string(),
            imports_satisfied_attribute: config.effective_imports_satisfied_attribute().to_string(),
        }
    }

    /// `simple_name` qualified by every configured namespace.
    fn qualified(&self, simple_name: &str) -> impl Iterator<Item = QualifiedName> + '_ {
        let simple_name = simple_name.to_string();
        self.namespaces
            .iter()
            .map(move |ns| QualifiedName::join(ns, &simple_name))
    }
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self::from_config(&MarkersConfig::default())
    }
}

/// Marker types present in a particular model. A marker absent from the
/// model simply resolves to nothing.
#[derive(Debug, Clone, Default)]
pub struct ExportMarkers {
    pub export: SmallVec2<TypeId>,
    pub inherited_export: SmallVec2<TypeId>,
    pub importing_constructor: SmallVec2<TypeId>,
    pub imports_satisfied_attribute: SmallVec2<TypeId>,
    /// The notification method on each resolved imports-satisfied interface.
    pub imports_satisfied_members: SmallVec2<MemberId>,
}

impl ExportMarkers {
    pub fn resolve<M: SemanticModel + ?Sized>(model: &M, names: &MarkerNames) -> Self {
        let find = |simple: &str| -> SmallVec2<TypeId> {
            names.qualified(simple).filter_map(|q| model.find_type(&q)).collect()
        };

        let imports_satisfied_members = find(&names.imports_satisfied_interface)
            .into_iter()
            .filter_map(|iface| {
                let descriptor = model.type_descriptor(iface)?;
                descriptor.members.iter().copied().find(|m| {
                    model
                        .member(*m)
                        .is_some_and(|d| d.name == names.imports_satisfied_member)
                })
            })
            .collect();

        let markers = Self {
            export: find(&names.export_attribute),
            inherited_export: find(&names.inherited_export_attribute),
            importing_constructor: find(&names.importing_constructor_attribute),
            imports_satisfied_attribute: find(&names.imports_satisfied_attribute),
            imports_satisfied_members,
        };
        tracing::debug!(
            export = markers.export.len(),
            inherited_export = markers.inherited_export.len(),
            importing_constructor = markers.importing_constructor.len(),
            "resolved composition markers"
        );
        markers
    }

    /// Whether the model declares any export marker at all.
    pub fn has_export_markers(&self) -> bool {
        !self.export.is_empty() || !self.inherited_export.is_empty()
    }
}

/// The first marker in `markers` that `attribute` is or derives from, with
/// the number of derivation levels between them.
pub fn marker_depth<M: SemanticModel + ?Sized>(
    model: &M,
    attribute: TypeId,
    markers: &[TypeId],
) -> Option<(TypeId, usize)> {
    markers
        .iter()
        .find_map(|&marker| derivation_depth(model, attribute, marker).map(|d| (marker, d)))
}

/// Whether any of `attributes` is or derives from one of `markers`.
pub fn carries_marker<M: SemanticModel + ?Sized>(
    model: &M,
    attributes: &[TypeId],
    markers: &[TypeId],
) -> bool {
    attributes
        .iter()
        .any(|&a| marker_depth(model, a, markers).is_some())
}
