//! Names of the composition marker attributes and notification capability.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXPORT_ATTRIBUTE, DEFAULT_IMPORTING_CONSTRUCTOR_ATTRIBUTE,
    DEFAULT_IMPORTS_SATISFIED_ATTRIBUTE, DEFAULT_IMPORTS_SATISFIED_INTERFACE,
    DEFAULT_IMPORTS_SATISFIED_MEMBER, DEFAULT_INHERITED_EXPORT_ATTRIBUTE,
    DEFAULT_MARKER_NAMESPACES,
};

/// Marker names are simple type names looked up in every configured namespace.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MarkersConfig {
    pub namespaces: Vec<String>,
    pub export_attribute: Option<String>,
    pub inherited_export_attribute: Option<String>,
    pub importing_constructor_attribute: Option<String>,
    pub imports_satisfied_interface: Option<String>,
    pub imports_satisfied_member: Option<String>,
    pub imports_satisfied_attribute: Option<String>,
}

impl MarkersConfig {
    pub fn effective_namespaces(&self) -> Vec<String> {
        if self.namespaces.is_empty() {
            DEFAULT_MARKER_NAMESPACES.iter().map(|s| s.to_string()).collect()
        } else {
            self.namespaces.clone()
        }
    }

    pub fn effective_export_attribute(&self) -> &str {
        self.export_attribute.as_deref().unwrap_or(DEFAULT_EXPORT_ATTRIBUTE)
    }

    pub fn effective_inherited_export_attribute(&self) -> &str {
        self.inherited_export_attribute
            .as_deref()
            .unwrap_or(DEFAULT_INHERITED_EXPORT_ATTRIBUTE)
    }

    pub fn effective_importing_constructor_attribute(&self) -> &str {
        self.importing_constructor_attribute
            .as_deref()
            .unwrap_or(DEFAULT_IMPORTING_CONSTRUCTOR_ATTRIBUTE)
    }

    pub fn effective_imports_satisfied_interface(&self) -> &str {
        self.imports_satisfied_interface
            .as_deref()
            .unwrap_or(DEFAULT_IMPORTS_SATISFIED_INTERFACE)
    }

    pub fn effective_imports_satisfied_member(&self) -> &str {
        self.imports_satisfied_member
            .as_deref()
            .unwrap_or(DEFAULT_IMPORTS_SATISFIED_MEMBER)
    }

    pub fn effective_imports_satisfied_attribute(&self) -> &str {
        self.imports_satisfied_attribute
            .as_deref()
            .unwrap_or(DEFAULT_IMPORTS_SATISFIED_ATTRIBUTE)
    }
}
