//! Catalog construction errors. Any of these is fatal: no analysis runs
//! without a valid catalog.

use super::error_code::{self, AffinityErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed rule #{index} in {source_name}: {reason}")]
    MalformedRule {
        index: usize,
        source_name: String,
        reason: String,
    },

    #[error("Catalog parse error in {source_name}: {message}")]
    Parse { source_name: String, message: String },

    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },
}

impl AffinityErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        error_code::CATALOG_ERROR
    }
}
