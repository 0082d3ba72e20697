//! Per-declaration analysis errors.
//!
//! These never abort a run: the pipeline records them against the
//! declaration that failed and keeps going.

use super::error_code::{self, AffinityErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The declaration graph handed to the engine was inconsistent.
    #[error("Internal failure analyzing {declaration} at {span} ({node_kind}): {message}")]
    Internal {
        declaration: String,
        span: String,
        node_kind: String,
        message: String,
    },

    #[error("Unknown declaration id {id}")]
    UnknownDeclaration { id: u32 },

    #[error("Analysis of {declaration} panicked: {message}")]
    Panicked { declaration: String, message: String },

    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl AffinityErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Internal { .. } | Self::UnknownDeclaration { .. } => error_code::ANALYSIS_ERROR,
            Self::Panicked { .. } => error_code::ANALYSIS_PANIC,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
