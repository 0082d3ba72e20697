//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, AffinityErrorCode};
use super::{AnalysisError, CatalogError, ConfigError};

/// Errors that can occur during a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl AffinityErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Analysis(e) => e.error_code(),
            Self::Report(_) => error_code::REPORT_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Partial results survive even when some declarations fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether the run stopped early because of cancellation.
    pub fn was_cancelled(&self) -> bool {
        self.errors.iter().any(|e| {
            matches!(e, PipelineError::Cancelled | PipelineError::Analysis(AnalysisError::Cancelled))
        })
    }
}
