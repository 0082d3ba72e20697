//! Error handling for Affinity.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;

pub use analysis_error::AnalysisError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::AffinityErrorCode;
pub use pipeline_error::{PipelineError, PipelineResult};
