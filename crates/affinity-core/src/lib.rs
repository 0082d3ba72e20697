//! affinity-core: shared foundation for the Affinity analysis engine.
//!
//! - `errors`: one `thiserror` enum per subsystem plus pipeline aggregation
//! - `config`: TOML configuration with layered resolution
//! - `traits`: cooperative cancellation
//! - `tracing`: `tracing-subscriber` setup driven by `AFFINITY_LOG`
//! - `types`: collection aliases used across the workspace
//! - `constants`: compiled defaults

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::AffinityConfig;
pub use errors::{AffinityErrorCode, AnalysisError, CatalogError, ConfigError, PipelineError, PipelineResult};
pub use traits::{Cancellable, CancellationToken};
