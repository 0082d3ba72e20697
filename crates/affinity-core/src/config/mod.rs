//! Configuration system for Affinity.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod affinity_config;
pub mod analysis_config;
pub mod catalog_config;
pub mod markers_config;
pub mod report_config;

pub use affinity_config::{AffinityConfig, ConfigOverrides};
pub use analysis_config::AnalysisConfig;
pub use catalog_config::CatalogConfig;
pub use markers_config::MarkersConfig;
pub use report_config::ReportConfig;
