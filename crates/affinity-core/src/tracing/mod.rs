//! Observability for Affinity.
//! `tracing` crate with `EnvFilter`, configured through `AFFINITY_LOG`.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_default};
