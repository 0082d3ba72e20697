//! Traits shared across the engine.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken, NeverCancelled};
