//! Export classification and activation entry points.

pub mod classifier;
pub mod entry_points;
pub mod markers;
pub mod types;

pub use classifier::ExportClassifier;
pub use entry_points::EntryPointEnumerator;
pub use markers::{ExportMarkers, MarkerNames};
pub use types::{EntryPoint, EntryPointKind, ExportReason, ExportedPart};
