//! Diagnostics: records, suppression, emission, and report formats.

pub mod emitter;
pub mod reporters;
pub mod suppression;
pub mod types;

pub use emitter::{DiagnosticEmitter, DiagnosticSink};
pub use reporters::{available_formats, create_reporter, Reporter};
pub use suppression::{SuppressionIndex, SuppressionRegion};
pub use types::{Diagnostic, DiagnosticDescriptor, EntryPointRef, MatchedRule, Severity};
