//! affinity-analysis: detects exported composition parts whose activation
//! path synchronously reaches a thread-affine operation.
//!
//! Pipeline per declaration:
//! `exports::ExportClassifier` → `exports::EntryPointEnumerator` →
//! `walker::ReachabilityWalker` (consulting `catalog::SymbolCatalog`) →
//! `diagnostics::DiagnosticEmitter`.
//!
//! The front-end that produces declarations and syntax trees is abstracted by
//! `model::SemanticModel`; `model::DeclarationGraph` is the in-memory form.

pub mod catalog;
pub mod diagnostics;
pub mod exports;
pub mod model;
pub mod pipeline;
pub mod walker;

pub use catalog::SymbolCatalog;
pub use diagnostics::{Diagnostic, DiagnosticDescriptor, Severity, SuppressionIndex};
pub use exports::{EntryPoint, EntryPointKind, ExportReason, ExportedPart};
pub use model::{DeclarationGraph, SemanticModel};
pub use pipeline::{AnalysisReport, Analyzer};
