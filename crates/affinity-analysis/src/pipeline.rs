//! Per-declaration analysis and the parallel batch driver.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use serde::Serialize;

use affinity_core::config::AffinityConfig;
use affinity_core::constants::{DEFAULT_MAX_WALK_NODES, DEFAULT_THREADS};
use affinity_core::errors::{AnalysisError, ConfigError, PipelineError, PipelineResult};
use affinity_core::traits::Cancellable;

use crate::catalog::SymbolCatalog;
use crate::diagnostics::{create_reporter, Diagnostic, DiagnosticDescriptor, DiagnosticEmitter, SuppressionIndex};
use crate::exports::{
    EntryPoint, EntryPointEnumerator, ExportClassifier, ExportMarkers, ExportedPart, MarkerNames,
};
use crate::model::{SemanticModel, TypeId};
use crate::walker::ReachabilityWalker;

/// Everything computed for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationAnalysis {
    pub declaration: TypeId,
    /// `None` when the declaration is not an exported part.
    pub part: Option<ExportedPart>,
    /// Ordered by entry point. Holds only entry points that finished.
    pub diagnostics: Vec<Diagnostic>,
    /// Cancellation fired during one of the entry point walks. The
    /// entry points walked before it keep their diagnostics.
    pub cancelled: bool,
}

impl DeclarationAnalysis {
    pub fn entry_points(&self) -> &[EntryPoint] {
        self.part.as_ref().map(|p| p.entry_points.as_slice()).unwrap_or(&[])
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    /// Emitted diagnostics, ordered by declaration then entry point.
    pub diagnostics: Vec<Diagnostic>,
    pub declarations_analyzed: usize,
    pub exported_parts: usize,
    pub entry_points: usize,
    pub suppressed: usize,
    pub failed_declarations: usize,
}

impl AnalysisReport {
    /// Render the diagnostics in a report format (`json`, `sarif`).
    pub fn render(&self, format: &str) -> Result<String, PipelineError> {
        let reporter = create_reporter(format)
            .ok_or_else(|| PipelineError::Report(format!("unknown report format '{format}'")))?;
        reporter.generate(&self.diagnostics).map_err(PipelineError::Report)
    }
}

/// Runs classify → enumerate → walk. Borrows the catalog, which is
/// built once and shared by every task.
pub struct Analyzer<'c> {
    catalog: &'c SymbolCatalog,
    markers: MarkerNames,
    descriptor: DiagnosticDescriptor,
    max_walk_nodes: usize,
    threads: usize,
}

impl<'c> Analyzer<'c> {
    pub fn new(catalog: &'c SymbolCatalog) -> Self {
        Self {
            catalog,
            markers: MarkerNames::default(),
            descriptor: DiagnosticDescriptor::default(),
            max_walk_nodes: DEFAULT_MAX_WALK_NODES,
            threads: DEFAULT_THREADS,
        }
    }

    pub fn from_config(catalog: &'c SymbolCatalog, config: &AffinityConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            catalog,
            markers: MarkerNames::from_config(&config.markers),
            descriptor: DiagnosticDescriptor::from_config(&config.report)?,
            max_walk_nodes: config.analysis.effective_max_walk_nodes(),
            threads: config.analysis.effective_threads(),
        })
    }

    pub fn with_markers(mut self, markers: MarkerNames) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_descriptor(mut self, descriptor: DiagnosticDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn with_max_walk_nodes(mut self, max_walk_nodes: usize) -> Self {
        self.max_walk_nodes = max_walk_nodes;
        self
    }

    /// 0 uses rayon's global pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        self.catalog
    }

    pub fn descriptor(&self) -> &DiagnosticDescriptor {
        &self.descriptor
    }

    /// Analyze a single declaration. Diagnostics are returned, not emitted.
    pub fn analyze_declaration<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        declaration: TypeId,
        cancel: &dyn Cancellable,
    ) -> Result<DeclarationAnalysis, AnalysisError> {
        let markers = ExportMarkers::resolve(model, &self.markers);
        self.analyze_with_markers(model, &markers, declaration, cancel)
    }

    fn analyze_with_markers<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        markers: &ExportMarkers,
        declaration: TypeId,
        cancel: &dyn Cancellable,
    ) -> Result<DeclarationAnalysis, AnalysisError> {
        cancel.checkpoint()?;
        if model.type_descriptor(declaration).is_none() {
            return Err(AnalysisError::UnknownDeclaration { id: declaration.0 });
        }

        let mut analysis = DeclarationAnalysis {
            declaration,
            part: None,
            diagnostics: Vec::new(),
            cancelled: false,
        };
        let Some(part) = ExportClassifier::new(model, markers).classify(declaration) else {
            return Ok(analysis);
        };

        let part = EntryPointEnumerator::new(model, markers).resolve(part);
        let walker = ReachabilityWalker::new(model, self.catalog).with_max_nodes(self.max_walk_nodes);
        for entry in &part.entry_points {
            match walker.walk(entry, &self.descriptor, cancel) {
                Ok(found) => analysis.diagnostics.extend(found),
                Err(AnalysisError::Cancelled) => {
                    tracing::debug!(
                        entry = %entry,
                        kept = analysis.diagnostics.len(),
                        "cancelled during entry point walk"
                    );
                    analysis.cancelled = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(
            part = %part.name,
            reason = %part.reason,
            entry_points = part.entry_points.len(),
            diagnostics = analysis.diagnostics.len(),
            cancelled = analysis.cancelled,
            "analyzed exported part"
        );
        analysis.part = Some(part);
        Ok(analysis)
    }

    /// Analyze `declarations` in parallel and emit the diagnostics in order.
    ///
    /// A failure or panic in one declaration is recorded in the result's
    /// errors and does not affect the others. On cancellation, declarations
    /// and entry points already finished keep their diagnostics.
    pub fn analyze_all<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        declarations: &[TypeId],
        suppressions: &SuppressionIndex,
        cancel: &dyn Cancellable,
    ) -> PipelineResult<AnalysisReport> {
        let markers = ExportMarkers::resolve(model, &self.markers);
        let outcomes = self.run_parallel(model, &markers, declarations, cancel);

        let mut result = PipelineResult::new(AnalysisReport::default());
        let mut emitter = DiagnosticEmitter::new(suppressions, Vec::new());
        let mut cancelled = false;

        for outcome in outcomes {
            result.data.declarations_analyzed += 1;
            match outcome {
                Ok(analysis) => {
                    if analysis.part.is_some() {
                        result.data.exported_parts += 1;
                    }
                    result.data.entry_points += analysis.entry_points().len();
                    cancelled |= analysis.cancelled;
                    for diagnostic in analysis.diagnostics {
                        emitter.emit(diagnostic);
                    }
                }
                Err(AnalysisError::Cancelled) => cancelled = true,
                Err(err) => {
                    tracing::warn!(error = %err, "declaration analysis failed");
                    result.data.failed_declarations += 1;
                    result.add_error(PipelineError::Analysis(err));
                }
            }
        }
        if cancelled {
            result.add_error(PipelineError::Cancelled);
        }

        result.data.suppressed = emitter.suppressed();
        result.data.diagnostics = emitter.into_sink();
        tracing::info!(
            declarations = result.data.declarations_analyzed,
            exported_parts = result.data.exported_parts,
            entry_points = result.data.entry_points,
            diagnostics = result.data.diagnostics.len(),
            suppressed = result.data.suppressed,
            failed = result.data.failed_declarations,
            cancelled,
            "analysis complete"
        );
        result
    }

    fn run_parallel<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        markers: &ExportMarkers,
        declarations: &[TypeId],
        cancel: &dyn Cancellable,
    ) -> Vec<Result<DeclarationAnalysis, AnalysisError>> {
        let run = || -> Vec<Result<DeclarationAnalysis, AnalysisError>> {
            declarations
                .par_iter()
                .map(|&declaration| self.isolated(model, markers, declaration, cancel))
                .collect()
        };

        if self.threads == 0 {
            return run();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
            Ok(pool) => pool.install(run),
            Err(err) => {
                tracing::warn!(error = %err, threads = self.threads, "falling back to the global rayon pool");
                run()
            }
        }
    }

    /// One declaration with panics turned into errors.
    fn isolated<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        markers: &ExportMarkers,
        declaration: TypeId,
        cancel: &dyn Cancellable,
    ) -> Result<DeclarationAnalysis, AnalysisError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.analyze_with_markers(model, markers, declaration, cancel)
        }))
        .unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            let declaration_name = model
                .type_descriptor(declaration)
                .map(|t| t.name.to_string())
                .unwrap_or_else(|| declaration.to_string());
            Err(AnalysisError::Panicked {
                declaration: declaration_name,
                message,
            })
        })
    }
}
