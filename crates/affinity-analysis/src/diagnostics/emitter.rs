//! Suppression-aware delivery of diagnostics to the host.

use super::suppression::SuppressionIndex;
use super::types::Diagnostic;

/// Host-side receiver of reported diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to a sink unless a suppression region covers them.
pub struct DiagnosticEmitter<'a, S: DiagnosticSink> {
    suppressions: &'a SuppressionIndex,
    sink: S,
    emitted: usize,
    suppressed: usize,
}

impl<'a, S: DiagnosticSink> DiagnosticEmitter<'a, S> {
    pub fn new(suppressions: &'a SuppressionIndex, sink: S) -> Self {
        Self {
            suppressions,
            sink,
            emitted: 0,
            suppressed: 0,
        }
    }

    /// Returns `true` when the diagnostic reached the sink.
    pub fn emit(&mut self, diagnostic: Diagnostic) -> bool {
        if self
            .suppressions
            .is_suppressed(&diagnostic.span, &diagnostic.rule_id)
        {
            tracing::debug!(
                rule_id = %diagnostic.rule_id,
                span = %diagnostic.span,
                "diagnostic suppressed"
            );
            self.suppressed += 1;
            return false;
        }
        self.sink.report(diagnostic);
        self.emitted += 1;
        true
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
