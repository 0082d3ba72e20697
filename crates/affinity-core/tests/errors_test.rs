//! Tests for the Affinity error handling system and cancellation token.

use affinity_core::errors::*;
use affinity_core::traits::{Cancellable, CancellationToken, NeverCancelled};

#[test]
fn test_all_errors_have_error_code() {
    let catalog = CatalogError::MalformedRule {
        index: 0,
        source_name: "rules.txt".into(),
        reason: "empty".into(),
    };
    assert_eq!(catalog.error_code(), "CATALOG_ERROR");

    let config = ConfigError::FileNotFound { path: "/tmp".into() };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let panicked = AnalysisError::Panicked {
        declaration: "App.Part".into(),
        message: "boom".into(),
    };
    assert_eq!(panicked.error_code(), "ANALYSIS_PANIC");
    assert_eq!(AnalysisError::Cancelled.error_code(), "CANCELLED");
    assert_eq!(PipelineError::Report("io".into()).error_code(), "REPORT_ERROR");
}

#[test]
fn test_from_conversions_keep_inner_code() {
    let pipeline: PipelineError = CatalogError::Parse {
        source_name: "x.toml".into(),
        message: "bad".into(),
    }
    .into();
    assert!(matches!(pipeline, PipelineError::Catalog(_)));
    assert_eq!(pipeline.error_code(), "CATALOG_ERROR");

    let pipeline: PipelineError = AnalysisError::UnknownDeclaration { id: 7 }.into();
    assert_eq!(pipeline.error_code(), "ANALYSIS_ERROR");
}

#[test]
fn test_host_string_format() {
    let err = AnalysisError::Internal {
        declaration: "App.Part".into(),
        span: "Part.cs:3:5".into(),
        node_kind: "invocation".into(),
        message: "missing child node 42".into(),
    };
    let s = err.host_string();
    assert!(s.starts_with("[ANALYSIS_ERROR] "));
    assert!(s.contains("Part.cs:3:5"));
    assert!(s.contains("invocation"));
}

#[test]
fn test_pipeline_result_collects_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());

    result.add_error(AnalysisError::UnknownDeclaration { id: 3 }.into());
    assert_eq!(result.error_count(), 1);
    assert!(!result.was_cancelled());

    result.add_error(AnalysisError::Cancelled.into());
    assert!(result.was_cancelled());
    assert_eq!(result.data, vec![1, 2]);
}

#[test]
fn test_cancellation_token_shared_across_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(clone.checkpoint().is_ok());

    token.cancel();
    assert!(clone.is_cancelled());
    assert_eq!(clone.checkpoint(), Err(AnalysisError::Cancelled));

    token.reset();
    assert!(!clone.is_cancelled());
}

#[test]
fn test_cancellation_visible_across_threads() {
    use rayon::prelude::*;

    let token = CancellationToken::new();
    token.cancel();
    let seen: Vec<bool> = (0..16).into_par_iter().map(|_| token.is_cancelled()).collect();
    assert!(seen.into_iter().all(|c| c));
    assert!(!NeverCancelled.is_cancelled());
}
