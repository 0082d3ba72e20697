//! Reachability walker over single entry points.

mod common;

use affinity_analysis::catalog::TypeMatchSpec;
use affinity_analysis::diagnostics::DiagnosticDescriptor;
use affinity_analysis::exports::{
    EntryPoint, EntryPointEnumerator, ExportClassifier, ExportMarkers, MarkerNames,
};
use affinity_analysis::model::{MemberId, NodeKind, QualifiedName, TypeId};
use affinity_analysis::walker::ReachabilityWalker;
use affinity_analysis::SymbolCatalog;
use affinity_core::errors::AnalysisError;
use affinity_core::traits::{CancellationToken, NeverCancelled};
use common::{CancelAfter, Fixture};

fn entry_points(fx: &Fixture, part: TypeId) -> Vec<EntryPoint> {
    let m = ExportMarkers::resolve(&fx.graph, &MarkerNames::default());
    let exported = ExportClassifier::new(&fx.graph, &m).classify(part).unwrap();
    EntryPointEnumerator::new(&fx.graph, &m).enumerate(&exported)
}

/// Exported `NS.Part` with an importing constructor; returns (part, ctor body).
fn part_with_importing_ctor(fx: &mut Fixture) -> (TypeId, affinity_analysis::model::NodeId) {
    let part = fx.exported_class("NS.Part");
    let ctor = fx.importing_constructor(part, 1);
    let body = fx.body(ctor);
    (part, body)
}

fn walk(fx: &Fixture, catalog: &SymbolCatalog, part: TypeId) -> Vec<affinity_analysis::Diagnostic> {
    let walker = ReachabilityWalker::new(&fx.graph, catalog);
    let descriptor = DiagnosticDescriptor::default();
    entry_points(fx, part)
        .iter()
        .flat_map(|e| walker.walk(e, &descriptor, &NeverCancelled).unwrap())
        .collect()
}

#[test]
fn test_direct_call_in_importing_constructor() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    fx.call_statement(body, fx.log);
    let call = fx.call_statement(body, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.span, fx.span_of(call));
    assert_eq!(d.node_kind, NodeKind::Invocation);
    assert_eq!(d.rule_id, "AFF001");
    assert_eq!(d.matched_rule.rule, "[NS.Helper]::AssertUi");
    assert_eq!(d.entry_point.member, ".ctor");
    assert!(d.message.contains("NS.Helper::AssertUi"), "{}", d.message);
}

#[test]
fn test_call_inside_lambda_is_not_reported() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    fx.lambda_statement(body, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert!(diagnostics.is_empty(), "lambda bodies run later: {diagnostics:?}");
}

#[test]
fn test_helper_method_is_not_followed() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    let helper = fx.graph.add_method(part, "Initialize");
    let helper_body = fx.body(helper);
    fx.call_statement(helper_body, fx.assert_ui);
    fx.call_statement(body, helper);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert!(diagnostics.is_empty(), "helpers are not analyzed: {diagnostics:?}");
}

#[test]
fn test_only_first_hit_is_reported() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    let first = fx.call_statement(body, fx.assert_ui);
    fx.call_statement(body, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(first));
}

#[test]
fn test_nested_call_found_in_preorder() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    // Log(AssertUi()) : the outer call is safe, the argument is not.
    let outer = fx.call_statement(body, fx.log);
    let argument = fx.node(outer, NodeKind::Argument);
    let inner = fx.call(argument, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(inner));
}

#[test]
fn test_exempt_rule_skips_to_next_candidate() {
    let mut fx = Fixture::new();
    let ui = fx.class("NS.Ui", None);
    let check_access = fx.graph.add_method(ui, "CheckAccess");
    let show = fx.graph.add_method(ui, "Show");
    let (part, body) = part_with_importing_ctor(&mut fx);
    fx.call_statement(body, check_access);
    let call = fx.call_statement(body, show);

    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::wildcard("NS.Ui"),
        TypeMatchSpec::exact("NS.Ui", "CheckAccess").inverted(),
    ]);
    let diagnostics = walk(&fx, &catalog, part);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(call));
    assert_eq!(diagnostics[0].matched_rule.rule, "[NS.Ui]::*");
}

#[test]
fn test_unresolved_and_ambiguous_symbols_continue() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    let statement = fx.node(body, NodeKind::ExpressionStatement);
    fx.node(statement, NodeKind::Invocation);
    let ambiguous = fx.node(body, NodeKind::MemberAccess);
    fx.graph.mark_ambiguous(ambiguous);
    let dangling = fx.node(body, NodeKind::Invocation);
    fx.graph.bind_symbol(dangling, MemberId::new(10_000));
    let call = fx.call_statement(body, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(call));
}

#[test]
fn test_member_access_and_object_creation_are_checked() {
    let mut fx = Fixture::new();
    let app = fx.class("NS.App", None);
    let current = fx.graph.add_property(app, "Current");
    let window = fx.class("NS.Window", None);
    let window_ctor = fx.graph.add_constructor(window, 0);

    let part = fx.exported_class("NS.Part");
    let field = fx.graph.add_field(part, "_window");
    let span = fx.next_span();
    let creation = fx.graph.add_node(NodeKind::ObjectCreation, span);
    fx.graph.bind_symbol(creation, window_ctor);
    fx.graph.set_body(field, creation);
    let ctor = fx.graph.add_constructor(part, 0);
    let body = fx.body(ctor);
    let statement = fx.node(body, NodeKind::LocalDeclaration);
    let access = fx.node(statement, NodeKind::MemberAccess);
    fx.graph.bind_symbol(access, current);

    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::exact("NS.App", "Current"),
        TypeMatchSpec::wildcard("NS.Window"),
    ]);
    let diagnostics = walk(&fx, &catalog, part);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].node_kind, NodeKind::ObjectCreation);
    assert_eq!(diagnostics[0].matched_rule.member, ".ctor");
    assert_eq!(diagnostics[1].node_kind, NodeKind::MemberAccess);
    assert_eq!(diagnostics[1].span, fx.span_of(access));
}

#[test]
fn test_fire_and_forget_call_is_reported() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    // `_ = AssertUi();` discards a task result but still runs synchronously.
    let statement = fx.node(body, NodeKind::ExpressionStatement);
    let assignment = fx.node(statement, NodeKind::Assignment);
    let call = fx.call(assignment, fx.assert_ui);

    let diagnostics = walk(&fx, &Fixture::catalog(), part);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(call));
}

#[test]
fn test_cancelled_before_walk() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    fx.call_statement(body, fx.assert_ui);

    let catalog = Fixture::catalog();
    let walker = ReachabilityWalker::new(&fx.graph, &catalog);
    let token = CancellationToken::new();
    token.cancel();
    let entries = entry_points(&fx, part);
    let result = walker.walk(&entries[0], &DiagnosticDescriptor::default(), &token);
    assert_eq!(result, Err(AnalysisError::Cancelled));
}

#[test]
fn test_cancellation_mid_walk_discards_partial_results() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    for _ in 0..5 {
        fx.call_statement(body, fx.log);
    }
    fx.call_statement(body, fx.assert_ui);

    let catalog = Fixture::catalog();
    let walker = ReachabilityWalker::new(&fx.graph, &catalog);
    let entries = entry_points(&fx, part);
    // Start check + block + three statements, then the signal fires.
    let cancel = CancelAfter::new(5);
    let result = walker.walk(&entries[0], &DiagnosticDescriptor::default(), &cancel);
    assert_eq!(result, Err(AnalysisError::Cancelled));
}

#[test]
fn test_walk_budget_is_an_internal_error() {
    let mut fx = Fixture::new();
    let (part, body) = part_with_importing_ctor(&mut fx);
    for _ in 0..10 {
        fx.call_statement(body, fx.log);
    }

    let catalog = Fixture::catalog();
    let walker = ReachabilityWalker::new(&fx.graph, &catalog).with_max_nodes(5);
    let entries = entry_points(&fx, part);
    let err = walker
        .walk(&entries[0], &DiagnosticDescriptor::default(), &NeverCancelled)
        .unwrap_err();
    match err {
        AnalysisError::Internal { declaration, node_kind, message, .. } => {
            assert!(declaration.contains("NS.Part"), "{declaration}");
            assert!(!node_kind.is_empty());
            assert!(message.contains("exceeded"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_namespace_rule_decides_hit() {
    let mut fx = Fixture::new();
    let nested = fx.class("NS.Inner.Worker", None);
    let run = fx.graph.add_method(nested, "Run");
    let (part, body) = part_with_importing_ctor(&mut fx);
    fx.call_statement(body, run);
    fx.call_statement(body, fx.log);
    let call = fx.call_statement(body, fx.assert_ui);

    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::new("NS.*", None, false, false).unwrap(),
        TypeMatchSpec::exact("NS.Safe", "Log").inverted(),
    ]);
    let diagnostics = walk(&fx, &catalog, part);

    // `NS.Inner.Worker` is outside `NS` itself; `Log` is exempted exactly.
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, fx.span_of(call));
    assert_eq!(diagnostics[0].matched_rule.rule, "[NS.*]");
    assert_eq!(diagnostics[0].matched_rule.type_name, QualifiedName::parse("NS.Helper"));
}
