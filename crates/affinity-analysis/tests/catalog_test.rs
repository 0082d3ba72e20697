//! Symbol catalog: precedence, rule tables, and loading.

use std::io::Write;

use affinity_analysis::catalog::{RuleTableLoader, TypeMatchSpec};
use affinity_analysis::model::QualifiedName;
use affinity_analysis::SymbolCatalog;
use affinity_core::config::CatalogConfig;
use affinity_core::errors::CatalogError;

fn name(s: &str) -> QualifiedName {
    QualifiedName::parse(s)
}

#[test]
fn test_exact_match_is_unsafe() {
    let catalog = SymbolCatalog::new(vec![TypeMatchSpec::exact("NS.Helper", "AssertUi")]);
    assert!(catalog.lookup(&name("NS.Helper"), "AssertUi"));
    assert!(!catalog.lookup(&name("NS.Helper"), "Other"));
    assert!(!catalog.lookup(&name("NS.Other"), "AssertUi"));
}

#[test]
fn test_inverted_exact_beats_earlier_wildcard() {
    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::wildcard("NS.Ui"),
        TypeMatchSpec::exact("NS.Ui", "CheckAccess").inverted(),
    ]);
    assert!(!catalog.lookup(&name("NS.Ui"), "CheckAccess"));
    assert!(catalog.lookup(&name("NS.Ui"), "Show"));
}

#[test]
fn test_exact_beats_later_inverted_wildcard() {
    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::exact("NS.Ui", "Show"),
        TypeMatchSpec::wildcard("NS.Ui").inverted(),
    ]);
    assert!(catalog.lookup(&name("NS.Ui"), "Show"));
    assert!(!catalog.lookup(&name("NS.Ui"), "Hide"));
}

#[test]
fn test_first_exact_match_decides() {
    let catalog = SymbolCatalog::new(vec![
        TypeMatchSpec::exact("NS.Ui", "Show").inverted(),
        TypeMatchSpec::exact("NS.Ui", "Show"),
    ]);
    let found = catalog.find_match(&name("NS.Ui"), "Show").unwrap();
    assert_eq!(found.index, 0);
    assert!(!catalog.lookup(&name("NS.Ui"), "Show"));
}

#[test]
fn test_no_match_is_presumed_safe() {
    assert!(!SymbolCatalog::empty().lookup(&name("NS.Ui"), "Show"));
    assert!(SymbolCatalog::empty().find_match(&name("NS.Ui"), "Show").is_none());
}

#[test]
fn test_empty_rules_never_match() {
    let inert = TypeMatchSpec::new("", None, true, false).unwrap();
    let catalog = SymbolCatalog::new(vec![inert]);
    assert!(!catalog.lookup(&QualifiedName::default(), ""));
    assert!(!catalog.lookup(&name("NS.Ui"), "Show"));
}

#[test]
fn test_constructor_rules_use_ctor_name() {
    let catalog = SymbolCatalog::new(vec![TypeMatchSpec::exact("NS.Window", ".ctor")]);
    assert!(catalog.lookup(&name("NS.Window"), ".ctor"));
}

#[test]
fn test_malformed_toml_rule_fails_the_build() {
    let err = RuleTableLoader::load_toml(
        "rules.toml",
        r#"
[[rules]]
type = "NS.Ok"
member = "Run"

[[rules]]
type = ""
member = "Run"
"#,
    )
    .unwrap_err();
    match err {
        CatalogError::MalformedRule { index, source_name, reason } => {
            assert_eq!(index, 2);
            assert_eq!(source_name, "rules.toml");
            assert!(reason.contains("empty type pattern"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let err = RuleTableLoader::load_toml("rules.toml", "[[rules]\ntype = ").unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_from_config_appends_file_after_defaults() {
    let mut file = tempfile::Builder::new().suffix(".rules").tempfile().unwrap();
    writeln!(file, "# project rules").unwrap();
    writeln!(file, "[Contoso.Shell.Host]::Activate").unwrap();
    writeln!(file, "![System.Windows.Threading.Dispatcher]::Invoke").unwrap();

    let config = CatalogConfig {
        path: Some(file.path().to_path_buf()),
        include_defaults: None,
    };
    let catalog = SymbolCatalog::from_config(&config).unwrap();
    let builtin = SymbolCatalog::builtin().unwrap();
    assert_eq!(catalog.len(), builtin.len() + 2);
    assert!(catalog.lookup(&name("Contoso.Shell.Host"), "Activate"));
    // Exact inverted rule outranks the built-in dispatcher wildcard.
    assert!(!catalog.lookup(&name("System.Windows.Threading.Dispatcher"), "Invoke"));
}

#[test]
fn test_from_config_without_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        r#"
[[rules]]
type = "Contoso.Ui"
wildcard = true
"#,
    )
    .unwrap();

    let config = CatalogConfig {
        path: Some(path),
        include_defaults: Some(false),
    };
    let catalog = SymbolCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.lookup(&name("Contoso.Ui"), "Anything"));
    assert!(!catalog.lookup(&name("System.Windows.Threading.Dispatcher"), "Invoke"));
    assert!(catalog.rules()[0].origin.source.ends_with("rules.toml"));
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = CatalogConfig {
        path: Some(dir.path().join("absent.rules")),
        include_defaults: Some(false),
    };
    let err = SymbolCatalog::from_config(&config).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_builtin_table_covers_shell_and_dispatcher() {
    let catalog = SymbolCatalog::builtin().unwrap();
    assert!(catalog.lookup(&name("Microsoft.VisualStudio.Shell.ThreadHelper"), "ThrowIfNotOnUIThread"));
    assert!(catalog.lookup(&name("Microsoft.VisualStudio.Shell.Package"), "GetGlobalService"));
    assert!(catalog.lookup(&name("System.Windows.Forms.Control"), "Invoke"));
    assert!(!catalog.lookup(&name("System.Windows.Forms.Control"), "InvokeRequired"));
    assert!(!catalog.lookup(&name("System.Windows.Threading.Dispatcher"), "BeginInvoke"));
    assert!(catalog.rules().iter().all(|r| r.origin.source == "<builtin>"));
}
