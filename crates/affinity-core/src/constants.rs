//! Shared constants for the Affinity analysis engine.

/// Affinity version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stable rule identifier used for diagnostics and suppression.
pub const DEFAULT_RULE_ID: &str = "AFF001";

/// Default diagnostic severity.
pub const DEFAULT_SEVERITY: &str = "warning";

/// Default report format.
pub const DEFAULT_REPORT_FORMAT: &str = "json";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "affinity.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "AFFINITY_LOG";

/// Default number of worker threads (0 = rayon's global pool).
pub const DEFAULT_THREADS: usize = 0;

/// Upper bound on syntax nodes visited per entry point body.
pub const DEFAULT_MAX_WALK_NODES: usize = 100_000;

/// Accepted severity names.
pub const SEVERITIES: [&str; 4] = ["error", "warning", "info", "hint"];

/// Accepted report formats.
pub const REPORT_FORMATS: [&str; 2] = ["json", "sarif"];

// ---- Composition markers ----

/// Namespaces that may declare the composition marker attributes.
pub const DEFAULT_MARKER_NAMESPACES: [&str; 2] =
    ["System.ComponentModel.Composition", "System.Composition"];

/// Attribute that exports a part.
pub const DEFAULT_EXPORT_ATTRIBUTE: &str = "ExportAttribute";

/// Attribute that exports every subclass of the annotated type.
pub const DEFAULT_INHERITED_EXPORT_ATTRIBUTE: &str = "InheritedExportAttribute";

/// Attribute that designates the constructor used for activation.
pub const DEFAULT_IMPORTING_CONSTRUCTOR_ATTRIBUTE: &str = "ImportingConstructorAttribute";

/// Interface whose method is called once imports are satisfied.
pub const DEFAULT_IMPORTS_SATISFIED_INTERFACE: &str = "IPartImportsSatisfiedNotification";

/// Method on the imports-satisfied interface.
pub const DEFAULT_IMPORTS_SATISFIED_MEMBER: &str = "OnImportsSatisfied";

/// Attribute that marks an imports-satisfied method directly.
pub const DEFAULT_IMPORTS_SATISFIED_ATTRIBUTE: &str = "OnImportsSatisfiedAttribute";

/// Member name given to constructors in the declaration graph and catalog.
pub const CONSTRUCTOR_MEMBER_NAME: &str = ".ctor";
