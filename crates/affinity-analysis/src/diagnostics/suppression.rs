//! Disabled regions keyed by rule id.
//!
//! Regions come from inline directives in source text or are supplied by
//! the host (for example from suppression attributes it has resolved).
//!
//! Supported directives:
//! - `// affinity-ignore` suppresses every rule on this line and the next
//! - `// affinity-ignore AFF001, AFF002 -- reason` suppresses the listed rules
//! - `#pragma warning disable AFF001` ... `#pragma warning restore AFF001`
//!   suppresses a region; a region left open runs to the end of the file

use affinity_core::types::FxHashMap;

use crate::model::Span;

const IGNORE_MARKER: &str = "affinity-ignore";
const PRAGMA_DISABLE: &str = "#pragma warning disable";
const PRAGMA_RESTORE: &str = "#pragma warning restore";

/// An inclusive line range in which some or all rules are disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionRegion {
    pub start_line: u32,
    pub end_line: u32,
    /// Empty means every rule.
    pub rule_ids: Vec<String>,
}

impl SuppressionRegion {
    pub fn new(start_line: u32, end_line: u32, rule_ids: Vec<String>) -> Self {
        Self {
            start_line,
            end_line,
            rule_ids,
        }
    }

    pub fn covers(&self, line: u32, rule_id: &str) -> bool {
        line >= self.start_line
            && line <= self.end_line
            && (self.rule_ids.is_empty() || self.rule_ids.iter().any(|r| r == rule_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuppressionIndex {
    regions: FxHashMap<String, Vec<SuppressionRegion>>,
}

impl SuppressionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, file: &str, region: SuppressionRegion) {
        self.regions.entry(file.to_string()).or_default().push(region);
    }

    /// Disable `rule_ids` (all rules when empty) over the lines of `span`.
    pub fn suppress_span(&mut self, span: &Span, rule_ids: &[&str]) {
        let region = SuppressionRegion::new(
            span.start_line,
            span.end_line.max(span.start_line),
            rule_ids.iter().map(|r| r.to_string()).collect(),
        );
        self.add_region(&span.file, region);
    }

    /// Parse every directive in `text` and record its regions under `file`.
    pub fn add_source(&mut self, file: &str, text: &str) {
        let regions = parse_directives(text);
        if !regions.is_empty() {
            tracing::debug!(file, regions = regions.len(), "suppression directives found");
            self.regions.entry(file.to_string()).or_default().extend(regions);
        }
    }

    pub fn is_suppressed(&self, span: &Span, rule_id: &str) -> bool {
        self.regions
            .get(&span.file)
            .is_some_and(|regions| regions.iter().any(|r| r.covers(span.start_line, rule_id)))
    }

    pub fn regions(&self, file: &str) -> &[SuppressionRegion] {
        self.regions.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.regions.values().all(Vec::is_empty)
    }
}

fn parse_directives(text: &str) -> Vec<SuppressionRegion> {
    let mut regions = Vec::new();
    // Open pragma regions: per rule, plus one for "all rules".
    let mut open: FxHashMap<String, u32> = FxHashMap::default();
    let mut open_all: Option<u32> = None;

    for (i, line) in text.lines().enumerate() {
        let line_num = i as u32 + 1;
        let trimmed = line.trim();

        if let Some(rest) = pragma_args(trimmed, PRAGMA_DISABLE) {
            let rules = split_rule_ids(strip_trailing_comment(rest));
            if rules.is_empty() {
                open_all.get_or_insert(line_num);
            }
            for rule in rules {
                open.entry(rule).or_insert(line_num);
            }
            continue;
        }

        if let Some(rest) = pragma_args(trimmed, PRAGMA_RESTORE) {
            let rules = split_rule_ids(strip_trailing_comment(rest));
            if rules.is_empty() {
                if let Some(start) = open_all.take() {
                    regions.push(SuppressionRegion::new(start, line_num, Vec::new()));
                }
                let mut closed: Vec<(String, u32)> = open.drain().collect();
                closed.sort();
                for (rule, start) in closed {
                    regions.push(SuppressionRegion::new(start, line_num, vec![rule]));
                }
            }
            for rule in rules {
                if let Some(start) = open.remove(&rule) {
                    regions.push(SuppressionRegion::new(start, line_num, vec![rule]));
                }
            }
            continue;
        }

        if let Some(rules) = parse_ignore(trimmed) {
            regions.push(SuppressionRegion::new(line_num, line_num.saturating_add(1), rules));
        }
    }

    if let Some(start) = open_all {
        regions.push(SuppressionRegion::new(start, u32::MAX, Vec::new()));
    }
    let mut unclosed: Vec<(String, u32)> = open.into_iter().collect();
    unclosed.sort();
    for (rule, start) in unclosed {
        regions.push(SuppressionRegion::new(start, u32::MAX, vec![rule]));
    }
    regions
}

/// `Some(rules)` when the line carries an `affinity-ignore` comment.
fn parse_ignore(trimmed: &str) -> Option<Vec<String>> {
    let pos = trimmed.find(IGNORE_MARKER)?;
    let before = &trimmed[..pos];
    if !before.contains("//") && !before.contains("/*") {
        return None;
    }
    let after = &trimmed[pos + IGNORE_MARKER.len()..];
    // `affinity-ignored`, `affinity-ignore_x`: not the directive.
    let glued = after.starts_with(|c: char| c.is_alphanumeric() || c == '_')
        || (after.starts_with('-') && !after.starts_with("--"));
    if glued {
        return None;
    }
    let after = after.split("--").next().unwrap_or("");
    let after = after.trim().trim_end_matches("*/");
    Some(split_rule_ids(after))
}

/// Text after `directive`, which must end at whitespace or the end of
/// the line (`disableFoo` is not `disable`).
fn pragma_args<'t>(trimmed: &'t str, directive: &str) -> Option<&'t str> {
    let rest = trimmed.strip_prefix(directive)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn strip_trailing_comment(rest: &str) -> &str {
    rest.split("//").next().unwrap_or("")
}

fn split_rule_ids(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
