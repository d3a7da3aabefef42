//! # Directive Linter
//!
//! Checks an annotated universe for problems before the model is built. The
//! builder stops at the first bad directive; the linter keeps going and
//! reports everything it finds, including conditions the builder accepts
//! silently.
//!
//! ## Checks Performed
//!
//! 1. **Malformed directives** - every comma element must be one `key=value`
//! 2. **Missing directives** - `+resource` / `+controller` markers without a value
//! 3. **Duplicate subresources** - two `+subresource` paths on one resource
//! 4. **Duplicate resources** - one group/version/kind declared twice
//! 5. **Bare-name collisions** - one type name declared in several packages of a group
//! 6. **Multi-version kinds** - the unversioned view keeps only one of them
//! 7. **Unknown keys** - directive keys nothing reads
//! 8. **Resource paths** - plurals should be DNS-1123 labels
//!
//! ## Usage
//!
//! ```rust,no_run
//! use apiregister::linter::{lint_file, print_lint_issues};
//! use std::path::Path;
//!
//! let issues = lint_file(Path::new("universe.yaml"))?;
//! print_lint_issues(&issues);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::classify::{Classifier, TagClassifier};
use crate::error::Directive;
use crate::tags::{parse_controller_tag, parse_resource_tag, parse_subresource_tag, unknown_keys};
use crate::universe::{load_universe, Declaration, Universe};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

#[cfg(test)]
mod tests;

#[allow(clippy::expect_used)]
static DNS_1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid DNS-1123 regex"));

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - the model build will fail
    Error,
    /// Warning - the build succeeds but drops or merges declarations
    Warning,
    /// Info - worth knowing, nothing is lost
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a universe
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g. "type:example.com/apis/core/v1.Widget", "group:core")
    pub location: String,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g. "malformed_directive", "duplicate_resource")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn type_location(decl: &Declaration) -> String {
    format!("type:{}", decl.type_name())
}

/// Lint a universe snapshot file (YAML or JSON) with the default classifier.
pub fn lint_file(universe_path: &Path) -> anyhow::Result<Vec<LintIssue>> {
    let universe = load_universe(universe_path)?;
    Ok(lint_universe(&universe, &TagClassifier))
}

/// Lint every declaration of `universe`.
pub fn lint_universe<C: Classifier>(universe: &Universe, classifier: &C) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    // (group, version, kind) -> declarations
    let mut resources: BTreeMap<(String, String, String), Vec<String>> = BTreeMap::new();
    // group -> bare name -> packages
    let mut names: BTreeMap<String, BTreeMap<&str, BTreeSet<&str>>> = BTreeMap::new();

    for decl in universe.declarations() {
        let type_name = decl.type_name();
        let group = classifier.group(&type_name);
        names
            .entry(group.clone())
            .or_default()
            .entry(decl.name.as_str())
            .or_default()
            .insert(decl.package.as_str());

        if classifier.is_api_resource(decl) {
            let parent = lint_resource(decl, &mut issues);
            if classifier.has_subresource(decl) {
                lint_subresources(decl, parent.as_deref().unwrap_or_default(), &mut issues);
            }
            let version = classifier.version(&type_name, &group);
            let kind = classifier.kind(&type_name, &group);
            resources
                .entry((group, version, kind))
                .or_default()
                .push(type_name.to_string());
        }

        if classifier.is_controller(decl) {
            lint_controller(decl, &mut issues);
        }
    }

    let resource_groups: BTreeSet<&str> = resources.keys().map(|(g, _, _)| g.as_str()).collect();
    let mut versions_by_kind: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();

    for ((group, version, kind), declared) in &resources {
        versions_by_kind
            .entry((group.as_str(), kind.as_str()))
            .or_default()
            .push(version.as_str());
        if declared.len() > 1 {
            issues.push(
                LintIssue::new(
                    format!("resource:{group}/{version}/{kind}"),
                    LintSeverity::Warning,
                    "duplicate_resource",
                    format!(
                        "Kind declared {} times ({}); only the last declaration is kept",
                        declared.len(),
                        declared.join(", ")
                    ),
                )
                .with_suggestion("Remove or rename all but one declaration"),
            );
        }
    }

    for ((group, kind), versions) in versions_by_kind {
        if versions.len() > 1 {
            issues.push(LintIssue::new(
                format!("group:{group}"),
                LintSeverity::Info,
                "multi_version_kind",
                format!(
                    "Kind '{kind}' exists in versions {}; the unversioned view uses {}",
                    versions.join(", "),
                    versions.last().copied().unwrap_or_default()
                ),
            ));
        }
    }

    for (group, by_name) in &names {
        if !resource_groups.contains(group.as_str()) {
            continue;
        }
        for (name, packages) in by_name {
            if packages.len() > 1 {
                issues.push(
                    LintIssue::new(
                        format!("group:{group}"),
                        LintSeverity::Warning,
                        "bare_name_collision",
                        format!(
                            "Type '{name}' is declared in {}; only one is flattened for the group",
                            packages.iter().copied().collect::<Vec<_>>().join(", ")
                        ),
                    )
                    .with_suggestion("Give the types distinct names"),
                );
            }
        }
    }

    issues
}

/// Returns the plural when the `+resource` value parses.
fn lint_resource(decl: &Declaration, issues: &mut Vec<LintIssue>) -> Option<String> {
    let Some(tag) = decl
        .comments()
        .get_tag(Directive::Resource.tag(), "=")
        .filter(|t| !t.is_empty())
    else {
        issues.push(
            LintIssue::new(
                type_location(decl),
                LintSeverity::Error,
                "missing_directive",
                format!("Type has a {} marker without a value", Directive::Resource),
            )
            .with_suggestion(format!("+resource={}", Directive::Resource.expected_keys())),
        );
        return None;
    };

    let tags = match parse_resource_tag(tag) {
        Ok(tags) => tags,
        Err(e) => {
            issues.push(LintIssue::new(
                type_location(decl),
                LintSeverity::Error,
                "malformed_directive",
                e.to_string(),
            ));
            return None;
        }
    };
    lint_unknown_keys(decl, Directive::Resource, tag, issues);

    if !DNS_1123_LABEL.is_match(&tags.resource) {
        issues.push(
            LintIssue::new(
                type_location(decl),
                LintSeverity::Warning,
                "resource_path",
                format!("Resource path '{}' is not a DNS-1123 label", tags.resource),
            )
            .with_suggestion(format!("path={}", decl.name.to_lowercase() + "s")),
        );
    }
    Some(tags.resource)
}

fn lint_subresources(decl: &Declaration, parent: &str, issues: &mut Vec<LintIssue>) {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for raw in decl.comments().get_tags(Directive::Subresource.tag(), "=") {
        let tags = match parse_subresource_tag(parent, raw) {
            Ok(tags) => tags,
            Err(e) => {
                issues.push(LintIssue::new(
                    type_location(decl),
                    LintSeverity::Error,
                    "malformed_directive",
                    e.to_string(),
                ));
                continue;
            }
        };
        lint_unknown_keys(decl, Directive::Subresource, raw, issues);

        if let Some(existing) = seen.get(&tags.path) {
            issues.push(LintIssue::new(
                type_location(decl),
                LintSeverity::Error,
                "duplicate_subresource",
                format!(
                    "Subresource path '{}' declared twice: [{existing}] and [{raw}]",
                    tags.path
                ),
            ));
        } else {
            seen.insert(tags.path, raw);
        }
    }
}

fn lint_controller(decl: &Declaration, issues: &mut Vec<LintIssue>) {
    let Some(tag) = decl
        .comments()
        .get_tag(Directive::Controller.tag(), "=")
        .filter(|t| !t.is_empty())
    else {
        issues.push(
            LintIssue::new(
                type_location(decl),
                LintSeverity::Error,
                "missing_directive",
                format!("Type has a {} marker without a value", Directive::Controller),
            )
            .with_suggestion(format!("+controller={}", Directive::Controller.expected_keys())),
        );
        return;
    };
    if let Err(e) = parse_controller_tag(tag) {
        issues.push(LintIssue::new(
            type_location(decl),
            LintSeverity::Error,
            "malformed_directive",
            e.to_string(),
        ));
        return;
    }
    lint_unknown_keys(decl, Directive::Controller, tag, issues);
}

fn lint_unknown_keys(decl: &Declaration, directive: Directive, tag: &str, issues: &mut Vec<LintIssue>) {
    for key in unknown_keys(directive, tag).unwrap_or_default() {
        issues.push(
            LintIssue::new(
                type_location(decl),
                LintSeverity::Info,
                "unknown_directive_key",
                format!("{directive} key '{key}' is ignored"),
            )
            .with_suggestion(format!("Expected keys {}", directive.expected_keys())),
        );
    }
}

/// Print lint issues grouped by severity
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let matching: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if matching.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in matching {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}

/// Fail when any error-level issue is present.
pub fn fail_if_errors(issues: &[LintIssue]) -> anyhow::Result<()> {
    let errors = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("lint found {errors} error(s)");
    }
    Ok(())
}
