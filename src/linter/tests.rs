#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the directive linter

use crate::classify::TagClassifier;
use crate::linter::{fail_if_errors, lint_file, lint_universe, LintIssue, LintSeverity};
use crate::universe::{Declaration, Member, Package, TypeRef, Universe};
use std::io::Write;
use tempfile::NamedTempFile;

const CORE_V1: &str = "example.com/apis/core/v1";
const CORE_V2: &str = "example.com/apis/core/v2";

fn lint(packages: Vec<Package>) -> Vec<LintIssue> {
    lint_universe(&Universe::new(packages), &TagClassifier)
}

fn package(path: &str, types: Vec<Declaration>) -> Package {
    let mut p = Package::new(path);
    p.types = types;
    p
}

fn of_kind<'a>(issues: &'a [LintIssue], kind: &str) -> Vec<&'a LintIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn test_clean_universe_has_no_issues() {
    let issues = lint(vec![package(
        CORE_V1,
        vec![Declaration::new("", "Widget")
            .with_comment("+resource=path=widgets,strategy=WidgetStrategy")
            .with_comment("+subresource=request=ScaleRequest,path=widgets/scale")
            .with_member(Member::new("Spec", TypeRef::named(CORE_V1, "WidgetSpec")))],
    )]);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_lint_malformed_resource_directive() {
    let issues = lint(vec![package(
        CORE_V1,
        vec![Declaration::new("", "Widget").with_comment("+resource=path")],
    )]);
    let malformed = of_kind(&issues, "malformed_directive");
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].severity, LintSeverity::Error);
    assert_eq!(malformed[0].location, "type:example.com/apis/core/v1.Widget");
    assert!(malformed[0].message.contains("Got string: [path]"));
}

#[test]
fn test_lint_missing_directive_values() {
    let issues = lint(vec![package(
        "example.com/repo/pkg/controller/widget",
        vec![Declaration::new("", "WidgetController").with_comment("+controller")],
    )]);
    let missing = of_kind(&issues, "missing_directive");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, LintSeverity::Error);
    assert!(missing[0].suggestion.is_some(), "Should provide suggestion");
}

#[test]
fn test_lint_duplicate_subresource_path() {
    let issues = lint(vec![package(
        CORE_V1,
        vec![Declaration::new("", "Widget")
            .with_comment("+resource=path=widgets")
            .with_comment("+subresource=request=A,path=widgets/scale")
            .with_comment("+subresource=request=B,path=scale")],
    )]);
    let dup = of_kind(&issues, "duplicate_subresource");
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].severity, LintSeverity::Error);
    assert!(dup[0].message.contains("'scale'"));
}

#[test]
fn test_lint_duplicate_resource_is_warning() {
    let issues = lint(vec![
        package(
            CORE_V1,
            vec![Declaration::new("", "Widget").with_comment("+resource=path=widgets")],
        ),
        package(
            CORE_V1,
            vec![Declaration::new("", "Widget").with_comment("+resource=path=gadgets")],
        ),
    ]);
    let dup = of_kind(&issues, "duplicate_resource");
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].severity, LintSeverity::Warning);
    assert_eq!(dup[0].location, "resource:core/v1/Widget");
}

#[test]
fn test_lint_multi_version_kind_and_bare_name_collision() {
    let issues = lint(vec![
        package(
            CORE_V1,
            vec![
                Declaration::new("", "Widget").with_comment("+resource=path=widgets"),
                Declaration::new("", "WidgetSpec"),
            ],
        ),
        package(
            CORE_V2,
            vec![
                Declaration::new("", "Widget").with_comment("+resource=path=widgets"),
                Declaration::new("", "WidgetSpec"),
            ],
        ),
    ]);

    let multi = of_kind(&issues, "multi_version_kind");
    assert_eq!(multi.len(), 1);
    assert_eq!(multi[0].severity, LintSeverity::Info);
    assert!(multi[0].message.contains("v1, v2"));

    let collisions = of_kind(&issues, "bare_name_collision");
    // Widget and WidgetSpec both exist in v1 and v2
    assert_eq!(collisions.len(), 2);
    assert!(collisions.iter().all(|i| i.severity == LintSeverity::Warning));
}

#[test]
fn test_lint_unknown_keys_and_resource_path() {
    let issues = lint(vec![package(
        CORE_V1,
        vec![Declaration::new("", "Widget").with_comment("+resource=path=Widgets_All,shortname=w")],
    )]);

    let unknown = of_kind(&issues, "unknown_directive_key");
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].severity, LintSeverity::Info);
    assert!(unknown[0].message.contains("'shortname'"));

    let path = of_kind(&issues, "resource_path");
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].severity, LintSeverity::Warning);
}

#[test]
fn test_fail_if_errors() {
    let warning = LintIssue::new("group:core", LintSeverity::Warning, "x", "y");
    assert!(fail_if_errors(&[warning.clone()]).is_ok());

    let error = LintIssue::new("group:core", LintSeverity::Error, "x", "y");
    let err = fail_if_errors(&[warning, error]).unwrap_err();
    assert!(err.to_string().contains("1 error"));
}

#[test]
fn test_lint_file_yaml() {
    let mut temp = NamedTempFile::with_suffix(".yaml").expect("create temp file");
    temp.write_all(
        br#"
packages:
  - path: example.com/apis/core/v1
    types:
      - name: Widget
        comments:
          - "+resource=path"
"#,
    )
    .expect("write universe");
    temp.flush().expect("flush");

    let issues = lint_file(temp.path()).expect("lint file");
    assert_eq!(of_kind(&issues, "malformed_directive").len(), 1);
}
