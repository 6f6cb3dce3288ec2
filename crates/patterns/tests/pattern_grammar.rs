//! Integration tests for the path pattern grammar.
//!
//! These tests verify how pattern text is split into nodes and how each
//! token kind behaves when matched against real paths.

use patterns::{Matcher, Node, Pattern, PatternError};

// ============================================================================
// Single-segment Wildcards
// ============================================================================

/// `*` matches within one segment, including the empty string.
#[test]
fn star_matches_one_segment() {
    let matcher = Matcher::new("/src/*/en-US/*.dtd");
    assert!(matcher.is_match("/src/browser/en-US/menu.dtd").unwrap());
    assert!(matcher.is_match("/src//en-US/.dtd").unwrap());
    assert!(!matcher.is_match("/src/a/b/en-US/menu.dtd").unwrap());
}

/// Regex metacharacters in literal text are matched literally.
#[test]
fn literal_text_is_escaped() {
    let matcher = Matcher::new("/a+b/(c)/[d].ftl");
    assert!(matcher.is_match("/a+b/(c)/[d].ftl").unwrap());
    assert!(!matcher.is_match("/aab/c/d.ftl").unwrap());
    assert!(!matcher.is_match("/a+b/(c)/[d]xftl").unwrap());
}

// ============================================================================
// Multi-segment Wildcards
// ============================================================================

/// `**/` matches any number of whole segments, including none.
#[test]
fn starstar_spans_segments() {
    let matcher = Matcher::new("/l10n/**/menu.ftl");
    assert!(matcher.is_match("/l10n/menu.ftl").unwrap());
    assert!(matcher.is_match("/l10n/a/menu.ftl").unwrap());
    assert!(matcher.is_match("/l10n/a/b/c/menu.ftl").unwrap());
    assert!(!matcher.is_match("/l10n/amenu.ftl").unwrap());
}

/// A trailing `**` matches everything below the directory.
#[test]
fn trailing_starstar_matches_subtree() {
    let matcher = Matcher::new("/l10n/**");
    assert!(matcher.is_match("/l10n/").unwrap());
    assert!(matcher.is_match("/l10n/a/b.ftl").unwrap());
    assert!(!matcher.is_match("/l10n").unwrap());
}

/// `**` that is not a whole segment degrades to two single stars.
#[test]
fn embedded_starstar_stays_in_segment() {
    let matcher = Matcher::new("/l10n/a**");
    assert!(matcher.is_match("/l10n/abc").unwrap());
    assert!(!matcher.is_match("/l10n/a/b").unwrap());
    assert!(matches!(matcher.pattern().nodes()[1], Node::Star(1)));
    assert!(matches!(matcher.pattern().nodes()[2], Node::Star(2)));
}

/// Wildcard captures are bound as `s1`, `s2`, … in order.
#[test]
fn wildcards_are_numbered() {
    let matcher = Matcher::new("/*/x/**/*.ftl");
    let captured = matcher.captures("/a/x/b/c/d.ftl").unwrap().unwrap();
    assert_eq!(captured.get("s1"), Some("a"));
    assert_eq!(captured.get("s2"), Some("b/c/"));
    assert_eq!(captured.get("s3"), Some("d"));
}

// ============================================================================
// Variables
// ============================================================================

/// Unbound variables match lazily and are captured by name.
#[test]
fn unbound_variables_capture() {
    let matcher = Matcher::new("/l10n/{ locale }/{component}/**");
    let captured = matcher.captures("/l10n/de/browser/a/b.ftl").unwrap().unwrap();
    assert_eq!(captured.get("locale"), Some("de"));
    assert_eq!(captured.get("component"), Some("browser"));
    assert_eq!(captured.get("s1"), Some("a/b.ftl"));
}

/// Repeated variables must capture the same text each time.
#[test]
fn repeated_variables_backreference() {
    let matcher = Matcher::new("/{locale}/{locale}.ftl");
    assert!(matcher.is_match("/fr/fr.ftl").unwrap());
    assert!(!matcher.is_match("/fr/de.ftl").unwrap());
}

/// Malformed variable tokens are plain text.
#[test]
fn malformed_variables_are_literal() {
    let matcher = Matcher::new("/a/{not valid}/{}/b");
    assert!(matcher.is_match("/a/{not valid}/{}/b").unwrap());
    assert_eq!(matcher.pattern().variables().count(), 0);
}

/// A variable named like a wildcard binding cannot be captured.
#[test]
fn variable_may_not_shadow_a_wildcard() {
    let matcher = Matcher::new("{s1}/*");
    assert_eq!(
        matcher.captures("a/b"),
        Err(PatternError::DuplicateBinding("s1".to_owned()))
    );
    let matcher = Matcher::new("*/{s2}/**");
    assert_eq!(
        matcher.is_match("a/b/c"),
        Err(PatternError::DuplicateBinding("s2".to_owned()))
    );
}

/// Variable names may start with a digit.
#[test]
fn numeric_variable_names() {
    let matcher = Matcher::new("/{0}/x").with_env([("0", "zero")]);
    assert!(matcher.is_match("/zero/x").unwrap());
}

// ============================================================================
// Prefixes
// ============================================================================

/// The prefix length is fixed by the first wildcard only.
#[test]
fn prefix_length_counts_nodes_before_first_wildcard() {
    assert_eq!(Pattern::parse("/a/{b}/c").prefix_length(), 3);
    assert_eq!(Pattern::parse("/a/{b}/c").len(), 3);
    assert_eq!(Pattern::parse("/a/{b}/*/c/**").prefix_length(), 3);
    assert_eq!(Pattern::parse("**").prefix_length(), 0);
}

/// The prefix is the expansion up to the first wildcard.
#[test]
fn prefix_stops_at_wildcard_or_unbound_variable() {
    let matcher = Matcher::new("/l10n/{locale}/browser/**");
    assert_eq!(matcher.prefix(), "/l10n/");
    assert_eq!(
        matcher.with_env([("locale", "ja")]).prefix(),
        "/l10n/ja/browser/"
    );
}
