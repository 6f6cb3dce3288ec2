//! Integration tests for deserializing project declarations.
//!
//! Configuration loaders read `[[paths]]` and `[[filters]]` tables into the
//! declaration types and hand them to [`filters::ProjectConfig`].

#![cfg(feature = "serde")]

use filters::{FilterAction, OneOrMany, PathDeclaration, ProjectConfig, RuleDeclaration};

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn path_declaration_reads_optional_fields() {
    let declaration: PathDeclaration = serde_json::from_str(
        r#"{
            "l10n": "{l10n_base}/{locale}/browser/**",
            "reference": "browser/locales/en-US/**",
            "locales": ["de", "fr"],
            "test": ["android-dtd"],
            "module": "browser"
        }"#,
    )
    .unwrap();

    assert_eq!(
        declaration,
        PathDeclaration::new("{l10n_base}/{locale}/browser/**")
            .with_reference("browser/locales/en-US/**")
            .with_locales(["de", "fr"])
            .with_tests(["android-dtd"])
            .with_module("browser")
    );
}

#[test]
fn path_declaration_needs_only_l10n() {
    let declaration: PathDeclaration =
        serde_json::from_str(r#"{ "l10n": "/l10n/{locale}/*" }"#).unwrap();
    assert_eq!(declaration, PathDeclaration::new("/l10n/{locale}/*"));
}

#[test]
fn rule_declaration_accepts_single_values() {
    let declaration: RuleDeclaration = serde_json::from_str(
        r#"{ "path": "/l10n/{locale}/a.ftl", "action": "ignore", "key": "re:menu-" }"#,
    )
    .unwrap();

    assert_eq!(declaration.action, FilterAction::Ignore);
    assert_eq!(declaration.path, OneOrMany::One("/l10n/{locale}/a.ftl".to_owned()));
    assert_eq!(declaration.key, Some(OneOrMany::One("re:menu-".to_owned())));
}

#[test]
fn rule_declaration_accepts_lists() {
    let declaration: RuleDeclaration = serde_json::from_str(
        r#"{ "path": ["/a", "/b"], "action": "warning" }"#,
    )
    .unwrap();

    assert_eq!(declaration, RuleDeclaration::new(["/a", "/b"], FilterAction::Warning));
}

#[test]
fn unknown_action_is_rejected() {
    let result = serde_json::from_str::<RuleDeclaration>(r#"{ "path": "/a", "action": "skip" }"#);
    assert!(result.is_err());
}

#[test]
fn action_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&FilterAction::Warning).unwrap(), r#""warning""#);
}

// ============================================================================
// Loading
// ============================================================================

/// A deserialized project answers queries like a hand-built one.
#[test]
fn declarations_build_a_project() {
    let paths: Vec<PathDeclaration> = serde_json::from_str(
        r#"[{ "l10n": "/l10n/{locale}/browser/**", "locales": ["de"] }]"#,
    )
    .unwrap();
    let rules: Vec<RuleDeclaration> = serde_json::from_str(
        r#"[
            { "path": "/l10n/{locale}/browser/**", "action": "warning" },
            { "path": "/l10n/{locale}/browser/a.ftl", "action": "ignore", "key": ["x", "y"] }
        ]"#,
    )
    .unwrap();

    let mut config = ProjectConfig::new("/src/l10n.toml");
    config.add_paths(paths).unwrap();
    config.add_rules(rules).unwrap();

    assert_eq!(config.all_locales(), ["de"]);
    assert_eq!(config.rules().len(), 3);
    let path = "/l10n/de/browser/a.ftl";
    assert_eq!(config.filter("de", path, None).unwrap(), FilterAction::Warning);
    assert_eq!(config.filter("de", path, Some("y")).unwrap(), FilterAction::Ignore);
    assert_eq!(config.filter("de", path, Some("z")).unwrap(), FilterAction::Warning);
}
