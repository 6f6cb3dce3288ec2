//! Declaration shapes consumed by [`ProjectConfig`](crate::ProjectConfig).
//!
//! Configuration loaders produce these from TOML or JSON; with the `serde`
//! feature enabled they deserialize directly.

use std::collections::BTreeSet;

use crate::FilterAction;

/// A value declared either once or as a list.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// A list of values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Iterates over the declared values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// A `[[paths]]` entry.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PathDeclaration {
    /// Pattern of the localized files.
    pub l10n: String,
    /// Pattern of the reference files.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference: Option<String>,
    /// Locales the entry is restricted to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locales: Option<Vec<String>>,
    /// Additional checks enabled for matching files.
    #[cfg_attr(feature = "serde", serde(default))]
    pub test: Option<BTreeSet<String>>,
    /// Source module the files belong to, for module-aware checks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub module: Option<String>,
}

impl PathDeclaration {
    /// Declares localized files matching `l10n`.
    #[must_use]
    pub fn new(l10n: impl Into<String>) -> Self {
        Self {
            l10n: l10n.into(),
            reference: None,
            locales: None,
            test: None,
            module: None,
        }
    }

    /// Sets the reference pattern.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Restricts the entry to `locales`.
    #[must_use]
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    /// Enables named checks.
    #[must_use]
    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test = Some(tests.into_iter().map(Into::into).collect());
        self
    }

    /// Names the source module.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// A `[[filters]]` entry.
///
/// List-valued `path` and `key` expand into one rule per combination, paths
/// first.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RuleDeclaration {
    /// Path pattern or patterns.
    pub path: OneOrMany<String>,
    /// Action taken when the rule applies.
    pub action: FilterAction,
    /// Entity key or keys.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<OneOrMany<String>>,
}

impl RuleDeclaration {
    /// Declares a whole-file rule.
    #[must_use]
    pub fn new(path: impl Into<OneOrMany<String>>, action: FilterAction) -> Self {
        Self {
            path: path.into(),
            action,
            key: None,
        }
    }

    /// Restricts the rule to entity keys.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<OneOrMany<String>>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_or_many_iterates_values() {
        let one = OneOrMany::<String>::from("a");
        assert_eq!(one.iter().collect::<Vec<_>>(), ["a"]);
        let many = OneOrMany::<String>::from(["a", "b"]);
        assert_eq!(many.iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn builders_fill_optional_fields() {
        let paths = PathDeclaration::new("{l}/*")
            .with_reference("en/*")
            .with_locales(["de"])
            .with_tests(["android-dtd"])
            .with_module("browser");
        assert_eq!(paths.reference.as_deref(), Some("en/*"));
        assert_eq!(paths.module.as_deref(), Some("browser"));
        assert_eq!(paths.locales, Some(vec!["de".to_owned()]));
        assert!(paths.test.is_some_and(|tests| tests.contains("android-dtd")));

        let rule = RuleDeclaration::new(["a", "b"], FilterAction::Ignore).with_key("k");
        assert_eq!(rule.key, Some(OneOrMany::One("k".to_owned())));
    }
}
