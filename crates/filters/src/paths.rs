use std::collections::BTreeSet;

use patterns::{LOCALE, Matcher, PatternError};

/// A localized path pattern with its reference counterpart.
#[derive(Clone, Debug, PartialEq)]
pub struct PathGroup {
    l10n: Matcher,
    reference: Option<Matcher>,
    locales: Option<Vec<String>>,
    tests: Option<BTreeSet<String>>,
    module: Option<String>,
}

impl PathGroup {
    /// Creates a group for the localized files matched by `l10n`.
    #[must_use]
    pub const fn new(l10n: Matcher) -> Self {
        Self {
            l10n,
            reference: None,
            locales: None,
            tests: None,
            module: None,
        }
    }

    /// Sets the reference (source language) pattern.
    #[must_use]
    pub fn with_reference(mut self, reference: Matcher) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Restricts the group to `locales`.
    #[must_use]
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    /// Enables additional named checks for files of this group.
    #[must_use]
    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tests = Some(tests.into_iter().map(Into::into).collect());
        self
    }

    /// Records the source module the files belong to.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Returns the localized path matcher.
    #[must_use]
    pub const fn l10n(&self) -> &Matcher {
        &self.l10n
    }

    /// Returns the reference path matcher.
    #[must_use]
    pub const fn reference(&self) -> Option<&Matcher> {
        self.reference.as_ref()
    }

    /// Returns the locale restriction.
    #[must_use]
    pub fn locales(&self) -> Option<&[String]> {
        self.locales.as_deref()
    }

    /// Returns the enabled check names.
    #[must_use]
    pub const fn tests(&self) -> Option<&BTreeSet<String>> {
        self.tests.as_ref()
    }

    /// Returns the source module, if one was declared.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns `true` when the group covers `locale`.
    #[must_use]
    pub fn applies_to(&self, locale: &str) -> bool {
        self.locales
            .as_ref()
            .is_none_or(|locales| locales.iter().any(|candidate| candidate == locale))
    }

    /// Translates a localized path of `locale` into its reference path.
    ///
    /// Returns `Ok(None)` without a reference pattern or when `path` is not
    /// part of the group.
    pub fn reference_path(
        &self,
        locale: &str,
        path: &str,
    ) -> Result<Option<String>, PatternError> {
        let Some(reference) = &self.reference else {
            return Ok(None);
        };
        self.l10n.with_env([(LOCALE, locale)]).sub(reference, path)
    }

    /// Translates a reference path into the localized path of `locale`.
    pub fn l10n_path(
        &self,
        locale: &str,
        reference_path: &str,
    ) -> Result<Option<String>, PatternError> {
        let Some(reference) = &self.reference else {
            return Ok(None);
        };
        reference.sub(&self.l10n.with_env([(LOCALE, locale)]), reference_path)
    }
}
