use patterns::{LOCALE, Matcher};

use crate::FilterAction;
use crate::error::FilterConfigError;
use crate::key::KeyPattern;

/// Filter rule consisting of a path matcher, optional entity key and action.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterRule {
    pub(crate) path: Matcher,
    pub(crate) key: Option<KeyPattern>,
    pub(crate) action: FilterAction,
}

impl FilterRule {
    /// Creates a whole-file rule.
    #[must_use]
    pub const fn new(path: Matcher, action: FilterAction) -> Self {
        Self {
            path,
            key: None,
            action,
        }
    }

    /// Creates an `error` rule for `path`.
    #[must_use]
    pub const fn error(path: Matcher) -> Self {
        Self::new(path, FilterAction::Error)
    }

    /// Creates a `warning` rule for `path`.
    #[must_use]
    pub const fn warning(path: Matcher) -> Self {
        Self::new(path, FilterAction::Warning)
    }

    /// Creates an `ignore` rule for `path`.
    #[must_use]
    pub const fn ignore(path: Matcher) -> Self {
        Self::new(path, FilterAction::Ignore)
    }

    /// Restricts the rule to entities matching `key`.
    #[must_use]
    pub fn with_key(mut self, key: KeyPattern) -> Self {
        self.key = Some(key);
        self
    }

    /// Returns the path matcher.
    #[must_use]
    pub const fn path(&self) -> &Matcher {
        &self.path
    }

    /// Returns the entity key pattern, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&KeyPattern> {
        self.key.as_ref()
    }

    /// Returns the action taken when the rule applies.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// The same rule with `locale` bound in its path matcher.
    pub(crate) fn with_locale(&self, locale: &str) -> Self {
        Self {
            path: self.path.with_env([(LOCALE, locale)]),
            key: self.key.clone(),
            action: self.action,
        }
    }

    /// Reports whether the rule decides the given query.
    ///
    /// Keyed rules need an entity whose key matches; key-less rules apply
    /// to whole files and to every entity inside them.
    pub(crate) fn applies(
        &self,
        path: &str,
        entity: Option<&str>,
    ) -> Result<bool, FilterConfigError> {
        if let Some(key) = &self.key {
            let Some(entity) = entity else {
                return Ok(false);
            };
            if !key.is_match(entity)? {
                return Ok(false);
            }
        }
        Ok(self.path.is_match(path)?)
    }
}
