use patterns::{LOCALE, Matcher, PatternError};

use crate::debug_filter::{trace_cache_built, trace_rule_evaluate};
use crate::error::FilterConfigError;
use crate::{FilterAction, FilterRule, PathGroup};

/// Path groups and rules of one project with the locale bound.
#[derive(Debug)]
pub(crate) struct FilterCache {
    l10n_paths: Vec<Matcher>,
    rules: Vec<FilterRule>,
}

impl FilterCache {
    pub(crate) fn build(locale: &str, paths: &[PathGroup], rules: &[FilterRule]) -> Self {
        let l10n_paths: Vec<_> = paths
            .iter()
            .filter(|group| group.applies_to(locale))
            .map(|group| group.l10n().with_env([(LOCALE, locale)]))
            .collect();
        let rules: Vec<_> = rules.iter().map(|rule| rule.with_locale(locale)).collect();
        trace_cache_built(locale, l10n_paths.len(), rules.len());
        Self { l10n_paths, rules }
    }

    /// Returns `true` when one of the path groups matches `path`.
    fn covers(&self, path: &str) -> Result<bool, PatternError> {
        for matcher in &self.l10n_paths {
            if matcher.is_match(path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The project's own action for `path`, or `None` outside its paths.
    ///
    /// Covered files default to `error` unless a rule says otherwise.
    pub(crate) fn decide(
        &self,
        path: &str,
        entity: Option<&str>,
    ) -> Result<Option<FilterAction>, FilterConfigError> {
        if !self.covers(path)? {
            return Ok(None);
        }
        let rule = last_matching_rule(&self.rules, path, entity)?;
        Ok(Some(rule.map_or(FilterAction::Error, FilterRule::action)))
    }
}

/// Later rules take precedence over earlier ones.
fn last_matching_rule<'a>(
    rules: &'a [FilterRule],
    path: &str,
    entity: Option<&str>,
) -> Result<Option<&'a FilterRule>, FilterConfigError> {
    for rule in rules.iter().rev() {
        let applies = rule.applies(path, entity)?;
        trace_rule_evaluate(path, &rule.path().to_string(), applies);
        if applies {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}
