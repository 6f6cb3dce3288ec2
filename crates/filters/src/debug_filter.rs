//! Tracing for project filter evaluation.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::FilterAction;
//! use filters::debug_filter::{FilterTracer, trace_filter_decision};
//!
//! let mut tracer = FilterTracer::new();
//!
//! trace_filter_decision("de", "/l10n/de/menu.ftl", None, FilterAction::Error);
//! tracer.record_decision(FilterAction::Error);
//!
//! tracer.summary();
//! ```

use crate::FilterAction;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "l10n::filter";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a filter rule being added to a project.
///
/// # Arguments
///
/// * `path` - The rule's path pattern
/// * `key` - The entity key pattern, if the rule has one
/// * `action` - The action the rule yields
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_added(path: &str, key: Option<&str>, action: FilterAction) {
    tracing::debug!(
        target: FILTER_TARGET,
        path = %path,
        key = ?key,
        action = %action,
        "rule_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_added(_path: &str, _key: Option<&str>, _action: FilterAction) {}

/// Traces one rule tested against a file.
///
/// # Arguments
///
/// * `path` - The file being filtered
/// * `rule_pattern` - The rule's path pattern
/// * `applies` - Whether the rule decided the query
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_evaluate(path: &str, rule_pattern: &str, applies: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        rule_pattern = %rule_pattern,
        applies = applies,
        "rule_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_evaluate(_path: &str, _rule_pattern: &str, _applies: bool) {}

/// Traces construction of the per-locale rule cache of one project.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_cache_built(locale: &str, path_count: usize, rule_count: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        locale = %locale,
        path_count = path_count,
        rule_count = rule_count,
        "cache_built"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_cache_built(_locale: &str, _path_count: usize, _rule_count: usize) {}

/// Traces an excluded project claiming a file.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_exclude_hit(locale: &str, path: &str) {
    tracing::debug!(
        target: FILTER_TARGET,
        locale = %locale,
        path = %path,
        "exclude_hit"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_exclude_hit(_locale: &str, _path: &str) {}

/// Traces the final action for a query.
///
/// # Arguments
///
/// * `locale` - The queried locale
/// * `path` - The file being filtered
/// * `entity` - The entity key, for per-entity queries
/// * `action` - The resolved action
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_decision(locale: &str, path: &str, entity: Option<&str>, action: FilterAction) {
    tracing::info!(
        target: FILTER_TARGET,
        locale = %locale,
        path = %path,
        entity = ?entity,
        action = %action,
        "filter_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_decision(
    _locale: &str,
    _path: &str,
    _entity: Option<&str>,
    _action: FilterAction,
) {
}

/// Traces summary statistics for filter operations.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_summary(total: usize, errors: usize, warnings: usize, ignored: usize) {
    tracing::info!(
        target: FILTER_TARGET,
        total = total,
        errors = errors,
        warnings = warnings,
        ignored = ignored,
        "filter_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_summary(_total: usize, _errors: usize, _warnings: usize, _ignored: usize) {}

// ============================================================================
// FilterTracer - stateful tracer for aggregating filter statistics
// ============================================================================

/// Aggregates statistics across many filter queries.
///
/// [`ProjectConfig`](crate::ProjectConfig) never records into a tracer
/// itself. Callers that walk a tree own one and feed it the rules they
/// declare and the actions [`filter`](crate::ProjectConfig::filter) returns.
///
/// # Examples
///
/// ```no_run
/// # use filters::FilterAction;
/// # use filters::debug_filter::FilterTracer;
/// let mut tracer = FilterTracer::new();
///
/// tracer.record_rule_added();
/// tracer.record_decision(FilterAction::Error);
/// tracer.record_decision(FilterAction::Ignore);
///
/// tracer.summary();
/// assert_eq!(tracer.total_evaluated(), 2);
/// assert_eq!(tracer.errors(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterTracer {
    rules_added: usize,
    errors: usize,
    warnings: usize,
    ignored: usize,
}

impl FilterTracer {
    /// Creates a new filter tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules_added: 0,
            errors: 0,
            warnings: 0,
            ignored: 0,
        }
    }

    /// Records that a rule was added.
    pub fn record_rule_added(&mut self) {
        self.rules_added += 1;
    }

    /// Records the outcome of one query.
    pub fn record_decision(&mut self, action: FilterAction) {
        match action {
            FilterAction::Error => self.errors += 1,
            FilterAction::Warning => self.warnings += 1,
            FilterAction::Ignore => self.ignored += 1,
        }
    }

    /// Emits a summary trace event with all accumulated statistics.
    pub fn summary(&self) {
        trace_filter_summary(
            self.total_evaluated(),
            self.errors,
            self.warnings,
            self.ignored,
        );
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of rules added.
    #[must_use]
    pub const fn rules_added(&self) -> usize {
        self.rules_added
    }

    /// Returns the number of recorded queries.
    #[must_use]
    pub const fn total_evaluated(&self) -> usize {
        self.errors + self.warnings + self.ignored
    }

    /// Returns the number of queries resolved to `error`.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Returns the number of queries resolved to `warning`.
    #[must_use]
    pub const fn warnings(&self) -> usize {
        self.warnings
    }

    /// Returns the number of queries resolved to `ignore`.
    #[must_use]
    pub const fn ignored(&self) -> usize {
        self.ignored
    }

    /// Returns the share of queries that require a comparison.
    ///
    /// Returns 0.0 if nothing has been recorded.
    #[must_use]
    pub fn compared_ratio(&self) -> f64 {
        let total = self.total_evaluated();
        if total == 0 {
            0.0
        } else {
            ((self.errors + self.warnings) as f64) / (total as f64)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracer_new() {
        let tracer = FilterTracer::new();
        assert_eq!(tracer.rules_added(), 0);
        assert_eq!(tracer.total_evaluated(), 0);
        assert_eq!(tracer.errors(), 0);
        assert_eq!(tracer.warnings(), 0);
        assert_eq!(tracer.ignored(), 0);
    }

    #[test]
    fn test_record_decisions() {
        let mut tracer = FilterTracer::new();
        tracer.record_decision(FilterAction::Error);
        tracer.record_decision(FilterAction::Warning);
        tracer.record_decision(FilterAction::Ignore);
        tracer.record_decision(FilterAction::Error);

        assert_eq!(tracer.total_evaluated(), 4);
        assert_eq!(tracer.errors(), 2);
        assert_eq!(tracer.warnings(), 1);
        assert_eq!(tracer.ignored(), 1);
        assert!((tracer.compared_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compared_ratio_zero_evaluations() {
        let tracer = FilterTracer::new();
        assert_eq!(tracer.compared_ratio(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut tracer = FilterTracer::new();
        tracer.record_rule_added();
        tracer.record_decision(FilterAction::Warning);

        tracer.reset();

        assert_eq!(tracer.rules_added(), 0);
        assert_eq!(tracer.total_evaluated(), 0);
    }

    #[test]
    fn test_trace_functions_do_not_panic() {
        trace_rule_added("/l10n/{locale}/**", None, FilterAction::Error);
        trace_rule_added("/l10n/{locale}/a.ftl", Some("re:menu-"), FilterAction::Ignore);
        trace_rule_evaluate("/l10n/de/a.ftl", "/l10n/{locale}/a.ftl", true);
        trace_cache_built("de", 2, 3);
        trace_exclude_hit("de", "/l10n/de/a.ftl");
        trace_filter_decision("de", "/l10n/de/a.ftl", Some("key"), FilterAction::Warning);
        trace_filter_summary(0, 0, 0, 0);
    }

    #[test]
    fn test_summary_emits_trace() {
        let mut tracer = FilterTracer::new();
        tracer.record_decision(FilterAction::Ignore);
        tracer.summary();
    }

    #[test]
    fn test_clone() {
        let mut tracer = FilterTracer::new();
        tracer.record_rule_added();
        tracer.record_decision(FilterAction::Error);

        let cloned = tracer.clone();

        assert_eq!(cloned.rules_added(), 1);
        assert_eq!(cloned.errors(), 1);
    }
}
