//! Tracing hooks for pattern compilation and matching.
//!
//! All hooks are compiled behind the `tracing` feature flag and become
//! no-op inline functions when it is disabled.
//!
//! # Examples
//!
//! ```rust,ignore
//! use patterns::debug_pattern::trace_match;
//!
//! trace_match("/l10n/{locale}/**", "/l10n/de/a.ftl", true);
//! ```

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const PATTERN_TARGET: &str = "l10n::pattern";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces the node sequence produced for pattern text.
///
/// # Arguments
///
/// * `source` - The pattern text as written
/// * `node_count` - Number of compiled nodes
/// * `prefix_length` - Index of the first wildcard node
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_compiled(source: &str, node_count: usize, prefix_length: usize) {
    tracing::trace!(
        target: PATTERN_TARGET,
        source = %source,
        node_count = node_count,
        prefix_length = prefix_length,
        "pattern_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_compiled(_source: &str, _node_count: usize, _prefix_length: usize) {}

/// Traces the regular expression built for a matcher.
///
/// Emitted once per matcher, when the regex is first needed.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_regex_compiled(pattern: &str, regex: &str) {
    tracing::debug!(
        target: PATTERN_TARGET,
        pattern = %pattern,
        regex = %regex,
        "regex_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_regex_compiled(_pattern: &str, _regex: &str) {}

/// Traces one path tested against a pattern.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_match(pattern: &str, path: &str, matched: bool) {
    tracing::trace!(
        target: PATTERN_TARGET,
        pattern = %pattern,
        path = %path,
        matched = matched,
        "pattern_match"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_match(_pattern: &str, _path: &str, _matched: bool) {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_functions_do_not_panic() {
        trace_pattern_compiled("/l10n/{locale}/**", 5, 3);
        trace_regex_compiled("a/*", "^a/(?P<s1>[^/]*)$");
        trace_match("a/*", "a/b", true);
        trace_match("a/*", "b/a", false);
    }

    #[test]
    fn trace_functions_accept_empty_input() {
        trace_pattern_compiled("", 1, 1);
        trace_regex_compiled("", "^$");
        trace_match("", "", true);
    }
}
