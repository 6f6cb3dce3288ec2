use std::io;

use patterns::PatternError;

/// Error produced while building or querying a project filter tree.
#[derive(Debug, thiserror::Error)]
pub enum FilterConfigError {
    /// A configuration with excludes was included as a child.
    #[error("included configs cannot declare their own excludes")]
    IncludedExcludes,

    /// An excluded configuration, or one of its includes, declares excludes.
    #[error("excluded configs cannot declare their own excludes")]
    ExcludedExcludes,

    /// A `re:` entity key is not a valid regular expression.
    #[error("invalid entity key pattern '{key}': {source}")]
    InvalidKey {
        /// Key as declared, including the `re:` prefix.
        key: String,
        /// Error reported by the regex engine.
        #[source]
        source: fancy_regex::Error,
    },

    /// The regex engine gave up while matching an entity key.
    #[error("failed to match entity '{entity}' against key '{key}': {source}")]
    KeyMatch {
        /// Key as declared.
        key: String,
        /// Entity key being tested.
        entity: String,
        /// Error reported by the regex engine.
        #[source]
        source: fancy_regex::Error,
    },

    /// A path pattern failed to compile or match.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The configuration root could not be resolved.
    #[error("failed to resolve root for '{path}': {source}")]
    Root {
        /// Base path being resolved.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Error returned when parsing an unknown filter action name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown filter action '{input}', expected error, warning or ignore")]
pub struct ParseActionError {
    input: String,
}

impl ParseActionError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the rejected text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
