use fancy_regex::Regex;

use crate::error::FilterConfigError;

/// Prefix selecting a regular expression key.
const REGEX_PREFIX: &str = "re:";

/// Entity key pattern of a filter rule.
///
/// Keys starting with `re:` are regular expressions anchored at the start of
/// the entity key; any other key must equal the entity key exactly.
/// Look-around and backreferences are supported, so `re:(?!obsolete-)`
/// selects every key without that prefix.
#[derive(Clone, Debug)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compiles a declared key.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::InvalidKey`] when a `re:` key is not a
    /// valid regular expression.
    pub fn new(key: impl Into<String>) -> Result<Self, FilterConfigError> {
        let source = key.into();
        let expression = match source.strip_prefix(REGEX_PREFIX) {
            Some(expression) => format!("^(?:{expression})"),
            None => format!("^{}$", fancy_regex::escape(&source)),
        };
        let regex = Regex::new(&expression).map_err(|error| FilterConfigError::InvalidKey {
            key: source.clone(),
            source: error,
        })?;
        Ok(Self { source, regex })
    }

    /// Returns the key as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` for `re:` keys.
    #[must_use]
    pub fn is_regex(&self) -> bool {
        self.source.starts_with(REGEX_PREFIX)
    }

    /// Tests an entity key.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::KeyMatch`] when the regex engine gives
    /// up on `entity`, e.g. after exceeding its backtrack limit.
    pub fn is_match(&self, entity: &str) -> Result<bool, FilterConfigError> {
        self.regex
            .is_match(entity)
            .map_err(|error| FilterConfigError::KeyMatch {
                key: self.source.clone(),
                entity: entity.to_owned(),
                source: error,
            })
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for KeyPattern {}
