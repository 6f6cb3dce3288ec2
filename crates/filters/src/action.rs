use std::fmt;
use std::str::FromStr;

use crate::error::ParseActionError;

/// Outcome of filtering a localization file or entity.
///
/// Variants are ordered by strength, so combining candidates is a `max`:
/// `Error` beats `Warning`, which beats `Ignore`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterAction {
    /// Skip the comparison.
    Ignore,
    /// Compare and report problems without failing.
    Warning,
    /// Compare; missing or broken content is an error.
    Error,
}

impl FilterAction {
    /// Returns the configuration spelling of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(ParseActionError::new(other)),
        }
    }
}
