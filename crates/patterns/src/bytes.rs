use encoding_rs::{Encoding, UTF_8};

use crate::bindings::Bindings;
use crate::error::PatternError;
use crate::matcher::Matcher;

/// A [`Matcher`] for paths held as encoded bytes.
///
/// Paths are decoded once on the way in and expansions are encoded on the
/// way out; matching itself always happens on text.
#[derive(Clone, Debug)]
pub struct BytesMatcher {
    matcher: Matcher,
    encoding: &'static Encoding,
}

impl BytesMatcher {
    /// Wraps `matcher` for the encoding named by `label`.
    ///
    /// Labels follow the WHATWG Encoding Standard, e.g. `"utf-8"` or
    /// `"latin1"`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownEncoding`] for an unrecognized label.
    pub fn new(matcher: Matcher, label: &str) -> Result<Self, PatternError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PatternError::UnknownEncoding(label.to_owned()))?;
        Ok(Self::with_encoding(matcher, encoding))
    }

    /// Wraps `matcher` for `encoding`.
    #[must_use]
    pub const fn with_encoding(matcher: Matcher, encoding: &'static Encoding) -> Self {
        Self { matcher, encoding }
    }

    /// Wraps `matcher` for UTF-8 paths.
    #[must_use]
    pub fn utf8(matcher: Matcher) -> Self {
        Self::with_encoding(matcher, UTF_8)
    }

    /// Returns the text matcher.
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns the path encoding.
    #[must_use]
    pub const fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn decode<'p>(&self, path: &'p [u8]) -> Result<std::borrow::Cow<'p, str>, PatternError> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(path)
            .ok_or(PatternError::Decode {
                encoding: self.encoding.name(),
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, PatternError> {
        let (bytes, used, had_errors) = self.encoding.encode(text);
        if had_errors || used != self.encoding {
            return Err(PatternError::Encode {
                encoding: self.encoding.name(),
            });
        }
        Ok(bytes.into_owned())
    }

    /// Matches the decoded `path`; captured values are text.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Decode`] when `path` is not valid in this
    /// matcher's encoding, otherwise as [`Matcher::captures`].
    pub fn captures(&self, path: &[u8]) -> Result<Option<Bindings>, PatternError> {
        self.matcher.captures(&self.decode(path)?)
    }

    /// Returns `true` when the decoded `path` matches.
    ///
    /// # Errors
    ///
    /// Same as [`captures`](Self::captures).
    pub fn is_match(&self, path: &[u8]) -> Result<bool, PatternError> {
        self.matcher.is_match(&self.decode(path)?)
    }

    /// Matches `path` and expands `other`, encoded in `other`'s encoding.
    ///
    /// # Errors
    ///
    /// Propagates decoding and matching errors, and returns
    /// [`PatternError::Encode`] when the expansion cannot be represented in
    /// `other`'s encoding.
    pub fn sub(&self, other: &Self, path: &[u8]) -> Result<Option<Vec<u8>>, PatternError> {
        match self.matcher.sub(&other.matcher, &self.decode(path)?)? {
            Some(text) => other.encode(&text).map(Some),
            None => Ok(None),
        }
    }

    /// The encoded [`Matcher::prefix`].
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Encode`] when the prefix cannot be represented
    /// in this matcher's encoding.
    pub fn prefix(&self) -> Result<Vec<u8>, PatternError> {
        self.encode(&self.matcher.prefix())
    }
}

impl PartialEq for BytesMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding && self.matcher == other.matcher
    }
}
