/// Error produced while compiling, matching or expanding a path pattern.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PatternError {
    /// Strict expansion reached a variable or wildcard without a binding.
    #[error("no binding for `{0}` while expanding pattern")]
    MissingBinding(String),

    /// A variable and a wildcard would both be captured under one name.
    #[error("variable `{{{0}}}` collides with the wildcard binding of the same name")]
    DuplicateBinding(String),

    /// A relative root could not be made absolute.
    #[error("failed to resolve root '{path}': {message}")]
    Root {
        /// Root as given.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// The right-hand side of a concatenation declares its own root.
    #[error("cannot concatenate a rooted pattern onto another pattern")]
    RootedConcat,

    /// The generated regular expression was rejected by the regex engine.
    #[error("failed to compile pattern '{pattern}': {message}")]
    Regex {
        /// Pattern text as written.
        pattern: String,
        /// Message reported by the regex engine.
        message: String,
    },

    /// The regex engine gave up while matching a path.
    #[error("failed to match '{path}': {message}")]
    Match {
        /// Path under test.
        path: String,
        /// Message reported by the regex engine.
        message: String,
    },

    /// A byte path is not valid in the matcher's encoding.
    #[error("path is not valid {encoding}")]
    Decode {
        /// Name of the encoding used for decoding.
        encoding: &'static str,
    },

    /// An expanded path cannot be represented in the matcher's encoding.
    #[error("expanded path cannot be represented in {encoding}")]
    Encode {
        /// Name of the encoding used for encoding.
        encoding: &'static str,
    },

    /// The encoding label is not known.
    #[error("unknown text encoding label '{0}'")]
    UnknownEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::PatternError;

    #[test]
    fn messages_name_the_offending_input() {
        let missing = PatternError::MissingBinding("locale".into());
        assert!(missing.to_string().contains("`locale`"));

        let regex = PatternError::Regex {
            pattern: "{a}/{b}".into(),
            message: "boom".into(),
        };
        assert!(regex.to_string().contains("'{a}/{b}'"));
        assert!(regex.to_string().contains("boom"));

        let duplicate = PatternError::DuplicateBinding("s1".into());
        assert!(duplicate.to_string().starts_with("variable `{s1}`"));

        let decode = PatternError::Decode { encoding: "UTF-8" };
        assert_eq!(decode.to_string(), "path is not valid UTF-8");
    }
}
