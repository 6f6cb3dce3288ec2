use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use crate::android;
use crate::bindings::Bindings;
use crate::debug_pattern::{trace_match, trace_regex_compiled};
use crate::env::{Environment, Flow, Render, Scope};
use crate::error::PatternError;
use crate::node::{ANDROID_LOCALE, LOCALE};
use crate::pattern::{IntoPattern, Pattern};
use crate::pathutil::abspath;
use crate::regex_writer::{binding_name, regex_source};

/// A [`Pattern`] together with the variable bindings that constrain it.
///
/// The regular expression is compiled on first use and cached for the
/// lifetime of the matcher. Deriving a matcher with [`with_env`] or
/// [`with_root`] starts a fresh cache.
///
/// [`with_env`]: Matcher::with_env
/// [`with_root`]: Matcher::with_root
#[derive(Clone, Debug)]
pub struct Matcher {
    pattern: Pattern,
    env: Environment,
    regex: OnceLock<Result<fancy_regex::Regex, PatternError>>,
}

impl Matcher {
    /// Creates a matcher with an empty environment.
    pub fn new(pattern: impl IntoPattern) -> Self {
        Self::from_parts(pattern.into_pattern(), Environment::new())
    }

    fn from_parts(pattern: Pattern, env: Environment) -> Self {
        Self {
            pattern,
            env,
            regex: OnceLock::new(),
        }
    }

    /// Returns a copy with additional bindings; later bindings win.
    #[must_use]
    pub fn with_env<I, K, V>(&self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoPattern,
    {
        let mut env = self.env.clone();
        env.extend(
            bindings
                .into_iter()
                .map(|(name, value)| (name.into(), value.into_pattern())),
        );
        Self::from_parts(self.pattern.clone(), env)
    }

    /// Anchors relative patterns under `root`.
    ///
    /// A relative `root` is resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Root`] when the current directory is needed
    /// but unavailable.
    pub fn with_root(self, root: &str) -> Result<Self, PatternError> {
        let mut root = abspath(root).map_err(|error| PatternError::Root {
            path: root.to_owned(),
            message: error.to_string(),
        })?;
        if !root.ends_with('/') {
            root.push('/');
        }
        Ok(Self::from_parts(self.pattern.with_root(Some(root)), self.env))
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the variable bindings.
    #[must_use]
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Returns the root directory, if one is set.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.pattern.root()
    }

    fn regex(&self) -> Result<&fancy_regex::Regex, PatternError> {
        self.regex
            .get_or_init(|| {
                let source = regex_source(&self.pattern, &self.env);
                trace_regex_compiled(&self.pattern.to_string(), &source);
                let regex =
                    fancy_regex::Regex::new(&source).map_err(|error| PatternError::Regex {
                        pattern: self.pattern.to_string(),
                        message: error.to_string(),
                    })?;
                check_binding_names(&regex)?;
                Ok(regex)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Matches the whole of `path` and returns the captured values.
    ///
    /// A `**` that matched nothing is bound to the empty string. When the
    /// pattern captures `android_locale` but not `locale`, the BCP 47 form
    /// is added as `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] if the pattern cannot be compiled,
    /// [`PatternError::DuplicateBinding`] if a variable is named like one of
    /// the pattern's wildcards (`{s1}` next to a first `*`), and
    /// [`PatternError::Match`] if the regex engine gives up on `path`.
    pub fn captures(&self, path: &str) -> Result<Option<Bindings>, PatternError> {
        let regex = self.regex()?;
        let captures = regex.captures(path).map_err(|error| PatternError::Match {
            path: path.to_owned(),
            message: error.to_string(),
        })?;
        trace_match(&self.pattern.to_string(), path, captures.is_some());
        let Some(captures) = captures else {
            return Ok(None);
        };

        let mut bindings = Bindings::new();
        for group in regex.capture_names().flatten() {
            let value = captures.name(group).map_or("", |m| m.as_str());
            bindings.insert(binding_name(group), value);
        }
        if !bindings.contains(LOCALE)
            && let Some(code) = bindings.get(ANDROID_LOCALE)
        {
            let locale = android::from_android(code);
            bindings.insert(LOCALE, locale);
        }
        Ok(Some(bindings))
    }

    /// Returns `true` when the whole of `path` matches.
    ///
    /// # Errors
    ///
    /// Same as [`captures`](Self::captures).
    pub fn is_match(&self, path: &str) -> Result<bool, PatternError> {
        let matched = self
            .regex()?
            .is_match(path)
            .map_err(|error| PatternError::Match {
                path: path.to_owned(),
                message: error.to_string(),
            })?;
        trace_match(&self.pattern.to_string(), path, matched);
        Ok(matched)
    }

    /// Produces a concrete path from `bindings` and the environment.
    ///
    /// The environment takes precedence over `bindings`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MissingBinding`] naming the first variable or
    /// wildcard that has no value.
    pub fn expand(&self, bindings: &Bindings) -> Result<String, PatternError> {
        let captured = bindings.to_environment();
        let (text, flow) = self
            .pattern
            .render(Scope::layered(&self.env, &captured), Render::Halt);
        match flow {
            Flow::Continue => Ok(text),
            Flow::Halt(name) => Err(PatternError::MissingBinding(name)),
        }
    }

    /// Expands as far as possible, stopping at the first unresolved node.
    #[must_use]
    pub fn expand_best_effort(&self, bindings: &Bindings) -> String {
        let captured = bindings.to_environment();
        self.pattern
            .render(Scope::layered(&self.env, &captured), Render::Halt)
            .0
    }

    /// Expands with the environment, writing unresolved tokens back in
    /// pattern syntax.
    #[must_use]
    pub fn template(&self) -> String {
        self.pattern
            .render(Scope::new(&self.env), Render::Template)
            .0
    }

    /// Matches `path` against `self` and expands `other` with the captures.
    ///
    /// Returns `Ok(None)` when `path` does not match.
    ///
    /// # Errors
    ///
    /// Propagates matching errors and [`PatternError::MissingBinding`] when
    /// `other` needs a value that neither the captures nor its environment
    /// provide.
    pub fn sub(&self, other: &Self, path: &str) -> Result<Option<String>, PatternError> {
        match self.captures(path)? {
            Some(bindings) => other.expand(&bindings).map(Some),
            None => Ok(None),
        }
    }

    /// Appends `other` to this matcher; bindings of `other` win.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::RootedConcat`] when `other` has a root.
    pub fn concat(&self, other: &Self) -> Result<Self, PatternError> {
        let pattern = self.pattern.concat(&other.pattern)?;
        let mut env = self.env.clone();
        env.extend(
            other
                .env
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        Ok(Self::from_parts(pattern, env))
    }

    /// The expansion of everything before the first wildcard, root
    /// included.
    ///
    /// Unresolved variables cut the prefix short.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.pattern
            .head()
            .render(Scope::new(&self.env), Render::Halt)
            .0
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self
                .env
                .iter()
                .all(|(name, value)| other.env.get(name).is_none_or(|theirs| theirs == value))
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pattern, f)
    }
}

impl IntoPattern for Matcher {
    fn into_pattern(self) -> Pattern {
        self.pattern
    }
}

impl IntoPattern for &Matcher {
    fn into_pattern(self) -> Pattern {
        self.pattern.clone()
    }
}

/// Rejects patterns where a variable and a wildcard share a binding name.
fn check_binding_names(regex: &fancy_regex::Regex) -> Result<(), PatternError> {
    let mut names = HashSet::new();
    for group in regex.capture_names().flatten() {
        let name = binding_name(group);
        if !names.insert(name) {
            return Err(PatternError::DuplicateBinding(name.to_owned()));
        }
    }
    Ok(())
}

/// Expands `path` with `env`, leaving unknown variables as `{name}`.
///
/// Relative results are placed under `root` when one is given.
///
/// # Errors
///
/// Same as [`Matcher::with_root`].
///
/// # Examples
///
/// ```
/// let path = patterns::expand(None, "{l10n_base}/{locale}/dir", [("l10n_base", "../l10n")]);
/// assert_eq!(path.unwrap(), "../l10n/{locale}/dir");
/// ```
pub fn expand<I, K, V>(root: Option<&str>, path: &str, env: I) -> Result<String, PatternError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoPattern,
{
    let matcher = Matcher::new(path).with_env(env);
    match root {
        Some(root) => Ok(matcher.with_root(root)?.template()),
        None => Ok(matcher.template()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn literal_patterns_match_exactly() {
        let matcher = Matcher::new("/a/b.ftl");
        assert!(matcher.is_match("/a/b.ftl").unwrap());
        assert!(!matcher.is_match("/a/b.ftl2").unwrap());
        assert!(!matcher.is_match("x/a/b.ftl").unwrap());
    }

    #[test]
    fn star_stays_within_a_segment() {
        let matcher = Matcher::new("a/*.ftl");
        assert!(matcher.is_match("a/b.ftl").unwrap());
        assert!(matcher.is_match("a/.ftl").unwrap());
        assert!(!matcher.is_match("a/b/c.ftl").unwrap());
    }

    #[test]
    fn starstar_captures_empty_when_skipped() {
        let matcher = Matcher::new("a/**/b");
        let captured = matcher.captures("a/b").unwrap().unwrap();
        assert_eq!(captured.get("s1"), Some(""));
        let captured = matcher.captures("a/x/y/b").unwrap().unwrap();
        assert_eq!(captured.get("s1"), Some("x/y/"));
    }

    #[test]
    fn environment_constrains_matching() {
        let matcher = Matcher::new("{locale}/*.ftl").with_env([("locale", "de")]);
        assert!(matcher.is_match("de/a.ftl").unwrap());
        assert!(!matcher.is_match("fr/a.ftl").unwrap());
        let captured = matcher.captures("de/a.ftl").unwrap().unwrap();
        assert_eq!(captured, bindings(&[("locale", "de"), ("s1", "a")]));
    }

    #[test]
    fn backreferences_require_equal_values() {
        let matcher = Matcher::new("{x}/{x}");
        assert!(matcher.is_match("ab/ab").unwrap());
        assert!(!matcher.is_match("ab/cd").unwrap());
    }

    #[test]
    fn nested_variables_resolve_through_environment() {
        let matcher = Matcher::new("{l10n_base}/{locale}/x")
            .with_env([("l10n_base", "/l10n"), ("locale", "de")]);
        assert!(matcher.is_match("/l10n/de/x").unwrap());
        assert_eq!(matcher.expand(&Bindings::new()).unwrap(), "/l10n/de/x");
    }

    #[test]
    fn self_reference_does_not_recurse() {
        let matcher = Matcher::new("{x}").with_env([("x", "a{x}")]);
        assert_eq!(
            matcher.expand(&Bindings::new()),
            Err(PatternError::MissingBinding("x".into()))
        );
    }

    #[test]
    fn expand_reports_missing_binding() {
        let matcher = Matcher::new("a/{locale}/*");
        let error = matcher.expand(&bindings(&[("locale", "de")])).unwrap_err();
        assert_eq!(error, PatternError::MissingBinding("s1".into()));
        assert_eq!(matcher.expand_best_effort(&Bindings::new()), "a/");
    }

    #[test]
    fn environment_wins_over_bindings() {
        let matcher = Matcher::new("{locale}").with_env([("locale", "de")]);
        assert_eq!(matcher.expand(&bindings(&[("locale", "fr")])).unwrap(), "de");
    }

    #[test]
    fn sub_translates_between_patterns() {
        let l10n = Matcher::new("/l10n/{locale}/**");
        let reference = Matcher::new("/src/en-US/**");
        assert_eq!(
            l10n.sub(&reference, "/l10n/de/a/b.ftl").unwrap().as_deref(),
            Some("/src/en-US/a/b.ftl")
        );
        assert_eq!(l10n.sub(&reference, "/elsewhere").unwrap(), None);
    }

    #[test]
    fn prefix_expands_up_to_first_wildcard() {
        let matcher = Matcher::new("/l10n/{locale}/*/x").with_env([("locale", "de")]);
        assert_eq!(matcher.prefix(), "/l10n/de/");
        assert_eq!(Matcher::new("/l10n/{locale}/x").prefix(), "/l10n/");
    }

    #[test]
    fn root_applies_to_relative_patterns() {
        let matcher = Matcher::new("browser/**").with_root("/src/./").unwrap();
        assert_eq!(matcher.root(), Some("/src/"));
        assert!(matcher.is_match("/src/browser/a").unwrap());
        assert_eq!(matcher.prefix(), "/src/browser/");

        let absolute = Matcher::new("/abs/*").with_root("/src").unwrap();
        assert!(absolute.is_match("/abs/a").unwrap());
    }

    #[test]
    fn concat_merges_environments() {
        let left = Matcher::new("{base}/").with_env([("base", "/l10n"), ("locale", "fr")]);
        let right = Matcher::new("{locale}/*").with_env([("locale", "de")]);
        let joined = left.concat(&right).unwrap();
        assert_eq!(joined.env()["locale"], Pattern::parse("de"));
        assert!(joined.is_match("/l10n/de/x").unwrap());

        let rooted = Matcher::new("x").with_root("/r").unwrap();
        assert_eq!(left.concat(&rooted), Err(PatternError::RootedConcat));
    }

    #[test]
    fn equality_ignores_one_sided_bindings() {
        let plain = Matcher::new("{locale}/x");
        let bound = plain.with_env([("locale", "de")]);
        assert_eq!(plain, bound);
        assert_ne!(bound, plain.with_env([("locale", "fr")]));
        assert_ne!(plain, Matcher::new("{locale}/y"));
    }

    #[test]
    fn template_keeps_unknown_variables() {
        assert_eq!(
            expand(Some("/src"), "{l10n_base}/{locale}/dir", [("l10n_base", "../tmp")]).unwrap(),
            "/src/../tmp/{locale}/dir"
        );
        let no_env: [(&str, &str); 0] = [];
        assert_eq!(expand(None, "/abs/{x}", no_env).unwrap(), "/abs/{x}");
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let matcher = Matcher::new("x/*").with_root("rel").unwrap();
        let root = matcher.root().unwrap();
        assert!(root.starts_with('/'), "{root}");
        assert!(root.ends_with("/rel/"), "{root}");
        assert!(matcher.is_match(&format!("{root}x/a")).unwrap());
    }

    #[test]
    fn variable_named_like_a_wildcard_is_rejected() {
        let matcher = Matcher::new("{s1}/*");
        assert_eq!(
            matcher.captures("a/b"),
            Err(PatternError::DuplicateBinding("s1".into()))
        );
        assert_eq!(
            matcher.is_match("a/b"),
            Err(PatternError::DuplicateBinding("s1".into()))
        );
        let plain = Matcher::new("{s1}/x");
        let captured = plain.captures("a/x").unwrap().unwrap();
        assert_eq!(captured.get("s1"), Some("a"));
    }
}
