use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use patterns::{Environment, IntoPattern, Matcher, pathutil};

use crate::debug_filter::{trace_exclude_hit, trace_filter_decision, trace_rule_added};
use crate::decision::FilterCache;
use crate::declaration::{PathDeclaration, RuleDeclaration};
use crate::error::FilterConfigError;
use crate::key::KeyPattern;
use crate::{FilterAction, FilterRule, PathGroup};

/// One localization project configuration and the configurations it
/// includes or excludes.
///
/// Configurations are built first and queried afterwards. Every mutation
/// drops the derived locale list and the per-locale rule caches.
#[derive(Debug, Default)]
pub struct ProjectConfig {
    path: Option<String>,
    root: Option<String>,
    environment: Environment,
    paths: Vec<PathGroup>,
    rules: Vec<FilterRule>,
    locales: Option<Vec<String>>,
    children: Vec<ProjectConfig>,
    excludes: Vec<ProjectConfig>,
    all_locales: OnceLock<Vec<String>>,
    cache: Mutex<HashMap<String, Arc<FilterCache>>>,
}

impl ProjectConfig {
    /// Creates an empty configuration read from the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Returns the configuration file path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the directory relative patterns are anchored under.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Returns the variables available to this configuration's patterns.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns the declared path groups.
    #[must_use]
    pub fn paths(&self) -> &[PathGroup] {
        &self.paths
    }

    /// Returns the filter rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// Returns the locales declared on this configuration itself.
    #[must_use]
    pub fn locales(&self) -> Option<&[String]> {
        self.locales.as_deref()
    }

    /// Returns the included configurations.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the excluded configurations.
    #[must_use]
    pub fn excludes(&self) -> &[Self] {
        &self.excludes
    }

    /// Anchors patterns added from now on under `basepath`, resolved
    /// against the directory of the configuration file.
    ///
    /// Configurations without a file path have no root.
    pub fn set_root(&mut self, basepath: &str) -> Result<(), FilterConfigError> {
        let Some(path) = &self.path else {
            self.root = None;
            return Ok(());
        };
        let joined = pathutil::join(&pathutil::dirname(path), basepath);
        let root = pathutil::abspath(&joined).map_err(|source| FilterConfigError::Root {
            path: joined,
            source,
        })?;
        self.root = Some(root);
        Ok(())
    }

    /// Adds variables for patterns added from now on.
    pub fn add_environment<I, K, V>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoPattern,
    {
        self.environment.extend(
            bindings
                .into_iter()
                .map(|(name, value)| (name.into(), value.into_pattern())),
        );
    }

    /// Expands an include path with this configuration's root and
    /// variables. Unknown variables stay in `{name}` form.
    ///
    /// # Errors
    ///
    /// Fails only when a relative root cannot be resolved.
    pub fn expand(&self, path: &str) -> Result<String, FilterConfigError> {
        Ok(patterns::expand(self.root.as_deref(), path, &self.environment)?)
    }

    fn matcher(&self, pattern: &str) -> Result<Matcher, FilterConfigError> {
        let matcher = Matcher::new(pattern).with_env(&self.environment);
        match &self.root {
            Some(root) => Ok(matcher.with_root(root)?),
            None => Ok(matcher),
        }
    }

    /// Adds path groups.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::Pattern`] when a pattern cannot be
    /// anchored under the root. Nothing is added in that case.
    pub fn add_paths<I>(&mut self, declarations: I) -> Result<(), FilterConfigError>
    where
        I: IntoIterator<Item = PathDeclaration>,
    {
        let mut groups = Vec::new();
        for declaration in declarations {
            let mut group = PathGroup::new(self.matcher(&declaration.l10n)?);
            if let Some(reference) = &declaration.reference {
                group = group.with_reference(self.matcher(reference)?);
            }
            if let Some(locales) = declaration.locales {
                group = group.with_locales(locales);
            }
            if let Some(tests) = declaration.test {
                group = group.with_tests(tests);
            }
            if let Some(module) = declaration.module {
                group = group.with_module(module);
            }
            groups.push(group);
        }
        self.paths.extend(groups);
        self.invalidate();
        Ok(())
    }

    /// Adds filter rules.
    ///
    /// Each declaration yields one rule per path and key combination, in
    /// path-major order. Nothing is added when a key fails to compile.
    pub fn add_rules<I>(&mut self, declarations: I) -> Result<(), FilterConfigError>
    where
        I: IntoIterator<Item = RuleDeclaration>,
    {
        let mut compiled = Vec::new();
        for declaration in declarations {
            for path in declaration.path.iter() {
                let rule = FilterRule::new(self.matcher(path)?, declaration.action);
                match &declaration.key {
                    None => compiled.push(rule),
                    Some(keys) => {
                        for key in keys.iter() {
                            compiled.push(rule.clone().with_key(KeyPattern::new(key.as_str())?));
                        }
                    }
                }
            }
        }
        for rule in &compiled {
            trace_rule_added(
                &rule.path().to_string(),
                rule.key().map(KeyPattern::as_str),
                rule.action(),
            );
        }
        self.rules.extend(compiled);
        self.invalidate();
        Ok(())
    }

    /// Includes `child`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::IncludedExcludes`] when `child` declares
    /// excludes of its own.
    pub fn add_child(&mut self, child: Self) -> Result<(), FilterConfigError> {
        if !child.excludes.is_empty() {
            return Err(FilterConfigError::IncludedExcludes);
        }
        self.children.push(child);
        self.invalidate();
        Ok(())
    }

    /// Excludes the files claimed by `child`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::ExcludedExcludes`] when `child` or any
    /// configuration it includes declares excludes.
    pub fn exclude(&mut self, child: Self) -> Result<(), FilterConfigError> {
        if child.configs().any(|config| !config.excludes.is_empty()) {
            return Err(FilterConfigError::ExcludedExcludes);
        }
        self.excludes.push(child);
        Ok(())
    }

    /// Sets the project locales, optionally for all included
    /// configurations as well.
    pub fn set_locales<I, S>(&mut self, locales: I, deep: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        self.assign_locales(&locales, deep);
    }

    fn assign_locales(&mut self, locales: &[String], deep: bool) {
        self.locales = Some(locales.to_vec());
        self.invalidate();
        if deep {
            for child in &mut self.children {
                child.assign_locales(locales, deep);
            }
        }
    }

    fn invalidate(&mut self) {
        self.all_locales = OnceLock::new();
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Iterates over this configuration and everything it includes, depth
    /// first in declaration order.
    #[must_use]
    pub fn configs(&self) -> Configs<'_> {
        Configs { stack: vec![self] }
    }

    /// Sorted union of all locales declared here, on path groups, and in
    /// included configurations.
    pub fn all_locales(&self) -> &[String] {
        self.all_locales.get_or_init(|| {
            let mut locales = BTreeSet::new();
            for config in self.configs() {
                locales.extend(config.locales.iter().flatten().cloned());
                for group in &config.paths {
                    locales.extend(group.locales().into_iter().flatten().cloned());
                }
            }
            locales.into_iter().collect()
        })
    }

    /// Decides how a localized file, or one entity inside it, is compared.
    ///
    /// Locales unknown to the project and files outside every path group
    /// are ignored. Excluded configurations that claim the file make it an
    /// error; otherwise the strongest action of this configuration and its
    /// includes wins.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConfigError::Pattern`] when a path pattern cannot be
    /// compiled or matched.
    pub fn filter(
        &self,
        locale: &str,
        path: &str,
        entity: Option<&str>,
    ) -> Result<FilterAction, FilterConfigError> {
        let action = if self.all_locales().iter().any(|known| known == locale) {
            self.resolve(locale, path, entity)?
                .unwrap_or(FilterAction::Ignore)
        } else {
            FilterAction::Ignore
        };
        trace_filter_decision(locale, path, entity, action);
        Ok(action)
    }

    fn resolve(
        &self,
        locale: &str,
        path: &str,
        entity: Option<&str>,
    ) -> Result<Option<FilterAction>, FilterConfigError> {
        for exclude in &self.excludes {
            if exclude.filter(locale, path, None)? == FilterAction::Error {
                trace_exclude_hit(locale, path);
                return Ok(Some(FilterAction::Error));
            }
        }

        let mut strongest = None;
        for child in &self.children {
            strongest = strongest.max(child.resolve(locale, path, entity)?);
        }
        let own = self.cache(locale).decide(path, entity)?;
        Ok(strongest.max(own))
    }

    fn cache(&self, locale: &str) -> Arc<FilterCache> {
        let mut caches = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cache) = caches.get(locale) {
            return Arc::clone(cache);
        }
        let cache = Arc::new(FilterCache::build(locale, &self.paths, &self.rules));
        caches.insert(locale.to_owned(), Arc::clone(&cache));
        cache
    }

    /// Structural equality that ignores locales.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.path == other.path
            && self.root == other.root
            && self.paths == other.paths
            && self.rules == other.rules
            && self.environment == other.environment
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(mine, theirs)| mine.same(theirs))
    }
}

/// Iterator returned by [`ProjectConfig::configs`].
#[derive(Debug)]
pub struct Configs<'a> {
    stack: Vec<&'a ProjectConfig>,
}

impl<'a> Iterator for Configs<'a> {
    type Item = &'a ProjectConfig;

    fn next(&mut self) -> Option<Self::Item> {
        let config = self.stack.pop()?;
        self.stack.extend(config.children.iter().rev());
        Some(config)
    }
}
