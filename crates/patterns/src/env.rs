use std::collections::BTreeMap;

use crate::Pattern;

/// Variable bindings used to constrain matching and resolve expansion.
pub type Environment = BTreeMap<String, Pattern>;

/// How expansion treats a variable or wildcard without a binding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Render {
    /// Stop emitting and report the unresolved name.
    Halt,
    /// Re-emit the token in pattern syntax and keep going.
    Template,
}

/// Outcome of rendering a node sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Flow {
    Continue,
    Halt(String),
}

/// Read-only view over one or two environments.
///
/// Names currently being expanded are hidden from lookups so a binding can
/// never resolve through itself.
pub(crate) struct Scope<'a> {
    env: &'a Environment,
    fallback: Option<&'a Environment>,
    hidden: Vec<&'a str>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(env: &'a Environment) -> Self {
        Self {
            env,
            fallback: None,
            hidden: Vec::new(),
        }
    }

    /// Bindings in `env` shadow those in `fallback`.
    pub(crate) fn layered(env: &'a Environment, fallback: &'a Environment) -> Self {
        Self {
            env,
            fallback: Some(fallback),
            hidden: Vec::new(),
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&'a Pattern> {
        if self.hidden.iter().any(|hidden| *hidden == name) {
            return None;
        }
        self.env
            .get(name)
            .or_else(|| self.fallback.and_then(|fallback| fallback.get(name)))
    }

    pub(crate) fn hide(&mut self, name: &'a str) {
        self.hidden.push(name);
    }

    pub(crate) fn unhide(&mut self) {
        self.hidden.pop();
    }
}
