use std::collections::HashSet;
use std::fmt::Write as _;

use crate::Pattern;
use crate::env::{Environment, Scope};

/// Capture group and binding name of the `id`-th wildcard.
pub(crate) fn star_group(id: usize) -> String {
    format!("s{id}")
}

/// Capture group name of a variable.
///
/// The prefix keeps variable groups apart from wildcard groups and lets
/// names start with a digit.
pub(crate) fn variable_group(name: &str) -> String {
    format!("v_{name}")
}

/// Maps a capture group name back to its binding name.
pub(crate) fn binding_name(group: &str) -> &str {
    group.strip_prefix("v_").unwrap_or(group)
}

/// Accumulates the regex source for one pattern.
pub(crate) struct RegexWriter<'a> {
    pub(crate) scope: Scope<'a>,
    pub(crate) out: String,
    groups: HashSet<String>,
}

impl<'a> RegexWriter<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self {
            scope,
            out: String::new(),
            groups: HashSet::new(),
        }
    }

    pub(crate) fn has_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Opens a named group, or a plain group when the name is already taken.
    pub(crate) fn open_group(&mut self, group: String) {
        if self.groups.contains(&group) {
            self.out.push_str("(?:");
        } else {
            let _ = write!(self.out, "(?P<{group}>");
            self.groups.insert(group);
        }
    }

    pub(crate) fn close_group(&mut self) {
        self.out.push(')');
    }

    pub(crate) fn backreference(&mut self, group: &str) {
        let _ = write!(self.out, "\\k<{group}>");
    }

    pub(crate) fn literal(&mut self, text: &str) {
        self.out.push_str(&regex::escape(text));
    }
}

/// Builds the anchored regex source for `pattern` under `env`.
pub(crate) fn regex_source(pattern: &Pattern, env: &Environment) -> String {
    let mut writer = RegexWriter::new(Scope::new(env));
    writer.out.push('^');
    pattern.write_regex(&mut writer);
    writer.out.push('$');
    writer.out
}
