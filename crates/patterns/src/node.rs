use std::fmt;

use crate::android;
use crate::env::{Flow, Render, Scope};
use crate::regex_writer::{RegexWriter, star_group, variable_group};

/// Variable name that renders the `locale` binding as an Android qualifier.
pub const ANDROID_LOCALE: &str = "android_locale";

/// Variable name carrying the locale code.
pub const LOCALE: &str = "locale";

/// One fragment of a compiled path pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Text that matches and expands to itself.
    Literal(String),
    /// `*`: any run of characters within one path segment.
    Star(usize),
    /// `**`: zero or more whole path segments, followed by `suffix`.
    StarStar {
        /// Wildcard number, shared with [`Node::Star`].
        id: usize,
        /// `/` when the wildcard is followed by a separator, empty at the end.
        suffix: String,
    },
    /// `{name}`: a named variable.
    Variable {
        /// Variable name.
        name: String,
        /// `true` for every occurrence after the first within one pattern.
        repeat: bool,
    },
    /// `{android_locale}`: the `locale` binding in Android spelling.
    AndroidLocale {
        /// `true` for every occurrence after the first within one pattern.
        repeat: bool,
    },
}

impl Node {
    /// Returns `true` for `*` and `**`.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Star(_) | Self::StarStar { .. })
    }

    /// Returns the variable name for variable nodes.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable { name, .. } => Some(name),
            Self::AndroidLocale { .. } => Some(ANDROID_LOCALE),
            Self::Literal(_) | Self::Star(_) | Self::StarStar { .. } => None,
        }
    }

    /// Returns `true` for second and later occurrences of a variable.
    #[must_use]
    pub const fn is_repeat(&self) -> bool {
        match self {
            Self::Variable { repeat, .. } | Self::AndroidLocale { repeat } => *repeat,
            Self::Literal(_) | Self::Star(_) | Self::StarStar { .. } => false,
        }
    }

    pub(crate) fn write_regex<'a>(&'a self, writer: &mut RegexWriter<'a>) {
        match self {
            Self::Literal(text) => writer.literal(text),
            Self::Star(id) => {
                writer.open_group(star_group(*id));
                writer.out.push_str("[^/]*");
                writer.close_group();
            }
            Self::StarStar { id, suffix } => {
                writer.open_group(star_group(*id));
                writer.out.push_str(".+");
                writer.literal(suffix);
                writer.close_group();
                writer.out.push('?');
            }
            Self::Variable { name, repeat } => {
                let group = variable_group(name);
                if *repeat || writer.has_group(&group) {
                    writer.backreference(&group);
                    return;
                }
                writer.open_group(group);
                match writer.scope.lookup(name) {
                    Some(bound) => {
                        writer.scope.hide(name);
                        bound.write_nodes_regex(writer);
                        writer.scope.unhide();
                    }
                    None => writer.out.push_str(".+?"),
                }
                writer.close_group();
            }
            Self::AndroidLocale { repeat } => {
                let group = variable_group(ANDROID_LOCALE);
                if *repeat || writer.has_group(&group) {
                    writer.backreference(&group);
                    return;
                }
                let code = android_code(&mut writer.scope);
                writer.open_group(group);
                match code {
                    Some(code) => writer.literal(&code),
                    None => writer.out.push_str(".+?"),
                }
                writer.close_group();
            }
        }
    }

    pub(crate) fn render<'a>(
        &'a self,
        scope: &mut Scope<'a>,
        mode: Render,
        out: &mut String,
    ) -> Flow {
        match self {
            Self::Literal(text) => {
                out.push_str(text);
                Flow::Continue
            }
            Self::Star(id) | Self::StarStar { id, .. } => {
                let name = star_group(*id);
                match scope.lookup(&name) {
                    Some(bound) => bound.render_nodes(scope, mode, out),
                    None => unresolved(self, name, mode, out),
                }
            }
            Self::Variable { name, .. } => match scope.lookup(name) {
                Some(bound) => {
                    scope.hide(name);
                    let flow = bound.render_nodes(scope, mode, out);
                    scope.unhide();
                    flow
                }
                None => unresolved(self, name.clone(), mode, out),
            },
            Self::AndroidLocale { .. } => match android_code(scope) {
                Some(code) => {
                    out.push_str(&code);
                    Flow::Continue
                }
                None => unresolved(self, ANDROID_LOCALE.to_owned(), mode, out),
            },
        }
    }
}

fn unresolved(node: &Node, name: String, mode: Render, out: &mut String) -> Flow {
    match mode {
        Render::Halt => Flow::Halt(name),
        Render::Template => {
            out.push_str(&node.to_string());
            Flow::Continue
        }
    }
}

/// Android qualifier derived from the `locale` binding.
///
/// Falls back to a direct `android_locale` binding, which is what captured
/// paths provide when no `locale` is known.
fn android_code<'a>(scope: &mut Scope<'a>) -> Option<String> {
    if let Some(locale) = scope.lookup(LOCALE) {
        scope.hide(ANDROID_LOCALE);
        let mut bcp47 = String::new();
        let flow = locale.render_nodes(scope, Render::Halt, &mut bcp47);
        scope.unhide();
        if flow == Flow::Continue {
            return Some(android::to_android(&bcp47));
        }
    }
    let direct = scope.lookup(ANDROID_LOCALE)?;
    scope.hide(ANDROID_LOCALE);
    let mut code = String::new();
    let flow = direct.render_nodes(scope, Render::Halt, &mut code);
    scope.unhide();
    (flow == Flow::Continue).then_some(code)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Star(_) => f.write_str("*"),
            Self::StarStar { suffix, .. } => write!(f, "**{suffix}"),
            Self::Variable { name, .. } => write!(f, "{{{name}}}"),
            Self::AndroidLocale { .. } => write!(f, "{{{ANDROID_LOCALE}}}"),
        }
    }
}
