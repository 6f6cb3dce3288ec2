use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::compiler;
use crate::env::{Flow, Render, Scope};
use crate::error::PatternError;
use crate::node::Node;
use crate::regex_writer::RegexWriter;

/// A compiled path pattern.
///
/// Patterns are immutable. The optional root is an absolute directory with a
/// trailing `/` that is prepended to matches and expansions unless the
/// pattern itself already starts with `/`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pattern {
    nodes: Vec<Node>,
    root: Option<String>,
    prefix_length: usize,
}

impl Pattern {
    /// Compiles pattern text.
    ///
    /// Parsing never fails: text that is not a wildcard or a well-formed
    /// `{name}` token is taken literally.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        compiler::compile(source)
    }

    /// A pattern matching exactly `text`, with no wildcards or variables.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Node::Literal(text.into())], None, 1)
    }

    pub(crate) const fn from_parts(
        nodes: Vec<Node>,
        root: Option<String>,
        prefix_length: usize,
    ) -> Self {
        Self {
            nodes,
            root,
            prefix_length,
        }
    }

    /// Returns the compiled node sequence.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the root directory, if one is set.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Index of the first wildcard node, or [`len`](Self::len) without one.
    #[must_use]
    pub const fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the pattern has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` when the pattern contains `*` or `**`.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.nodes.iter().any(Node::is_wildcard)
    }

    /// Returns `true` when some variable occurs more than once.
    #[must_use]
    pub fn has_repeated_variables(&self) -> bool {
        self.nodes.iter().any(Node::is_repeat)
    }

    /// Distinct variable names in order of first occurrence.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|node| !node.is_repeat())
            .filter_map(Node::variable_name)
    }

    pub(crate) fn with_root(mut self, root: Option<String>) -> Self {
        self.root = root;
        self
    }

    /// The nodes before the first wildcard, keeping the root.
    pub(crate) fn head(&self) -> Self {
        let nodes = self.nodes[..self.prefix_length].to_vec();
        let prefix_length = nodes.len();
        Self::from_parts(nodes, self.root.clone(), prefix_length)
    }

    /// Appends `other` to this pattern.
    ///
    /// Wildcards of `other` are renumbered after this pattern's and repeat
    /// flags are recomputed over the joined sequence.
    pub(crate) fn concat(&self, other: &Self) -> Result<Self, PatternError> {
        if other.root.is_some() {
            return Err(PatternError::RootedConcat);
        }
        let offset = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Star(id) | Node::StarStar { id, .. } => Some(*id),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut seen = HashSet::new();
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .chain(other.nodes.iter().cloned().map(|node| match node {
                Node::Star(id) => Node::Star(id + offset),
                Node::StarStar { id, suffix } => Node::StarStar {
                    id: id + offset,
                    suffix,
                },
                node => node,
            }))
            .map(|node| match node {
                Node::Variable { name, .. } => Node::Variable {
                    repeat: !seen.insert(name.clone()),
                    name,
                },
                Node::AndroidLocale { .. } => Node::AndroidLocale {
                    repeat: !seen.insert(crate::ANDROID_LOCALE.to_owned()),
                },
                node => node,
            })
            .collect();

        let prefix_length = if self.has_wildcard() {
            self.prefix_length
        } else {
            self.prefix_length + other.prefix_length
        };
        Ok(Self::from_parts(nodes, self.root.clone(), prefix_length))
    }

    /// Whether the first node, expanded as far as possible, starts with `/`.
    fn leading_slash<'a>(&'a self, scope: &mut Scope<'a>) -> bool {
        let Some(first) = self.nodes.first() else {
            return false;
        };
        let mut text = String::new();
        let _ = first.render(scope, Render::Halt, &mut text);
        text.starts_with('/')
    }

    pub(crate) fn write_regex<'a>(&'a self, writer: &mut RegexWriter<'a>) {
        if let Some(root) = &self.root
            && !self.leading_slash(&mut writer.scope)
        {
            writer.literal(root);
        }
        self.write_nodes_regex(writer);
    }

    pub(crate) fn write_nodes_regex<'a>(&'a self, writer: &mut RegexWriter<'a>) {
        for node in &self.nodes {
            node.write_regex(writer);
        }
    }

    pub(crate) fn render_nodes<'a>(
        &'a self,
        scope: &mut Scope<'a>,
        mode: Render,
        out: &mut String,
    ) -> Flow {
        for node in &self.nodes {
            if let Flow::Halt(name) = node.render(scope, mode, out) {
                return Flow::Halt(name);
            }
        }
        Flow::Continue
    }

    /// Renders the whole pattern, root included.
    ///
    /// In [`Render::Halt`] mode the output holds everything emitted before
    /// the first unresolved node.
    pub(crate) fn render<'a>(&'a self, mut scope: Scope<'a>, mode: Render) -> (String, Flow) {
        let mut out = String::new();
        if let Some(root) = &self.root
            && !self.leading_slash(&mut scope)
        {
            out.push_str(root);
        }
        let flow = self.render_nodes(&mut scope, mode, &mut out);
        (out, flow)
    }
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(source))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Conversion into a compiled [`Pattern`].
///
/// Text is compiled; patterns and matchers convert without recompiling.
pub trait IntoPattern {
    /// Performs the conversion.
    fn into_pattern(self) -> Pattern;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Pattern {
        self
    }
}

impl IntoPattern for &Pattern {
    fn into_pattern(self) -> Pattern {
        self.clone()
    }
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Pattern {
        Pattern::parse(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Pattern {
        Pattern::parse(&self)
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> Pattern {
        Pattern::parse(self)
    }
}
