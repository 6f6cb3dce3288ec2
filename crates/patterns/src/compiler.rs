use std::collections::HashSet;

use crate::debug_pattern::trace_pattern_compiled;
use crate::node::{ANDROID_LOCALE, Node};
use crate::pattern::Pattern;

/// Single-pass scanner turning pattern text into nodes.
///
/// Recognized tokens are `*`, `**` between separators (or the string
/// boundaries) and `{name}` with optional spaces inside the braces. Anything
/// else, including malformed tokens, is literal text.
struct PatternCompiler<'s> {
    source: &'s str,
    nodes: Vec<Node>,
    literal_start: usize,
    next_wildcard: usize,
    prefix_length: Option<usize>,
    seen: HashSet<&'s str>,
}

impl<'s> PatternCompiler<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            nodes: Vec::new(),
            literal_start: 0,
            next_wildcard: 1,
            prefix_length: None,
            seen: HashSet::new(),
        }
    }

    fn compile(mut self) -> Pattern {
        let bytes = self.source.as_bytes();
        let mut cursor = 0;
        while cursor < bytes.len() {
            cursor = match bytes[cursor] {
                b'*' => self.wildcard(cursor),
                b'{' => self.variable(cursor).unwrap_or(cursor + 1),
                _ => cursor + 1,
            };
        }
        let tail = &self.source[self.literal_start..];
        self.nodes.push(Node::Literal(tail.to_owned()));
        let prefix_length = self.prefix_length.unwrap_or(self.nodes.len());
        trace_pattern_compiled(self.source, self.nodes.len(), prefix_length);
        Pattern::from_parts(self.nodes, None, prefix_length)
    }

    /// Handles a `*` at `start` and returns the position after the token.
    fn wildcard(&mut self, start: usize) -> usize {
        let bytes = self.source.as_bytes();
        let after_separator = start == 0 || bytes[start - 1] == b'/';
        if after_separator && bytes.get(start + 1) == Some(&b'*') {
            match bytes.get(start + 2) {
                None => return self.push_starstar(start, start + 2, ""),
                Some(b'/') => return self.push_starstar(start, start + 3, "/"),
                Some(_) => {}
            }
        }
        self.flush_literal(start);
        self.mark_wildcard();
        let id = self.take_wildcard_id();
        self.nodes.push(Node::Star(id));
        self.literal_start = start + 1;
        start + 1
    }

    fn push_starstar(&mut self, start: usize, end: usize, suffix: &str) -> usize {
        self.flush_literal(start);
        self.mark_wildcard();
        let id = self.take_wildcard_id();
        self.nodes.push(Node::StarStar {
            id,
            suffix: suffix.to_owned(),
        });
        self.literal_start = end;
        end
    }

    /// Handles a `{` at `start`; `None` when no variable token starts there.
    fn variable(&mut self, start: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut cursor = start + 1;
        while bytes.get(cursor) == Some(&b' ') {
            cursor += 1;
        }
        let name_start = cursor;
        while bytes
            .get(cursor)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            cursor += 1;
        }
        let name_end = cursor;
        if name_end == name_start {
            return None;
        }
        while bytes.get(cursor) == Some(&b' ') {
            cursor += 1;
        }
        if bytes.get(cursor) != Some(&b'}') {
            return None;
        }

        self.flush_literal(start);
        let name = &self.source[name_start..name_end];
        let repeat = !self.seen.insert(name);
        if name == ANDROID_LOCALE {
            self.nodes.push(Node::AndroidLocale { repeat });
        } else {
            self.nodes.push(Node::Variable {
                name: name.to_owned(),
                repeat,
            });
        }
        self.literal_start = cursor + 1;
        Some(cursor + 1)
    }

    fn flush_literal(&mut self, end: usize) {
        if end > self.literal_start {
            self.nodes
                .push(Node::Literal(self.source[self.literal_start..end].to_owned()));
        }
    }

    fn mark_wildcard(&mut self) {
        if self.prefix_length.is_none() {
            self.prefix_length = Some(self.nodes.len());
        }
    }

    fn take_wildcard_id(&mut self) -> usize {
        let id = self.next_wildcard;
        self.next_wildcard += 1;
        id
    }
}

/// Compiles pattern text into a [`Pattern`].
pub(crate) fn compile(source: &str) -> Pattern {
    PatternCompiler::new(source).compile()
}
