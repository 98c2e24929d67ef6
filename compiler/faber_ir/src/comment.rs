//! Source comments.
//!
//! Comments never reach the parser. The canonical printer recovers them with a
//! raw scan of the source text and attaches each one to a node by position;
//! the result is a [`CommentMap`] keyed by the span of the anchoring node.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::Span;

/// Where a comment sits relative to the node it is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// On its own line(s) before the node.
    #[default]
    Leading,
    /// After the node, on the node's last line.
    Trailing,
    /// Inside an otherwise empty container, or after its last member.
    Dangling,
}

/// A `#` line comment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    /// Text after the `#`, trailing whitespace removed.
    pub text: String,
    /// Span covering the `#` through end of line.
    pub span: Span,
    pub placement: Placement,
    /// A blank line separated this comment from whatever preceded it.
    pub blank_before: bool,
}

impl Comment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Comment {
            text: text.into(),
            span,
            placement: Placement::Leading,
            blank_before: false,
        }
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?} @ {} ({:?})", self.text, self.span, self.placement)
    }
}

/// Comments grouped by the span of the node they attach to.
#[derive(Clone, Debug, Default)]
pub struct CommentMap {
    leading: FxHashMap<Span, Vec<Comment>>,
    trailing: FxHashMap<Span, Vec<Comment>>,
    dangling: FxHashMap<Span, Vec<Comment>>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `comment` against `anchor`. The comment's placement selects the bucket.
    pub fn insert(&mut self, anchor: Span, comment: Comment) {
        let bucket = match comment.placement {
            Placement::Leading => &mut self.leading,
            Placement::Trailing => &mut self.trailing,
            Placement::Dangling => &mut self.dangling,
        };
        bucket.entry(anchor).or_default().push(comment);
    }

    pub fn leading(&self, anchor: Span) -> &[Comment] {
        self.leading.get(&anchor).map_or(&[], Vec::as_slice)
    }

    pub fn trailing(&self, anchor: Span) -> &[Comment] {
        self.trailing.get(&anchor).map_or(&[], Vec::as_slice)
    }

    pub fn dangling(&self, anchor: Span) -> &[Comment] {
        self.dangling.get(&anchor).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.leading.values().map(Vec::len).sum::<usize>()
            + self.trailing.values().map(Vec::len).sum::<usize>()
            + self.dangling.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
