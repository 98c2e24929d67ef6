//! Program to [`Doc`].
//!
//! Every statement list and member list goes through [`Printer::sequence`],
//! which places attached comments and decides blank lines. With the original
//! source available, a blank line survives wherever the source had one;
//! without it, declarations are separated from their neighbours by one.

mod expr;
mod stmt;

use faber_ir::{Block, Comment, CommentMap, Program, Span};

use crate::comments::blank_line_between;
use crate::doc::{concat, hardline, indent, text, Doc};
use crate::FormatOptions;

/// One entry of a statement or member list.
pub(crate) struct Item {
    pub span: Span,
    pub doc: Doc,
    /// Declarations get blank lines around them when no source is available.
    pub decl: bool,
}

pub(crate) struct Printer<'a> {
    options: &'a FormatOptions,
    comments: &'a CommentMap,
    source: Option<&'a str>,
}

fn comment_text(comment: &Comment) -> Doc {
    text(format!("#{}", comment.text))
}

impl<'a> Printer<'a> {
    pub(crate) fn new(
        options: &'a FormatOptions,
        comments: &'a CommentMap,
        source: Option<&'a str>,
    ) -> Self {
        Printer {
            options,
            comments,
            source,
        }
    }

    /// Lists longer than the threshold always break.
    fn forced(&self, len: usize) -> bool {
        len > self.options.break_threshold
    }

    pub(crate) fn program(&self, program: &Program) -> Doc {
        let items = program.body.iter().map(|s| self.stmt_item(s)).collect();
        let body = self.sequence(items, program.span);
        if body.is_nil() {
            return body;
        }
        concat(vec![body, hardline()])
    }

    fn blank_between(&self, prev: (Span, bool), next: &Item) -> bool {
        if let Some(first) = self.comments.leading(next.span).first() {
            return first.blank_before;
        }
        match self.source {
            Some(source) => blank_line_between(source, prev.0.end, next.span.start),
            None => prev.1 || next.decl,
        }
    }

    /// Items one per line with their comments, followed by the container's
    /// dangling comments.
    pub(crate) fn sequence(&self, items: Vec<Item>, container: Span) -> Doc {
        let mut parts = Vec::new();
        let mut prev = None;
        for item in items {
            if let Some(prev) = prev {
                parts.push(hardline());
                if self.blank_between(prev, &item) {
                    parts.push(hardline());
                }
            }
            let leading = self.comments.leading(item.span);
            for (i, comment) in leading.iter().enumerate() {
                if i > 0 && comment.blank_before {
                    parts.push(hardline());
                }
                parts.push(comment_text(comment));
                parts.push(hardline());
            }
            if let (Some(last), Some(source)) = (leading.last(), self.source) {
                if blank_line_between(source, last.span.end, item.span.start) {
                    parts.push(hardline());
                }
            }
            parts.push(item.doc);
            for comment in self.comments.trailing(item.span) {
                parts.push(text(" "));
                parts.push(comment_text(comment));
            }
            prev = Some((item.span, item.decl));
        }
        for comment in self.comments.dangling(container) {
            if !parts.is_empty() {
                parts.push(hardline());
                if comment.blank_before {
                    parts.push(hardline());
                }
            }
            parts.push(comment_text(comment));
        }
        concat(parts)
    }

    /// `{ items }`, or `{}` when there is nothing inside.
    pub(crate) fn braced(&self, items: Vec<Item>, container: Span) -> Doc {
        let body = self.sequence(items, container);
        if body.is_nil() {
            return text("{}");
        }
        concat(vec![
            text("{"),
            indent(concat(vec![hardline(), body])),
            hardline(),
            text("}"),
        ])
    }

    pub(crate) fn block(&self, block: &Block) -> Doc {
        let items = block.stmts.iter().map(|s| self.stmt_item(s)).collect();
        self.braced(items, block.span)
    }

    /// Whether anything is attached to these spans or dangles in `container`.
    fn has_comments(&self, spans: impl IntoIterator<Item = Span>, container: Span) -> bool {
        !self.comments.dangling(container).is_empty()
            || spans.into_iter().any(|span| {
                !self.comments.leading(span).is_empty() || !self.comments.trailing(span).is_empty()
            })
    }
}

#[cfg(test)]
mod tests;
