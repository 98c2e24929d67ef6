//! Faber Formatter
//!
//! Canonical printer for Faber source. The same printer serves two callers:
//! `faber fmt` (source in, source out, comments and blank lines preserved)
//! and the canonical lowering target (tree in, source out).
//!
//! # Architecture
//!
//! 1. **Parse**: the upstream parser builds the tree; a raw scan recovers the
//!    comments and [`comments::attach`] assigns each to a node.
//! 2. **Print**: the tree becomes a [`Doc`] of layout primitives.
//! 3. **Layout**: [`layout::render`] decides which groups fit on a line.
//!
//! Printing guarantees a semantic round trip: re-parsing the output yields
//! the original tree up to spans, comments and whitespace.
//!
//! # Modules
//!
//! - [`doc`]: layout primitives and builders
//! - [`layout`]: the group-fits layout engine
//! - [`comments`]: comment attachment
//! - [`plugin`]: the parse/print/location interface and the Faber plugin

pub mod comments;
pub mod doc;
pub mod layout;
pub mod plugin;
mod printer;

use faber_ir::{CommentMap, Program, Span};
use faber_parse::ParseError;
use tracing::instrument;

pub use doc::Doc;
pub use layout::LayoutOptions;
pub use plugin::{format_with, CanonicalPlugin, FormatPlugin, ParsedSource};

/// Default maximum line width.
pub const MAX_LINE_WIDTH: usize = 100;

/// Lists with more items than this break one item per line by default.
pub const DEFAULT_BREAK_THRESHOLD: usize = 5;

/// Printer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// One level of indentation.
    pub indent: String,
    pub width: usize,
    /// Lists and parameter lists with more items than this always break.
    pub break_threshold: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent: "    ".to_string(),
            width: MAX_LINE_WIDTH,
            break_threshold: DEFAULT_BREAK_THRESHOLD,
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_break_threshold(mut self, threshold: usize) -> Self {
        self.break_threshold = threshold;
        self
    }

    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            width: self.width,
            indent: self.indent.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FormatError {
    pub fn span(&self) -> Span {
        match self {
            FormatError::Parse(e) => e.span,
        }
    }
}

/// Format Faber source text, keeping its comments and blank lines.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    format_with(&CanonicalPlugin, source, options)
}

/// Print a tree as canonical Faber source. There are no comments to keep,
/// and declarations are set apart by blank lines.
#[instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
pub fn print_program(program: &Program, options: &FormatOptions) -> String {
    let comments = CommentMap::new();
    let doc = printer::Printer::new(options, &comments, None).program(program);
    layout::render(&doc, &options.layout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_methods() {
        let options = FormatOptions::default()
            .with_indent("\t")
            .with_width(60)
            .with_break_threshold(2);
        assert_eq!(options.indent, "\t");
        assert_eq!(
            options.layout(),
            LayoutOptions {
                width: 60,
                indent: "\t".to_string()
            }
        );
        assert_eq!(options.break_threshold, 2);
    }

    #[test]
    fn error_span_points_at_the_problem() {
        let Err(err) = format_source("fixum x = )", &FormatOptions::default()) else {
            panic!("expected a parse error");
        };
        assert_eq!(err.span(), Span::new(10, 11));
    }
}
