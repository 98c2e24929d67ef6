//! Language plugins for the layout engine.
//!
//! The engine itself knows nothing about Faber: a plugin supplies the parse
//! step (tree plus attached comments), the tree-to-[`Doc`] step, and node
//! offsets used to place comments.

use faber_ir::{CommentMap, Program, Spanned};

use crate::doc::Doc;
use crate::printer::Printer;
use crate::{comments, layout, FormatError, FormatOptions};

pub trait FormatPlugin {
    /// Parsed source with whatever the printer needs beyond the tree.
    type Ast;

    fn parse(&self, source: &str) -> Result<Self::Ast, FormatError>;

    fn print(&self, ast: &Self::Ast, options: &FormatOptions) -> Doc;

    /// Byte offset where `node` starts.
    fn loc_start(&self, node: &dyn Spanned) -> u32 {
        node.span().start
    }

    /// Byte offset just past the end of `node`.
    fn loc_end(&self, node: &dyn Spanned) -> u32 {
        node.span().end
    }
}

/// A parsed Faber file ready for printing.
#[derive(Clone, Debug)]
pub struct ParsedSource {
    pub program: Program,
    pub comments: CommentMap,
    pub source: String,
}

/// Plugin for canonical Faber source.
#[derive(Copy, Clone, Debug, Default)]
pub struct CanonicalPlugin;

impl FormatPlugin for CanonicalPlugin {
    type Ast = ParsedSource;

    fn parse(&self, source: &str) -> Result<ParsedSource, FormatError> {
        let program = faber_parse::parse(source)?;
        let comments = comments::attach(&program, comments::scan_comments(source), source);
        Ok(ParsedSource {
            program,
            comments,
            source: source.to_string(),
        })
    }

    fn print(&self, ast: &ParsedSource, options: &FormatOptions) -> Doc {
        Printer::new(options, &ast.comments, Some(&ast.source)).program(&ast.program)
    }
}

/// Parse, print and lay out `source` with `plugin`.
pub fn format_with<P: FormatPlugin>(
    plugin: &P,
    source: &str,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let ast = plugin.parse(source)?;
    let doc = plugin.print(&ast, options);
    Ok(layout::render(&doc, &options.layout()))
}
