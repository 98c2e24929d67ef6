//! Faber type annotation.
//!
//! A light stand-in for full semantic analysis: it resolves declared types
//! (variables, parameters, `genus` fields, `discretio` unions, aliases) and
//! propagates them through expressions with local inference, filling
//! `Expr::ty`. Expressions it cannot type keep `ty == None`; downstream
//! stages must cope with that.

mod annotate;
mod decls;

use faber_ir::{Folder, Program};
use tracing::debug;

use annotate::Annotator;
use decls::Declarations;

/// Return a copy of `program` with resolved types attached where known.
#[tracing::instrument(level = "debug", skip_all)]
pub fn annotate(program: Program) -> Program {
    let decls = Declarations::collect(&program);
    let mut annotator = Annotator::new(decls);
    let program = annotator.fold_program(program);
    debug!(annotated = annotator.annotated, "resolved expression types");
    program
}

#[cfg(test)]
mod tests;
