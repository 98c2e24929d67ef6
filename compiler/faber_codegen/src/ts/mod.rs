//! TypeScript backend.
//!
//! Statements come back fully indented with their trailing newline;
//! expressions come back as bare fragments. Stream verbs lower to an inner
//! generator of `Responsum` records unwrapped by `__fiunt` / `__fient`.

mod expr;
mod preamble;
mod stmt;
mod types;

use faber_ir::Program;

use crate::decls::DeclIndex;
use crate::emit::{self, Indent};
use crate::features::TsFeatures;
use crate::scope::Scope;
use crate::{Backend, CodegenError, CodegenOptions};

pub(crate) struct TsGen {
    indent: Indent,
    semicolons: bool,
    decls: DeclIndex,
    features: TsFeatures,
    temps: usize,
}

impl TsGen {
    pub(crate) fn new(program: &Program, options: &CodegenOptions) -> Self {
        TsGen {
            indent: Indent::new(&options.indent),
            semicolons: options.semicolons,
            decls: DeclIndex::build(program),
            features: TsFeatures::empty(),
            temps: 0,
        }
    }

    fn semi(&self) -> &'static str {
        if self.semicolons {
            ";"
        } else {
            ""
        }
    }

    fn fresh_temp(&mut self) -> String {
        let name = format!("_tmp{}", self.temps);
        self.temps += 1;
        name
    }

    fn require(&mut self, features: TsFeatures) {
        self.features |= features;
    }

    fn line(&self, scope: Scope, text: &str) -> String {
        self.indent.line(scope.depth, text)
    }

    /// A line ending in a statement terminator.
    fn stmt_line(&self, scope: Scope, text: &str) -> String {
        self.indent.line(scope.depth, &format!("{text}{}", self.semi()))
    }
}

impl Backend for TsGen {
    fn gen_body(&mut self, program: &Program) -> Result<String, CodegenError> {
        let scope = Scope::top();
        let mut items = Vec::with_capacity(program.body.len());
        for stmt in &program.body {
            let text = self.gen_stmt(stmt, scope)?;
            items.push((emit::is_block_declaration(&stmt.kind), text));
        }
        Ok(emit::join_module(items))
    }

    fn into_preamble(self) -> String {
        preamble::render(self.features, self.indent.unit())
    }
}

#[cfg(test)]
mod tests;
