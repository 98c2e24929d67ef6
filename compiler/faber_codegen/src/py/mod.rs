//! Python backend.
//!
//! Python has no block statements and no multi-statement lambdas, so block
//! and async lambda bodies are hoisted into local `def`s emitted just before
//! the statement that uses them. Stream verbs lower to an inner generator
//! `__corpus` unwrapped by `_fiunt` / `_fient`.

mod expr;
mod preamble;
mod stmt;
mod types;

use faber_ir::Program;

use crate::decls::DeclIndex;
use crate::emit::{self, Indent};
use crate::features::PyFeatures;
use crate::scope::Scope;
use crate::{Backend, CodegenError, CodegenOptions};

pub(crate) struct PyGen {
    indent: Indent,
    decls: DeclIndex,
    features: PyFeatures,
    temps: usize,
    lambdas: usize,
    /// Definitions waiting to be emitted ahead of the current statement.
    hoisted: Vec<String>,
}

impl PyGen {
    pub(crate) fn new(program: &Program, options: &CodegenOptions) -> Self {
        PyGen {
            indent: Indent::new(&options.indent),
            decls: DeclIndex::build(program),
            features: PyFeatures::empty(),
            temps: 0,
            lambdas: 0,
            hoisted: Vec::new(),
        }
    }

    fn fresh_temp(&mut self) -> String {
        let name = format!("_tmp{}", self.temps);
        self.temps += 1;
        name
    }

    fn fresh_lambda(&mut self) -> String {
        let name = format!("_lambda{}", self.lambdas);
        self.lambdas += 1;
        name
    }

    fn require(&mut self, features: PyFeatures) {
        self.features |= features;
    }

    fn line(&self, scope: Scope, text: &str) -> String {
        self.indent.line(scope.depth, text)
    }
}

impl Backend for PyGen {
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
