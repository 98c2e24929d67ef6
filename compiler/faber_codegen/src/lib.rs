//! Faber lowering engine.
//!
//! Lowers an analyzed [`Program`] to TypeScript, Python or Zig source, or
//! prints it back as canonical Faber.
//!
//! # Architecture
//!
//! ```text
//! Program (resolved types attached where known)
//!        ↓
//!   DeclIndex          (discretio variants, genera, functions)
//!        ↓
//!   <target> generator (total match per node kind, Scope passed by value)
//!        │  ├─ registry   (collection methods, intrinsics)
//!        │  ├─ protocol   (return verbs, discerne, ranges, optional chains)
//!        │  └─ features   (bitflags, only ever set)
//!        ↓
//!   body text, then preamble from the final feature set
//! ```
//!
//! Each call to [`generate`] builds a fresh generator; nothing is shared
//! between invocations.

pub mod consteval;
pub mod decls;
mod emit;
mod error;
pub mod features;
mod options;
pub mod protocol;
mod py;
pub mod registry;
pub mod scope;
mod ts;
mod zig;

use faber_ir::Program;
use tracing::{debug, instrument};

pub use error::CodegenError;
pub use options::{parse_indent, CodegenOptions, OptionsError, Target};

/// One target's generator.
///
/// `gen_body` walks the whole program and accumulates features; only then
/// can the preamble be decided, so `into_preamble` consumes the generator.
pub(crate) trait Backend {
    fn gen_body(&mut self, program: &Program) -> Result<String, CodegenError>;

    fn into_preamble(self) -> String;
}

fn assemble<B: Backend>(mut backend: B, program: &Program) -> Result<String, CodegenError> {
    let body = backend.gen_body(program)?;
    let preamble = backend.into_preamble();
    if preamble.is_empty() {
        return Ok(body);
    }
    if body.is_empty() {
        return Ok(preamble);
    }
    Ok(format!("{preamble}\n{body}"))
}

/// Lower `program` for `options.target`.
#[instrument(level = "debug", skip_all, fields(target = %options.target))]
pub fn generate(program: &Program, options: &CodegenOptions) -> Result<String, CodegenError> {
    let output = match options.target {
        Target::TypeScript => assemble(ts::TsGen::new(program, options), program),
        Target::Python => assemble(py::PyGen::new(program, options), program),
        Target::Zig => assemble(zig::ZigGen::new(program, options), program),
        Target::Faber => {
            let format = faber_fmt::FormatOptions::default().with_indent(options.indent.clone());
            Ok(faber_fmt::print_program(program, &format))
        }
    }?;
    debug!(bytes = output.len(), "generated");
    Ok(output)
}
