//! Faber Compiler Driver
//!
//! Wires the upstream stages to the lowering engine:
//!
//! ```text
//! source ──► faber_parse::parse ──► faber_types::annotate ──► faber_codegen::generate
//!    │
//!    └─────► faber_fmt::format_source (fmt command)
//! ```
//!
//! The binary (`faber`) is a thin argument dispatcher over [`commands`].

pub mod args;
pub mod commands;
pub mod diagnostic;

use std::sync::Once;

use faber_codegen::{CodegenError, CodegenOptions};
use faber_fmt::FormatError;
use faber_ir::Span;
use faber_parse::ParseError;
use tracing::instrument;

/// Any failure between source text and generated output.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Parse(e) => e.span,
            CompileError::Codegen(e) => e.span(),
            CompileError::Format(e) => e.span(),
        }
    }

    /// Short label for the primary span.
    pub fn label(&self) -> &'static str {
        match self {
            CompileError::Parse(_) | CompileError::Format(_) => "syntax error here",
            CompileError::Codegen(CodegenError::Unsupported { .. }) => "no translation for this",
            CompileError::Codegen(CodegenError::Misplaced { .. }) => "not allowed here",
        }
    }

    pub fn help(&self) -> Option<&str> {
        match self {
            CompileError::Parse(e) | CompileError::Format(FormatError::Parse(e)) => e.hint(),
            CompileError::Codegen(e) => e.suggestion(),
        }
    }
}

/// Parse, annotate and lower one source text.
#[instrument(level = "debug", skip_all, fields(target = %options.target))]
pub fn compile_source(source: &str, options: &CodegenOptions) -> Result<String, CompileError> {
    let program = faber_parse::parse(source)?;
    let program = faber_types::annotate(program);
    Ok(faber_codegen::generate(&program, options)?)
}

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber. Only does anything when `RUST_LOG` is set,
/// e.g. `RUST_LOG=faber_codegen=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_codegen::Target;

    #[test]
    fn compiles_through_every_stage() {
        let out = compile_source("fixum x = 1\n", &CodegenOptions::new(Target::Python));
        assert!(matches!(out.as_deref(), Ok(text) if text.contains("x = 1")));
    }

    #[test]
    fn parse_errors_carry_their_span() {
        let Err(err) = compile_source("fixum = 1", &CodegenOptions::default()) else {
            panic!("expected a parse error");
        };
        assert!(matches!(err, CompileError::Parse(_)));
        assert_eq!(err.label(), "syntax error here");
        assert_eq!(err.span().start, 6);
    }
}
