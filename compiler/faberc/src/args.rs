//! Command-line option parsing for `compile` and `fmt`.
//!
//! Flags take the `--name=value` form; `-o` takes the next argument. Anything
//! not starting with `-` is an input path.

use std::path::PathBuf;

use faber_codegen::{parse_indent, CodegenOptions, OptionsError, Target};
use faber_fmt::FormatOptions;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("`{0}` needs a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{flag}`: {expected}")]
    InvalidValue {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("no input files")]
    NoInputs,
}

/// Arguments of `faber compile`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileArgs {
    pub inputs: Vec<PathBuf>,
    pub options: CodegenOptions,
    /// Output file for one input, output directory for several.
    pub output: Option<PathBuf>,
}

/// Arguments of `faber fmt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatArgs {
    pub inputs: Vec<PathBuf>,
    pub options: FormatOptions,
    /// Report unformatted files instead of rewriting them.
    pub check: bool,
}

fn parse_bool(flag: &'static str, value: &str) -> Result<bool, CliError> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CliError::InvalidValue {
            flag,
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}

fn parse_count(flag: &'static str, value: &str) -> Result<usize, CliError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::InvalidValue {
            flag,
            value: value.to_string(),
            expected: "a positive number",
        }),
    }
}

pub fn parse_compile_args(args: &[String]) -> Result<CompileArgs, CliError> {
    let mut inputs = Vec::new();
    let mut target = Target::TypeScript;
    let mut indent = None;
    let mut semicolons = None;
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-o" {
            let path = iter.next().ok_or(CliError::MissingValue("-o"))?;
            output = Some(PathBuf::from(path));
        } else if let Some(value) = arg.strip_prefix("--target=") {
            target = value.parse()?;
        } else if let Some(value) = arg.strip_prefix("--indent=") {
            indent = Some(parse_indent(value)?);
        } else if let Some(value) = arg.strip_prefix("--semicolons=") {
            semicolons = Some(parse_bool("--semicolons", value)?);
        } else if arg == "--semicolons" {
            semicolons = Some(true);
        } else if arg == "--no-semicolons" {
            semicolons = Some(false);
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownFlag(arg.clone()));
        } else {
            inputs.push(PathBuf::from(arg));
        }
    }
    if inputs.is_empty() {
        return Err(CliError::NoInputs);
    }

    let mut options = CodegenOptions::new(target);
    if let Some(indent) = indent {
        options = options.with_indent(indent);
    }
    if let Some(semicolons) = semicolons {
        options = options.with_semicolons(semicolons);
    }
    Ok(CompileArgs {
        inputs,
        options,
        output,
    })
}

pub fn parse_format_args(args: &[String]) -> Result<FormatArgs, CliError> {
    let mut inputs = Vec::new();
    let mut options = FormatOptions::default();
    let mut check = false;

    for arg in args {
        if arg == "--check" {
            check = true;
        } else if let Some(value) = arg.strip_prefix("--indent=") {
            options = options.with_indent(parse_indent(value)?);
        } else if let Some(value) = arg.strip_prefix("--width=") {
            options = options.with_width(parse_count("--width", value)?);
        } else if let Some(value) = arg.strip_prefix("--break-threshold=") {
            options = options.with_break_threshold(parse_count("--break-threshold", value)?);
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownFlag(arg.clone()));
        } else {
            inputs.push(PathBuf::from(arg));
        }
    }
    if inputs.is_empty() {
        return Err(CliError::NoInputs);
    }
    Ok(FormatArgs {
        inputs,
        options,
        check,
    })
}
