//! The `compile` command: lower Faber files to the selected target.

use std::path::{Path, PathBuf};

use faber_codegen::{CodegenOptions, Target};
use rayon::prelude::*;
use tracing::debug;

use super::{read_file, use_colors};
use crate::args::parse_compile_args;
use crate::{compile_source, diagnostic};

/// Where the output for `input` goes, or `None` for stdout.
///
/// With several inputs `output` names a directory and each file keeps its
/// stem with the target's extension.
pub fn output_path(input: &Path, output: Option<&Path>, many: bool, target: Target) -> Option<PathBuf> {
    let output = output?;
    if !many {
        return Some(output.to_path_buf());
    }
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = PathBuf::from(stem);
    name.set_extension(target.extension());
    Some(output.join(name))
}

/// Compile one file; the error is already rendered for the terminal.
fn compile_file(path: &Path, options: &CodegenOptions, color: bool) -> Result<String, String> {
    let source = read_file(path)?;
    compile_source(&source, options)
        .map_err(|e| diagnostic::render(&path.display().to_string(), &source, &e, color))
}

pub fn run_compile(args: &[String]) {
    let parsed = match parse_compile_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_compile_help();
            std::process::exit(1);
        }
    };

    let many = parsed.inputs.len() > 1;
    if let (true, Some(dir)) = (many, parsed.output.as_deref()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("error creating '{}': {e}", dir.display());
            std::process::exit(1);
        }
    }

    let color = use_colors();
    let results: Vec<_> = parsed
        .inputs
        .par_iter()
        .map(|path| (path, compile_file(path, &parsed.options, color)))
        .collect();

    let mut failures = 0usize;
    for (path, result) in results {
        match result {
            Ok(code) => {
                match output_path(path, parsed.output.as_deref(), many, parsed.options.target) {
                    Some(out) => {
                        debug!(input = %path.display(), output = %out.display(), "writing");
                        if let Err(e) = std::fs::write(&out, code) {
                            eprintln!("error writing '{}': {e}", out.display());
                            failures += 1;
                        }
                    }
                    None => print!("{code}"),
                }
            }
            Err(rendered) => {
                eprint!("{rendered}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!(
            "error: {failures} of {} file(s) failed to compile",
            parsed.inputs.len()
        );
        std::process::exit(1);
    }
}

fn print_compile_help() {
    eprintln!("Usage: faber compile <file.fab>... [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --target=<name>        Output language: ts, py, zig, fab (default: ts)");
    eprintln!("  --indent=<n|tab>       Indentation unit (default: 4 spaces)");
    eprintln!("  --semicolons=<bool>    Statement terminators where optional");
    eprintln!("  --no-semicolons        Same as --semicolons=false");
    eprintln!("  -o <path>              Output file, or directory for several inputs");
}
