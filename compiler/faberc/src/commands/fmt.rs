//! The `fmt` command: rewrite Faber files in canonical form.
//!
//! Files are formatted in parallel. With `--check` nothing is written and the
//! command fails if any file would change.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use faber_fmt::{format_source, FormatOptions};
use rayon::prelude::*;

use super::{read_file, use_colors};
use crate::args::parse_format_args;
use crate::{diagnostic, CompileError};

/// Result of formatting a single file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatResult {
    /// Already canonical.
    Unchanged,
    /// Rewritten in place.
    Formatted,
    /// Would be rewritten (check mode).
    WouldFormat,
    /// Could not be read or parsed; holds the rendered message.
    Failed(String),
}

/// Format one file, writing it back unless `check` is set.
pub fn format_file(path: &Path, options: &FormatOptions, check: bool, color: bool) -> FormatResult {
    let content = match read_file(path) {
        Ok(content) => content,
        Err(msg) => return FormatResult::Failed(format!("{msg}\n")),
    };
    let formatted = match format_source(&content, options) {
        Ok(formatted) => formatted,
        Err(e) => {
            let error = CompileError::from(e);
            return FormatResult::Failed(diagnostic::render(
                &path.display().to_string(),
                &content,
                &error,
                color,
            ));
        }
    };

    if formatted == content {
        return FormatResult::Unchanged;
    }
    if check {
        return FormatResult::WouldFormat;
    }
    if let Err(e) = std::fs::write(path, &formatted) {
        return FormatResult::Failed(format!("error writing '{}': {e}\n", path.display()));
    }
    FormatResult::Formatted
}

pub fn run_format(args: &[String]) {
    let parsed = match parse_format_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_fmt_help();
            std::process::exit(1);
        }
    };

    let formatted_count = AtomicUsize::new(0);
    let unchanged_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);
    let color = use_colors();

    parsed.inputs.par_iter().for_each(|path| {
        match format_file(path, &parsed.options, parsed.check, color) {
            FormatResult::Formatted => {
                println!("Formatted: {}", path.display());
                formatted_count.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::WouldFormat => {
                println!("Would format: {}", path.display());
                formatted_count.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::Unchanged => {
                unchanged_count.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::Failed(message) => {
                eprint!("{message}");
                error_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    let formatted = formatted_count.load(Ordering::Relaxed);
    let unchanged = unchanged_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if parsed.inputs.len() > 1 {
        let verb = if parsed.check { "would be formatted" } else { "formatted" };
        println!("{formatted} file(s) {verb}, {unchanged} unchanged, {errors} error(s)");
    }
    if errors > 0 || (parsed.check && formatted > 0) {
        std::process::exit(1);
    }
}

fn print_fmt_help() {
    eprintln!("Usage: faber fmt <file.fab>... [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --check                  Fail if any file is not formatted; write nothing");
    eprintln!("  --indent=<n|tab>         Indentation unit (default: 4 spaces)");
    eprintln!("  --width=<n>              Line width (default: 100)");
    eprintln!("  --break-threshold=<n>    Lists longer than this always break (default: 5)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_files_fail_without_panicking() {
        let result = format_file(
            Path::new("/nonexistent/faber/none.fab"),
            &FormatOptions::default(),
            true,
            false,
        );
        assert_eq!(
            result,
            FormatResult::Failed("cannot find file '/nonexistent/faber/none.fab'\n".to_string())
        );
    }
}
