//! Command handlers for the `faber` binary.
//!
//! Each submodule implements one command. Shared helpers live here.

mod compile;
mod debug;
mod fmt;
mod targets;

use std::io::IsTerminal;
use std::path::Path;

pub use compile::{output_path, run_compile};
pub use debug::{lex_file, parse_file};
pub use fmt::{format_file, run_format, FormatResult};
pub use targets::list_targets;

/// Read a source file, describing the failure in user terms.
pub fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.display();
        match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {e}"),
        }
    })
}

/// Read a file for a single-file command, exiting on failure.
pub(crate) fn read_file_or_exit(path: &str) -> String {
    match read_file(Path::new(path)) {
        Ok(content) => content,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn use_colors() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
