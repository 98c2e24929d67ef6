//! Debug commands: `parse` and `lex` for inspecting compiler internals.

use super::read_file_or_exit;

/// Parse a file and dump the annotated tree.
pub fn parse_file(path: &str) {
    let content = read_file_or_exit(path);
    match faber_parse::parse(&content) {
        Ok(program) => {
            let program = faber_types::annotate(program);
            println!("Parse result for '{path}' ({} statements):", program.body.len());
            println!("{program:#?}");
        }
        Err(e) => {
            eprintln!("{path}: {} at {}", e, e.span);
            std::process::exit(1);
        }
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file_or_exit(path);
    match faber_lexer::lex(&content) {
        Ok(tokens) => {
            println!("Tokens for '{}' ({} tokens):", path, tokens.len());
            for tok in &tokens {
                let marker = if tok.newline_before { "\u{21b5} " } else { "" };
                println!("  {marker}{:?} @ {}", tok.kind, tok.span);
            }
        }
        Err(e) => {
            eprintln!("{path}: {} at {}", e, e.span);
            std::process::exit(1);
        }
    }
}
