//! Faber Compiler CLI

use faberc::commands::{lex_file, list_targets, parse_file, run_compile, run_format};

fn main() {
    faberc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "compile" => {
            run_compile(&args[2..]);
        }
        "fmt" => {
            run_format(&args[2..]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: faber parse <file.fab>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: faber lex <file.fab>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "targets" => {
            list_targets();
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("faber {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Faber Compiler");
    println!();
    println!("Usage: faber <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <file.fab>...   Lower Faber source to TypeScript, Python or Zig");
    println!("  fmt <file.fab>...       Rewrite files in canonical form (--check to verify)");
    println!("  parse <file.fab>        Dump the annotated syntax tree");
    println!("  lex <file.fab>          Dump the token stream");
    println!("  targets                 List output languages");
    println!("  help                    Show this message");
    println!("  version                 Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=faber_codegen=debug) for tracing output.");
}
