//! Terminal rendering of compile errors.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::CompileError;

/// Render `error` against `source` as an annotated snippet.
///
/// The path goes in the headline; spans are clamped into the source and
/// widened to at least one character so the label always has something to
/// point at.
pub fn render(path: &str, source: &str, error: &CompileError, color: bool) -> String {
    let span = error.span();
    let range = clamp(span.start as usize..span.end as usize, source.len());
    let config = Config::default().with_color(color);

    let mut builder = Report::build(ReportKind::Error, range.clone())
        .with_message(format!("{path}: {error}"))
        .with_config(config)
        .with_label(
            Label::new(range)
                .with_message(error.label())
                .with_color(Color::Red),
        );
    if let Some(help) = error.help() {
        builder = builder.with_help(help);
    }

    let mut out = Vec::new();
    if builder.finish().write(Source::from(source), &mut out).is_err() {
        return format!("error: {path}: {error}\n");
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    if start == end {
        start..end.saturating_add(1).min(len)
    } else {
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile_source;
    use faber_codegen::{CodegenOptions, Target};

    fn error_for(source: &str, target: Target) -> CompileError {
        match compile_source(source, &CodegenOptions::new(target)) {
            Ok(out) => panic!("expected an error, got:\n{out}"),
            Err(e) => e,
        }
    }

    #[test]
    fn clamps_into_the_source() {
        assert_eq!(clamp(2..4, 10), 2..4);
        assert_eq!(clamp(3..3, 10), 3..4);
        assert_eq!(clamp(8..20, 10), 8..10);
        assert_eq!(clamp(12..14, 10), 10..10);
    }

    #[test]
    fn parse_errors_name_the_file_and_the_problem() {
        let source = "fixum = 1\n";
        let err = error_for(source, Target::TypeScript);
        let text = render("main.fab", source, &err, false);
        assert!(text.contains("main.fab"), "{text}");
        assert!(text.contains("expected an identifier"), "{text}");
        assert!(text.contains("syntax error here"), "{text}");
        assert!(!text.contains('\u{1b}'), "{text}");
    }

    #[test]
    fn codegen_errors_render_their_label() {
        let err = CompileError::Codegen(faber_codegen::CodegenError::unsupported(
            "object spread",
            Target::Python,
            faber_ir::Span::new(10, 14),
        ));
        let source = "fixum o = {...p}\n";
        let text = render("o.fab", source, &err, false);
        assert!(text.contains("no translation for this"), "{text}");
        assert!(text.contains("o.fab"), "{text}");
    }
}
