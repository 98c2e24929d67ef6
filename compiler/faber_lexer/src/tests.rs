use super::*;
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src)
        .unwrap_or_else(|e| panic!("lex failed: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("fixum numerus n = 1"),
        vec![
            TokenKind::Fixum,
            TokenKind::Ident("numerus".into()),
            TokenKind::Ident("n".into()),
            TokenKind::Eq,
            TokenKind::Int(1),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn ranges_do_not_lex_as_floats() {
    assert_eq!(
        kinds("0..10 usque 1.5"),
        vec![
            TokenKind::Int(0),
            TokenKind::DotDot,
            TokenKind::Int(10),
            TokenKind::Usque,
            TokenKind::Float(1.5f64.to_bits()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn optional_and_non_null_access() {
    assert_eq!(
        kinds("a?.b?[0]!.c![1]?(x)"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::QuestionDot,
            TokenKind::Ident("b".into()),
            TokenKind::QuestionBracket,
            TokenKind::Int(0),
            TokenKind::RBracket,
            TokenKind::BangDot,
            TokenKind::Ident("c".into()),
            TokenKind::BangBracket,
            TokenKind::Int(1),
            TokenKind::RBracket,
            TokenKind::QuestionParen,
            TokenKind::Ident("x".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn hex_and_underscore_integers() {
    assert_eq!(
        kinds("0xff 1_000"),
        vec![TokenKind::Int(255), TokenKind::Int(1000), TokenKind::Eof]
    );
}

#[test]
fn strings_are_unescaped_templates_are_raw() {
    assert_eq!(
        kinds(r#""a\nb" `x ${y}\n`"#),
        vec![
            TokenKind::Str("a\nb".into()),
            TokenKind::Template("x ${y}\\n".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("redde # done\n"),
        vec![TokenKind::Redde, TokenKind::Eof]
    );
}

#[test]
fn newline_flag_marks_line_starts() {
    let tokens = lex("a\n(b)").unwrap_or_else(|e| panic!("lex failed: {e}"));
    assert!(!tokens[0].newline_before);
    assert!(tokens[1].newline_before);
    assert!(!tokens[2].newline_before);
}

#[test]
fn unterminated_string_is_reported() {
    let err = lex("scribe \"abc").err();
    assert_eq!(err.map(|e| e.kind), Some(LexErrorKind::UnterminatedString));
}

#[test]
fn int_overflow_is_reported() {
    let err = lex("99999999999999999999").err();
    assert_eq!(err.map(|e| e.kind), Some(LexErrorKind::IntOverflow));
}

#[test]
fn spans_are_byte_offsets() {
    let tokens = lex("si x").unwrap_or_else(|e| panic!("lex failed: {e}"));
    assert_eq!(tokens[1].span, Span::new(3, 4));
    assert_eq!(tokens[2].span, Span::point(4));
}
