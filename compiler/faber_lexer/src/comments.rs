//! Raw comment scan.
//!
//! The tokenizer discards comments. The canonical printer needs them back, so
//! this module scans the raw text for `#` line comments, jumping over string
//! and template literals (a `#` inside either is content, not a comment).

use faber_ir::{Comment, Span};
use memchr::{memchr, memchr3};

/// Collect every `#` comment in `source`, in source order.
///
/// Unterminated literals are skipped to end of line (strings) or end of file
/// (templates); the tokenizer reports those errors.
pub fn scan_comments(source: &str) -> Vec<Comment> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memchr3(b'#', b'"', b'`', &bytes[pos..]) {
        let at = pos + offset;
        match bytes[at] {
            b'"' => pos = skip_string(bytes, at + 1),
            b'`' => pos = skip_template(bytes, at + 1),
            _ => {
                let end = memchr(b'\n', &bytes[at..]).map_or(bytes.len(), |n| at + n);
                let text = source[at + 1..end].trim_end();
                comments.push(Comment::new(text, span_of(at, at + 1 + text.len())));
                pos = end;
            }
        }
    }
    comments
}

fn span_of(start: usize, end: usize) -> Span {
    Span::new(
        u32::try_from(start).unwrap_or(u32::MAX),
        u32::try_from(end).unwrap_or(u32::MAX),
    )
}

/// Position just past the closing quote, or the end of the line.
fn skip_string(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            b'\n' => return pos,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// Position just past the closing backtick; templates may span lines.
fn skip_template(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(src: &str) -> Vec<String> {
        scan_comments(src).into_iter().map(|c| c.text).collect()
    }

    #[test]
    fn finds_line_comments() {
        assert_eq!(
            texts("# one\nfixum x = 1 # two\n"),
            vec![" one".to_string(), " two".to_string()]
        );
    }

    #[test]
    fn ignores_hash_in_string() {
        assert_eq!(texts("scribe \"#nope\" # yes"), vec![" yes".to_string()]);
    }

    #[test]
    fn ignores_hash_in_template() {
        assert_eq!(texts("fixum t = `a\n# not\n` # real"), vec![" real".to_string()]);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        assert_eq!(texts(r##"scribe "a\"#b" # c"##), vec![" c".to_string()]);
    }

    #[test]
    fn span_covers_hash_through_text() {
        let src = "x # hi  \n";
        let comment = &scan_comments(src)[0];
        assert_eq!(&src[comment.span.to_range()], "# hi");
    }
}
