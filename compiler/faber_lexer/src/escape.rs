//! String literal escapes.

/// Process escapes in the body of a string literal (quotes already removed).
///
/// Returns the offending character on an unknown escape.
pub(crate) fn unescape(content: &str) -> Result<String, char> {
    if !content.contains('\\') {
        return Ok(content.to_string());
    }
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(other),
            None => return Err('\\'),
        }
    }
    Ok(out)
}

/// Inverse of [`unescape`]: render `value` as the body of a string literal.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_invert() {
        let raw = "a\"b\\c\nd\te";
        assert_eq!(unescape(&escape(raw)), Ok(raw.to_string()));
    }

    #[test]
    fn unknown_escape_reports_char() {
        assert_eq!(unescape("x\\q"), Err('q'));
    }
}
