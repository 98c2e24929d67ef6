//! Layout documents.
//!
//! The printer never concatenates output text. It builds a [`Doc`] tree and
//! hands it to a layout engine ([`crate::layout`]) that decides, group by
//! group, whether the content fits on the current line or must break.

/// A layout primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Doc {
    /// Nothing.
    Nil,
    /// Literal text; must not contain newlines.
    Text(String),
    /// A space when the enclosing group is flat, a newline when broken.
    Line,
    /// Nothing when the enclosing group is flat, a newline when broken.
    SoftLine,
    /// Always a newline. Forces every enclosing group to break.
    HardLine,
    /// Lines inside `doc` are indented one level deeper.
    Indent(Box<Doc>),
    /// A unit laid out flat if it fits in the remaining width.
    /// `broken` groups always break.
    Group { doc: Box<Doc>, broken: bool },
    /// `items` separated by `sep`.
    Join { sep: Box<Doc>, items: Vec<Doc> },
    Concat(Vec<Doc>),
}

impl Doc {
    pub fn is_nil(&self) -> bool {
        match self {
            Doc::Nil => true,
            Doc::Concat(parts) => parts.iter().all(Doc::is_nil),
            Doc::Join { items, .. } => items.iter().all(Doc::is_nil),
            _ => false,
        }
    }
}

pub fn nil() -> Doc {
    Doc::Nil
}

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

pub fn line() -> Doc {
    Doc::Line
}

pub fn softline() -> Doc {
    Doc::SoftLine
}

pub fn hardline() -> Doc {
    Doc::HardLine
}

pub fn indent(doc: Doc) -> Doc {
    Doc::Indent(Box::new(doc))
}

pub fn group(doc: Doc) -> Doc {
    Doc::Group {
        doc: Box::new(doc),
        broken: false,
    }
}

/// A group that breaks regardless of width.
pub fn broken_group(doc: Doc) -> Doc {
    Doc::Group {
        doc: Box::new(doc),
        broken: true,
    }
}

pub fn join(sep: Doc, items: Vec<Doc>) -> Doc {
    Doc::Join {
        sep: Box::new(sep),
        items,
    }
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

/// `open item, item close`, breaking to one item per line when the list
/// does not fit. With `force`, the list always breaks.
pub fn delimited(open: &str, items: Vec<Doc>, close: &str, force: bool) -> Doc {
    if items.is_empty() {
        return text(format!("{open}{close}"));
    }
    let body = concat(vec![
        text(open),
        indent(concat(vec![softline(), comma_list(items)])),
        softline(),
        text(close),
    ]);
    if force {
        broken_group(body)
    } else {
        group(body)
    }
}

/// `{ item, item }` with inner spaces, breaking like [`delimited`].
pub fn braces(items: Vec<Doc>, force: bool) -> Doc {
    if items.is_empty() {
        return text("{}");
    }
    let body = concat(vec![
        text("{"),
        indent(concat(vec![line(), comma_list(items)])),
        line(),
        text("}"),
    ]);
    if force {
        broken_group(body)
    } else {
        group(body)
    }
}

/// Items separated by `,` and a breakable space.
pub fn comma_list(items: Vec<Doc>) -> Doc {
    join(concat(vec![text(","), line()]), items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_detection_looks_through_containers() {
        assert!(concat(vec![nil(), join(text(","), vec![nil()])]).is_nil());
        assert!(!concat(vec![nil(), text("x")]).is_nil());
    }

    #[test]
    fn empty_delimited_list_is_plain_text() {
        assert_eq!(delimited("(", Vec::new(), ")", true), text("()"));
    }
}
