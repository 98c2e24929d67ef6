//! Group-fits layout engine.
//!
//! Wadler-style: each [`Doc::Group`] is laid out flat when its flat width
//! fits in what remains of the current line, otherwise its lines break. A
//! group containing a [`Doc::HardLine`] never fits.
//!
//! Indentation is written lazily, right before the first text on a line, so
//! blank lines never carry trailing whitespace.

use crate::doc::Doc;

/// Line width and indentation unit for [`render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    pub width: usize,
    pub indent: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            width: 100,
            indent: "    ".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

/// Columns taken by `s`; a tab counts as four.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

struct Renderer<'a> {
    options: &'a LayoutOptions,
    unit_width: usize,
    out: String,
    column: usize,
    /// Indent level owed to the current line, written before its first text.
    pending: Option<usize>,
}

impl Renderer<'_> {
    fn text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(level) = self.pending.take() {
            for _ in 0..level {
                self.out.push_str(&self.options.indent);
            }
            self.column = level * self.unit_width;
        }
        self.out.push_str(s);
        self.column += display_width(s);
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        self.column = 0;
        self.pending = Some(level);
    }

    fn remaining(&self) -> usize {
        let column = match self.pending {
            Some(level) => level * self.unit_width,
            None => self.column,
        };
        self.options.width.saturating_sub(column)
    }
}

/// Whether `doc` laid out flat fits in `width` columns.
fn fits(doc: &Doc, width: usize) -> bool {
    let mut remaining = width;
    let mut stack = vec![doc];
    while let Some(doc) = stack.pop() {
        match doc {
            Doc::Nil | Doc::SoftLine => {}
            Doc::Text(s) => {
                let w = display_width(s);
                if w > remaining {
                    return false;
                }
                remaining -= w;
            }
            Doc::Line => {
                if remaining == 0 {
                    return false;
                }
                remaining -= 1;
            }
            Doc::HardLine => return false,
            Doc::Group { broken: true, .. } => return false,
            Doc::Indent(inner) | Doc::Group { doc: inner, .. } => stack.push(inner),
            Doc::Join { sep, items } => {
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push(item);
                    if i > 0 {
                        stack.push(sep);
                    }
                }
            }
            Doc::Concat(parts) => stack.extend(parts.iter().rev()),
        }
    }
    true
}

/// Lay out `doc` as text.
pub fn render(doc: &Doc, options: &LayoutOptions) -> String {
    let mut renderer = Renderer {
        options,
        unit_width: display_width(&options.indent),
        out: String::new(),
        column: 0,
        pending: None,
    };
    let mut stack: Vec<(usize, Mode, &Doc)> = vec![(0, Mode::Break, doc)];
    while let Some((level, mode, doc)) = stack.pop() {
        match doc {
            Doc::Nil => {}
            Doc::Text(s) => renderer.text(s),
            Doc::Line => match mode {
                Mode::Flat => renderer.text(" "),
                Mode::Break => renderer.newline(level),
            },
            Doc::SoftLine => {
                if mode == Mode::Break {
                    renderer.newline(level);
                }
            }
            Doc::HardLine => renderer.newline(level),
            Doc::Indent(inner) => stack.push((level + 1, mode, inner)),
            Doc::Group { doc: inner, broken } => {
                let mode = if !*broken && (mode == Mode::Flat || fits(inner, renderer.remaining()))
                {
                    Mode::Flat
                } else {
                    Mode::Break
                };
                stack.push((level, mode, inner));
            }
            Doc::Join { sep, items } => {
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push((level, mode, item));
                    if i > 0 {
                        stack.push((level, mode, sep));
                    }
                }
            }
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    stack.push((level, mode, part));
                }
            }
        }
    }
    renderer.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{broken_group, concat, delimited, hardline, indent, text};
    use pretty_assertions::assert_eq;

    fn items(names: &[&str]) -> Vec<Doc> {
        names.iter().map(|n| text(*n)).collect()
    }

    fn narrow(width: usize) -> LayoutOptions {
        LayoutOptions {
            width,
            ..LayoutOptions::default()
        }
    }

    #[test]
    fn group_stays_flat_when_it_fits() {
        let doc = delimited("(", items(&["a", "b", "c"]), ")", false);
        assert_eq!(render(&doc, &LayoutOptions::default()), "(a, b, c)");
    }

    #[test]
    fn group_breaks_when_too_wide() {
        let doc = delimited("(", items(&["alpha", "beta", "gamma"]), ")", false);
        assert_eq!(render(&doc, &narrow(10)), "(\n    alpha,\n    beta,\n    gamma\n)");
    }

    #[test]
    fn forced_group_breaks() {
        let doc = delimited("[", items(&["a", "b"]), "]", true);
        assert_eq!(render(&doc, &LayoutOptions::default()), "[\n    a,\n    b\n]");
    }

    #[test]
    fn blank_lines_have_no_indentation() {
        let doc = concat(vec![
            text("{"),
            indent(concat(vec![hardline(), text("a"), hardline(), hardline(), text("b")])),
            hardline(),
            text("}"),
        ]);
        assert_eq!(render(&doc, &LayoutOptions::default()), "{\n    a\n\n    b\n}");
    }

    #[test]
    fn hardline_inside_group_breaks_it() {
        let doc = concat(vec![
            text("f"),
            delimited("(", vec![concat(vec![text("x"), hardline(), text("y")])], ")", false),
        ]);
        assert_eq!(render(&doc, &LayoutOptions::default()), "f(\n    x\n    y\n)");
    }

    #[test]
    fn tab_indentation() {
        let options = LayoutOptions {
            width: 80,
            indent: "\t".to_string(),
        };
        let doc = broken_group(concat(vec![text("{"), indent(concat(vec![hardline(), text("x")])), hardline(), text("}")]));
        assert_eq!(render(&doc, &options), "{\n\tx\n}");
    }
}
