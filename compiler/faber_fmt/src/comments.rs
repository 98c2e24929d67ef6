//! Comment attachment.
//!
//! [`scan_comments`] recovers the comments the tokenizer drops;
//! [`attach`] assigns each one to a node:
//!
//! - **Trailing**: the comment follows a node on that node's last line.
//! - **Leading**: otherwise, the next node in the same container.
//! - **Dangling**: no node follows in the container; the comment is keyed by
//!   the container itself and printed after its last member.
//!
//! Containers are the program, every block, and the braces of member-bearing
//! declarations (`genus`, `pactum`, `ordo`, `discretio`, `discerne`, `elige`).
//! Anchors are the statements and members directly inside a container.

use faber_ir::visitor::{walk_block, walk_stmt};
use faber_ir::{Block, Comment, CommentMap, Placement, Program, Span, Stmt, StmtKind, Visitor};
pub use faber_lexer::scan_comments;

struct Container {
    span: Span,
    anchors: Vec<Span>,
}

/// Collects containers and their anchors in one walk.
struct Collector {
    containers: Vec<Container>,
    stack: Vec<usize>,
}

impl Collector {
    fn open(&mut self, span: Span) -> usize {
        self.containers.push(Container {
            span,
            anchors: Vec::new(),
        });
        let id = self.containers.len() - 1;
        self.stack.push(id);
        id
    }

    fn close(&mut self) {
        self.stack.pop();
    }

    fn anchor(&mut self, span: Span) {
        if let Some(&id) = self.stack.last() {
            self.containers[id].anchors.push(span);
        }
    }
}

/// Member anchors of a declaration that owns braces of its own.
fn members(kind: &StmtKind) -> Option<Vec<Span>> {
    let spans = match kind {
        StmtKind::Genus(genus) => genus
            .fields
            .iter()
            .map(|f| f.span)
            .chain(genus.methods.iter().map(|m| m.span))
            .collect(),
        StmtKind::Pactum(pactum) => pactum.methods.iter().map(|m| m.span).collect(),
        StmtKind::Ordo(ordo) => ordo.members.iter().map(|m| m.span).collect(),
        StmtKind::Discretio(discretio) => discretio.variants.iter().map(|v| v.span).collect(),
        StmtKind::Discerne(discerne) => discerne
            .cases
            .iter()
            .map(|c| c.span)
            .chain(discerne.otherwise.iter().map(|b| b.span))
            .collect(),
        StmtKind::Elige(elige) => elige
            .cases
            .iter()
            .map(|c| c.span)
            .chain(elige.otherwise.iter().map(|b| b.span))
            .collect(),
        _ => return None,
    };
    Some(spans)
}

impl<'ast> Visitor<'ast> for Collector {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.anchor(stmt.span);
        match members(&stmt.kind) {
            Some(spans) => {
                let id = self.open(stmt.span);
                self.containers[id].anchors = spans;
                walk_stmt(self, stmt);
                self.close();
            }
            None => walk_stmt(self, stmt),
        }
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.open(block.span);
        walk_block(self, block);
        self.close();
    }
}

/// Whether the source between two offsets has at least one blank line.
pub(crate) fn blank_line_between(source: &str, from: u32, to: u32) -> bool {
    source
        .get(from as usize..to as usize)
        .is_some_and(|gap| gap.bytes().filter(|&b| b == b'\n').count() >= 2)
}

/// Whether a blank line separates `offset` from the previous non-blank text.
fn blank_line_before(source: &str, offset: u32) -> bool {
    let Some(before) = source.get(..offset as usize) else {
        return false;
    };
    let content_end = before.trim_end().len();
    content_end > 0 && blank_line_between(source, u32::try_from(content_end).unwrap_or(0), offset)
}

fn same_line(source: &str, from: u32, to: u32) -> bool {
    source
        .get(from as usize..to as usize)
        .is_some_and(|gap| !gap.contains('\n'))
}

/// Attach `comments` (in source order) to nodes of `program`.
#[tracing::instrument(level = "debug", skip_all, fields(comments = comments.len()))]
pub fn attach(program: &Program, comments: Vec<Comment>, source: &str) -> CommentMap {
    let mut collector = Collector {
        containers: Vec::new(),
        stack: Vec::new(),
    };
    collector.open(program.span);
    collector.visit_program(program);

    let mut map = CommentMap::new();
    for mut comment in comments {
        let at = comment.span.start;
        // Innermost container: the shortest span strictly enclosing the comment.
        let container = collector
            .containers
            .iter()
            .enumerate()
            .filter(|(id, c)| *id == 0 || (c.span.start < at && at < c.span.end))
            .min_by_key(|(id, c)| (*id == 0, c.span.len()))
            .map(|(_, c)| c);
        let Some(container) = container else {
            continue;
        };
        comment.blank_before = blank_line_before(source, at);

        let trailing = container
            .anchors
            .iter()
            .filter(|a| a.end <= at && same_line(source, a.end, at))
            .max_by_key(|a| a.end);
        let (anchor, placement) = if let Some(&anchor) = trailing {
            (anchor, Placement::Trailing)
        } else if let Some(&anchor) = container
            .anchors
            .iter()
            .filter(|a| a.start >= comment.span.end)
            .min_by_key(|a| a.start)
        {
            (anchor, Placement::Leading)
        } else {
            (container.span, Placement::Dangling)
        };
        comment.placement = placement;
        tracing::trace!(?comment, %anchor, "attached comment");
        map.insert(anchor, comment);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attach_src(src: &str) -> (Program, CommentMap) {
        let program = match faber_parse::parse(src) {
            Ok(program) => program,
            Err(e) => panic!("parse failed: {e}"),
        };
        let map = attach(&program, scan_comments(src), src);
        (program, map)
    }

    fn texts(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn leading_and_trailing() {
        let (program, map) = attach_src("# primum\nfixum a = 1 # unum\nfixum b = 2\n");
        assert_eq!(texts(map.leading(program.body[0].span)), vec![" primum"]);
        assert_eq!(texts(map.trailing(program.body[0].span)), vec![" unum"]);
        assert!(map.leading(program.body[1].span).is_empty());
    }

    #[test]
    fn comment_at_end_of_block_dangles() {
        let (program, map) = attach_src("si verum {\n    scribe 1\n    # finis\n}\nscribe 2\n");
        let StmtKind::If(if_stmt) = &program.body[0].kind else {
            panic!("expected si");
        };
        assert_eq!(texts(map.dangling(if_stmt.branches[0].body.span)), vec![" finis"]);
        assert!(map.leading(program.body[1].span).is_empty());
    }

    #[test]
    fn comments_inside_genus_attach_to_members() {
        let (program, map) = attach_src(
            "genus P {\n    # nomen\n    textus nomen\n    numerus aetas # anni\n}\n",
        );
        let StmtKind::Genus(genus) = &program.body[0].kind else {
            panic!("expected genus");
        };
        assert_eq!(texts(map.leading(genus.fields[0].span)), vec![" nomen"]);
        assert_eq!(texts(map.trailing(genus.fields[1].span)), vec![" anni"]);
    }

    #[test]
    fn blank_line_is_recorded() {
        let (program, map) = attach_src("fixum a = 1\n\n# post\nfixum b = 2\n");
        let comment = &map.leading(program.body[1].span)[0];
        assert!(comment.blank_before);
        assert_eq!(comment.placement, Placement::Leading);
    }

    #[test]
    fn comment_in_empty_program_dangles() {
        let (program, map) = attach_src("# solus\n");
        assert_eq!(texts(map.dangling(program.span)), vec![" solus"]);
    }
}
