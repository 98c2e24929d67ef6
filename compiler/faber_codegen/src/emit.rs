//! Text helpers shared by every backend: indentation, literals, operand
//! parenthesization.

use faber_ir::{BinaryOp, Expr, ExprKind, Primitive, ResolvedType, StmtKind};

/// Indentation unit and line builder.
#[derive(Clone, Debug)]
pub(crate) struct Indent {
    unit: String,
}

impl Indent {
    pub(crate) fn new(unit: &str) -> Self {
        Indent {
            unit: unit.to_string(),
        }
    }

    pub(crate) fn unit(&self) -> &str {
        &self.unit
    }

    pub(crate) fn pad(&self, depth: usize) -> String {
        self.unit.repeat(depth)
    }

    /// One indented line with its trailing newline.
    pub(crate) fn line(&self, depth: usize, text: &str) -> String {
        let mut out = self.pad(depth);
        out.push_str(text);
        out.push('\n');
        out
    }
}

/// Declarations that get a blank line around them at module level.
pub(crate) fn is_block_declaration(kind: &StmtKind) -> bool {
    matches!(
        kind,
        StmtKind::Function(_)
            | StmtKind::Genus(_)
            | StmtKind::Pactum(_)
            | StmtKind::Ordo(_)
            | StmtKind::Discretio(_)
    )
}

/// Join module-level statements, separating block declarations from their
/// neighbours by one blank line.
pub(crate) fn join_module(items: Vec<(bool, String)>) -> String {
    let mut out = String::new();
    let mut prev_block = false;
    for (i, (block, text)) in items.into_iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        if i > 0 && !out.is_empty() && (block || prev_block) {
            out.push('\n');
        }
        out.push_str(&text);
        prev_block = block;
    }
    out
}

/// Quote a string literal with `"` and the escapes every target shares.
pub(crate) fn quote(value: &str) -> String {
    format!("\"{}\"", faber_lexer::escape(value))
}

/// Render float bits so the result always reads back as a float.
pub(crate) fn float_literal(bits: u64) -> String {
    let value = f64::from_bits(bits);
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

pub(crate) fn paren(text: &str) -> String {
    format!("({text})")
}

/// Whether `name` can be written unquoted as a property key.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Re-indent helper source written with four-space steps to `unit`.
pub(crate) fn reindent(text: &str, unit: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim_start_matches(' ');
        let levels = (line.len() - trimmed.len()) / 4;
        out.push_str(&unit.repeat(levels));
        out.push_str(trimmed);
        out.push('\n');
    }
    out
}

/// Operator-placement rules of a target's expression grammar.
#[derive(Copy, Clone, Debug)]
pub(crate) struct OperandRules {
    /// `a < b == c` chains instead of nesting (Python).
    pub(crate) comparisons_chain: bool,
    /// `??` cannot mix with `&&`/`||` without parentheses (TypeScript).
    pub(crate) coalesce_isolated: bool,
}

/// Whether `child` needs parentheses as an operand of `parent`.
pub(crate) fn operand_needs_parens(
    child: &Expr,
    parent: BinaryOp,
    right: bool,
    rules: OperandRules,
) -> bool {
    match &child.kind {
        ExprKind::Binary { op, .. } => {
            let (c, p) = (op.precedence(), parent.precedence());
            if c < p || (c == p && right) {
                return true;
            }
            if rules.comparisons_chain && op.is_comparison() && parent.is_comparison() {
                return true;
            }
            let logical = |o: BinaryOp| matches!(o, BinaryOp::And | BinaryOp::Or);
            rules.coalesce_isolated
                && ((*op == BinaryOp::Coalesce && logical(parent))
                    || (parent == BinaryOp::Coalesce && logical(*op)))
        }
        ExprKind::Conditional { .. }
        | ExprKind::Assign { .. }
        | ExprKind::Lambda(_)
        | ExprKind::TypeTest { .. }
        | ExprKind::Cast { .. }
        | ExprKind::Range { .. }
        | ExprKind::Cede(_) => true,
        _ => false,
    }
}

/// Give a literal the type it is declared as: `copia` / `tabula`
/// initializers lower to sets and maps, `magnus` / `decimus` numbers to
/// the target's big-number form.
pub(crate) fn retype_literal(init: &Expr, declared: Option<ResolvedType>) -> Expr {
    let Some(ty) = declared else {
        return init.clone();
    };
    let applies = match &init.kind {
        ExprKind::Array(_) | ExprKind::Object(_) => {
            matches!(ty.head_name(), "lista" | "tabula" | "copia")
        }
        ExprKind::Int(_) | ExprKind::Float(_) => {
            ty.is_primitive(Primitive::Magnus) || ty.is_primitive(Primitive::Decimus)
        }
        _ => false,
    };
    if applies {
        init.clone().with_type(ty)
    } else {
        init.clone()
    }
}

/// Whether a runtime range end needs parentheses before `+ 1` / `- 1`.
pub(crate) fn bound_needs_parens(end: &Expr) -> bool {
    matches!(
        end.kind,
        ExprKind::Binary { .. } | ExprKind::Conditional { .. } | ExprKind::Assign { .. }
    )
}

/// Whether `expr` needs parentheses as the receiver of a postfix operation.
pub(crate) fn receiver_needs_parens(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Binary { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Conditional { .. }
            | ExprKind::Assign { .. }
            | ExprKind::Lambda(_)
            | ExprKind::TypeTest { .. }
            | ExprKind::Cast { .. }
            | ExprKind::Range { .. }
            | ExprKind::Cede(_)
            | ExprKind::Object(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::Span;

    fn bin(op: BinaryOp) -> Expr {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(Expr::ident("a", Span::DUMMY)),
                right: Box::new(Expr::ident("b", Span::DUMMY)),
            },
            Span::DUMMY,
        )
    }

    const PLAIN: OperandRules = OperandRules {
        comparisons_chain: false,
        coalesce_isolated: false,
    };

    #[test]
    fn lines_and_literals() {
        let indent = Indent::new("  ");
        assert_eq!(indent.line(2, "x"), "    x\n");
        assert_eq!(quote("a\"b\n"), "\"a\\\"b\\n\"");
        assert_eq!(float_literal(1.5f64.to_bits()), "1.5");
        assert_eq!(float_literal(2.0f64.to_bits()), "2.0");
        assert!(is_identifier("nomen_2"));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn reindent_swaps_the_unit() {
        assert_eq!(reindent("a\n    b\n        c", "\t"), "a\n\tb\n\t\tc\n");
    }

    #[test]
    fn precedence_parens() {
        assert!(operand_needs_parens(&bin(BinaryOp::Add), BinaryOp::Mul, false, PLAIN));
        assert!(!operand_needs_parens(&bin(BinaryOp::Mul), BinaryOp::Add, false, PLAIN));
        assert!(operand_needs_parens(&bin(BinaryOp::Sub), BinaryOp::Sub, true, PLAIN));
        assert!(!operand_needs_parens(&bin(BinaryOp::Sub), BinaryOp::Sub, false, PLAIN));
    }

    #[test]
    fn target_specific_parens() {
        let python = OperandRules {
            comparisons_chain: true,
            coalesce_isolated: false,
        };
        assert!(operand_needs_parens(&bin(BinaryOp::Lt), BinaryOp::Eq, false, python));
        let typescript = OperandRules {
            comparisons_chain: false,
            coalesce_isolated: true,
        };
        assert!(operand_needs_parens(&bin(BinaryOp::Or), BinaryOp::Coalesce, false, typescript));
    }
}
