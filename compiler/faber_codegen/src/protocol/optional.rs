//! Optional chains (`a?.b`, `a?[i]`, `f?(x)`).
//!
//! A chain is lowered by guarding its first optional receiver once and
//! lowering the rest of the chain as plain accesses on a placeholder. Any
//! later optional link is guarded when the remainder is lowered, so each
//! receiver is tested exactly once.

use faber_ir::{Access, Expr, ExprKind};

/// A chain split at its first optional link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardedChain {
    /// Receiver tested against null.
    pub base: Expr,
    /// The whole chain with `base` replaced by the placeholder identifier.
    pub body: Expr,
}

/// Split `expr` at the optional link closest to the chain root.
pub fn split_chain(expr: &Expr, placeholder: &str) -> Option<GuardedChain> {
    faber_stack::ensure_sufficient_stack(|| split(expr, placeholder))
}

fn hole(receiver: &Expr, placeholder: &str) -> Box<Expr> {
    let mut ident = Expr::ident(placeholder, receiver.span);
    ident.ty.clone_from(&receiver.ty);
    Box::new(ident)
}

fn rebuild(expr: &Expr, kind: ExprKind) -> Expr {
    Expr {
        kind,
        span: expr.span,
        ty: expr.ty.clone(),
    }
}

fn split(expr: &Expr, placeholder: &str) -> Option<GuardedChain> {
    match &expr.kind {
        ExprKind::Member {
            object,
            property,
            access,
        } => {
            if let Some(inner) = split_chain(object, placeholder) {
                return Some(GuardedChain {
                    base: inner.base,
                    body: rebuild(
                        expr,
                        ExprKind::Member {
                            object: Box::new(inner.body),
                            property: property.clone(),
                            access: *access,
                        },
                    ),
                });
            }
            (*access == Access::Optional).then(|| GuardedChain {
                base: (**object).clone(),
                body: rebuild(
                    expr,
                    ExprKind::Member {
                        object: hole(object, placeholder),
                        property: property.clone(),
                        access: Access::Plain,
                    },
                ),
            })
        }
        ExprKind::Index {
            object,
            index,
            access,
        } => {
            if let Some(inner) = split_chain(object, placeholder) {
                return Some(GuardedChain {
                    base: inner.base,
                    body: rebuild(
                        expr,
                        ExprKind::Index {
                            object: Box::new(inner.body),
                            index: index.clone(),
                            access: *access,
                        },
                    ),
                });
            }
            (*access == Access::Optional).then(|| GuardedChain {
                base: (**object).clone(),
                body: rebuild(
                    expr,
                    ExprKind::Index {
                        object: hole(object, placeholder),
                        index: index.clone(),
                        access: Access::Plain,
                    },
                ),
            })
        }
        ExprKind::Call {
            callee,
            args,
            optional,
        } => {
            if let Some(inner) = split_chain(callee, placeholder) {
                return Some(GuardedChain {
                    base: inner.base,
                    body: rebuild(
                        expr,
                        ExprKind::Call {
                            callee: Box::new(inner.body),
                            args: args.clone(),
                            optional: *optional,
                        },
                    ),
                });
            }
            optional.then(|| GuardedChain {
                base: (**callee).clone(),
                body: rebuild(
                    expr,
                    ExprKind::Call {
                        callee: hole(callee, placeholder),
                        args: args.clone(),
                        optional: false,
                    },
                ),
            })
        }
        _ => None,
    }
}

/// Whether any link of the postfix chain rooted at `expr` satisfies `pred`.
pub fn chain_any(expr: &Expr, pred: &mut dyn FnMut(&Expr) -> bool) -> bool {
    if pred(expr) {
        return true;
    }
    match &expr.kind {
        ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => chain_any(object, pred),
        ExprKind::Call { callee, .. } => chain_any(callee, pred),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::Span;

    fn member(object: Expr, property: &str, access: Access) -> Expr {
        Expr::new(
            ExprKind::Member {
                object: Box::new(object),
                property: property.into(),
                access,
            },
            Span::DUMMY,
        )
    }

    #[test]
    fn splits_at_first_optional_link() {
        // a.b?.c.d
        let chain = member(
            member(
                member(Expr::ident("a", Span::DUMMY), "b", Access::Plain),
                "c",
                Access::Optional,
            ),
            "d",
            Access::Plain,
        );
        let split = split_chain(&chain, "_t").map(|g| (g.base, g.body));
        let expected_base = member(Expr::ident("a", Span::DUMMY), "b", Access::Plain);
        let expected_body = member(
            member(Expr::ident("_t", Span::DUMMY), "c", Access::Plain),
            "d",
            Access::Plain,
        );
        assert_eq!(split, Some((expected_base, expected_body)));
    }

    #[test]
    fn later_optional_links_survive_for_the_next_guard() {
        // a?.b?.c
        let chain = member(
            member(Expr::ident("a", Span::DUMMY), "b", Access::Optional),
            "c",
            Access::Optional,
        );
        let Some(guarded) = split_chain(&chain, "_t") else {
            panic!("expected a split");
        };
        assert_eq!(guarded.base, Expr::ident("a", Span::DUMMY));
        assert!(guarded.body.has_optional_chain());
    }

    #[test]
    fn plain_chains_do_not_split() {
        let chain = member(Expr::ident("a", Span::DUMMY), "b", Access::NonNull);
        assert_eq!(split_chain(&chain, "_t"), None);
    }
}
