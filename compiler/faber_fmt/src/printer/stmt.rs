//! Statements and declarations.

use faber_ir::{
    Block, CaseBinding, DiscerneStmt, DiscretioDecl, EligeStmt, ExprKind, FieldDecl,
    FunctionDecl, GenusDecl, IfStmt, ImportDecl, OrdoDecl, OrdoMember, Param, Stmt, StmtKind,
    TryStmt, UnaryOp, VarDecl,
};

use super::expr::leftmost;
use super::{Item, Printer};
use crate::doc::{braces, concat, delimited, join, text, Doc};

fn is_declaration(kind: &StmtKind) -> bool {
    matches!(
        kind,
        StmtKind::Function(_)
            | StmtKind::Genus(_)
            | StmtKind::Pactum(_)
            | StmtKind::Ordo(_)
            | StmtKind::Discretio(_)
    )
}

impl Printer<'_> {
    pub(crate) fn stmt_item(&self, stmt: &Stmt) -> Item {
        Item {
            span: stmt.span,
            doc: self.stmt(stmt),
            decl: is_declaration(&stmt.kind),
        }
    }

    fn stmt(&self, stmt: &Stmt) -> Doc {
        faber_stack::ensure_sufficient_stack(|| match &stmt.kind {
            StmtKind::Expr(expr) => {
                let doc = self.expr(expr);
                // A leading `{` would start a block, a leading `futura` a
                // function, and a leading `-` would continue the previous line.
                let ambiguous = match &leftmost(expr).kind {
                    ExprKind::Object(_) => true,
                    ExprKind::Lambda(lambda) => lambda.is_async,
                    ExprKind::Unary {
                        op: UnaryOp::Neg, ..
                    } => true,
                    ExprKind::Int(v) => *v < 0,
                    ExprKind::Float(bits) => f64::from_bits(*bits).is_sign_negative(),
                    _ => false,
                };
                if ambiguous {
                    concat(vec![text("("), doc, text(")")])
                } else {
                    doc
                }
            }
            StmtKind::Var(var) => self.var(var),
            StmtKind::Function(function) => self.function(function),
            StmtKind::Genus(genus) => self.genus(genus, stmt),
            StmtKind::Pactum(pactum) => {
                let items = pactum
                    .methods
                    .iter()
                    .map(|m| Item {
                        span: m.span,
                        doc: self.function(m),
                        decl: false,
                    })
                    .collect();
                concat(vec![
                    text(format!("pactum {} ", pactum.name)),
                    self.braced(items, stmt.span),
                ])
            }
            StmtKind::Ordo(ordo) => self.ordo(ordo, stmt),
            StmtKind::Discretio(discretio) => self.discretio(discretio, stmt),
            StmtKind::TypeAlias { name, ty } => text(format!("typus {name} = {ty}")),
            StmtKind::Import(import) => import_decl(import),
            StmtKind::If(if_stmt) => self.if_stmt(if_stmt),
            StmtKind::While { cond, body } => concat(vec![
                text("dum "),
                self.expr(cond),
                text(" "),
                self.block(body),
            ]),
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => concat(vec![
                text("ex "),
                self.expr(iterable),
                text(format!(" pro {binding} ")),
                self.block(body),
            ]),
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => concat(vec![
                text("de "),
                self.expr(object),
                text(format!(" pro {binding} ")),
                self.block(body),
            ]),
            StmtKind::Discerne(discerne) => self.discerne(discerne, stmt),
            StmtKind::Elige(elige) => self.elige(elige, stmt),
            StmtKind::Return(None) => text("redde"),
            StmtKind::Return(Some(value)) => concat(vec![text("redde "), self.expr(value)]),
            StmtKind::Break => text("rumpe"),
            StmtKind::Continue => text("perge"),
            StmtKind::Throw(value) => concat(vec![text("iace "), self.expr(value)]),
            StmtKind::Panic(value) => concat(vec![text("mori "), self.expr(value)]),
            StmtKind::Try(try_stmt) => self.try_stmt(try_stmt),
            StmtKind::Scribe { level, args } => {
                let mut parts = vec![text(level.keyword())];
                if !args.is_empty() {
                    let args = args.iter().map(|a| self.expr(a)).collect();
                    parts.push(text(" "));
                    parts.push(join_inline(args));
                }
                concat(parts)
            }
            StmtKind::Assert { cond, message } => {
                let mut parts = vec![text("adfirma "), self.expr(cond)];
                if let Some(message) = message {
                    parts.push(text(", "));
                    parts.push(self.expr(message));
                }
                concat(parts)
            }
            StmtKind::Block(block) => self.block(block),
        })
    }

    fn var(&self, var: &VarDecl) -> Doc {
        let keyword = if var.mutable { "varia" } else { "fixum" };
        let mut head = String::from(keyword);
        if let Some(ty) = &var.ty {
            head.push_str(&format!(" {ty}"));
        }
        head.push(' ');
        head.push_str(&var.name);
        match &var.init {
            Some(init) => concat(vec![text(head), text(" = "), self.expr(init)]),
            None => text(head),
        }
    }

    fn param(&self, param: &Param) -> Doc {
        let mut head = String::new();
        if param.rest {
            head.push_str("...");
        }
        if let Some(ty) = &param.ty {
            head.push_str(&format!("{ty} "));
        }
        head.push_str(&param.name);
        match &param.default {
            Some(default) => concat(vec![text(head), text(" = "), self.expr(default)]),
            None => text(head),
        }
    }

    pub(crate) fn function(&self, function: &FunctionDecl) -> Doc {
        let mut head = String::new();
        if function.modifiers.is_async {
            head.push_str("futura ");
        }
        if function.modifiers.is_generator {
            head.push_str("cursor ");
        }
        head.push_str("functio ");
        head.push_str(&function.name);

        let params: Vec<Doc> = function.params.iter().map(|p| self.param(p)).collect();
        let force = self.forced(params.len());
        let mut parts = vec![text(head), delimited("(", params, ")", force)];

        match (function.verb, &function.ret) {
            (Some(verb), Some(ret)) => parts.push(text(format!(" {} {ret}", verb.keyword()))),
            (Some(verb), None) => parts.push(text(format!(" {} ignotum", verb.keyword()))),
            (None, Some(ret)) => parts.push(text(format!(" -> {ret}"))),
            (None, None) => {}
        }
        if let Some(body) = &function.body {
            parts.push(text(" "));
            parts.push(self.block(body));
        }
        concat(parts)
    }

    fn field(&self, field: &FieldDecl) -> Doc {
        let head = text(format!("{} {}", field.ty, field.name));
        match &field.default {
            Some(default) => concat(vec![head, text(" = "), self.expr(default)]),
            None => head,
        }
    }

    fn genus(&self, genus: &GenusDecl, stmt: &Stmt) -> Doc {
        let mut head = format!("genus {}", genus.name);
        if let Some(base) = &genus.base {
            head.push_str(&format!(" sub {base}"));
        }
        if !genus.implements.is_empty() {
            head.push_str(&format!(" implet {}", genus.implements.join(", ")));
        }
        head.push(' ');

        let fields = genus.fields.iter().map(|f| Item {
            span: f.span,
            doc: self.field(f),
            decl: false,
        });
        let methods = genus.methods.iter().map(|m| Item {
            span: m.span,
            doc: self.function(m),
            decl: true,
        });
        concat(vec![
            text(head),
            self.braced(fields.chain(methods).collect(), stmt.span),
        ])
    }

    /// Flat `ordo N { a, b = 2 }` when it fits and carries no comments,
    /// otherwise one member per line.
    fn ordo(&self, ordo: &OrdoDecl, stmt: &Stmt) -> Doc {
        let member = |m: &OrdoMember| match &m.value {
            Some(value) => concat(vec![text(format!("{} = ", m.name)), self.expr(value)]),
            None => text(m.name.as_str()),
        };
        let head = text(format!("ordo {} ", ordo.name));
        let commented = self.has_comments(ordo.members.iter().map(|m| m.span), stmt.span);
        if !commented && !self.forced(ordo.members.len()) {
            let items = ordo.members.iter().map(member).collect();
            return concat(vec![head, braces(items, false)]);
        }
        let items = ordo
            .members
            .iter()
            .map(|m| Item {
                span: m.span,
                doc: concat(vec![member(m), text(",")]),
                decl: false,
            })
            .collect();
        concat(vec![head, self.braced(items, stmt.span)])
    }

    fn discretio(&self, discretio: &DiscretioDecl, stmt: &Stmt) -> Doc {
        let items = discretio
            .variants
            .iter()
            .map(|v| {
                let doc = if v.fields.is_empty() {
                    text(v.name.as_str())
                } else {
                    let fields: Vec<Doc> = v.fields.iter().map(|f| self.field(f)).collect();
                    let force = self.forced(fields.len());
                    concat(vec![
                        text(format!("{} ", v.name)),
                        braces(fields, force),
                    ])
                };
                Item {
                    span: v.span,
                    doc,
                    decl: false,
                }
            })
            .collect();
        concat(vec![
            text(format!("discretio {} ", discretio.name)),
            self.braced(items, stmt.span),
        ])
    }

    fn if_stmt(&self, if_stmt: &IfStmt) -> Doc {
        let mut parts = Vec::new();
        for (i, branch) in if_stmt.branches.iter().enumerate() {
            parts.push(text(if i == 0 { "si " } else { " sin " }));
            parts.push(self.expr(&branch.cond));
            parts.push(text(" "));
            parts.push(self.block(&branch.body));
        }
        if let Some(otherwise) = &if_stmt.otherwise {
            parts.push(text(" secus "));
            parts.push(self.block(otherwise));
        }
        concat(parts)
    }

    fn discerne(&self, discerne: &DiscerneStmt, stmt: &Stmt) -> Doc {
        let mut items: Vec<Item> = discerne
            .cases
            .iter()
            .map(|case| {
                let binding = match &case.binding {
                    CaseBinding::None => String::new(),
                    CaseBinding::Alias(name) => format!(" ut {name}"),
                    CaseBinding::Positional(names) => format!(" pro {}", names.join(", ")),
                };
                Item {
                    span: case.span,
                    doc: concat(vec![
                        text(format!("si {}{binding} ", case.variant)),
                        self.block(&case.body),
                    ]),
                    decl: false,
                }
            })
            .collect();
        if let Some(otherwise) = &discerne.otherwise {
            items.push(self.ceterum(otherwise));
        }
        concat(vec![
            text("discerne "),
            self.expr(&discerne.subject),
            text(" "),
            self.braced(items, stmt.span),
        ])
    }

    fn elige(&self, elige: &EligeStmt, stmt: &Stmt) -> Doc {
        let mut items: Vec<Item> = elige
            .cases
            .iter()
            .map(|case| {
                let values = case.values.iter().map(|v| self.expr(v)).collect();
                Item {
                    span: case.span,
                    doc: concat(vec![
                        text("casu "),
                        join_inline(values),
                        text(" "),
                        self.block(&case.body),
                    ]),
                    decl: false,
                }
            })
            .collect();
        if let Some(otherwise) = &elige.otherwise {
            items.push(self.ceterum(otherwise));
        }
        concat(vec![
            text("elige "),
            self.expr(&elige.subject),
            text(" "),
            self.braced(items, stmt.span),
        ])
    }

    fn ceterum(&self, block: &Block) -> Item {
        Item {
            span: block.span,
            doc: concat(vec![text("ceterum "), self.block(block)]),
            decl: false,
        }
    }

    fn try_stmt(&self, try_stmt: &TryStmt) -> Doc {
        let mut parts = vec![text("tempta "), self.block(&try_stmt.body)];
        if let Some(catch) = &try_stmt.catch {
            parts.push(text(match &catch.binding {
                Some(name) => format!(" cape {name} "),
                None => " cape ".to_string(),
            }));
            parts.push(self.block(&catch.body));
        }
        if let Some(finally) = &try_stmt.finally {
            parts.push(text(" demum "));
            parts.push(self.block(finally));
        }
        concat(parts)
    }
}

/// `a, b, c` on one line; used where the grammar has no closing delimiter.
fn join_inline(items: Vec<Doc>) -> Doc {
    join(text(", "), items)
}

fn import_decl(import: &ImportDecl) -> Doc {
    let items: Vec<String> = import
        .items
        .iter()
        .map(|item| match &item.alias {
            Some(alias) => format!("{} ut {alias}", item.name),
            None => item.name.clone(),
        })
        .collect();
    text(format!(
        "ex \"{}\" importa {}",
        faber_lexer::escape(&import.path),
        items.join(", ")
    ))
}
