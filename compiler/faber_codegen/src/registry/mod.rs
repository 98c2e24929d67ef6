//! Intrinsic and collection-method registries.
//!
//! Each backend has one immutable `Registry`: static tables of
//! [`MethodDef`] for `lista`, `tabula`, `copia` and `textus` receivers plus
//! the intrinsic functions. Lookup is by exact name; a miss means "not a
//! built-in" and the call lowers as an ordinary call.
//!
//! Method names collide across collection kinds (`accipe` indexes a `lista`
//! but reads a key from a `tabula`), so the table is picked from the
//! receiver's resolved type. Without a resolved type the `lista` table is
//! used: sequences are by far the most common receivers. That default can
//! mistranslate a call on an untyped map or set and is kept deliberately.

pub mod py;
pub mod ts;
pub mod zig;

use faber_ir::{Primitive, ResolvedType};

/// How a registry entry renders.
#[derive(Copy, Clone)]
pub enum Emission {
    /// `receiver.name(args)`, or `name(args)` for intrinsics.
    Method(&'static str),
    /// `receiver.name`, or `arg0.name` for intrinsics.
    Property(&'static str),
    /// Arbitrary text from the receiver and the individually generated
    /// arguments. Intrinsics receive an empty receiver.
    Custom(fn(&str, &[String]) -> String),
}

impl std::fmt::Debug for Emission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Emission::Method(name) => write!(f, "Method({name})"),
            Emission::Property(name) => write!(f, "Property({name})"),
            Emission::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One registry entry.
#[derive(Copy, Clone, Debug)]
pub struct MethodDef<F: 'static> {
    pub name: &'static str,
    /// Mutates the receiver in place.
    pub mutates: bool,
    pub emission: Emission,
    /// Preamble facilities the emission relies on.
    pub requires: F,
}

impl<F: Copy> MethodDef<F> {
    /// Render a method call on `receiver`.
    pub fn render(&self, receiver: &str, args: &[String]) -> String {
        match self.emission {
            Emission::Method(name) => format!("{receiver}.{name}({})", args.join(", ")),
            Emission::Property(name) => format!("{receiver}.{name}"),
            Emission::Custom(f) => f(receiver, args),
        }
    }

    /// Render a free intrinsic call.
    pub fn render_intrinsic(&self, args: &[String]) -> String {
        match self.emission {
            Emission::Method(name) => format!("{name}({})", args.join(", ")),
            Emission::Property(name) => {
                let subject = args.first().map_or(String::new(), |a| grouped(a));
                format!("{subject}.{name}")
            }
            Emission::Custom(f) => f("", args),
        }
    }
}

/// Collection kind of a method receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReceiverKind {
    Lista,
    Tabula,
    Copia,
    Textus,
}

/// Pick the method table for a receiver. `None` means the receiver is a
/// user type and the call is never a registry call.
pub fn receiver_kind(ty: Option<&ResolvedType>) -> Option<ReceiverKind> {
    let Some(ty) = ty else {
        return Some(ReceiverKind::Lista);
    };
    match ty {
        ResolvedType::Primitive(Primitive::Textus) => Some(ReceiverKind::Textus),
        ResolvedType::Primitive(Primitive::Ignotum) => Some(ReceiverKind::Lista),
        ResolvedType::Generic { name, .. } => match name.as_str() {
            "lista" => Some(ReceiverKind::Lista),
            "tabula" => Some(ReceiverKind::Tabula),
            "copia" => Some(ReceiverKind::Copia),
            _ => None,
        },
        ResolvedType::Primitive(_) | ResolvedType::Union(_) => None,
    }
}

/// A backend's complete set of tables.
pub struct Registry<F: 'static> {
    pub lista: &'static [MethodDef<F>],
    pub tabula: &'static [MethodDef<F>],
    pub copia: &'static [MethodDef<F>],
    pub textus: &'static [MethodDef<F>],
    pub intrinsics: &'static [MethodDef<F>],
}

fn find<F>(table: &'static [MethodDef<F>], name: &str) -> Option<&'static MethodDef<F>> {
    table.iter().find(|def| def.name == name)
}

impl<F> Registry<F> {
    pub fn table(&self, kind: ReceiverKind) -> &'static [MethodDef<F>] {
        match kind {
            ReceiverKind::Lista => self.lista,
            ReceiverKind::Tabula => self.tabula,
            ReceiverKind::Copia => self.copia,
            ReceiverKind::Textus => self.textus,
        }
    }

    /// Resolve `receiver.name(..)` using the receiver's resolved type.
    pub fn method(
        &self,
        receiver: Option<&ResolvedType>,
        name: &str,
    ) -> Option<&'static MethodDef<F>> {
        find(self.table(receiver_kind(receiver)?), name)
    }

    pub fn intrinsic(&self, name: &str) -> Option<&'static MethodDef<F>> {
        find(self.intrinsics, name)
    }
}

/// Argument `i`, or `default` when the call site omitted it.
pub(crate) fn arg<'a>(args: &'a [String], i: usize, default: &'a str) -> &'a str {
    args.get(i).map_or(default, String::as_str)
}

/// Argument `i` (or `default`), parenthesized unless it is already atomic.
/// Used wherever an emission puts the argument next to an operator or a
/// member access.
pub(crate) fn operand(args: &[String], i: usize, default: &str) -> String {
    grouped(arg(args, i, default))
}

pub(crate) fn grouped(text: &str) -> String {
    if is_atomic(text) {
        text.to_string()
    } else {
        format!("({text})")
    }
}

/// Whether generated `text` binds like a primary expression: no operator,
/// keyword or space outside brackets and string literals.
pub(crate) fn is_atomic(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '.' | '_' | '$' | '@' => {}
            c if c.is_alphanumeric() => {}
            _ => return false,
        }
    }
    !text.is_empty()
}

/// Source-level method vocabulary per receiver kind.
pub const LISTA_METHODS: &[&str] = &[
    "adde",
    "praepone",
    "addita",
    "praeposita",
    "remove",
    "decapita",
    "primus",
    "ultimus",
    "accipe",
    "longitudo",
    "vacua",
    "continet",
    "indiceDe",
    "inveni",
    "inveniIndicem",
    "filtrata",
    "filtra",
    "mappata",
    "reducta",
    "ordinata",
    "ordina",
    "inversa",
    "inverte",
    "unica",
    "sectio",
    "prima",
    "ultima",
    "omitte",
    "coniunge",
    "congrega",
    "partire",
    "miscita",
    "specimen",
    "specimina",
    "fragmenta",
    "omnes",
    "aliquis",
    "summa",
    "purga",
    "perambula",
];

pub const TABULA_METHODS: &[&str] = &[
    "pone", "accipe", "habet", "dele", "claves", "valores", "paria", "longitudo", "vacua",
    "purga", "conflata", "inversa", "selecta", "omissa", "inLista",
];

pub const COPIA_METHODS: &[&str] = &[
    "adde",
    "habet",
    "dele",
    "longitudo",
    "vacua",
    "purga",
    "unio",
    "intersectio",
    "differentia",
    "symmetrica",
    "subcopia",
    "supercopia",
    "inLista",
];

pub const TEXTUS_METHODS: &[&str] = &[
    "longitudo",
    "maiuscula",
    "minuscula",
    "continet",
    "incipit",
    "desinit",
    "divide",
    "recide",
    "substitue",
];

pub const INTRINSICS: &[&str] = &[
    "pavimentum",
    "tectum",
    "radix",
    "absolutum",
    "minimus",
    "maximus",
    "aleatorium",
    "textum",
    "numerum",
    "longitudo",
    "signum",
    "potentia",
];

#[cfg(test)]
mod tests;
