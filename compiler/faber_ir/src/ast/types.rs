//! Type annotations as written in source.

use std::fmt;

use crate::resolved::{Primitive, ResolvedType};

/// A type written by the programmer: `numerus`, `lista<textus>`, `Persona?`,
/// `(numerus, numerus) -> bivalens`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeAnnotation {
    Named {
        name: String,
        args: Vec<TypeAnnotation>,
    },
    Nullable(Box<TypeAnnotation>),
    Function {
        params: Vec<TypeAnnotation>,
        ret: Box<TypeAnnotation>,
    },
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeAnnotation>) -> Self {
        TypeAnnotation::Named {
            name: name.into(),
            args,
        }
    }

    /// Head name for `Named`, `None` for function types.
    pub fn head_name(&self) -> Option<&str> {
        match self {
            TypeAnnotation::Named { name, .. } => Some(name),
            TypeAnnotation::Nullable(inner) => inner.head_name(),
            TypeAnnotation::Function { .. } => None,
        }
    }

    /// Whether this annotation, ignoring nullability, names `prim`.
    pub fn is_primitive(&self, prim: Primitive) -> bool {
        self.head_name() == Some(prim.name())
    }

    /// Translate a written annotation into a resolved type, without knowledge
    /// of user declarations. Function types resolve to `ignotum`.
    pub fn to_resolved(&self) -> ResolvedType {
        match self {
            TypeAnnotation::Named { name, args } => match Primitive::from_name(name) {
                Some(prim) if args.is_empty() => ResolvedType::Primitive(prim),
                _ => ResolvedType::generic(
                    name.clone(),
                    args.iter().map(TypeAnnotation::to_resolved).collect(),
                ),
            },
            TypeAnnotation::Nullable(inner) => inner.to_resolved(),
            TypeAnnotation::Function { .. } => ResolvedType::Primitive(Primitive::Ignotum),
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeAnnotation::Nullable(inner) => write!(f, "{inner}?"),
            TypeAnnotation::Function { params, ret } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}
