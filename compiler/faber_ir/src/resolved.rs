//! Resolved types.
//!
//! The semantic analyzer annotates expressions with a `ResolvedType`. The
//! lowering engine reads them to pick collection registries and to map
//! positional pattern bindings onto variant fields; every consumer must also
//! cope with the annotation being absent.

use std::fmt;

/// Built-in scalar types of the source language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `numerus`: machine integer.
    Numerus,
    /// `fractus`: floating point.
    Fractus,
    /// `decimus`: arbitrary-precision decimal.
    Decimus,
    /// `magnus`: big integer.
    Magnus,
    /// `textus`: string.
    Textus,
    /// `bivalens`: boolean.
    Bivalens,
    /// `nihil`: the null value's type.
    Nihil,
    /// `vacuum`: no value.
    Vacuum,
    /// `ignotum`: statically unknown.
    Ignotum,
}

impl Primitive {
    /// Source spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Numerus => "numerus",
            Primitive::Fractus => "fractus",
            Primitive::Decimus => "decimus",
            Primitive::Magnus => "magnus",
            Primitive::Textus => "textus",
            Primitive::Bivalens => "bivalens",
            Primitive::Nihil => "nihil",
            Primitive::Vacuum => "vacuum",
            Primitive::Ignotum => "ignotum",
        }
    }

    pub fn from_name(name: &str) -> Option<Primitive> {
        Some(match name {
            "numerus" => Primitive::Numerus,
            "fractus" => Primitive::Fractus,
            "decimus" => Primitive::Decimus,
            "magnus" => Primitive::Magnus,
            "textus" => Primitive::Textus,
            "bivalens" => Primitive::Bivalens,
            "nihil" => Primitive::Nihil,
            "vacuum" => Primitive::Vacuum,
            "ignotum" => Primitive::Ignotum,
            _ => return None,
        })
    }
}

/// One variant of a discriminated union, fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantType {
    pub name: String,
    pub fields: Vec<(String, ResolvedType)>,
}

/// A `discretio` type with its variants in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionType {
    pub name: String,
    pub variants: Vec<VariantType>,
}

impl UnionType {
    pub fn variant(&self, name: &str) -> Option<&VariantType> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Type assigned to an expression by the analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Primitive(Primitive),
    /// Named type with type arguments: `lista<numerus>`, `Persona`.
    Generic {
        name: String,
        args: Vec<ResolvedType>,
    },
    Union(UnionType),
}

impl ResolvedType {
    pub fn named(name: impl Into<String>) -> Self {
        ResolvedType::Generic {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<ResolvedType>) -> Self {
        ResolvedType::Generic {
            name: name.into(),
            args,
        }
    }

    /// Name of the outermost type constructor.
    pub fn head_name(&self) -> &str {
        match self {
            ResolvedType::Primitive(p) => p.name(),
            ResolvedType::Generic { name, .. } => name,
            ResolvedType::Union(u) => &u.name,
        }
    }

    pub fn is_primitive(&self, prim: Primitive) -> bool {
        matches!(self, ResolvedType::Primitive(p) if *p == prim)
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            ResolvedType::Union(u) => Some(u),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(p) => f.write_str(p.name()),
            ResolvedType::Generic { name, args } => {
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
            ResolvedType::Union(u) => f.write_str(&u.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names_round_trip() {
        for prim in [
            Primitive::Numerus,
            Primitive::Fractus,
            Primitive::Decimus,
            Primitive::Magnus,
            Primitive::Textus,
            Primitive::Bivalens,
            Primitive::Nihil,
            Primitive::Vacuum,
            Primitive::Ignotum,
        ] {
            assert_eq!(Primitive::from_name(prim.name()), Some(prim));
        }
        assert_eq!(Primitive::from_name("lista"), None);
    }

    #[test]
    fn display_generic() {
        let ty = ResolvedType::generic(
            "tabula",
            vec![
                ResolvedType::Primitive(Primitive::Textus),
                ResolvedType::generic("lista", vec![ResolvedType::Primitive(Primitive::Numerus)]),
            ],
        );
        assert_eq!(ty.to_string(), "tabula<textus, lista<numerus>>");
    }

    #[test]
    fn union_variant_lookup() {
        let union = UnionType {
            name: "Eventus".into(),
            variants: vec![VariantType {
                name: "Click".into(),
                fields: vec![("x".into(), ResolvedType::Primitive(Primitive::Numerus))],
            }],
        };
        assert!(union.variant("Click").is_some());
        assert!(union.variant("Quit").is_none());
    }
}
