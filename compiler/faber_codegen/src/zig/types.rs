//! Type expressions. `None` marks a type with no Zig counterpart.

use faber_ir::{Primitive, ResolvedType, TypeAnnotation};

fn primitive(name: &str) -> Option<&'static str> {
    Some(match name {
        "numerus" => "i64",
        "fractus" => "f64",
        "magnus" => "i128",
        "textus" => "[]const u8",
        "bivalens" => "bool",
        "nihil" => "@TypeOf(null)",
        "vacuum" => "void",
        "ignotum" => "anytype",
        _ => return None,
    })
}

/// Hash map type keyed by `key`; string keys need the string context.
pub(super) fn hash_map(key: &str, value: &str) -> String {
    if key == "[]const u8" {
        format!("std.StringHashMap({value})")
    } else {
        format!("std.AutoHashMap({key}, {value})")
    }
}

pub(super) fn render(ty: &TypeAnnotation) -> Option<String> {
    match ty {
        TypeAnnotation::Named { name, args } => {
            if name == "decimus" || name == "cursor" {
                return None;
            }
            if let Some(prim) = primitive(name) {
                return Some(prim.to_string());
            }
            let args = args.iter().map(render).collect::<Option<Vec<String>>>()?;
            let arg = |i: usize| args.get(i).cloned().unwrap_or_else(|| "i64".to_string());
            Some(match name.as_str() {
                "lista" => format!("std.ArrayList({})", arg(0)),
                "tabula" => hash_map(&arg(0), &arg(1)),
                "copia" => hash_map(&arg(0), "void"),
                "promissum" => arg(0),
                _ if args.is_empty() => name.clone(),
                _ => format!("{name}({})", args.join(", ")),
            })
        }
        TypeAnnotation::Nullable(inner) => Some(format!("?{}", render(inner)?)),
        TypeAnnotation::Function { params, ret } => {
            let params = params.iter().map(render).collect::<Option<Vec<String>>>()?;
            Some(format!("*const fn ({}) {}", params.join(", "), render(ret)?))
        }
    }
}

/// A type attached by the analyzer, used where no annotation was written.
pub(super) fn render_resolved(ty: &ResolvedType) -> Option<String> {
    match ty {
        ResolvedType::Primitive(Primitive::Decimus) => None,
        ResolvedType::Primitive(prim) => primitive(prim.name()).map(str::to_string),
        ResolvedType::Generic { name, args } => {
            let args = args
                .iter()
                .map(arg_annotation)
                .collect::<Option<Vec<TypeAnnotation>>>()?;
            render(&TypeAnnotation::generic(name.clone(), args))
        }
        ResolvedType::Union(union) => Some(union.name.clone()),
    }
}

fn arg_annotation(ty: &ResolvedType) -> Option<TypeAnnotation> {
    match ty {
        ResolvedType::Primitive(prim) => Some(TypeAnnotation::named(prim.name())),
        ResolvedType::Generic { name, args } => Some(TypeAnnotation::generic(
            name.clone(),
            args.iter().map(arg_annotation).collect::<Option<Vec<_>>>()?,
        )),
        ResolvedType::Union(union) => Some(TypeAnnotation::named(union.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collections_pick_their_std_containers() {
        let map = TypeAnnotation::generic(
            "tabula",
            vec![TypeAnnotation::named("textus"), TypeAnnotation::named("numerus")],
        );
        assert_eq!(render(&map).as_deref(), Some("std.StringHashMap(i64)"));
        let set = TypeAnnotation::generic("copia", vec![TypeAnnotation::named("numerus")]);
        assert_eq!(render(&set).as_deref(), Some("std.AutoHashMap(i64, void)"));
        let list = TypeAnnotation::generic(
            "lista",
            vec![TypeAnnotation::Nullable(Box::new(TypeAnnotation::named("fractus")))],
        );
        assert_eq!(render(&list).as_deref(), Some("std.ArrayList(?f64)"));
    }

    #[test]
    fn decimus_has_no_counterpart() {
        let list = TypeAnnotation::generic("lista", vec![TypeAnnotation::named("decimus")]);
        assert_eq!(render(&list), None);
    }

    #[test]
    fn resolved_types_render_like_annotations() {
        let list = ResolvedType::generic(
            "lista",
            vec![ResolvedType::Primitive(Primitive::Textus)],
        );
        assert_eq!(
            render_resolved(&list).as_deref(),
            Some("std.ArrayList([]const u8)")
        );
        assert_eq!(
            render_resolved(&ResolvedType::Primitive(Primitive::Decimus)),
            None
        );
    }
}
