//! Type hints. Rendering records the imports a hint relies on.

use faber_ir::TypeAnnotation;

use crate::features::PyFeatures;

pub(super) fn render(ty: &TypeAnnotation, features: &mut PyFeatures) -> String {
    match ty {
        TypeAnnotation::Named { name, args } => {
            match name.as_str() {
                "numerus" | "magnus" => return "int".to_string(),
                "fractus" => return "float".to_string(),
                "decimus" => {
                    *features |= PyFeatures::DECIMAL;
                    return "Decimal".to_string();
                }
                "textus" => return "str".to_string(),
                "bivalens" => return "bool".to_string(),
                "nihil" | "vacuum" => return "None".to_string(),
                "ignotum" | "cursor" => {
                    *features |= PyFeatures::ANY;
                    return "Any".to_string();
                }
                _ => {}
            }
            let args: Vec<String> = args.iter().map(|arg| render(arg, features)).collect();
            let first = || args.first().cloned().unwrap_or_else(|| "object".to_string());
            match name.as_str() {
                "lista" => format!("list[{}]", first()),
                "tabula" => {
                    let value = args.get(1).cloned().unwrap_or_else(|| "object".to_string());
                    format!("dict[{}, {value}]", first())
                }
                "copia" => format!("set[{}]", first()),
                "promissum" => first(),
                _ if args.is_empty() => name.clone(),
                _ => format!("{name}[{}]", args.join(", ")),
            }
        }
        TypeAnnotation::Nullable(inner) => format!("{} | None", render(inner, features)),
        TypeAnnotation::Function { .. } => {
            *features |= PyFeatures::ANY;
            "Any".to_string()
        }
    }
}

/// Zero value for a dataclass field of type `ty`, used when the source
/// gives no default.
pub(super) fn zero_value(ty: &TypeAnnotation, features: &mut PyFeatures) -> String {
    let factory = |kind: &str, features: &mut PyFeatures| {
        *features |= PyFeatures::FIELD;
        format!("field(default_factory={kind})")
    };
    match ty.head_name() {
        Some("numerus" | "magnus") => "0".to_string(),
        Some("fractus") => "0.0".to_string(),
        Some("decimus") => {
            *features |= PyFeatures::DECIMAL;
            "Decimal(\"0\")".to_string()
        }
        Some("textus") => "\"\"".to_string(),
        Some("bivalens") => "False".to_string(),
        Some("lista") => factory("list", features),
        Some("tabula") => factory("dict", features),
        Some("copia") => factory("set", features),
        _ => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hints_record_their_imports() {
        let mut features = PyFeatures::empty();
        let map = TypeAnnotation::generic(
            "tabula",
            vec![TypeAnnotation::named("textus"), TypeAnnotation::named("decimus")],
        );
        assert_eq!(render(&map, &mut features), "dict[str, Decimal]");
        assert_eq!(features, PyFeatures::DECIMAL);

        let func = TypeAnnotation::Function {
            params: vec![TypeAnnotation::named("numerus")],
            ret: Box::new(TypeAnnotation::named("bivalens")),
        };
        assert_eq!(render(&func, &mut features), "Any");
        assert!(features.contains(PyFeatures::ANY));
    }

    #[test]
    fn nullable_and_promise() {
        let mut features = PyFeatures::empty();
        let ty = TypeAnnotation::Nullable(Box::new(TypeAnnotation::generic(
            "promissum",
            vec![TypeAnnotation::named("textus")],
        )));
        assert_eq!(render(&ty, &mut features), "str | None");
        assert!(features.is_empty());
    }

    #[test]
    fn collection_fields_use_factories() {
        let mut features = PyFeatures::empty();
        let list = TypeAnnotation::generic("lista", vec![TypeAnnotation::named("numerus")]);
        assert_eq!(zero_value(&list, &mut features), "field(default_factory=list)");
        assert_eq!(features, PyFeatures::FIELD);
        assert_eq!(zero_value(&TypeAnnotation::named("Persona"), &mut features), "None");
    }
}
