//! Type annotations.

use faber_ir::TypeAnnotation;

fn primitive(name: &str) -> Option<&'static str> {
    Some(match name {
        "numerus" | "fractus" | "decimus" => "number",
        "magnus" => "bigint",
        "textus" => "string",
        "bivalens" => "boolean",
        "nihil" => "null",
        "vacuum" => "void",
        "ignotum" => "unknown",
        _ => return None,
    })
}

/// `T` as an array element: unions and function types need parentheses.
pub(super) fn array_element(ty: &str) -> String {
    if ty.contains(" | ") || ty.contains("=>") {
        format!("({ty})")
    } else {
        ty.to_string()
    }
}

pub(super) fn render(ty: &TypeAnnotation) -> String {
    match ty {
        TypeAnnotation::Named { name, args } => {
            if let Some(prim) = primitive(name) {
                return prim.to_string();
            }
            let args: Vec<String> = args.iter().map(render).collect();
            let first = || args.first().cloned().unwrap_or_else(|| "unknown".to_string());
            match name.as_str() {
                "lista" => format!("{}[]", array_element(&first())),
                "tabula" => {
                    let value = args.get(1).cloned().unwrap_or_else(|| "unknown".to_string());
                    format!("Map<{}, {value}>", first())
                }
                "copia" => format!("Set<{}>", first()),
                "promissum" => format!("Promise<{}>", first()),
                "cursor" => format!("Generator<{}>", first()),
                _ if args.is_empty() => name.clone(),
                _ => format!("{name}<{}>", args.join(", ")),
            }
        }
        TypeAnnotation::Nullable(inner) => format!("{} | null", render(inner)),
        TypeAnnotation::Function { params, ret } => {
            let params: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, p)| format!("a{i}: {}", render(p)))
                .collect();
            format!("({}) => {}", params.join(", "), render(ret))
        }
    }
}
