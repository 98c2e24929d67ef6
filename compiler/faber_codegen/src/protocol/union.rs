//! `discerne` case planning.
//!
//! Positional bindings (`si Click pro a, b`) map binder *i* to the variant's
//! *i*-th declared field. That needs the resolved union type of the
//! subject; without it the binders are assumed to be the field names
//! themselves and targets destructure by name. The fallback can mistranslate
//! when the binder names differ from the field names; it is kept lenient on
//! purpose so partially typed programs still lower.

use faber_ir::{Block, CaseBinding, DiscerneCase, UnionType};
use tracing::debug;

/// How a case binds the matched value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destructure<'a> {
    None,
    /// `ut v`: the whole value.
    Whole(&'a str),
    /// Resolved positional binding: `(binder, field)` in declaration order.
    ByPosition(Vec<(&'a str, &'a str)>),
    /// Unresolved positional binding, keyed by binder name.
    ByName(Vec<&'a str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CasePlan<'a> {
    pub variant: &'a str,
    pub destructure: Destructure<'a>,
    pub body: &'a Block,
}

/// Plan one case. Cases keep their declared order; the caller emits them
/// first-match-wins with the `ceterum` clause last.
pub fn plan_case<'a>(case: &'a DiscerneCase, union: Option<&'a UnionType>) -> CasePlan<'a> {
    let destructure = match &case.binding {
        CaseBinding::None => Destructure::None,
        CaseBinding::Alias(name) => Destructure::Whole(name),
        CaseBinding::Positional(names) => {
            match union.and_then(|u| u.variant(&case.variant)) {
                Some(variant) if names.len() <= variant.fields.len() => Destructure::ByPosition(
                    names
                        .iter()
                        .zip(&variant.fields)
                        .map(|(binder, (field, _))| (binder.as_str(), field.as_str()))
                        .collect(),
                ),
                _ => {
                    debug!(
                        variant = %case.variant,
                        "no resolved variant fields; binding positional names by name"
                    );
                    Destructure::ByName(names.iter().map(String::as_str).collect())
                }
            }
        }
    };
    CasePlan {
        variant: &case.variant,
        destructure,
        body: &case.body,
    }
}

/// Plan every case of a `discerne` against the subject's resolved type.
pub fn plan_cases<'a>(
    cases: &'a [DiscerneCase],
    union: Option<&'a UnionType>,
) -> Vec<CasePlan<'a>> {
    cases.iter().map(|case| plan_case(case, union)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::{Primitive, ResolvedType, Span, VariantType};

    fn eventus() -> UnionType {
        let num = ResolvedType::Primitive(Primitive::Numerus);
        UnionType {
            name: "Eventus".into(),
            variants: vec![VariantType {
                name: "Click".into(),
                fields: vec![("x".into(), num.clone()), ("y".into(), num)],
            }],
        }
    }

    fn case(binding: CaseBinding) -> DiscerneCase {
        DiscerneCase {
            variant: "Click".into(),
            binding,
            body: Block::default(),
            span: Span::DUMMY,
        }
    }

    #[test]
    fn positional_bindings_follow_field_order() {
        let union = eventus();
        let c = case(CaseBinding::Positional(vec!["a".into(), "b".into()]));
        let plan = plan_case(&c, Some(&union));
        assert_eq!(
            plan.destructure,
            Destructure::ByPosition(vec![("a", "x"), ("b", "y")])
        );
    }

    #[test]
    fn missing_type_falls_back_to_names() {
        let c = case(CaseBinding::Positional(vec!["x".into(), "y".into()]));
        let plan = plan_case(&c, None);
        assert_eq!(plan.destructure, Destructure::ByName(vec!["x", "y"]));
    }

    #[test]
    fn too_many_binders_fall_back_to_names() {
        let union = eventus();
        let c = case(CaseBinding::Positional(vec![
            "a".into(),
            "b".into(),
            "c".into(),
        ]));
        assert!(matches!(
            plan_case(&c, Some(&union)).destructure,
            Destructure::ByName(_)
        ));
    }

    #[test]
    fn alias_binds_whole_value() {
        let c = case(CaseBinding::Alias("e".into()));
        assert_eq!(plan_case(&c, None).destructure, Destructure::Whole("e"));
    }
}
