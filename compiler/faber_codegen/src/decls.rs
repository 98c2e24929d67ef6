//! Declaration index built once per program.

use faber_ir::{Program, ReturnVerb, StmtKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// A `discretio` variant: owning union and field names in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantInfo {
    pub union: String,
    pub fields: Vec<String>,
}

/// What the generators need to know about top-level declarations.
#[derive(Clone, Debug, Default)]
pub struct DeclIndex {
    variants: FxHashMap<String, VariantInfo>,
    unions: FxHashMap<String, Vec<String>>,
    genera: FxHashSet<String>,
    pactums: FxHashSet<String>,
    ordos: FxHashSet<String>,
    functions: FxHashMap<String, Option<ReturnVerb>>,
}

impl DeclIndex {
    pub fn build(program: &Program) -> Self {
        let mut index = DeclIndex::default();
        for stmt in &program.body {
            match &stmt.kind {
                StmtKind::Discretio(d) => {
                    index.unions.insert(
                        d.name.clone(),
                        d.variants.iter().map(|v| v.name.clone()).collect(),
                    );
                    for v in &d.variants {
                        index.variants.insert(
                            v.name.clone(),
                            VariantInfo {
                                union: d.name.clone(),
                                fields: v.fields.iter().map(|f| f.name.clone()).collect(),
                            },
                        );
                    }
                }
                StmtKind::Genus(g) => {
                    index.genera.insert(g.name.clone());
                }
                StmtKind::Pactum(p) => {
                    index.pactums.insert(p.name.clone());
                }
                StmtKind::Ordo(o) => {
                    index.ordos.insert(o.name.clone());
                }
                StmtKind::Function(f) => {
                    index.functions.insert(f.name.clone(), f.verb);
                }
                _ => {}
            }
        }
        index
    }

    pub fn variant(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.get(name)
    }

    /// Variant names of a `discretio`, in declaration order.
    pub fn union_variants(&self, union: &str) -> Option<&[String]> {
        self.unions.get(union).map(Vec::as_slice)
    }

    pub fn is_genus(&self, name: &str) -> bool {
        self.genera.contains(name)
    }

    pub fn is_pactum(&self, name: &str) -> bool {
        self.pactums.contains(name)
    }

    pub fn is_ordo(&self, name: &str) -> bool {
        self.ordos.contains(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Return verb of a top-level function.
    pub fn function_verb(&self, name: &str) -> Option<ReturnVerb> {
        self.functions.get(name).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_top_level_declarations() {
        let program = faber_parse::parse(
            "discretio Forma { Circulus { fractus r }, Quadratum { fractus latus } }\n\
             genus Persona { textus nomen }\n\
             functio numera() fiunt numerus { cede 1 }\n",
        );
        let Ok(program) = program else {
            panic!("parse failed: {program:?}");
        };
        let index = DeclIndex::build(&program);
        assert_eq!(
            index.variant("Quadratum"),
            Some(&VariantInfo {
                union: "Forma".into(),
                fields: vec!["latus".into()],
            })
        );
        assert_eq!(
            index.union_variants("Forma"),
            Some(&["Circulus".to_string(), "Quadratum".to_string()][..])
        );
        assert!(index.is_genus("Persona"));
        assert!(!index.is_genus("Forma"));
        assert_eq!(index.function_verb("numera"), Some(ReturnVerb::Fiunt));
    }
}
