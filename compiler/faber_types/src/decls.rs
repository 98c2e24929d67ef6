//! Top-level declaration index and annotation resolution.

use faber_ir::{
    Primitive, Program, ResolvedType, StmtKind, TypeAnnotation, UnionType, VariantType,
};
use rustc_hash::FxHashMap;

/// Everything the annotator needs to know about user declarations.
#[derive(Default)]
pub(crate) struct Declarations {
    /// `discretio` declarations, annotations still unresolved.
    unions: FxHashMap<String, Vec<(String, Vec<(String, TypeAnnotation)>)>>,
    /// Variant name to the `discretio` that declares it.
    variant_owner: FxHashMap<String, String>,
    /// `genus` fields.
    genus_fields: FxHashMap<String, FxHashMap<String, TypeAnnotation>>,
    /// `genus` methods' declared return types.
    genus_methods: FxHashMap<String, FxHashMap<String, TypeAnnotation>>,
    /// Top-level function return types.
    functions: FxHashMap<String, TypeAnnotation>,
    /// `typus` aliases.
    aliases: FxHashMap<String, TypeAnnotation>,
}

impl Declarations {
    pub(crate) fn collect(program: &Program) -> Self {
        let mut decls = Declarations::default();
        for stmt in &program.body {
            match &stmt.kind {
                StmtKind::Discretio(d) => {
                    let variants = d
                        .variants
                        .iter()
                        .map(|v| {
                            decls.variant_owner.insert(v.name.clone(), d.name.clone());
                            let fields = v
                                .fields
                                .iter()
                                .map(|f| (f.name.clone(), f.ty.clone()))
                                .collect();
                            (v.name.clone(), fields)
                        })
                        .collect();
                    decls.unions.insert(d.name.clone(), variants);
                }
                StmtKind::Genus(g) => {
                    let fields = g
                        .fields
                        .iter()
                        .map(|f| (f.name.clone(), f.ty.clone()))
                        .collect();
                    decls.genus_fields.insert(g.name.clone(), fields);
                    let methods = g
                        .methods
                        .iter()
                        .filter_map(|m| Some((m.name.clone(), m.ret.clone()?)))
                        .collect();
                    decls.genus_methods.insert(g.name.clone(), methods);
                }
                StmtKind::Function(f) => {
                    if let Some(ret) = &f.ret {
                        decls.functions.insert(f.name.clone(), ret.clone());
                    }
                }
                StmtKind::TypeAlias { name, ty } => {
                    decls.aliases.insert(name.clone(), ty.clone());
                }
                _ => {}
            }
        }
        decls
    }

    /// Resolve a written annotation against user declarations.
    pub(crate) fn resolve(&self, ann: &TypeAnnotation) -> ResolvedType {
        self.resolve_depth(ann, 0)
    }

    fn resolve_depth(&self, ann: &TypeAnnotation, depth: usize) -> ResolvedType {
        // Alias cycles (`typus A = B; typus B = A`) stop here.
        if depth > 32 {
            return ResolvedType::Primitive(Primitive::Ignotum);
        }
        match ann {
            TypeAnnotation::Nullable(inner) => self.resolve_depth(inner, depth + 1),
            TypeAnnotation::Function { .. } => ResolvedType::Primitive(Primitive::Ignotum),
            TypeAnnotation::Named { name, args } => {
                if args.is_empty() {
                    if let Some(prim) = Primitive::from_name(name) {
                        return ResolvedType::Primitive(prim);
                    }
                    if let Some(target) = self.aliases.get(name) {
                        return self.resolve_depth(target, depth + 1);
                    }
                    if let Some(union) = self.union(name, depth) {
                        return ResolvedType::Union(union);
                    }
                }
                ResolvedType::generic(
                    name.clone(),
                    args.iter().map(|a| self.resolve_depth(a, depth + 1)).collect(),
                )
            }
        }
    }

    fn union(&self, name: &str, depth: usize) -> Option<UnionType> {
        let variants = self.unions.get(name)?;
        Some(UnionType {
            name: name.to_string(),
            variants: variants
                .iter()
                .map(|(variant, fields)| VariantType {
                    name: variant.clone(),
                    fields: fields
                        .iter()
                        .map(|(field, ann)| (field.clone(), self.resolve_depth(ann, depth + 1)))
                        .collect(),
                })
                .collect(),
        })
    }

    /// The union declaring `variant`, for `finge` expressions.
    pub(crate) fn union_of_variant(&self, variant: &str) -> Option<ResolvedType> {
        let owner = self.variant_owner.get(variant)?;
        self.union(owner, 0).map(ResolvedType::Union)
    }

    pub(crate) fn field_type(&self, genus: &str, field: &str) -> Option<ResolvedType> {
        let ann = self.genus_fields.get(genus)?.get(field)?;
        Some(self.resolve(ann))
    }

    pub(crate) fn method_return(&self, genus: &str, method: &str) -> Option<ResolvedType> {
        let ann = self.genus_methods.get(genus)?.get(method)?;
        Some(self.resolve(ann))
    }

    pub(crate) fn function_return(&self, name: &str) -> Option<ResolvedType> {
        self.functions.get(name).map(|ann| self.resolve(ann))
    }
}
