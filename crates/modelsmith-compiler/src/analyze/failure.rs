//! Failure-type resolution for validated values.
//!
//! A validated value's companion extends the value validator sentinel
//! `ValueValidator<I, F, O>`, either directly or through abstract validators that
//! bind only some of the sentinel's parameters:
//!
//! ```text
//! PositiveInt.Companion : IntMinValueValidator<PositiveInt>          level 0
//! IntMinValueValidator<T> : ComparableMinValueValidator<T, Int>      level 1
//! ComparableMinValueValidator<T, C>
//!     : ValueValidator<C, GenericValueFailure<C>, T>                 level 2
//! ```
//!
//! The walk records each (reference, declaration) link on the way up. At the
//! sentinel the failure argument is read; every type parameter met while making it
//! concrete is replaced by the argument at the same index of the link one level
//! down, until only concrete types remain (`GenericValueFailure<Int>` above).

use std::collections::HashSet;

use tracing::debug;

use super::{ResolutionCache, TypeContext};
use crate::diagnostic::GeneratorError;
use crate::ir::{TypeArgumentName, TypeName};
use crate::model::{ClassDecl, Resolved, TypeArgument, TypeRef, TypeScope};

/// Position of the failure type among the sentinel's type arguments.
const FAILURE_ARGUMENT_INDEX: usize = 1;
const SENTINEL_ARITY: usize = 3;

/// One step up the validator hierarchy: `reference` is written in the previous
/// level and names `declaration`.
#[derive(Debug, Clone, Copy)]
struct Link<'a> {
    reference: &'a TypeRef,
    declaration: &'a ClassDecl,
}

/// Resolve the concrete failure type of a validated value declaration.
pub fn resolve_failure_type<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    value: &'a ClassDecl,
) -> Result<TypeName, GeneratorError> {
    let value_type = value.qualified_name();
    if let Some(failure) = cache.failure_type(&value_type) {
        return Ok(failure);
    }

    let root = value
        .companion_scope()
        .ok_or_else(|| GeneratorError::UnresolvedFailureType {
            value_type: value_type.clone(),
            reason: "it has no companion object".to_string(),
        })?;

    let resolver = FailureResolver {
        ctx,
        value_type: &value_type,
        root,
    };
    let mut links = Vec::new();
    let mut visited = HashSet::new();
    let failure = resolver
        .search(resolver.root.super_types, &mut links, &mut visited)?
        .ok_or_else(|| GeneratorError::UnresolvedFailureType {
            value_type: value_type.clone(),
            reason: format!(
                "its companion object does not inherit '{}'",
                ctx.markers.value_validator
            ),
        })?;

    debug!(value = %value_type, failure = %failure, "resolved failure type");
    cache.insert_failure_type(&value_type, failure.clone());
    Ok(failure)
}

struct FailureResolver<'c, 'a> {
    ctx: &'c TypeContext<'a>,
    value_type: &'c str,
    root: TypeScope<'a>,
}

impl<'c, 'a> FailureResolver<'c, 'a> {
    /// Scope of the declaration at `level` (0 is the companion).
    fn scope_at(&self, level: usize, links: &[Link<'a>]) -> TypeScope<'a> {
        match level {
            0 => self.root.clone(),
            _ => links[level - 1].declaration.scope(),
        }
    }

    /// Depth-first search for the sentinel, checking direct supertypes first.
    fn search(
        &self,
        super_types: &'a [TypeRef],
        links: &mut Vec<Link<'a>>,
        visited: &mut HashSet<String>,
    ) -> Result<Option<TypeName>, GeneratorError> {
        let level = links.len();
        let scope = self.scope_at(level, links);

        if let Some(sentinel) = super_types
            .iter()
            .find(|r| r.name == self.ctx.markers.value_validator && scope.type_parameter_index(&r.name).is_none())
        {
            return self.bind_sentinel(sentinel, links).map(Some);
        }

        for reference in super_types {
            let declaration = match self.ctx.index.resolve(&reference.name, Some(&scope)) {
                Resolved::Class(declaration) => declaration,
                _ => continue,
            };
            let name = declaration.qualified_name();
            if !visited.insert(name.clone()) {
                continue;
            }

            links.push(Link {
                reference,
                declaration,
            });
            if let Some(found) = self.search(&declaration.super_types, links, visited)? {
                return Ok(Some(found));
            }
            links.pop();
            visited.remove(&name);
        }

        Ok(None)
    }

    fn bind_sentinel(&self, sentinel: &'a TypeRef, links: &[Link<'a>]) -> Result<TypeName, GeneratorError> {
        if sentinel.arguments.len() != SENTINEL_ARITY {
            return Err(GeneratorError::InvalidTypeArgumentBinding {
                declaration: self.ctx.markers.value_validator.clone(),
                reference: sentinel.to_string(),
                message: format!(
                    "expected {} type arguments (input, failure, output), found {}",
                    SENTINEL_ARITY,
                    sentinel.arguments.len()
                ),
            });
        }

        match &sentinel.arguments[FAILURE_ARGUMENT_INDEX] {
            TypeArgument::Type { type_ref, .. } => self.concrete(type_ref, links.len(), links),
            TypeArgument::Star => Err(GeneratorError::InvalidTypeArgumentBinding {
                declaration: self.ctx.markers.value_validator.clone(),
                reference: sentinel.to_string(),
                message: "the failure type is a star projection".to_string(),
            }),
        }
    }

    /// Make `type_ref`, written at `level`, concrete by substituting type
    /// parameters with the arguments of the link below.
    fn concrete(
        &self,
        type_ref: &TypeRef,
        level: usize,
        links: &[Link<'a>],
    ) -> Result<TypeName, GeneratorError> {
        let scope = self.scope_at(level, links);

        let base = match self.ctx.index.resolve(&type_ref.name, Some(&scope)) {
            Resolved::TypeParameter { index } => {
                let bound = self.bound_argument(&type_ref.name, index, level, links)?;
                let resolved = self.concrete(bound, level - 1, links)?;
                let nullable = resolved.nullable || type_ref.nullable;
                return Ok(resolved.with_nullable(nullable));
            }
            Resolved::Class(class) => TypeName::of_class(class),
            Resolved::Alias(alias) => TypeName::from_qualified(&crate::model::declaration::qualify(
                &alias.package,
                &alias.name,
            )),
            Resolved::External => TypeName::from_qualified(&type_ref.name),
        };

        let arguments = type_ref
            .arguments
            .iter()
            .map(|argument| match argument {
                TypeArgument::Star => Ok(TypeArgumentName::Star),
                TypeArgument::Type { type_ref, .. } => {
                    self.concrete(type_ref, level, links).map(TypeArgumentName::Type)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TypeName {
            arguments,
            ..base.with_nullable(type_ref.nullable)
        })
    }

    /// The argument the link below `level` passes for type parameter `index`.
    fn bound_argument(
        &self,
        parameter: &str,
        index: usize,
        level: usize,
        links: &[Link<'a>],
    ) -> Result<&'a TypeRef, GeneratorError> {
        if level == 0 {
            return Err(GeneratorError::UnboundTypeParameter {
                value_type: self.value_type.to_string(),
                parameter: parameter.to_string(),
            });
        }

        let link = links[level - 1];
        if link.reference.arguments.is_empty() {
            return Err(GeneratorError::UnboundTypeParameter {
                value_type: self.value_type.to_string(),
                parameter: parameter.to_string(),
            });
        }

        match link.reference.arguments.get(index) {
            Some(TypeArgument::Type { type_ref, .. }) => Ok(type_ref),
            Some(TypeArgument::Star) => Err(GeneratorError::InvalidTypeArgumentBinding {
                declaration: link.declaration.qualified_name(),
                reference: link.reference.to_string(),
                message: format!("type parameter '{}' is bound to a star projection", parameter),
            }),
            None => Err(GeneratorError::InvalidTypeArgumentBinding {
                declaration: link.declaration.qualified_name(),
                reference: link.reference.to_string(),
                message: format!(
                    "expected {} type arguments, found {}",
                    link.declaration.type_parameters.len(),
                    link.reference.arguments.len()
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerNames;
    use crate::test_support::make_test_index;

    fn resolve(json: &str, value: &str) -> Result<TypeName, GeneratorError> {
        let index = make_test_index(json);
        let markers = MarkerNames::default();
        let ctx = TypeContext {
            index: &index,
            markers: &markers,
        };
        let mut cache = ResolutionCache::new();
        resolve_failure_type(&ctx, &mut cache, index.class(value).unwrap())
    }

    #[test]
    fn test_prelude_chain_resolves_to_generic_failure_of_int() {
        let failure = resolve("[]", "modelsmith.core.valueobject.PositiveInt").unwrap();
        assert_eq!(failure.to_string(), "modelsmith.core.GenericValueFailure<kotlin.Int>");
    }

    #[test]
    fn test_direct_binding() {
        let failure = resolve("[]", "modelsmith.core.valueobject.String50").unwrap();
        assert_eq!(failure.to_string(), "modelsmith.core.StringLengthRangeFailure");
    }

    #[test]
    fn test_three_level_chain_matches_flattened() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Failure", "classKind": "dataClass", "typeParameters": ["A", "B"] },
            { "kind": "class", "package": "t", "name": "Top", "classKind": "abstractClass",
              "typeParameters": ["X", "Y", "Z"],
              "superTypes": ["modelsmith.core.ValueValidator<X, t.Failure<Y, Z>, kotlin.String>"] },
            { "kind": "class", "package": "t", "name": "Middle", "classKind": "abstractClass",
              "typeParameters": ["P", "Q"],
              "superTypes": ["t.Top<kotlin.Int, Q, P>"] },
            { "kind": "class", "package": "t", "name": "Bottom", "classKind": "abstractClass",
              "typeParameters": ["R"],
              "superTypes": ["t.Middle<kotlin.Long, R>"] },
            { "kind": "class", "package": "t", "name": "Deep", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.String>"],
              "companion": { "superTypes": ["t.Bottom<kotlin.Boolean>"] } },
            { "kind": "class", "package": "t", "name": "Flat", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.String>"],
              "companion": { "superTypes": ["modelsmith.core.ValueValidator<kotlin.Int, t.Failure<kotlin.Boolean, kotlin.Long>, kotlin.String>"] } }
        ]"#;

        let deep = resolve(json, "t.Deep").unwrap();
        let flat = resolve(json, "t.Flat").unwrap();
        assert_eq!(deep, flat);
        assert_eq!(deep.to_string(), "t.Failure<kotlin.Boolean, kotlin.Long>");
    }

    #[test]
    fn test_nullability_of_bound_parameter_is_kept() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Nullable", "classKind": "abstractClass",
              "typeParameters": ["F"],
              "superTypes": ["modelsmith.core.ValueValidator<kotlin.String, F?, kotlin.String>"] },
            { "kind": "class", "package": "t", "name": "Value", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.String>"],
              "companion": { "superTypes": ["t.Nullable<t.Problem>"] } }
        ]"#;
        assert_eq!(resolve(json, "t.Value").unwrap().to_string(), "t.Problem?");
    }

    #[test]
    fn test_missing_validator_is_fatal() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Plain", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.String>"],
              "companion": { "superTypes": ["kotlin.Any"] } }
        ]"#;
        let err = resolve(json, "t.Plain").unwrap_err();
        assert!(matches!(err, GeneratorError::UnresolvedFailureType { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_companion_is_fatal() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Bare", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.String>"] }
        ]"#;
        assert!(matches!(
            resolve(json, "t.Bare").unwrap_err(),
            GeneratorError::UnresolvedFailureType { .. }
        ));
    }

    #[test]
    fn test_raw_parameterized_validator_is_unbound() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Generic", "classKind": "abstractClass",
              "typeParameters": ["F"],
              "superTypes": ["modelsmith.core.ValueValidator<kotlin.Int, F, kotlin.Int>"] },
            { "kind": "class", "package": "t", "name": "Raw", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.Int>"],
              "companion": { "superTypes": ["t.Generic"] } }
        ]"#;
        match resolve(json, "t.Raw").unwrap_err() {
            GeneratorError::UnboundTypeParameter { value_type, parameter } => {
                assert_eq!(value_type, "t.Raw");
                assert_eq!(parameter, "F");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_short_argument_list_is_invalid_binding() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Pair", "classKind": "abstractClass",
              "typeParameters": ["A", "B"],
              "superTypes": ["modelsmith.core.ValueValidator<A, B, A>"] },
            { "kind": "class", "package": "t", "name": "Short", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.Int>"],
              "companion": { "superTypes": ["t.Pair<kotlin.Int>"] } }
        ]"#;
        match resolve(json, "t.Short").unwrap_err() {
            GeneratorError::InvalidTypeArgumentBinding { declaration, message, .. } => {
                assert_eq!(declaration, "t.Pair");
                assert!(message.contains("expected 2"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_arity_is_checked() {
        let json = r#"[
            { "kind": "class", "package": "t", "name": "Odd", "classKind": "valueClass",
              "superTypes": ["modelsmith.core.ValueObject<kotlin.Int>"],
              "companion": { "superTypes": ["modelsmith.core.ValueValidator<kotlin.Int, t.F>"] } }
        ]"#;
        assert!(matches!(
            resolve(json, "t.Odd").unwrap_err(),
            GeneratorError::InvalidTypeArgumentBinding { .. }
        ));
    }

    #[test]
    fn test_results_are_cached() {
        let index = make_test_index("[]");
        let markers = MarkerNames::default();
        let ctx = TypeContext {
            index: &index,
            markers: &markers,
        };
        let mut cache = ResolutionCache::new();
        let value = index.class("modelsmith.core.valueobject.PositiveInt").unwrap();

        let first = resolve_failure_type(&ctx, &mut cache, value).unwrap();
        let second = resolve_failure_type(&ctx, &mut cache, value).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
    }
}
