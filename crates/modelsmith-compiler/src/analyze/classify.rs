//! Type classification.
//!
//! Decides, structurally, how a property type takes part in validation:
//!
//! 1. a declaration carrying a generated-model marker (or an option/list/non-empty
//!    list of one) becomes `GeneratedModel*`
//! 2. a declaration directly implementing the validated-value marker (or an option
//!    of one) becomes `ValidatedValue*`
//! 3. a type alias is expanded one level and classified again, keeping its name
//! 4. anything else is `Standard`, with its arguments classified recursively

use std::collections::HashMap;

use super::failure::resolve_failure_type;
use super::markers::ModelTemplateArgs;
use super::{ResolutionCache, TypeContext};
use crate::diagnostic::GeneratorError;
use crate::ir::{GeneratedModel, KindArgument, ModelNames, PropertyKind, TypeArgumentName, TypeName, ValidatedValue};
use crate::model::declaration::qualify;
use crate::model::{ClassDecl, Resolved, TypeAliasDecl, TypeArgument, TypeRef, TypeScope};

/// Nesting limit for alias expansion.
const MAX_ALIAS_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Option,
    List,
    NonEmptyList,
}

/// Classify a property type written in `scope`.
pub fn classify<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    type_ref: &TypeRef,
    scope: Option<&TypeScope<'_>>,
) -> Result<PropertyKind, GeneratorError> {
    classify_at_depth(ctx, cache, type_ref, scope, 0)
}

fn classify_at_depth<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    type_ref: &TypeRef,
    scope: Option<&TypeScope<'_>>,
    depth: usize,
) -> Result<PropertyKind, GeneratorError> {
    match ctx.index.resolve(&type_ref.name, scope) {
        Resolved::TypeParameter { .. } | Resolved::External => {
            let type_name = TypeName::from_qualified(&type_ref.name).with_nullable(type_ref.nullable);
            let arguments = classify_arguments(ctx, cache, type_ref, scope, depth)?;
            Ok(container_or_standard(ctx, type_name, arguments))
        }
        Resolved::Alias(alias) => classify_alias(ctx, cache, alias, type_ref, scope, depth),
        Resolved::Class(class) => {
            if let Some(names) = model_names(ctx, cache, class)? {
                return Ok(PropertyKind::GeneratedModel(GeneratedModel {
                    names,
                    nullable: type_ref.nullable,
                }));
            }
            if let Some(value) = validated_value(ctx, cache, class, type_ref.nullable)? {
                return Ok(PropertyKind::ValidatedValue(value));
            }

            let type_name = TypeName::of_class(class).with_nullable(type_ref.nullable);
            let arguments = classify_arguments(ctx, cache, type_ref, scope, depth)?;
            Ok(container_or_standard(ctx, type_name, arguments))
        }
    }
}

fn classify_arguments<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    type_ref: &TypeRef,
    scope: Option<&TypeScope<'_>>,
    depth: usize,
) -> Result<Vec<KindArgument>, GeneratorError> {
    type_ref
        .arguments
        .iter()
        .map(|argument| match argument {
            TypeArgument::Star => Ok(KindArgument::Star),
            TypeArgument::Type { type_ref, .. } => {
                classify_at_depth(ctx, cache, type_ref, scope, depth)
                    .map(|kind| KindArgument::Kind(Box::new(kind)))
            }
        })
        .collect()
}

fn container(ctx: &TypeContext<'_>, name: &str) -> Option<Container> {
    if name == ctx.markers.option {
        Some(Container::Option)
    } else if name == ctx.markers.list {
        Some(Container::List)
    } else if ctx.markers.is_non_empty_list(name) {
        Some(Container::NonEmptyList)
    } else {
        None
    }
}

/// Detect container-of-model and option-of-value shapes, else fall back to `Standard`.
fn container_or_standard(
    ctx: &TypeContext<'_>,
    type_name: TypeName,
    arguments: Vec<KindArgument>,
) -> PropertyKind {
    let nullable = type_name.nullable;
    if let (Some(container), [KindArgument::Kind(inner)]) =
        (container(ctx, &type_name.canonical_name()), arguments.as_slice())
    {
        match (container, inner.as_ref()) {
            (Container::Option, PropertyKind::GeneratedModel(model)) => {
                return PropertyKind::GeneratedModelOptional {
                    model: model.clone(),
                    nullable,
                };
            }
            (Container::List, PropertyKind::GeneratedModel(model)) => {
                return PropertyKind::GeneratedModelList {
                    model: model.clone(),
                    nullable,
                };
            }
            (Container::NonEmptyList, PropertyKind::GeneratedModel(model)) => {
                return PropertyKind::GeneratedModelNonEmptyList {
                    model: model.clone(),
                    nullable,
                };
            }
            (Container::Option, PropertyKind::ValidatedValue(value)) => {
                return PropertyKind::ValidatedValueOptional {
                    value: value.clone(),
                    nullable,
                };
            }
            _ => {}
        }
    }

    PropertyKind::Standard {
        type_name,
        arguments,
    }
}

fn classify_alias<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    alias: &'a TypeAliasDecl,
    type_ref: &TypeRef,
    scope: Option<&TypeScope<'_>>,
    depth: usize,
) -> Result<PropertyKind, GeneratorError> {
    if depth >= MAX_ALIAS_DEPTH {
        return Err(GeneratorError::InvalidTypeExpression {
            text: type_ref.to_string(),
            message: "type alias expansion does not terminate".to_string(),
        });
    }

    let bindings: HashMap<&str, &TypeRef> = alias
        .type_parameters
        .iter()
        .enumerate()
        .filter_map(|(i, parameter)| type_ref.argument(i).map(|bound| (parameter.as_str(), bound)))
        .collect();
    let mut expanded = alias.target.substitute(&bindings);
    expanded.nullable |= type_ref.nullable;

    let display = TypeName::from_qualified(&qualify(&alias.package, &alias.name));
    let kind = classify_at_depth(ctx, cache, &expanded, scope, depth + 1)?;

    Ok(match kind {
        PropertyKind::Standard { .. } => PropertyKind::Standard {
            type_name: display.with_nullable(expanded.nullable),
            arguments: classify_arguments(ctx, cache, type_ref, scope, depth)?,
        },
        PropertyKind::ValidatedValue(mut value) => {
            value.wrapper = display;
            PropertyKind::ValidatedValue(value)
        }
        other => other,
    })
}

/// Names generated for `class`, if it is itself a generation target.
pub fn model_names(
    ctx: &TypeContext<'_>,
    cache: &mut ResolutionCache,
    class: &ClassDecl,
) -> Result<Option<ModelNames>, GeneratorError> {
    let qualified = class.qualified_name();
    if let Some(names) = cache.model_names(&qualified) {
        return Ok(names);
    }

    let names = if let Some(annotation) = class.annotation(&ctx.markers.model_template) {
        let args = ModelTemplateArgs::from_annotation(annotation)?;
        Some(ModelNames::template(class.package.clone(), args.name))
    } else if class.has_annotation(&ctx.markers.validatable) {
        Some(ModelNames::validatable(TypeName::of_class(class)))
    } else {
        None
    };

    cache.insert_model_names(&qualified, names.clone());
    Ok(names)
}

fn validated_value<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    class: &'a ClassDecl,
    nullable: bool,
) -> Result<Option<ValidatedValue>, GeneratorError> {
    let Some(marker) = class
        .super_types
        .iter()
        .find(|super_type| super_type.name == ctx.markers.value_object)
    else {
        return Ok(None);
    };

    let wrapped = marker
        .argument(0)
        .ok_or_else(|| GeneratorError::MissingWrappedType {
            value_type: class.qualified_name(),
            marker: ctx.markers.value_object.clone(),
        })?;
    let value = type_name_of(ctx, wrapped, Some(&class.scope()));
    let failure = resolve_failure_type(ctx, cache, class)?;

    Ok(Some(ValidatedValue {
        wrapper: TypeName::of_class(class),
        value: value.with_nullable(false),
        failure,
        nullable,
    }))
}

/// Render a type reference as a target type name without classifying it.
pub fn type_name_of(ctx: &TypeContext<'_>, type_ref: &TypeRef, scope: Option<&TypeScope<'_>>) -> TypeName {
    let base = match ctx.index.resolve(&type_ref.name, scope) {
        Resolved::Class(class) => TypeName::of_class(class),
        Resolved::Alias(alias) => TypeName::from_qualified(&qualify(&alias.package, &alias.name)),
        Resolved::TypeParameter { .. } | Resolved::External => TypeName::from_qualified(&type_ref.name),
    };
    let arguments = type_ref
        .arguments
        .iter()
        .map(|argument| match argument {
            TypeArgument::Star => TypeArgumentName::Star,
            TypeArgument::Type { type_ref, .. } => TypeArgumentName::Type(type_name_of(ctx, type_ref, scope)),
        })
        .collect();

    TypeName {
        arguments,
        ..base.with_nullable(type_ref.nullable)
    }
}
