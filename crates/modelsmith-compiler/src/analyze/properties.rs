//! Building the ordered, classified property list of a declaration.

use std::collections::HashSet;

use tracing::debug;

use super::classify::classify;
use super::compose::expand_composition;
use super::{ResolutionCache, TargetMarker, TypeContext};
use crate::diagnostic::GeneratorError;
use crate::ir::{Property, PropertyOrigin};
use crate::model::{ClassDecl, ClassKind, PropertyDecl, Resolved};

/// Declared (and, for interfaces, inherited) properties first, then composed fields.
///
/// Composition only applies to model templates: a validatable data class cannot
/// gain constructor parameters from its annotations.
pub fn build_properties<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    class: &'a ClassDecl,
    target: &TargetMarker,
) -> Result<Vec<Property>, GeneratorError> {
    let declaration = class.qualified_name();

    let mut declared: Vec<(&'a PropertyDecl, &'a ClassDecl)> = Vec::new();
    if class.class_kind == ClassKind::Interface {
        let mut visited = HashSet::new();
        collect_inherited(ctx, class, &mut visited, &mut declared);
    }
    for property in &class.properties {
        match declared.iter_mut().find(|(p, _)| p.name == property.name) {
            // An override replaces the inherited property in place.
            Some(slot) => *slot = (property, class),
            None => declared.push((property, class)),
        }
    }
    if declared.is_empty() {
        return Err(GeneratorError::NoProperties { declaration });
    }

    let mut properties = Vec::with_capacity(declared.len());
    for (property, owner) in declared {
        let scope = owner.scope();
        let kind = classify(ctx, cache, &property.type_ref, Some(&scope))?;
        debug!(declaration = %declaration, property = %property.name, kind = kind.label(), "classified property");

        let origin = if std::ptr::eq(owner, class) {
            PropertyOrigin::Declared
        } else {
            PropertyOrigin::Inherited {
                declaration: owner.qualified_name(),
            }
        };
        properties.push(Property {
            name: property.name.clone(),
            kind,
            external: property.has_annotation(&ctx.markers.external),
            origin,
            location: property.location.clone(),
        });
    }

    if matches!(target, TargetMarker::Validatable) {
        return Ok(properties);
    }

    for field in expand_composition(ctx, &declaration, &class.annotations)? {
        if properties.iter().any(|p| p.name == field.args.name) {
            return Err(GeneratorError::DuplicateField {
                declaration,
                field: field.args.name,
            });
        }

        let kind = classify(ctx, cache, &field.args.type_ref, None)?;
        debug!(declaration = %declaration, property = %field.args.name, kind = kind.label(), "classified composed field");
        properties.push(Property {
            name: field.args.name,
            kind,
            external: field.args.ignore,
            origin: PropertyOrigin::Composed {
                annotation: field.annotation,
            },
            location: class.location.clone(),
        });
    }

    Ok(properties)
}

/// Properties of super interfaces, depth first in supertype order.
fn collect_inherited<'a>(
    ctx: &TypeContext<'a>,
    class: &'a ClassDecl,
    visited: &mut HashSet<String>,
    out: &mut Vec<(&'a PropertyDecl, &'a ClassDecl)>,
) {
    let scope = class.scope();
    for super_type in &class.super_types {
        let Resolved::Class(parent) = ctx.index.resolve(&super_type.name, Some(&scope)) else {
            continue;
        };
        if parent.class_kind != ClassKind::Interface || !visited.insert(parent.qualified_name()) {
            continue;
        }

        collect_inherited(ctx, parent, visited, out);
        for property in &parent.properties {
            if !out.iter().any(|(p, _)| p.name == property.name) {
                out.push((property, parent));
            }
        }
    }
}
