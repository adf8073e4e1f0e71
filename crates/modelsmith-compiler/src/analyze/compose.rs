//! Expansion of composed field annotations.
//!
//! `@Creatable` carries `@HasCreatorId` and `@HasCreated`, which in turn carry
//! `@AddField` directives. Expansion walks annotations-on-annotations depth first
//! until only field directives remain.

use tracing::warn;

use super::markers::AddFieldArgs;
use super::TypeContext;
use crate::diagnostic::GeneratorError;
use crate::model::Annotation;

/// A field directive reached from one of a declaration's annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedField {
    pub args: AddFieldArgs,
    /// The annotation written on the declaration that led to this field.
    pub annotation: String,
}

/// Expand every field directive reachable from `annotations`, in encounter order.
///
/// Identical directives reached more than once are kept once; two directives for
/// the same field name that disagree are a [`GeneratorError::DuplicateField`].
pub fn expand_composition(
    ctx: &TypeContext<'_>,
    declaration: &str,
    annotations: &[Annotation],
) -> Result<Vec<ComposedField>, GeneratorError> {
    let mut found = Vec::new();
    for annotation in annotations {
        let mut path = Vec::new();
        walk(ctx, annotation, &annotation.type_name, &mut path, &mut found)?;
    }

    let mut fields: Vec<ComposedField> = Vec::new();
    for field in found {
        match fields.iter().find(|f| f.args.name == field.args.name) {
            Some(existing) if existing.args == field.args => continue,
            Some(_) => {
                return Err(GeneratorError::DuplicateField {
                    declaration: declaration.to_string(),
                    field: field.args.name,
                });
            }
            None => fields.push(field),
        }
    }

    Ok(fields)
}

fn walk(
    ctx: &TypeContext<'_>,
    annotation: &Annotation,
    root: &str,
    path: &mut Vec<String>,
    found: &mut Vec<ComposedField>,
) -> Result<(), GeneratorError> {
    if ctx.markers.is_ignored_annotation(&annotation.type_name) {
        return Ok(());
    }

    if annotation.is(&ctx.markers.add_field) {
        found.push(ComposedField {
            args: AddFieldArgs::from_annotation(annotation)?,
            annotation: root.to_string(),
        });
        return Ok(());
    }

    if path.contains(&annotation.type_name) {
        warn!(
            annotation = %annotation.type_name,
            path = %path.join(" -> "),
            "annotation composition cycle, skipping repeated annotation"
        );
        return Ok(());
    }

    let Some(class) = ctx.index.class(&annotation.type_name) else {
        return Ok(());
    };

    path.push(annotation.type_name.clone());
    for nested in &class.annotations {
        walk(ctx, nested, root, path, found)?;
    }
    path.pop();

    Ok(())
}
