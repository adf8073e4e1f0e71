//! Validation templates nested inside model templates.

use tracing::warn;

use super::markers::ValidationTemplateArgs;
use super::TypeContext;
use crate::diagnostic::GeneratorError;
use crate::ir::{TemplateScope, ValidationTemplateIR};
use crate::model::{ClassDecl, ClassKind};

/// Collect the validation templates declared inside `class`, in declaration order.
pub fn collect_templates(
    ctx: &TypeContext<'_>,
    class: &ClassDecl,
) -> Result<Vec<ValidationTemplateIR>, GeneratorError> {
    let markers = ctx.markers;
    let mut templates = Vec::new();

    for nested in &class.nested {
        let Some(annotation) = nested
            .annotations
            .iter()
            .find(|a| markers.is_validation_template(&a.type_name))
        else {
            continue;
        };

        if nested.class_kind != ClassKind::Interface || !nested.private {
            warn!(
                template = %nested.qualified_name(),
                "validation template is not a private interface"
            );
        }

        let scope = if annotation.is(&markers.model_validation_template) {
            TemplateScope::Model
        } else if annotation.is(&markers.params_validation_template) {
            TemplateScope::Params
        } else {
            TemplateScope::Both
        };

        let args = ValidationTemplateArgs::from_annotation(annotation)?;
        templates.push(ValidationTemplateIR {
            declaration: nested.qualified_name(),
            function: args.name,
            scope,
            prevalidated: nested.properties.iter().map(|p| p.name.clone()).collect(),
        });
    }

    Ok(templates)
}
