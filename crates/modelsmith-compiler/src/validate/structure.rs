//! Structure validation for generation targets.
//!
//! Checked twice: the declaration's shape before analysis, then the analyzed
//! model before code generation.

use std::collections::HashSet;

use tracing::warn;

use crate::analyze::TargetMarker;
use crate::config::MarkerNames;
use crate::diagnostic::GeneratorError;
use crate::ir::ModelIR;
use crate::model::{ClassDecl, ClassKind};

/// Validates that an annotated declaration has the shape its marker requires.
pub fn validate_target(
    class: &ClassDecl,
    target: &TargetMarker,
    markers: &MarkerNames,
) -> Result<(), GeneratorError> {
    let declaration = class.qualified_name();
    let marker = target.annotation_name(markers).to_string();

    match target {
        TargetMarker::ModelTemplate(_) => {
            if class.class_kind != ClassKind::Interface {
                return Err(GeneratorError::NotAnInterface { declaration, marker });
            }
        }
        TargetMarker::Validatable => {
            if class.class_kind != ClassKind::DataClass {
                return Err(GeneratorError::NotADataClass { declaration, marker });
            }
            if class.companion.is_none() {
                return Err(GeneratorError::MissingCompanion { declaration });
            }
        }
    }

    Ok(())
}

/// Validates an analyzed model before code is generated for it.
pub fn validate_model(model: &ModelIR) -> Result<(), GeneratorError> {
    let mut seen = HashSet::new();
    for property in &model.properties {
        if !seen.insert(property.name.as_str()) {
            return Err(GeneratorError::DuplicateField {
                declaration: model.declaration.clone(),
                field: property.name.clone(),
            });
        }
    }

    let mut functions = HashSet::new();
    for template in &model.templates {
        if template.function == "of" || !functions.insert(template.function.as_str()) {
            return Err(GeneratorError::CodegenFailed {
                message: format!(
                    "validation template '{}' of '{}' reuses the function name '{}'",
                    template.declaration, model.declaration, template.function
                ),
            });
        }
        for name in &template.prevalidated {
            if !seen.contains(name.as_str()) {
                warn!(
                    template = %template.declaration,
                    property = %name,
                    "validation template declares a property the model does not have"
                );
            }
        }
    }

    Ok(())
}
