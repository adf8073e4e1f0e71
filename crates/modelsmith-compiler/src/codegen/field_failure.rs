//! Field-failure unions: one variant per property that can fail.

use super::file::GeneratedFile;
use super::kotlin::{CodeWriter, Imports};
use super::types::failure_payload;
use crate::ir::ModelIR;

/// `XFieldFailure` (and `XRequiredFieldFailure` when the model has params).
pub fn generate_field_failure(model: &ModelIR) -> GeneratedFile {
    let names = &model.names;
    let field_failure = names.field_failure();
    let required = names.has_params.then(|| names.required_field_failure());

    let mut imports = Imports::new(&names.package);
    imports.declare(&field_failure);
    if let Some(required) = &required {
        imports.declare(required);
    }

    let union = imports.reference(&field_failure);
    let mut w = CodeWriter::new();
    let variants: Vec<_> = model
        .failing_properties()
        .filter_map(|p| failure_payload(&p.kind).map(|payload| (p, payload)))
        .collect();

    // Inside the union a variant's name hides any type of the same simple name.
    for (property, _) in &variants {
        imports.shadow(&field_failure.nested(property.failure_id()));
    }

    if variants.is_empty() {
        w.line(format!("sealed interface {}", union));
    } else {
        w.open(format!("sealed interface {} {{", union));
        for (property, payload) in variants {
            let parent = match &required {
                Some(required) if !property.external => imports.reference(required),
                _ => union.clone(),
            };
            let payload = imports.render(&payload);
            w.line(format!(
                "data class {}(val parent: {}) : {}",
                property.failure_id(),
                payload,
                parent
            ));
        }
        w.close("}");
    }

    if let Some(required) = &required {
        w.blank();
        w.line(format!("sealed interface {} : {}", imports.reference(required), union));
    }

    GeneratedFile::assemble(&names.package, field_failure.simple_name(), &imports, &w.finish())
}
