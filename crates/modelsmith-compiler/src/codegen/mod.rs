//! Kotlin code generation from the analyzed IR.
//!
//! For a model template the generator emits:
//! - `XFieldFailure` (with `XRequiredFieldFailure`)
//! - `X` with `X.of(...)`
//! - `XParams` with `XParams.of(...)`
//! - `XBuilder` with `build()` and `only(...)`
//!
//! For a validatable data class it emits `XFieldFailure`, `XCompanionOf`
//! and, when the class has option properties, `XCompanionOnly`.
//!
//! Nothing is written here; callers hand the files to a `FileEmitter` once
//! every file of a declaration has been generated.

mod builder;
mod field_failure;
mod file;
mod kotlin;
mod model;
mod runtime;
mod types;
mod validatable;
mod validation;

#[cfg(test)]
mod test_fixtures;

pub use file::{GeneratedFile, GENERATED_HEADER};
pub use runtime::get_runtime_modules;

use crate::config::MarkerNames;
use crate::diagnostic::GeneratorError;
use crate::ir::{GenerationTarget, ModelIR};
use kotlin::{write_parameters, CodeWriter};

/// Generated Kotlin files of one declaration.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    /// Qualified name of the annotated declaration.
    pub declaration: String,
    pub files: Vec<GeneratedFile>,
}

/// Generates every file for one analyzed declaration.
pub fn generate(model: &ModelIR, markers: &MarkerNames) -> Result<GeneratedCode, GeneratorError> {
    let mut files = vec![field_failure::generate_field_failure(model)];

    match &model.target {
        GenerationTarget::ModelTemplate => {
            files.push(model::generate_model(model));
            files.push(model::generate_params(model));
            files.push(builder::generate_builder(model)?);
        }
        GenerationTarget::Validatable { companion } => {
            files.push(validatable::generate_companion_of(model, companion));
            if let Some(only) = validatable::generate_companion_only(model, companion, &markers.option) {
                files.push(only);
            }
        }
    }

    Ok(GeneratedCode {
        declaration: model.declaration.clone(),
        files,
    })
}

/// `data class X(...) {` or, without fields, `class X() {`; leaves the body indented.
fn write_class_header(w: &mut CodeWriter, name: &str, fields: &[String]) {
    if fields.is_empty() {
        w.line(format!("class {}() {{", name));
    } else {
        write_parameters(w, &format!("data class {}", name), fields, " {");
    }
    w.indent();
}
