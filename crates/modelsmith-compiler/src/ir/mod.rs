//! Analyzed intermediate representation.
//!
//! This IR is produced by the analyzer from the source model and consumed by the
//! Kotlin generators. Every property is already classified and every validated
//! value carries its resolved failure type, so code generation never looks back
//! at the source model.

mod kind;
pub mod naming;
mod property;
mod type_name;

pub use kind::{GeneratedModel, KindArgument, PropertyKind, ValidatedValue};
pub use naming::ModelNames;
pub use property::{Property, PropertyOrigin};
pub use type_name::{known, TypeArgumentName, TypeName};

use serde::Serialize;

use crate::diagnostic::Span;

/// What is generated for a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "camelCase")]
pub enum GenerationTarget {
    /// An interface annotated as a model template: field failures, model, params, builder.
    ModelTemplate,
    /// A data class annotated as validatable: field failures and companion extensions.
    Validatable { companion: String },
}

/// Which generated companions receive a validation template's factory function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateScope {
    Both,
    Model,
    Params,
}

impl TemplateScope {
    pub fn includes_model(self) -> bool {
        matches!(self, TemplateScope::Both | TemplateScope::Model)
    }

    pub fn includes_params(self) -> bool {
        matches!(self, TemplateScope::Both | TemplateScope::Params)
    }
}

/// An extra factory function whose listed properties are accepted already validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationTemplateIR {
    /// Qualified name of the template interface.
    pub declaration: String,
    /// Name of the generated function.
    pub function: String,
    pub scope: TemplateScope,
    pub prevalidated: Vec<String>,
}

impl ValidationTemplateIR {
    /// Properties with the prevalidated ones turned into pass-through values.
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties
            .iter()
            .map(|property| {
                if !self.prevalidated.contains(&property.name) {
                    return property.clone();
                }
                let type_name = match &property.kind {
                    PropertyKind::ValidatedValue(value) => value.wrapper_type(),
                    _ => return property.clone(),
                };
                Property {
                    kind: PropertyKind::Standard {
                        type_name,
                        arguments: Vec::new(),
                    },
                    ..property.clone()
                }
            })
            .collect()
    }
}

/// The analyzed form of one annotated declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIR {
    /// Qualified name of the annotated declaration.
    pub declaration: String,
    pub names: ModelNames,
    pub target: GenerationTarget,
    pub properties: Vec<Property>,
    pub templates: Vec<ValidationTemplateIR>,
    #[serde(skip)]
    pub location: Option<Span>,
}

impl ModelIR {
    /// Properties that are supplied through params and builder.
    pub fn params_properties(&self) -> Vec<Property> {
        self.properties.iter().filter(|p| !p.external).cloned().collect()
    }

    /// Properties that have a field-failure variant.
    pub fn failing_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| !p.kind.is_standard())
    }
}
