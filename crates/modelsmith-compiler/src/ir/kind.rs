//! Classification of property types.

use serde::Serialize;

use super::{ModelNames, TypeName};

/// How a property participates in validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertyKind {
    /// Passed through unchanged. Arguments are classified so nested
    /// generated models can be rendered as their params type.
    Standard {
        type_name: TypeName,
        arguments: Vec<KindArgument>,
    },
    /// A validated value, constructed from its raw value.
    ValidatedValue(ValidatedValue),
    /// `Option<V>` of a validated value.
    ValidatedValueOptional { value: ValidatedValue, nullable: bool },
    /// Another generated model.
    GeneratedModel(GeneratedModel),
    /// `Option<M>` of a generated model.
    GeneratedModelOptional { model: GeneratedModel, nullable: bool },
    /// `List<M>` of a generated model.
    GeneratedModelList { model: GeneratedModel, nullable: bool },
    /// `Nel<M>` of a generated model.
    GeneratedModelNonEmptyList { model: GeneratedModel, nullable: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KindArgument {
    Star,
    Kind(Box<PropertyKind>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedValue {
    /// The wrapper type, e.g. `PositiveInt`.
    pub wrapper: TypeName,
    /// The raw wrapped type, e.g. `Int`.
    pub value: TypeName,
    /// The failure type of the wrapper's validator.
    pub failure: TypeName,
    pub nullable: bool,
}

impl ValidatedValue {
    pub fn wrapper_type(&self) -> TypeName {
        self.wrapper.clone().with_nullable(self.nullable)
    }

    pub fn value_type(&self) -> TypeName {
        self.value.clone().with_nullable(self.nullable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedModel {
    pub names: ModelNames,
    pub nullable: bool,
}

impl PropertyKind {
    pub fn is_standard(&self) -> bool {
        matches!(self, PropertyKind::Standard { .. })
    }

    /// Whether the property itself (the outermost type) is nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            PropertyKind::Standard { type_name, .. } => type_name.nullable,
            PropertyKind::ValidatedValue(value) => value.nullable,
            PropertyKind::GeneratedModel(model) => model.nullable,
            PropertyKind::ValidatedValueOptional { nullable, .. }
            | PropertyKind::GeneratedModelOptional { nullable, .. }
            | PropertyKind::GeneratedModelList { nullable, .. }
            | PropertyKind::GeneratedModelNonEmptyList { nullable, .. } => *nullable,
        }
    }

    /// Whether the type is `Option<...>` at the outermost level.
    pub fn is_option(&self, option: &str) -> bool {
        match self {
            PropertyKind::ValidatedValueOptional { .. }
            | PropertyKind::GeneratedModelOptional { .. } => true,
            PropertyKind::Standard { type_name, .. } => type_name.canonical_name() == option,
            _ => false,
        }
    }

    /// Short label used in diagnostics and `inspect` output.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::Standard { .. } => "standard",
            PropertyKind::ValidatedValue(_) => "validated value",
            PropertyKind::ValidatedValueOptional { .. } => "optional validated value",
            PropertyKind::GeneratedModel(_) => "generated model",
            PropertyKind::GeneratedModelOptional { .. } => "optional generated model",
            PropertyKind::GeneratedModelList { .. } => "generated model list",
            PropertyKind::GeneratedModelNonEmptyList { .. } => "generated model non-empty list",
        }
    }
}
