//! Properties of a generated model.

use serde::Serialize;

use super::naming::{capitalize, validated_name};
use super::PropertyKind;
use crate::diagnostic::Span;

/// A classified property, declared or composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    /// Excluded from params and builder.
    pub external: bool,
    pub origin: PropertyOrigin,
    #[serde(skip)]
    pub location: Option<Span>,
}

/// Where a property came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "from", rename_all = "camelCase")]
pub enum PropertyOrigin {
    Declared,
    Inherited { declaration: String },
    Composed { annotation: String },
}

impl Property {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            external: false,
            origin: PropertyOrigin::Declared,
            location: None,
        }
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// Name of this property's field-failure variant.
    pub fn failure_id(&self) -> String {
        capitalize(&self.name)
    }

    /// Name of the local holding this property's validation result.
    pub fn validated_name(&self) -> String {
        validated_name(&self.name)
    }
}
