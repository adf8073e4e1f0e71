//! Annotations and their argument values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::TypeRef;

/// An annotation usage, e.g. `@AddField(name = "id", type = UserId::class)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Qualified name of the annotation class.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub arguments: BTreeMap<String, AnnotationValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    String(String),
    Class {
        class: TypeRef,
    },
    Annotation(Annotation),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationValue::Bool(_) => "boolean",
            AnnotationValue::Int(_) => "integer",
            AnnotationValue::String(_) => "string",
            AnnotationValue::Class { .. } => "class literal",
            AnnotationValue::Annotation(_) => "annotation",
            AnnotationValue::Array(_) => "array",
        }
    }
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments.get(name)
    }

    pub fn is(&self, qualified_name: &str) -> bool {
        self.type_name == qualified_name
    }
}

/// Find the first annotation with the given qualified name.
pub fn find<'a>(annotations: &'a [Annotation], qualified_name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.is(qualified_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_values() {
        let annotation: Annotation = serde_json::from_str(
            r#"{
                "type": "modelsmith.annotation.AddField",
                "arguments": {
                    "name": "id",
                    "type": { "class": "com.acme.UserId" },
                    "ignore": false,
                    "order": 3,
                    "tags": ["a", "b"],
                    "nested": { "type": "com.acme.Marker" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(annotation.argument("name"), Some(&AnnotationValue::String("id".into())));
        assert_eq!(annotation.argument("ignore"), Some(&AnnotationValue::Bool(false)));
        assert_eq!(annotation.argument("order"), Some(&AnnotationValue::Int(3)));
        match annotation.argument("type") {
            Some(AnnotationValue::Class { class }) => assert_eq!(class.name, "com.acme.UserId"),
            other => panic!("expected class literal, got {:?}", other),
        }
        match annotation.argument("nested") {
            Some(AnnotationValue::Annotation(nested)) => assert!(nested.is("com.acme.Marker")),
            other => panic!("expected nested annotation, got {:?}", other),
        }
        assert!(matches!(annotation.argument("tags"), Some(AnnotationValue::Array(items)) if items.len() == 2));
    }
}
