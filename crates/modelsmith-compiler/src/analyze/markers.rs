//! Typed arguments of the marker annotations.
//!
//! Arguments are decoded once, when a declaration is analyzed, so the rest of the
//! pipeline never looks at raw annotation values.

use crate::diagnostic::GeneratorError;
use crate::model::{Annotation, AnnotationValue, TypeRef};

/// `@ModelTemplate(name = "User")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTemplateArgs {
    pub name: String,
}

impl ModelTemplateArgs {
    pub fn from_annotation(annotation: &Annotation) -> Result<Self, GeneratorError> {
        let name = identifier_argument(annotation, "name")?;
        Ok(Self { name })
    }
}

/// `@AddField(name = "created", type = Instant::class, ignore = true)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFieldArgs {
    pub name: String,
    pub type_ref: TypeRef,
    /// Leave the field out of params and builder.
    pub ignore: bool,
}

impl AddFieldArgs {
    pub fn from_annotation(annotation: &Annotation) -> Result<Self, GeneratorError> {
        let name = identifier_argument(annotation, "name")?;
        let type_ref = match annotation.argument("type") {
            Some(AnnotationValue::Class { class }) => class.clone(),
            other => return Err(mismatch(annotation, "type", "a class literal", other)),
        };
        let ignore = match annotation.argument("ignore") {
            None => true,
            Some(AnnotationValue::Bool(ignore)) => *ignore,
            other => return Err(mismatch(annotation, "ignore", "a boolean", other)),
        };

        Ok(Self {
            name,
            type_ref,
            ignore,
        })
    }
}

/// `@ValidationTemplate(name = "ofCreate")` and its model/params variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTemplateArgs {
    pub name: String,
}

impl ValidationTemplateArgs {
    pub fn from_annotation(annotation: &Annotation) -> Result<Self, GeneratorError> {
        let name = identifier_argument(annotation, "name")?;
        Ok(Self { name })
    }
}

fn identifier_argument(annotation: &Annotation, argument: &str) -> Result<String, GeneratorError> {
    match annotation.argument(argument) {
        Some(AnnotationValue::String(value)) if is_identifier(value) => Ok(value.clone()),
        other => Err(mismatch(annotation, argument, "an identifier string", other)),
    }
}

fn mismatch(
    annotation: &Annotation,
    argument: &str,
    expected: &str,
    found: Option<&AnnotationValue>,
) -> GeneratorError {
    let found = match found {
        Some(AnnotationValue::String(value)) => format!("string \"{}\"", value),
        Some(value) => value.kind().to_string(),
        None => "nothing".to_string(),
    };
    GeneratorError::annotation_argument(
        &annotation.type_name,
        argument,
        format!("{}, found {}", expected, found),
    )
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_add_field(arguments: &str) -> Annotation {
        serde_json::from_str(&format!(
            r#"{{ "type": "modelsmith.annotation.AddField", "arguments": {} }}"#,
            arguments
        ))
        .unwrap()
    }

    #[test]
    fn test_add_field_defaults_to_ignored() {
        let args = AddFieldArgs::from_annotation(&make_add_field(
            r#"{ "name": "created", "type": { "class": "kotlinx.datetime.Instant" } }"#,
        ))
        .unwrap();
        assert_eq!(args.name, "created");
        assert_eq!(args.type_ref.name, "kotlinx.datetime.Instant");
        assert!(args.ignore);
    }

    #[test]
    fn test_add_field_rejects_string_type() {
        let err = AddFieldArgs::from_annotation(&make_add_field(
            r#"{ "name": "created", "type": "kotlinx.datetime.Instant" }"#,
        ))
        .unwrap_err();
        match err {
            GeneratorError::InvalidAnnotationArgument { argument, expected, .. } => {
                assert_eq!(argument, "type");
                assert!(expected.contains("class literal"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_model_template_name_must_be_identifier() {
        let annotation = Annotation::new("modelsmith.annotation.ModelTemplate")
            .with_argument("name", AnnotationValue::String("User Model".into()));
        assert!(ModelTemplateArgs::from_annotation(&annotation).is_err());

        let missing = Annotation::new("modelsmith.annotation.ModelTemplate");
        assert!(ModelTemplateArgs::from_annotation(&missing).is_err());

        let valid = Annotation::new("modelsmith.annotation.ModelTemplate")
            .with_argument("name", AnnotationValue::String("User".into()));
        assert_eq!(ModelTemplateArgs::from_annotation(&valid).unwrap().name, "User");
    }
}
