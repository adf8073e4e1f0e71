//! Mapping from classified property kinds to Kotlin types.

use crate::ir::{known, GeneratedModel, KindArgument, PropertyKind, TypeArgumentName, TypeName};

/// Which side of a model template a type is rendered for.
///
/// In `Params` mode nested generated models are replaced by their params type
/// and their failures by the required-field-failure union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Model,
    Params,
}

/// The nested model type a property holds in `mode`.
pub fn target(model: &GeneratedModel, mode: Mode) -> TypeName {
    match mode {
        Mode::Model => model.names.model(),
        Mode::Params => model.names.params(),
    }
}

/// Failure union reported by a nested model's `of` in `mode`.
pub fn child_failure(model: &GeneratedModel, mode: Mode) -> TypeName {
    match mode {
        Mode::Model => model.names.field_failure(),
        Mode::Params => model.names.required_field_failure(),
    }
}

/// Type of the property as stored in the generated class.
pub fn field_type(kind: &PropertyKind, mode: Mode) -> TypeName {
    match kind {
        PropertyKind::Standard { type_name, arguments } => {
            let mut type_name = type_name.clone();
            if !arguments.is_empty() {
                type_name.arguments = arguments
                    .iter()
                    .map(|argument| match argument {
                        KindArgument::Star => TypeArgumentName::Star,
                        KindArgument::Kind(kind) => TypeArgumentName::Type(field_type(kind, mode)),
                    })
                    .collect();
            }
            type_name
        }
        PropertyKind::ValidatedValue(value) => value.wrapper_type(),
        PropertyKind::ValidatedValueOptional { value, nullable } => {
            known::option(value.wrapper_type()).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModel(model) => target(model, mode).with_nullable(model.nullable),
        PropertyKind::GeneratedModelOptional { model, nullable } => {
            known::option(target(model, mode).with_nullable(model.nullable)).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModelList { model, nullable } => {
            known::list(target(model, mode).with_nullable(model.nullable)).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModelNonEmptyList { model, nullable } => {
            known::nel(target(model, mode).with_nullable(model.nullable)).with_nullable(*nullable)
        }
    }
}

/// `Either<Nel<ChildFailure>, Child>` as accepted for one nested model value.
fn nested_input(model: &GeneratedModel, mode: Mode) -> TypeName {
    known::either(known::nel(child_failure(model, mode)), target(model, mode))
        .with_nullable(model.nullable)
}

/// Type of the property's parameter in a generated `of` function.
pub fn input_type(kind: &PropertyKind, mode: Mode) -> TypeName {
    match kind {
        PropertyKind::Standard { .. } => field_type(kind, mode),
        PropertyKind::ValidatedValue(value) => value.value_type(),
        PropertyKind::ValidatedValueOptional { value, nullable } => {
            known::option(value.value_type()).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModel(model) => nested_input(model, mode),
        PropertyKind::GeneratedModelOptional { model, nullable } => {
            known::option(nested_input(model, mode)).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModelList { model, nullable } => {
            known::list(nested_input(model, mode)).with_nullable(*nullable)
        }
        PropertyKind::GeneratedModelNonEmptyList { model, nullable } => {
            known::nel(nested_input(model, mode)).with_nullable(*nullable)
        }
    }
}

/// Payload carried by the property's field-failure variant, if it has one.
///
/// The payload does not depend on the mode: `Nel` is covariant, so the
/// required-failure union of a child fits its plain field-failure union.
pub fn failure_payload(kind: &PropertyKind) -> Option<TypeName> {
    match kind {
        PropertyKind::Standard { .. } => None,
        PropertyKind::ValidatedValue(value)
        | PropertyKind::ValidatedValueOptional { value, .. } => Some(value.failure.clone()),
        PropertyKind::GeneratedModel(model) | PropertyKind::GeneratedModelOptional { model, .. } => {
            Some(known::nel(model.names.field_failure()))
        }
        PropertyKind::GeneratedModelList { model, .. }
        | PropertyKind::GeneratedModelNonEmptyList { model, .. } => {
            Some(known::nel(known::nel(model.names.field_failure())))
        }
    }
}

/// Failure payload in the shape a local validation result has in `mode`.
pub fn local_failure(kind: &PropertyKind, mode: Mode) -> Option<TypeName> {
    match kind {
        PropertyKind::Standard { .. } => None,
        PropertyKind::ValidatedValue(value)
        | PropertyKind::ValidatedValueOptional { value, .. } => Some(value.failure.clone()),
        PropertyKind::GeneratedModel(model) | PropertyKind::GeneratedModelOptional { model, .. } => {
            Some(known::nel(child_failure(model, mode)))
        }
        PropertyKind::GeneratedModelList { model, .. }
        | PropertyKind::GeneratedModelNonEmptyList { model, .. } => {
            Some(known::nel(known::nel(child_failure(model, mode))))
        }
    }
}

/// The same kind as seen through an `Option` in a builder: nested models are staged.
pub fn builder_type(kind: &PropertyKind) -> TypeName {
    match kind {
        PropertyKind::GeneratedModel(model) => match model.names.builder() {
            Some(builder) => builder.with_nullable(model.nullable),
            None => field_type(kind, Mode::Params),
        },
        _ => field_type(kind, Mode::Params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ModelNames, ValidatedValue};

    fn address(nullable: bool) -> GeneratedModel {
        GeneratedModel {
            names: ModelNames::template("com.acme", "Address"),
            nullable,
        }
    }

    fn positive_int() -> ValidatedValue {
        ValidatedValue {
            wrapper: TypeName::new("modelsmith.core.valueobject", "PositiveInt"),
            value: TypeName::new("kotlin", "Int"),
            failure: TypeName::new("modelsmith.core", "GenericValueFailure")
                .parameterized(vec![TypeName::new("kotlin", "Int")]),
            nullable: false,
        }
    }

    #[test]
    fn test_nested_model_types_follow_mode() {
        let kind = PropertyKind::GeneratedModel(address(true));
        assert_eq!(field_type(&kind, Mode::Model).to_string(), "com.acme.Address?");
        assert_eq!(field_type(&kind, Mode::Params).to_string(), "com.acme.AddressParams?");
        assert_eq!(
            input_type(&kind, Mode::Params).to_string(),
            "arrow.core.Either<arrow.core.Nel<com.acme.AddressRequiredFieldFailure>, com.acme.AddressParams>?"
        );
        assert_eq!(builder_type(&kind).to_string(), "com.acme.AddressBuilder?");
    }

    #[test]
    fn test_list_payload_is_nested_nel() {
        let kind = PropertyKind::GeneratedModelList {
            model: address(false),
            nullable: false,
        };
        assert_eq!(
            failure_payload(&kind).unwrap().to_string(),
            "arrow.core.Nel<arrow.core.Nel<com.acme.AddressFieldFailure>>"
        );
        assert_eq!(
            local_failure(&kind, Mode::Params).unwrap().to_string(),
            "arrow.core.Nel<arrow.core.Nel<com.acme.AddressRequiredFieldFailure>>"
        );
    }

    #[test]
    fn test_standard_arguments_are_rendered_per_mode() {
        let kind = PropertyKind::Standard {
            type_name: TypeName::new("kotlin.collections", "Map"),
            arguments: vec![
                KindArgument::Kind(Box::new(PropertyKind::ValidatedValue(positive_int()))),
                KindArgument::Kind(Box::new(PropertyKind::GeneratedModel(address(false)))),
            ],
        };
        assert_eq!(
            field_type(&kind, Mode::Params).to_string(),
            "kotlin.collections.Map<modelsmith.core.valueobject.PositiveInt, com.acme.AddressParams>"
        );
    }

    #[test]
    fn test_optional_value_input() {
        let kind = PropertyKind::ValidatedValueOptional {
            value: positive_int(),
            nullable: true,
        };
        assert_eq!(input_type(&kind, Mode::Model).to_string(), "arrow.core.Option<kotlin.Int>?");
        assert_eq!(
            field_type(&kind, Mode::Model).to_string(),
            "arrow.core.Option<modelsmith.core.valueobject.PositiveInt>?"
        );
    }
}
