//! Hand-built IR shared by the generator tests.

use crate::ir::{
    GeneratedModel, GenerationTarget, KindArgument, ModelIR, ModelNames, Property, PropertyKind,
    TypeName, ValidatedValue,
};

pub fn make_test_validated(wrapper: &str, raw: &str) -> PropertyKind {
    PropertyKind::ValidatedValue(ValidatedValue {
        wrapper: TypeName::new("modelsmith.core.valueobject", wrapper),
        value: TypeName::new("kotlin", raw),
        failure: TypeName::new("modelsmith.core", "GenericValueFailure")
            .parameterized(vec![TypeName::new("kotlin", raw)]),
        nullable: false,
    })
}

pub fn make_test_standard(package: &str, name: &str) -> PropertyKind {
    PropertyKind::Standard {
        type_name: TypeName::new(package, name),
        arguments: Vec::new(),
    }
}

pub fn make_test_option(inner: PropertyKind) -> PropertyKind {
    PropertyKind::Standard {
        type_name: TypeName::new("arrow.core", "Option"),
        arguments: vec![KindArgument::Kind(Box::new(inner))],
    }
}

/// `User` with an external id, a plain name, a validated age and a nested address.
pub fn make_test_template() -> ModelIR {
    let names = ModelNames::template("com.acme", "User");
    ModelIR {
        declaration: "com.acme.UserTemplate".to_string(),
        names,
        target: GenerationTarget::ModelTemplate,
        properties: vec![
            Property::new("id", make_test_validated("PositiveInt", "Int")).external(true),
            Property::new("name", make_test_standard("kotlin", "String")),
            Property::new("age", make_test_validated("PositiveInt", "Int")),
            Property::new(
                "address",
                PropertyKind::GeneratedModel(GeneratedModel {
                    names: ModelNames::template("com.acme", "Address"),
                    nullable: false,
                }),
            ),
        ],
        templates: Vec::new(),
        location: None,
    }
}

/// Validatable `Address` with a validated zip, a street and an optional note.
pub fn make_test_validatable() -> ModelIR {
    let names = ModelNames::validatable(TypeName::new("com.acme", "Address"));
    ModelIR {
        declaration: "com.acme.Address".to_string(),
        names,
        target: GenerationTarget::Validatable {
            companion: "Companion".to_string(),
        },
        properties: vec![
            Property::new("zip", make_test_validated("NonEmptyString", "String")),
            Property::new("street", make_test_standard("kotlin", "String")),
            Property::new("note", make_test_option(make_test_standard("kotlin", "String"))),
        ],
        templates: Vec::new(),
        location: None,
    }
}
