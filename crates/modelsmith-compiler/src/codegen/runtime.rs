//! Runtime Kotlin sources embedded at compile time.
//!
//! These files are the Kotlin side of the prelude: the annotations, value
//! objects and validators that generated code refers to. They live in the
//! `runtime/` directory and are embedded into the compiler with `include_str!`.

/// Marker annotations and composed field annotations.
pub const ANNOTATIONS: &str = include_str!("../../runtime/annotation/Annotations.kt");
/// `ValueObject`, `ValueFailure` and the shared failure types.
pub const VALUE_OBJECT: &str = include_str!("../../runtime/core/ValueObject.kt");
/// `ValueValidator` with its nullable and `Option` overloads.
pub const VALUE_VALIDATOR: &str = include_str!("../../runtime/core/ValueValidator.kt");
/// `validate()` for lists of validation results.
pub const FUNCTIONS: &str = include_str!("../../runtime/core/Functions.kt");
pub const VALIDATORS: &str = include_str!("../../runtime/core/valuevalidator/Validators.kt");
pub const VALUE_OBJECTS: &str = include_str!("../../runtime/core/valueobject/ValueObjects.kt");

/// Returns all runtime modules as (path, content) pairs.
pub fn get_runtime_modules() -> Vec<(&'static str, &'static str)> {
    vec![
        ("modelsmith/annotation/Annotations.kt", ANNOTATIONS),
        ("modelsmith/core/ValueObject.kt", VALUE_OBJECT),
        ("modelsmith/core/ValueValidator.kt", VALUE_VALIDATOR),
        ("modelsmith/core/Functions.kt", FUNCTIONS),
        ("modelsmith/core/valuevalidator/Validators.kt", VALIDATORS),
        ("modelsmith/core/valueobject/ValueObjects.kt", VALUE_OBJECTS),
    ]
}
