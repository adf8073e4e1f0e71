//! Naming conventions for generated types and locals.

use serde::Serialize;

use super::TypeName;

pub const PARAMS_SUFFIX: &str = "Params";
pub const BUILDER_SUFFIX: &str = "Builder";
pub const FIELD_FAILURE_SUFFIX: &str = "FieldFailure";
pub const REQUIRED_FIELD_FAILURE_SUFFIX: &str = "RequiredFieldFailure";

/// Upper-cases the first character only (`emailAddress` -> `EmailAddress`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the local holding a property's validation result.
pub fn validated_name(property: &str) -> String {
    format!("v{}", capitalize(property))
}

/// The family of type names generated for one annotated declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelNames {
    pub package: String,
    /// Base name that suffixes are appended to.
    pub base: String,
    pub model: TypeName,
    /// Whether params, builder and required field failures are generated.
    pub has_params: bool,
}

impl ModelNames {
    /// Names for a model template: `User`, `UserParams`, `UserBuilder`, ...
    pub fn template(package: impl Into<String>, base: impl Into<String>) -> Self {
        let package = package.into();
        let base = base.into();
        Self {
            model: TypeName::new(package.clone(), base.clone()),
            package,
            base,
            has_params: true,
        }
    }

    /// Names for a validatable data class, which is its own model.
    pub fn validatable(model: TypeName) -> Self {
        Self {
            package: model.package.clone(),
            base: model.simple_name().to_string(),
            model,
            has_params: false,
        }
    }

    pub fn model(&self) -> TypeName {
        self.model.clone()
    }

    /// The params type, or the model itself when no params are generated.
    pub fn params(&self) -> TypeName {
        if self.has_params {
            TypeName::new(self.package.clone(), format!("{}{}", self.base, PARAMS_SUFFIX))
        } else {
            self.model()
        }
    }

    pub fn builder(&self) -> Option<TypeName> {
        self.has_params
            .then(|| TypeName::new(self.package.clone(), format!("{}{}", self.base, BUILDER_SUFFIX)))
    }

    pub fn field_failure(&self) -> TypeName {
        TypeName::new(self.package.clone(), format!("{}{}", self.base, FIELD_FAILURE_SUFFIX))
    }

    /// The failure union of the params `of`, or the plain field failure when no params exist.
    pub fn required_field_failure(&self) -> TypeName {
        if self.has_params {
            TypeName::new(
                self.package.clone(),
                format!("{}{}", self.base, REQUIRED_FIELD_FAILURE_SUFFIX),
            )
        } else {
            self.field_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("emailAddress"), "EmailAddress");
        assert_eq!(capitalize("id"), "Id");
        assert_eq!(capitalize("URL"), "URL");
        assert_eq!(capitalize(""), "");
        assert_eq!(validated_name("age"), "vAge");
    }

    #[test]
    fn test_template_names() {
        let names = ModelNames::template("com.acme", "User");
        assert_eq!(names.model().canonical_name(), "com.acme.User");
        assert_eq!(names.params().canonical_name(), "com.acme.UserParams");
        assert_eq!(names.builder().unwrap().canonical_name(), "com.acme.UserBuilder");
        assert_eq!(names.field_failure().canonical_name(), "com.acme.UserFieldFailure");
        assert_eq!(
            names.required_field_failure().canonical_name(),
            "com.acme.UserRequiredFieldFailure"
        );
    }

    #[test]
    fn test_validatable_names() {
        let names = ModelNames::validatable(TypeName::new("com.acme", "Address"));
        assert_eq!(names.params().canonical_name(), "com.acme.Address");
        assert!(names.builder().is_none());
        assert_eq!(
            names.required_field_failure().canonical_name(),
            "com.acme.AddressFieldFailure"
        );
    }
}
