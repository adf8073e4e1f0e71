//! Generator error types.
#![allow(unused_assignments)]

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// Errors that can occur while generating code.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(modelsmith::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Load Errors
    // =========================================================================
    #[error("Unsupported source language: {language}")]
    #[diagnostic(
        code(modelsmith::load::unsupported_language),
        help("The only supported source language is \"json\"")
    )]
    UnsupportedLanguage {
        language: String,
    },

    #[error("Invalid source file '{}': {message}", path.display())]
    #[diagnostic(code(modelsmith::load::invalid_source))]
    InvalidSourceFile {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid configuration '{}': {message}", path.display())]
    #[diagnostic(code(modelsmith::load::invalid_config))]
    InvalidConfig {
        path: PathBuf,
        message: String,
    },

    #[error("Duplicate declaration '{name}' in '{}' (first declared in '{}')", second.display(), first.display())]
    #[diagnostic(
        code(modelsmith::load::duplicate_declaration),
        help("Qualified names must be unique across all source files and the prelude")
    )]
    DuplicateDeclaration {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid type expression '{text}': {message}")]
    #[diagnostic(
        code(modelsmith::load::invalid_type_expression),
        help("Type expressions look like \"kotlin.collections.List<out com.acme.Item>?\"")
    )]
    InvalidTypeExpression {
        text: String,
        message: String,
    },

    // =========================================================================
    // Annotation Errors
    // =========================================================================
    #[error("Annotation '{annotation}' has an invalid argument '{argument}': expected {expected}")]
    #[diagnostic(code(modelsmith::annotation::invalid_argument))]
    InvalidAnnotationArgument {
        annotation: String,
        argument: String,
        expected: String,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("'{declaration}' is annotated with '{marker}' but is not an interface")]
    #[diagnostic(
        code(modelsmith::structure::not_an_interface),
        help("Model templates must be declared as interfaces")
    )]
    NotAnInterface {
        declaration: String,
        marker: String,
    },

    #[error("'{declaration}' is annotated with '{marker}' but is not a data class")]
    #[diagnostic(
        code(modelsmith::structure::not_a_data_class),
        help("Validatable declarations must be data classes")
    )]
    NotADataClass {
        declaration: String,
        marker: String,
    },

    #[error("'{declaration}' must declare a companion object")]
    #[diagnostic(
        code(modelsmith::structure::missing_companion),
        help("Generated factory functions are extensions of the companion object")
    )]
    MissingCompanion {
        declaration: String,
    },

    #[error("'{declaration}' must have at least one property")]
    #[diagnostic(code(modelsmith::structure::no_properties))]
    NoProperties {
        declaration: String,
    },

    #[error("'{declaration}' declares field '{field}' more than once")]
    #[diagnostic(
        code(modelsmith::structure::duplicate_field),
        help("A composed field may not share its name with a declared property or a different composed field")
    )]
    DuplicateField {
        declaration: String,
        field: String,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Validated value '{value_type}' must pass its wrapped type to '{marker}'")]
    #[diagnostic(code(modelsmith::resolution::missing_wrapped_type))]
    MissingWrappedType {
        value_type: String,
        marker: String,
    },

    #[error("Could not resolve the failure type of '{value_type}': {reason}")]
    #[diagnostic(
        code(modelsmith::resolution::unresolved_failure_type),
        help("The companion object must extend the value validator interface, directly or through other validators")
    )]
    UnresolvedFailureType {
        value_type: String,
        reason: String,
    },

    #[error("Implementation of '{value_type}' was parameterized, but no type arguments were found for '{parameter}'")]
    #[diagnostic(code(modelsmith::resolution::unbound_type_parameter))]
    UnboundTypeParameter {
        value_type: String,
        parameter: String,
    },

    #[error("Invalid type argument binding from '{reference}' to '{declaration}': {message}")]
    #[diagnostic(code(modelsmith::resolution::invalid_binding))]
    InvalidTypeArgumentBinding {
        declaration: String,
        reference: String,
        message: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Failed to generate code: {message}")]
    #[diagnostic(code(modelsmith::codegen::generation_failed))]
    CodegenFailed {
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-argument error for an annotation.
    pub fn annotation_argument(
        annotation: impl Into<String>,
        argument: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidAnnotationArgument {
            annotation: annotation.into(),
            argument: argument.into(),
            expected: expected.into(),
        }
    }

    /// Whether this error stops the whole run instead of a single declaration.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedFailureType { .. } | Self::UnboundTypeParameter { .. }
        )
    }
}

/// An error attached to the declaration it was raised for.
#[derive(Debug)]
pub struct DeclarationDiagnostic {
    pub declaration: String,
    pub location: Option<Span>,
    pub error: GeneratorError,
}

impl DeclarationDiagnostic {
    pub fn new(declaration: impl Into<String>, location: Option<Span>, error: GeneratorError) -> Self {
        Self {
            declaration: declaration.into(),
            location,
            error,
        }
    }
}

impl fmt::Display for DeclarationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({}): {}", self.declaration, location, self.error),
            None => write!(f, "{}: {}", self.declaration, self.error),
        }
    }
}
