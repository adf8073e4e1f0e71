//! Diagnostic types for error reporting.

mod error;
mod span;

pub use error::{DeclarationDiagnostic, GeneratorError};
pub use span::Span;
