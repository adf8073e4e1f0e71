//! Language frontends for reading source models.
//!
//! Each frontend is responsible for:
//! 1. Discovering source files in its format
//! 2. Converting them to [`SourceFile`] declarations
//!
//! Everything after loading (analysis, validation, code generation) is shared.

pub mod json;

use std::path::Path;

use crate::diagnostic::GeneratorError;
use crate::model::SourceFile;

/// Trait for source model frontends.
pub trait Frontend {
    /// Returns the language name (e.g., "json").
    fn language(&self) -> &str;

    /// Returns file extensions this frontend handles.
    fn extensions(&self) -> &[&str];

    /// Reads all source files in the given directory.
    fn load_directory(&mut self, dir: &Path) -> Result<Vec<SourceFile>, GeneratorError>;
}

/// Creates a frontend for the given language.
pub fn create_frontend(language: &str) -> Result<Box<dyn Frontend>, GeneratorError> {
    match language {
        "json" => Ok(Box::new(json::JsonFrontend::new())),
        _ => Err(GeneratorError::UnsupportedLanguage {
            language: language.to_string(),
        }),
    }
}
