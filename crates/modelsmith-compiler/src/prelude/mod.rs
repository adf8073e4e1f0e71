//! Bundled declarations of the marker annotations and the value-object library.
//!
//! These describe the same library that [`crate::codegen::get_runtime_modules`] returns as Kotlin
//! source, so user models can reference `PositiveInt`, `AddField`, etc. without
//! declaring them.

use std::path::PathBuf;

use crate::diagnostic::GeneratorError;
use crate::model::SourceFile;

const PRELUDE_SOURCE: &str = include_str!("prelude.json");

/// Pseudo path reported as the origin of prelude declarations.
pub const PRELUDE_PATH: &str = "<prelude>";

/// Parse the embedded prelude.
pub fn load_prelude() -> Result<SourceFile, GeneratorError> {
    let mut file: SourceFile =
        serde_json::from_str(PRELUDE_SOURCE).map_err(|e| GeneratorError::InvalidSourceFile {
            path: PathBuf::from(PRELUDE_PATH),
            message: e.to_string(),
        })?;
    file.path = PathBuf::from(PRELUDE_PATH);
    Ok(file)
}
