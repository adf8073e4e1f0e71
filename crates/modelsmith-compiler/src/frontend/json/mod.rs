//! JSON source model frontend.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::Frontend;
use crate::diagnostic::GeneratorError;
use crate::model::SourceFile;

/// Reads `*.json` source model files.
#[derive(Debug, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Parses a single source file.
    pub fn parse(&self, source: &str, path: &Path) -> Result<SourceFile, GeneratorError> {
        let mut file: SourceFile =
            serde_json::from_str(source).map_err(|e| GeneratorError::InvalidSourceFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        file.path = path.to_path_buf();
        Ok(file)
    }
}

impl Frontend for JsonFrontend {
    fn language(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load_directory(&mut self, dir: &Path) -> Result<Vec<SourceFile>, GeneratorError> {
        if !dir.is_dir() {
            return Err(GeneratorError::io(dir, "input directory does not exist"));
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = entry.map_err(|e| GeneratorError::io(dir, e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .map(|ext| self.extensions().contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);
            // The configuration file may live inside the input directory.
            let is_config = path
                .file_name()
                .is_some_and(|name| name == crate::config::CONFIG_FILE_NAME);
            if matches && !is_config {
                paths.push(path.to_path_buf());
            }
        }

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| GeneratorError::io(&path, e.to_string()))?;
            let file = self.parse(&source, &path)?;
            debug!(path = %path.display(), declarations = file.declarations.len(), "loaded source file");
            files.push(file);
        }

        Ok(files)
    }
}
