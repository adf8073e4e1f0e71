//! Writing generated files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::codegen::GeneratedFile;
use crate::diagnostic::GeneratorError;

/// Destination for generated files.
pub trait FileEmitter {
    /// Writes one file and returns where it went.
    fn emit(&mut self, file: &GeneratedFile) -> Result<PathBuf, GeneratorError>;
}

/// Writes `out_dir/<package path>/<Name>.kt`, creating directories as needed.
#[derive(Debug, Clone)]
pub struct DirectoryEmitter {
    out_dir: PathBuf,
}

impl DirectoryEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Writes raw content at a path relative to the output directory.
    pub fn write(&self, relative: &Path, content: &str) -> Result<PathBuf, GeneratorError> {
        let path = self.out_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }
        std::fs::write(&path, content).map_err(|e| GeneratorError::io(&path, e.to_string()))?;
        info!(path = %display_path(&path).display(), "wrote file");
        Ok(path)
    }
}

impl FileEmitter for DirectoryEmitter {
    fn emit(&mut self, file: &GeneratedFile) -> Result<PathBuf, GeneratorError> {
        self.write(&file.relative_path(), &file.content)
    }
}

/// Collects files in memory.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    pub files: Vec<GeneratedFile>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

impl FileEmitter for MemoryEmitter {
    fn emit(&mut self, file: &GeneratedFile) -> Result<PathBuf, GeneratorError> {
        self.files.push(file.clone());
        Ok(file.relative_path())
    }
}

/// `path` relative to the current directory when that is shorter to read.
pub fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|relative| !relative.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
}
