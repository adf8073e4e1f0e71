//! Generated Kotlin compilation units.

use std::path::PathBuf;

use serde::Serialize;

use super::kotlin::Imports;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Generated code. Do not modify by hand.";

/// One generated `.kt` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub package: String,
    /// File name without extension, usually the main declared type.
    pub name: String,
    pub content: String,
}

impl GeneratedFile {
    /// Assemble header, package and imports around `body`.
    ///
    /// `imports` must have seen every type the body renders.
    pub fn assemble(package: &str, name: impl Into<String>, imports: &Imports, body: &str) -> Self {
        let mut content = String::new();
        content.push_str(GENERATED_HEADER);
        content.push_str("\n\n");
        if !package.is_empty() {
            content.push_str(&format!("package {}\n\n", package));
        }
        let lines = imports.lines();
        if !lines.is_empty() {
            for line in lines {
                content.push_str(&line);
                content.push('\n');
            }
            content.push('\n');
        }
        content.push_str(body);

        Self {
            package: package.to_string(),
            name: name.into(),
            content,
        }
    }

    /// `com/acme/User.kt`
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.kt", self.name));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{known, TypeName};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_layout() {
        let mut imports = Imports::new("com.acme");
        let rendered = imports.render(&known::option(TypeName::new("kotlin", "Int")));
        let file = GeneratedFile::assemble(
            "com.acme",
            "User",
            &imports,
            &format!("data class User(val age: {})\n", rendered),
        );
        assert_eq!(
            file.content,
            "// Generated code. Do not modify by hand.\n\npackage com.acme\n\nimport arrow.core.Option\n\ndata class User(val age: Option<Int>)\n"
        );
        assert_eq!(file.relative_path(), PathBuf::from("com/acme/User.kt"));
    }

    #[test]
    fn test_default_package() {
        let file = GeneratedFile::assemble("", "User", &Imports::new(""), "class User\n");
        assert_eq!(file.relative_path(), PathBuf::from("User.kt"));
        assert!(!file.content.contains("package"));
    }
}
