//! Generator configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;

/// Default name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "modelsmith.json";

/// Configuration for the modelsmith generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Directory containing source model files.
    pub input_dir: PathBuf,

    /// Directory to write generated Kotlin sources.
    pub out_dir: PathBuf,

    /// Source language (default: "json").
    pub language: String,

    /// Merge the bundled value-object library into the source model.
    pub include_prelude: bool,

    /// Also write the Kotlin runtime library next to the generated sources.
    pub emit_runtime: bool,

    /// Qualified names of the recognised marker types.
    pub markers: MarkerNames,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("model"),
            out_dir: PathBuf::from("build/generated/modelsmith"),
            language: "json".to_string(),
            include_prelude: true,
            emit_runtime: false,
            markers: MarkerNames::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist. Relative directories in the
    /// file are resolved against the directory containing it.
    pub fn load(path: &Path) -> Result<Option<Self>, GeneratorError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::io(path, e.to_string()))?;

        let mut config: Self =
            serde_json::from_str(&content).map_err(|e| GeneratorError::InvalidConfig {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(base) = path.parent() {
            if config.input_dir.is_relative() {
                config.input_dir = base.join(&config.input_dir);
            }
            if config.out_dir.is_relative() {
                config.out_dir = base.join(&config.out_dir);
            }
        }

        Ok(Some(config))
    }
}

/// Qualified names of every marker annotation and interface the generator reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerNames {
    pub model_template: String,
    pub validatable: String,
    pub external: String,
    pub add_field: String,
    pub value_object: String,
    pub value_validator: String,
    pub validation_template: String,
    pub model_validation_template: String,
    pub params_validation_template: String,
    pub option: String,
    pub list: String,
    pub non_empty_list: String,
    /// Other names of the non-empty list, such as Arrow's `Nel` alias.
    pub non_empty_list_aliases: Vec<String>,
    /// Annotations never walked during composition expansion.
    pub ignored_annotations: Vec<String>,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            model_template: "modelsmith.annotation.ModelTemplate".to_string(),
            validatable: "modelsmith.annotation.Validatable".to_string(),
            external: "modelsmith.annotation.External".to_string(),
            add_field: "modelsmith.annotation.AddField".to_string(),
            value_object: "modelsmith.core.ValueObject".to_string(),
            value_validator: "modelsmith.core.ValueValidator".to_string(),
            validation_template: "modelsmith.annotation.ValidationTemplate".to_string(),
            model_validation_template: "modelsmith.annotation.ModelValidationTemplate".to_string(),
            params_validation_template: "modelsmith.annotation.ParamsValidationTemplate".to_string(),
            option: "arrow.core.Option".to_string(),
            list: "kotlin.collections.List".to_string(),
            non_empty_list: "arrow.core.NonEmptyList".to_string(),
            non_empty_list_aliases: vec!["arrow.core.Nel".to_string()],
            ignored_annotations: vec![
                "kotlin.Metadata".to_string(),
                "kotlin.annotation.Retention".to_string(),
                "kotlin.annotation.Target".to_string(),
                "kotlin.annotation.Repeatable".to_string(),
                "kotlin.annotation.MustBeDocumented".to_string(),
            ],
        }
    }
}

impl MarkerNames {
    pub fn is_ignored_annotation(&self, name: &str) -> bool {
        self.ignored_annotations.iter().any(|ignored| ignored == name)
    }

    pub fn is_non_empty_list(&self, name: &str) -> bool {
        name == self.non_empty_list || self.non_empty_list_aliases.iter().any(|alias| alias == name)
    }

    /// Whether `name` is one of the three validation template markers.
    pub fn is_validation_template(&self, name: &str) -> bool {
        name == self.validation_template
            || name == self.model_validation_template
            || name == self.params_validation_template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = GeneratorConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "inputDir": "src/model", "markers": { "option": "my.Option" } }"#,
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap().unwrap();
        assert_eq!(config.input_dir, dir.path().join("src/model"));
        assert_eq!(config.language, "json");
        assert!(config.include_prelude);
        assert_eq!(config.markers.option, "my.Option");
        assert_eq!(config.markers.list, "kotlin.collections.List");
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidConfig { .. }));
    }

    #[test]
    fn test_ignored_annotations() {
        let markers = MarkerNames::default();
        assert!(markers.is_ignored_annotation("kotlin.annotation.Repeatable"));
        assert!(!markers.is_ignored_annotation("modelsmith.annotation.AddField"));
        assert!(markers.is_validation_template("modelsmith.annotation.ParamsValidationTemplate"));
    }
}
