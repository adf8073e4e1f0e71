//! # modelsmith compiler
//!
//! Generates Kotlin models, params, builders and field-failure unions from
//! annotated model templates, using Arrow's `Either`, `Nel` and `Option`.
//!
//! ## Architecture
//!
//! ```text
//! Source model (JSON)    Prelude (embedded)
//!        │                      │
//!        ▼                      ▼
//! ┌──────────────┐       ┌──────────────┐
//! │   Frontend   │ ────▶ │ Declaration  │  name → class / alias / type parameter
//! │ (JSON → AST) │       │    Index     │
//! └──────────────┘       └──────┬───────┘
//!                               ▼
//!                        ┌──────────────┐
//!                        │   Analyze    │  classify properties, resolve failure
//!                        │  (AST → IR)  │  types, expand composed fields
//!                        └──────┬───────┘
//!                               ▼
//!                        ┌──────────────┐
//!                        │   Validate   │  structure checks
//!                        └──────┬───────┘
//!                               ▼
//!                        ┌──────────────┐
//!                        │   Codegen    │  Kotlin source per declaration
//!                        │ (IR → .kt)   │
//!                        └──────┬───────┘
//!                               ▼
//!                        ┌──────────────┐
//!                        │ FileEmitter  │
//!                        └──────────────┘
//! ```
//!
//! A failing declaration is reported and skipped; the others are still generated.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelsmith_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     input_dir: "model".into(),
//!     out_dir: "build/generated/modelsmith".into(),
//!     ..Default::default()
//! };
//!
//! let report = Generator::new(config).generate()?;
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

pub mod analyze;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod model;
pub mod output;
pub mod prelude;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use codegen::GeneratedFile;
pub use config::{GeneratorConfig, MarkerNames};
pub use diagnostic::{DeclarationDiagnostic, GeneratorError};
pub use output::{DirectoryEmitter, FileEmitter, MemoryEmitter};

use analyze::{ResolutionCache, TypeContext};
use ir::ModelIR;
use model::{ClassDecl, DeclarationIndex};

/// Runs the generation pipeline for one configuration.
pub struct Generator {
    config: GeneratorConfig,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Annotated declarations found.
    pub declarations: usize,
    /// Declarations whose files were all generated.
    pub generated: Vec<String>,
    /// Paths written (relative paths when nothing was written to disk).
    pub files: Vec<PathBuf>,
    /// Declarations that failed, with the reason.
    pub diagnostics: Vec<DeclarationDiagnostic>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyzed declarations, for `inspect`.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub models: Vec<ModelIR>,
    pub diagnostics: Vec<DeclarationDiagnostic>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads the source model (and the prelude, unless disabled) into an index.
    pub fn load(&self) -> Result<DeclarationIndex, GeneratorError> {
        let mut frontend = frontend::create_frontend(&self.config.language)?;

        let mut files = Vec::new();
        if self.config.include_prelude {
            files.push(prelude::load_prelude()?);
        }
        files.extend(frontend.load_directory(&self.config.input_dir)?);

        let index = DeclarationIndex::build(&files)?;
        debug!(
            files = files.len(),
            declarations = index.len(),
            language = frontend.language(),
            "loaded source model"
        );
        Ok(index)
    }

    /// Generates every declaration into the configured output directory.
    ///
    /// Also writes the Kotlin runtime when `emit_runtime` is set.
    pub fn generate(&self) -> Result<GenerationReport, GeneratorError> {
        let mut emitter = DirectoryEmitter::new(&self.config.out_dir);
        let mut report = self.generate_into(&mut emitter)?;
        if self.config.emit_runtime {
            report.files.extend(self.write_runtime(&self.config.out_dir)?);
        }
        info!(
            declarations = report.declarations,
            generated = report.generated.len(),
            files = report.files.len(),
            failed = report.diagnostics.len(),
            "generation finished"
        );
        Ok(report)
    }

    /// Runs the whole pipeline without writing anything.
    pub fn check(&self) -> Result<GenerationReport, GeneratorError> {
        self.generate_into(&mut MemoryEmitter::new())
    }

    /// Generates every declaration into `emitter`.
    pub fn generate_into(&self, emitter: &mut dyn FileEmitter) -> Result<GenerationReport, GeneratorError> {
        let index = self.load()?;
        let ctx = TypeContext::new(&index, &self.config.markers);
        let mut cache = ResolutionCache::new();
        let mut report = GenerationReport::default();

        for class in analyze::targets(&ctx) {
            report.declarations += 1;
            let generated = analyze_target(&ctx, &mut cache, class)
                .and_then(|model| codegen::generate(&model, &self.config.markers));

            match generated {
                Ok(code) => {
                    for file in &code.files {
                        report.files.push(emitter.emit(file)?);
                    }
                    info!(
                        declaration = %code.declaration,
                        files = code.files.len(),
                        "generated declaration"
                    );
                    report.generated.push(code.declaration);
                }
                Err(error) => report.diagnostics.push(skip(class, error)),
            }
        }

        let (hits, misses) = cache.stats();
        debug!(hits, misses, "failure type cache");
        Ok(report)
    }

    /// Analyzes every declaration without generating code.
    pub fn analyze(&self) -> Result<AnalysisReport, GeneratorError> {
        let index = self.load()?;
        let ctx = TypeContext::new(&index, &self.config.markers);
        let mut cache = ResolutionCache::new();
        let mut report = AnalysisReport::default();

        for class in analyze::targets(&ctx) {
            match analyze_target(&ctx, &mut cache, class) {
                Ok(model) => report.models.push(model),
                Err(error) => report.diagnostics.push(skip(class, error)),
            }
        }
        Ok(report)
    }

    /// Writes the Kotlin runtime library under `out_dir`.
    pub fn write_runtime(&self, out_dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
        let emitter = DirectoryEmitter::new(out_dir);
        codegen::get_runtime_modules()
            .into_iter()
            .map(|(path, content)| emitter.write(Path::new(path), content))
            .collect()
    }
}

/// Validate, analyze and re-validate one annotated declaration.
fn analyze_target<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    class: &'a ClassDecl,
) -> Result<ModelIR, GeneratorError> {
    let target = analyze::find_target(ctx, class)?.ok_or_else(|| GeneratorError::CodegenFailed {
        message: format!("`{}` is not a generation target", class.qualified_name()),
    })?;
    validate::validate_target(class, &target, ctx.markers)?;
    let model = analyze::analyze_declaration(ctx, cache, class, &target)?;
    validate::validate_model(&model)?;
    Ok(model)
}

fn skip(class: &ClassDecl, error: GeneratorError) -> DeclarationDiagnostic {
    let severity = if error.is_fatal() { "fatal" } else { "error" };
    warn!(
        declaration = %class.qualified_name(),
        severity,
        error = %error,
        "declaration skipped"
    );
    DeclarationDiagnostic::new(class.qualified_name(), class.location.clone(), error)
}
