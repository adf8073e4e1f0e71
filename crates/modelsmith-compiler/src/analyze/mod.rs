//! Analysis of the source model into [`ModelIR`].
//!
//! For each annotated declaration: decode its marker, classify every property
//! (resolving validated values' failure types through their validator chains),
//! expand composed fields and collect validation templates.

mod cache;
pub mod classify;
pub mod compose;
pub mod failure;
pub mod markers;
pub mod properties;
pub mod templates;

pub use cache::ResolutionCache;

use tracing::debug;

use crate::config::MarkerNames;
use crate::diagnostic::GeneratorError;
use crate::ir::{GenerationTarget, ModelIR, ModelNames, TypeName};
use crate::model::{ClassDecl, DeclarationIndex};
use markers::ModelTemplateArgs;

/// Read-only inputs shared by every analysis step of a run.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    pub index: &'a DeclarationIndex,
    pub markers: &'a MarkerNames,
}

impl<'a> TypeContext<'a> {
    pub fn new(index: &'a DeclarationIndex, markers: &'a MarkerNames) -> Self {
        Self { index, markers }
    }
}

/// The marker that makes a declaration a generation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMarker {
    ModelTemplate(ModelTemplateArgs),
    Validatable,
}

impl TargetMarker {
    pub fn annotation_name<'m>(&self, markers: &'m MarkerNames) -> &'m str {
        match self {
            TargetMarker::ModelTemplate(_) => &markers.model_template,
            TargetMarker::Validatable => &markers.validatable,
        }
    }
}

/// Decode the target marker of `class`, if it has one.
pub fn find_target(ctx: &TypeContext<'_>, class: &ClassDecl) -> Result<Option<TargetMarker>, GeneratorError> {
    if let Some(annotation) = class.annotation(&ctx.markers.model_template) {
        return ModelTemplateArgs::from_annotation(annotation)
            .map(|args| Some(TargetMarker::ModelTemplate(args)));
    }
    if class.has_annotation(&ctx.markers.validatable) {
        return Ok(Some(TargetMarker::Validatable));
    }
    Ok(None)
}

/// Every generation target in load order.
pub fn targets<'a>(ctx: &TypeContext<'a>) -> impl Iterator<Item = &'a ClassDecl> + 'a {
    let markers = ctx.markers;
    ctx.index.classes().filter(move |class| {
        class.has_annotation(&markers.model_template) || class.has_annotation(&markers.validatable)
    })
}

/// Analyze one target declaration.
pub fn analyze_declaration<'a>(
    ctx: &TypeContext<'a>,
    cache: &mut ResolutionCache,
    class: &'a ClassDecl,
    target: &TargetMarker,
) -> Result<ModelIR, GeneratorError> {
    let (names, generation_target, templates) = match target {
        TargetMarker::ModelTemplate(args) => (
            ModelNames::template(class.package.clone(), args.name.clone()),
            GenerationTarget::ModelTemplate,
            templates::collect_templates(ctx, class)?,
        ),
        TargetMarker::Validatable => (
            ModelNames::validatable(TypeName::of_class(class)),
            GenerationTarget::Validatable {
                companion: class
                    .companion
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Companion".to_string()),
            },
            Vec::new(),
        ),
    };

    let properties = properties::build_properties(ctx, cache, class, target)?;
    debug!(
        declaration = %class.qualified_name(),
        properties = properties.len(),
        templates = templates.len(),
        "analyzed declaration"
    );

    Ok(ModelIR {
        declaration: class.qualified_name(),
        names,
        target: generation_target,
        properties,
        templates,
        location: class.location.clone(),
    })
}
