//! The source model: declarations, type references and annotations as read by a frontend.

pub mod annotation;
pub mod declaration;
pub mod index;
mod type_expr;
pub mod types;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use annotation::{Annotation, AnnotationValue};
pub use declaration::{
    ClassDecl, ClassKind, CompanionDecl, Declaration, PropertyDecl, TypeAliasDecl, TypeScope,
};
pub use index::{DeclarationIndex, Resolved};
pub use types::{TypeArgument, TypeRef, Variance};

/// The declarations of one input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}
