//! Declarations of the source model.

use serde::{Deserialize, Serialize};

use super::annotation::Annotation;
use super::types::TypeRef;
use crate::diagnostic::Span;

/// A top-level entry of a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Declaration {
    Class(ClassDecl),
    TypeAlias(TypeAliasDecl),
}

impl Declaration {
    pub fn qualified_name(&self) -> String {
        match self {
            Declaration::Class(class) => class.qualified_name(),
            Declaration::TypeAlias(alias) => qualify(&alias.package, &alias.name),
        }
    }

    pub fn location(&self) -> Option<&Span> {
        match self {
            Declaration::Class(class) => class.location.as_ref(),
            Declaration::TypeAlias(alias) => alias.location.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    Interface,
    #[default]
    Class,
    AbstractClass,
    DataClass,
    ValueClass,
    EnumClass,
    Object,
    AnnotationClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    #[serde(default)]
    pub package: String,
    /// Simple name; nested classes are indexed as `Outer.Inner`.
    pub name: String,
    #[serde(default)]
    pub class_kind: ClassKind,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub super_types: Vec<TypeRef>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub companion: Option<CompanionDecl>,
    #[serde(default)]
    pub nested: Vec<ClassDecl>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub location: Option<Span>,
}

impl ClassDecl {
    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.name)
    }

    /// Last segment of the (possibly nested) name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn annotation(&self, qualified_name: &str) -> Option<&Annotation> {
        super::annotation::find(&self.annotations, qualified_name)
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotation(qualified_name).is_some()
    }

    /// The declaration's own type scope.
    pub fn scope(&self) -> TypeScope<'_> {
        TypeScope {
            name: self.qualified_name(),
            type_parameters: &self.type_parameters,
            super_types: &self.super_types,
        }
    }

    /// The scope of the companion object, if there is one.
    pub fn companion_scope(&self) -> Option<TypeScope<'_>> {
        self.companion.as_ref().map(|companion| TypeScope {
            name: format!("{}.{}", self.qualified_name(), companion.name),
            type_parameters: &companion.type_parameters,
            super_types: &companion.super_types,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub location: Option<Span>,
}

impl PropertyDecl {
    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        super::annotation::find(&self.annotations, qualified_name).is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionDecl {
    #[serde(default = "default_companion_name")]
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub super_types: Vec<TypeRef>,
}

impl Default for CompanionDecl {
    fn default() -> Self {
        Self {
            name: default_companion_name(),
            type_parameters: Vec::new(),
            super_types: Vec::new(),
        }
    }
}

fn default_companion_name() -> String {
    "Companion".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasDecl {
    #[serde(default)]
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(rename = "type")]
    pub target: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub location: Option<Span>,
}

/// A named set of type parameters and supertypes that type references are resolved in.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    pub name: String,
    pub type_parameters: &'a [String],
    pub super_types: &'a [TypeRef],
}

impl<'a> TypeScope<'a> {
    pub fn type_parameter_index(&self, name: &str) -> Option<usize> {
        self.type_parameters.iter().position(|p| p == name)
    }
}

pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}
