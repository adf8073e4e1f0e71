//! Name resolution over every declaration of a run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::declaration::{ClassDecl, Declaration, TypeAliasDecl, TypeScope};
use super::SourceFile;
use crate::diagnostic::GeneratorError;

/// What a type reference's name refers to.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// A type parameter of the scope the reference was written in.
    TypeParameter { index: usize },
    Class(&'a ClassDecl),
    Alias(&'a TypeAliasDecl),
    /// Not declared anywhere (e.g. `kotlin.String`).
    External,
}

#[derive(Debug)]
struct Entry {
    declaration: Declaration,
    origin: PathBuf,
}

/// All declarations keyed by qualified name, in load order.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    entries: HashMap<String, Entry>,
    order: Vec<String>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from source files, flattening nested classes.
    pub fn build<'f>(files: impl IntoIterator<Item = &'f SourceFile>) -> Result<Self, GeneratorError> {
        let mut index = Self::new();
        for file in files {
            index.add_file(file)?;
        }
        Ok(index)
    }

    pub fn add_file(&mut self, file: &SourceFile) -> Result<(), GeneratorError> {
        for declaration in &file.declarations {
            match declaration {
                Declaration::Class(class) => self.add_class(class, None, &file.path)?,
                Declaration::TypeAlias(_) => self.insert(declaration.clone(), &file.path)?,
            }
        }
        Ok(())
    }

    fn add_class(
        &mut self,
        class: &ClassDecl,
        outer: Option<&ClassDecl>,
        origin: &Path,
    ) -> Result<(), GeneratorError> {
        let mut flattened = class.clone();
        flattened.nested = Vec::new();
        if let Some(outer) = outer {
            flattened.package = outer.package.clone();
            flattened.name = format!("{}.{}", outer.name, class.name);
        }

        for nested in &class.nested {
            self.add_class(nested, Some(&flattened), origin)?;
        }

        // Keep nested classes reachable from their outer declaration.
        flattened.nested = class
            .nested
            .iter()
            .map(|nested| {
                let mut nested = nested.clone();
                nested.package = flattened.package.clone();
                nested.name = format!("{}.{}", flattened.name, nested.name);
                nested.nested = Vec::new();
                nested
            })
            .collect();

        self.insert(Declaration::Class(flattened), origin)
    }

    fn insert(&mut self, declaration: Declaration, origin: &Path) -> Result<(), GeneratorError> {
        let name = declaration.qualified_name();
        if let Some(existing) = self.entries.get(&name) {
            return Err(GeneratorError::DuplicateDeclaration {
                name,
                first: existing.origin.clone(),
                second: origin.to_path_buf(),
            });
        }

        self.order.push(name.clone());
        self.entries.insert(
            name,
            Entry {
                declaration,
                origin: origin.to_path_buf(),
            },
        );
        Ok(())
    }

    pub fn get(&self, qualified_name: &str) -> Option<&Declaration> {
        self.entries.get(qualified_name).map(|e| &e.declaration)
    }

    pub fn class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        match self.get(qualified_name) {
            Some(Declaration::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn origin(&self, qualified_name: &str) -> Option<&Path> {
        self.entries.get(qualified_name).map(|e| e.origin.as_path())
    }

    /// Declarations in load order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.order.iter().filter_map(|name| self.get(name))
    }

    /// Classes in load order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations().filter_map(|d| match d {
            Declaration::Class(class) => Some(class),
            Declaration::TypeAlias(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve a name written inside `scope` (or at top level when `None`).
    pub fn resolve(&self, name: &str, scope: Option<&TypeScope<'_>>) -> Resolved<'_> {
        if let Some(index) = scope.and_then(|s| s.type_parameter_index(name)) {
            return Resolved::TypeParameter { index };
        }
        match self.get(name) {
            Some(Declaration::Class(class)) => Resolved::Class(class),
            Some(Declaration::TypeAlias(alias)) => Resolved::Alias(alias),
            None => Resolved::External,
        }
    }
}
