//! Names of types in the generated code.

use std::fmt;

use serde::Serialize;

use crate::model::ClassDecl;

/// A fully resolved target type name, e.g. `arrow.core.Either<A, B>?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct TypeName {
    pub package: String,
    /// Enclosing classes first, e.g. `["UserFieldFailure", "Name"]`.
    pub simple_names: Vec<String>,
    pub arguments: Vec<TypeArgumentName>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgumentName {
    Star,
    Type(TypeName),
}

impl TypeName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// Split a qualified name at the first capitalised segment.
    ///
    /// `kotlin.collections.List` has package `kotlin.collections`; `com.acme.Outer.Inner`
    /// has package `com.acme` and simple names `Outer`, `Inner`.
    pub fn from_qualified(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.split('.').collect();
        let first_type = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(|c| c.is_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));

        Self {
            package: segments[..first_type].join("."),
            simple_names: segments[first_type..].iter().map(|s| s.to_string()).collect(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn of_class(class: &ClassDecl) -> Self {
        Self {
            package: class.package.clone(),
            simple_names: class.name.split('.').map(str::to_string).collect(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// A class nested inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn parameterized(mut self, arguments: Vec<TypeName>) -> Self {
        self.arguments = arguments.into_iter().map(TypeArgumentName::Type).collect();
        self
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// Qualified name without arguments or nullability.
    pub fn canonical_name(&self) -> String {
        let simple = self.simple_names.join(".");
        if self.package.is_empty() {
            simple
        } else {
            format!("{}.{}", self.package, simple)
        }
    }

    /// Qualified name of the outermost class, which is what gets imported.
    pub fn top_level_name(&self) -> String {
        let top = self.simple_names.first().map(String::as_str).unwrap_or_default();
        if self.package.is_empty() {
            top.to_string()
        } else {
            format!("{}.{}", self.package, top)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match argument {
                    TypeArgumentName::Star => f.write_str("*")?,
                    TypeArgumentName::Type(type_name) => write!(f, "{}", type_name)?,
                }
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self {
        type_name.to_string()
    }
}

/// Types and functions of the Kotlin/Arrow runtime the generated code refers to.
pub mod known {
    use super::TypeName;

    pub const ARROW_CORE: &str = "arrow.core";
    pub const MODELSMITH_CORE: &str = "modelsmith.core";

    pub fn either(left: TypeName, right: TypeName) -> TypeName {
        TypeName::new(ARROW_CORE, "Either").parameterized(vec![left, right])
    }

    pub fn nel(element: TypeName) -> TypeName {
        TypeName::new(ARROW_CORE, "Nel").parameterized(vec![element])
    }

    pub fn option(element: TypeName) -> TypeName {
        TypeName::new(ARROW_CORE, "Option").parameterized(vec![element])
    }

    pub fn list(element: TypeName) -> TypeName {
        TypeName::new("kotlin.collections", "List").parameterized(vec![element])
    }

    pub fn either_class() -> TypeName {
        TypeName::new(ARROW_CORE, "Either")
    }

    pub fn none() -> TypeName {
        TypeName::new(ARROW_CORE, "None")
    }

    pub fn some() -> TypeName {
        TypeName::new(ARROW_CORE, "Some")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_qualified() {
        let list = TypeName::from_qualified("kotlin.collections.List");
        assert_eq!(list.package, "kotlin.collections");
        assert_eq!(list.simple_names, vec!["List"]);

        let inner = TypeName::from_qualified("com.acme.Outer.Inner");
        assert_eq!(inner.package, "com.acme");
        assert_eq!(inner.simple_names, vec!["Outer", "Inner"]);
        assert_eq!(inner.top_level_name(), "com.acme.Outer");

        let bare = TypeName::from_qualified("String");
        assert_eq!(bare.package, "");
        assert_eq!(bare.canonical_name(), "String");
    }

    #[test]
    fn test_display() {
        let name = known::either(
            known::nel(TypeName::new("com.acme", "UserFieldFailure")),
            TypeName::new("com.acme", "User").with_nullable(true),
        );
        assert_eq!(
            name.to_string(),
            "arrow.core.Either<arrow.core.Nel<com.acme.UserFieldFailure>, com.acme.User?>"
        );
    }
}
