//! Type references as written in the source model.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::type_expr;
use crate::diagnostic::GeneratorError;

/// A reference to a type, e.g. `kotlin.collections.List<out com.acme.Item>?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeRefRepr", into = "String")]
pub struct TypeRef {
    /// Qualified name, or a bare type-parameter name.
    pub name: String,
    pub arguments: Vec<TypeArgument>,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Star,
    Type { variance: Variance, type_ref: TypeRef },
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        self.arguments = arguments
            .into_iter()
            .map(|type_ref| TypeArgument::Type {
                variance: Variance::Invariant,
                type_ref,
            })
            .collect();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Parse the string shorthand.
    pub fn parse(text: &str) -> Result<Self, GeneratorError> {
        type_expr::parse(text)
    }

    /// Last segment of the name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The type argument at `index`, if it is not a star projection.
    pub fn argument(&self, index: usize) -> Option<&TypeRef> {
        match self.arguments.get(index) {
            Some(TypeArgument::Type { type_ref, .. }) => Some(type_ref),
            _ => None,
        }
    }

    /// Replace type-parameter names using `bindings`, merging nullability.
    pub fn substitute(&self, bindings: &HashMap<&str, &TypeRef>) -> TypeRef {
        if self.arguments.is_empty() {
            if let Some(bound) = bindings.get(self.name.as_str()) {
                let mut bound = (*bound).clone();
                bound.nullable |= self.nullable;
                return bound;
            }
        }

        TypeRef {
            name: self.name.clone(),
            arguments: self
                .arguments
                .iter()
                .map(|argument| match argument {
                    TypeArgument::Star => TypeArgument::Star,
                    TypeArgument::Type { variance, type_ref } => TypeArgument::Type {
                        variance: *variance,
                        type_ref: type_ref.substitute(bindings),
                    },
                })
                .collect(),
            nullable: self.nullable,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Star => f.write_str("*"),
            TypeArgument::Type { variance, type_ref } => match variance {
                Variance::Invariant => write!(f, "{}", type_ref),
                Variance::In => write!(f, "in {}", type_ref),
                Variance::Out => write!(f, "out {}", type_ref),
            },
        }
    }
}

impl From<TypeRef> for String {
    fn from(type_ref: TypeRef) -> Self {
        type_ref.to_string()
    }
}

// ============================================================================
// Wire representation
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Text(String),
    Structured {
        name: String,
        #[serde(default)]
        arguments: Vec<TypeRefRepr>,
        #[serde(default)]
        nullable: bool,
    },
}

impl TryFrom<TypeRefRepr> for TypeRef {
    type Error = GeneratorError;

    fn try_from(repr: TypeRefRepr) -> Result<Self, Self::Error> {
        match repr {
            TypeRefRepr::Text(text) => type_expr::parse(&text),
            TypeRefRepr::Structured {
                name,
                arguments,
                nullable,
            } => {
                let arguments = arguments
                    .into_iter()
                    .map(|argument| match argument {
                        TypeRefRepr::Text(text) => type_expr::parse_argument(&text),
                        structured => Ok(TypeArgument::Type {
                            variance: Variance::Invariant,
                            type_ref: TypeRef::try_from(structured)?,
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(TypeRef {
                    name,
                    arguments,
                    nullable,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_and_shorthand_agree() {
        let structured: TypeRef = serde_json::from_str(
            r#"{ "name": "kotlin.collections.List", "arguments": ["com.acme.Item"], "nullable": true }"#,
        )
        .unwrap();
        let shorthand: TypeRef =
            serde_json::from_str(r#""kotlin.collections.List<com.acme.Item>?""#).unwrap();

        assert_eq!(structured, shorthand);
    }

    #[test]
    fn test_serializes_as_shorthand() {
        let type_ref = TypeRef::parse("arrow.core.Option<out kotlin.String?>").unwrap();
        let json = serde_json::to_string(&type_ref).unwrap();
        assert_eq!(json, r#""arrow.core.Option<out kotlin.String?>""#);
    }

    #[test]
    fn test_substitute_merges_nullability() {
        let target = TypeRef::new("kotlin.Int");
        let mut bindings = HashMap::new();
        bindings.insert("T", &target);

        let substituted = TypeRef::parse("kotlin.collections.List<T?>")
            .unwrap()
            .substitute(&bindings);
        assert_eq!(substituted.to_string(), "kotlin.collections.List<kotlin.Int?>");
    }
}
