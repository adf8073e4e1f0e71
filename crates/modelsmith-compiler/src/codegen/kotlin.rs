//! Kotlin rendering primitives: imports, type references and an indenting writer.

use std::collections::{BTreeSet, HashMap};

use crate::ir::{TypeArgumentName, TypeName};

/// Packages whose types are visible without an import.
const DEFAULT_IMPORTS: &[&str] = &["kotlin", "kotlin.collections"];

/// Hard keywords that must be escaped when used as identifiers.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Escape an identifier that collides with a Kotlin keyword.
pub fn identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Imports of one generated file.
///
/// The first type to use a simple name claims it; later types with the same
/// simple name from elsewhere are written fully qualified.
#[derive(Debug, Clone)]
pub struct Imports {
    package: String,
    claimed: HashMap<String, String>,
    imported: BTreeSet<String>,
}

impl Imports {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            claimed: HashMap::new(),
            imported: BTreeSet::new(),
        }
    }

    /// Claim the simple names of types declared in the file itself.
    pub fn declare(&mut self, type_name: &TypeName) {
        if let Some(first) = type_name.simple_names.first() {
            self.claimed
                .entry(first.clone())
                .or_insert_with(|| type_name.top_level_name());
        }
    }

    /// Claim the simple name of a class nested in the file, so that other types
    /// sharing it are written fully qualified inside the enclosing body.
    pub fn shadow(&mut self, nested: &TypeName) {
        self.claimed
            .entry(nested.simple_name().to_string())
            .or_insert_with(|| nested.canonical_name());
    }

    /// How to refer to the class of `type_name`, ignoring arguments and nullability.
    pub fn reference(&mut self, type_name: &TypeName) -> String {
        let simple = type_name.simple_names.join(".");
        let Some(first) = type_name.simple_names.first() else {
            return simple;
        };
        if type_name.package.is_empty() {
            return simple;
        }

        let top = type_name.top_level_name();
        match self.claimed.get(first) {
            Some(owner) if *owner == top => return simple,
            Some(_) => return type_name.canonical_name(),
            None => {}
        }

        self.claimed.insert(first.clone(), top.clone());
        let implicit = type_name.package == self.package
            || DEFAULT_IMPORTS.contains(&type_name.package.as_str());
        if !implicit {
            self.imported.insert(top);
        }
        simple
    }

    /// Import a top-level function or property.
    pub fn member(&mut self, package: &str, name: &str) -> String {
        if package != self.package && !DEFAULT_IMPORTS.contains(&package) {
            self.imported.insert(format!("{}.{}", package, name));
        }
        name.to_string()
    }

    /// Render a full type, registering every class it mentions.
    pub fn render(&mut self, type_name: &TypeName) -> String {
        let mut out = self.reference(type_name);
        if !type_name.arguments.is_empty() {
            let arguments: Vec<String> = type_name
                .arguments
                .iter()
                .map(|argument| match argument {
                    TypeArgumentName::Star => "*".to_string(),
                    TypeArgumentName::Type(inner) => self.render(inner),
                })
                .collect();
            out.push('<');
            out.push_str(&arguments.join(", "));
            out.push('>');
        }
        if type_name.nullable {
            out.push('?');
        }
        out
    }

    /// Sorted import lines.
    pub fn lines(&self) -> Vec<String> {
        self.imported.iter().map(|i| format!("import {}", i)).collect()
    }
}

/// Writes lines at the current indent level, four spaces per level.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(&"    ".repeat(self.indent));
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `text` (usually ending in `{` or `(`) and indent.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedent and write `text`.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Write `head(` + one parameter per line + `)tail`, or `head()tail` when empty.
pub fn write_parameters(w: &mut CodeWriter, head: &str, parameters: &[String], tail: &str) {
    if parameters.is_empty() {
        w.line(format!("{}(){}", head, tail));
        return;
    }
    w.open(format!("{}(", head));
    for (i, parameter) in parameters.iter().enumerate() {
        let separator = if i + 1 < parameters.len() { "," } else { "" };
        w.line(format!("{}{}", parameter, separator));
    }
    w.close(format!("){}", tail));
}
