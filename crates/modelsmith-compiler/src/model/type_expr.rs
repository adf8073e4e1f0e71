//! Parser for the type-expression shorthand.
//!
//! ```text
//! type     := name arguments? '?'?
//! name     := ident ('.' ident)*
//! arguments:= '<' argument (',' argument)* '>'
//! argument := '*' | ('in' | 'out')? type
//! ```

use super::types::{TypeArgument, TypeRef, Variance};
use crate::diagnostic::GeneratorError;

/// Parse a complete type expression.
pub fn parse(text: &str) -> Result<TypeRef, GeneratorError> {
    let mut parser = Parser::new(text);
    let type_ref = parser.type_ref()?;
    parser.finish()?;
    Ok(type_ref)
}

/// Parse a single type argument (`*`, `out Foo`, `Foo`).
pub fn parse_argument(text: &str) -> Result<TypeArgument, GeneratorError> {
    let mut parser = Parser::new(text);
    let argument = parser.argument()?;
    parser.finish()?;
    Ok(argument)
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> GeneratorError {
        GeneratorError::InvalidTypeExpression {
            text: self.text.to_string(),
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn finish(&mut self) -> Result<(), GeneratorError> {
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected '{}' at offset {}", c, self.pos))),
        }
    }

    fn ident(&mut self) -> Result<String, GeneratorError> {
        self.skip_whitespace();
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(match self.chars.get(self.pos) {
                Some(c) => self.error(format!("expected identifier, found '{}'", c)),
                None => self.error("expected identifier, found end of input"),
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn name(&mut self) -> Result<String, GeneratorError> {
        let mut name = self.ident()?;
        while self.chars.get(self.pos) == Some(&'.') {
            self.pos += 1;
            name.push('.');
            name.push_str(&self.ident()?);
        }
        Ok(name)
    }

    fn type_ref(&mut self) -> Result<TypeRef, GeneratorError> {
        let name = self.name()?;
        let mut arguments = Vec::new();

        if self.eat('<') {
            loop {
                arguments.push(self.argument()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in type arguments"));
            }
        }

        let nullable = self.eat('?');
        Ok(TypeRef {
            name,
            arguments,
            nullable,
        })
    }

    fn argument(&mut self) -> Result<TypeArgument, GeneratorError> {
        if self.eat('*') {
            return Ok(TypeArgument::Star);
        }

        let variance = self.variance();
        let type_ref = self.type_ref()?;
        Ok(TypeArgument::Type { variance, type_ref })
    }

    /// Consumes `in`/`out` only when a type follows, so types named `out` still parse.
    fn variance(&mut self) -> Variance {
        self.skip_whitespace();
        let start = self.pos;
        for (keyword, variance) in [("in", Variance::In), ("out", Variance::Out)] {
            let end = start + keyword.len();
            let matches = self.chars.len() > end
                && self.chars[start..end].iter().copied().eq(keyword.chars())
                && self.chars[end].is_whitespace();
            if matches {
                self.pos = end;
                if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                    return variance;
                }
                self.pos = start;
            }
        }
        Variance::Invariant
    }
}
