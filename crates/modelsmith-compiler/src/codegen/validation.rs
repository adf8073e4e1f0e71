//! Synthesis of the validating factory functions (`of` and template functions).
//!
//! Every property that needs validation gets its own local result, all of them
//! are evaluated, and only then does the function branch once: either every
//! local is a success and the model is constructed, or each failed local adds
//! its field failure to a list that is known to be non-empty.

use super::kotlin::{identifier, write_parameters, CodeWriter, Imports};
use super::types::{field_type, input_type, local_failure, Mode};
use crate::ir::{known, Property, PropertyKind, TypeName};

const VALIDATE_PACKAGE: &str = "modelsmith.core";

/// A factory function to synthesize.
#[derive(Debug, Clone)]
pub struct Factory<'a> {
    /// `of`, or the function name of a validation template.
    pub name: &'a str,
    /// Rendered extension receiver, e.g. `Address.Companion`.
    pub receiver: Option<String>,
    pub properties: &'a [Property],
    /// The class being constructed.
    pub constructed: TypeName,
    /// The class the field-failure variants are nested in.
    pub field_failure: TypeName,
    /// Element type of the failure list.
    pub failure_union: TypeName,
    pub mode: Mode,
}

/// How the success branch refers to one property.
enum Access {
    /// Passed through as the parameter itself.
    Direct(String),
    /// Held in a local (or parameter) of type `Either`.
    Validated(String),
}

pub fn write_factory(w: &mut CodeWriter, imports: &mut Imports, factory: &Factory<'_>) {
    let parameters: Vec<String> = factory
        .properties
        .iter()
        .map(|p| format!("{}: {}", identifier(&p.name), imports.render(&input_type(&p.kind, factory.mode))))
        .collect();
    let result = imports.render(&known::either(
        known::nel(factory.failure_union.clone()),
        factory.constructed.clone(),
    ));
    let head = match &factory.receiver {
        Some(receiver) => format!("fun {}.{}", receiver, factory.name),
        None => format!("fun {}", factory.name),
    };
    write_parameters(w, &head, &parameters, &format!(": {} {{", result));
    w.indent();

    let either = imports.reference(&known::either_class());
    let mut accesses = Vec::with_capacity(factory.properties.len());
    for property in factory.properties {
        accesses.push(write_local(w, imports, property, factory.mode, &either));
    }

    let constructed = imports.reference(&factory.constructed);
    let arguments: Vec<String> = factory
        .properties
        .iter()
        .zip(&accesses)
        .map(|(property, access)| {
            let value = match access {
                Access::Direct(name) => name.clone(),
                Access::Validated(local) => format!("{}.value", local),
            };
            format!("{} = {}", identifier(&property.name), value)
        })
        .collect();

    let validated: Vec<(&Property, &str)> = factory
        .properties
        .iter()
        .zip(&accesses)
        .filter_map(|(property, access)| match access {
            Access::Validated(local) => Some((property, local.as_str())),
            Access::Direct(_) => None,
        })
        .collect();

    if validated.is_empty() {
        write_parameters(w, &format!("return {}.Right({}", either, constructed), &arguments, ")");
    } else {
        let condition = validated
            .iter()
            .map(|(_, local)| format!("{} is {}.Right", local, either))
            .collect::<Vec<_>>()
            .join(" && ");
        w.open(format!("return if ({}) {{", condition));
        write_parameters(w, &format!("{}.Right({}", either, constructed), &arguments, ")");
        w.close("} else {");
        w.indent();

        let variants = imports.reference(&factory.field_failure);
        let union = imports.render(&factory.failure_union);
        let to_nel = imports.member(known::ARROW_CORE, "toNonEmptyListOrNull");
        w.open(format!("{}.Left(", either));
        w.open(format!("buildList<{}> {{", union));
        for (property, local) in &validated {
            w.line(format!(
                "if ({local} is {either}.Left) add({variants}.{id}({local}.value))",
                local = local,
                either = either,
                variants = variants,
                id = property.failure_id(),
            ));
        }
        w.close(format!("}}.{}()!!", to_nel));
        w.close(")");
        w.close("}");
    }

    w.close("}");
}

/// Write the local validation result of one property, if it needs one.
fn write_local(
    w: &mut CodeWriter,
    imports: &mut Imports,
    property: &Property,
    mode: Mode,
    either: &str,
) -> Access {
    let name = identifier(&property.name);
    let local = property.validated_name();
    let right_null = format!("{}.Right(null)", either);

    let expression = match &property.kind {
        PropertyKind::Standard { .. } => return Access::Direct(name),
        PropertyKind::ValidatedValue(value) => {
            let wrapper = imports.reference(&value.wrapper);
            let function = if value.nullable { "ofNullable" } else { "of" };
            w.line(format!("val {} = {}.{}({})", local, wrapper, function, name));
            return Access::Validated(local);
        }
        PropertyKind::ValidatedValueOptional { value, nullable } => {
            let wrapper = imports.reference(&value.wrapper);
            let function = if value.nullable { "ofNullable" } else { "of" };
            if *nullable {
                format!("{}?.let {{ {}.{}(it) }} ?: {}", name, wrapper, function, right_null)
            } else {
                format!("{}.{}({})", wrapper, function, name)
            }
        }
        PropertyKind::GeneratedModel(model) => {
            if !model.nullable {
                return Access::Validated(name);
            }
            format!("{} ?: {}", name, right_null)
        }
        PropertyKind::GeneratedModelOptional { model, nullable } => {
            let none = imports.reference(&known::none());
            let some = imports.reference(&known::some());
            let present = if model.nullable {
                format!(
                    "it?.map {{ model -> {some}(model) }} ?: {either}.Right({some}(null))",
                    some = some,
                    either = either
                )
            } else {
                format!("it.map {{ model -> {}(model) }}", some)
            };
            let access = if *nullable { "?." } else { "." };
            let fallback = if *nullable { format!(" ?: {}", right_null) } else { String::new() };
            format!(
                "{}{}fold({{ {}.Right({}) }}) {{ {} }}{}",
                name, access, either, none, present, fallback
            )
        }
        PropertyKind::GeneratedModelList { model, nullable }
        | PropertyKind::GeneratedModelNonEmptyList { model, nullable } => {
            let validate = imports.member(VALIDATE_PACKAGE, "validate");
            let access = if *nullable { "?." } else { "." };
            let elements = if model.nullable {
                format!("{}{}map {{ it ?: {} }}{}", name, access, right_null, access)
            } else {
                format!("{}{}", name, access)
            };
            let fallback = if *nullable { format!(" ?: {}", right_null) } else { String::new() };
            format!("{}{}(){}", elements, validate, fallback)
        }
    };

    let failure = local_failure(&property.kind, mode);
    let local_type = match failure {
        Some(failure) => imports.render(&known::either(failure, field_type(&property.kind, mode))),
        None => return Access::Direct(name),
    };
    w.line(format!("val {}: {} = {}", local, local_type, expression));
    Access::Validated(local)
}
