//! Companion extensions for validatable data classes.

use super::file::GeneratedFile;
use super::kotlin::{identifier, write_parameters, CodeWriter, Imports};
use super::types::{field_type, Mode};
use super::validation::{write_factory, Factory};
use crate::ir::{known, ModelIR};

/// `XCompanionOf`: `fun X.Companion.of(...)`.
pub fn generate_companion_of(model: &ModelIR, companion: &str) -> GeneratedFile {
    let names = &model.names;
    let class = names.model();
    let mut imports = Imports::new(&names.package);
    let receiver = format!("{}.{}", imports.reference(&class), companion);

    let mut w = CodeWriter::new();
    write_factory(
        &mut w,
        &mut imports,
        &Factory {
            name: "of",
            receiver: Some(receiver),
            properties: &model.properties,
            constructed: class.clone(),
            field_failure: names.field_failure(),
            failure_union: names.field_failure(),
            mode: Mode::Model,
        },
    );

    GeneratedFile::assemble(
        &names.package,
        format!("{}CompanionOf", names.base),
        &imports,
        &w.finish(),
    )
}

/// `XCompanionOnly`: `fun X.Companion.only(...)` with `None` defaults for
/// option properties, or `None` when the class has no option property.
pub fn generate_companion_only(model: &ModelIR, companion: &str, option: &str) -> Option<GeneratedFile> {
    if !model.properties.iter().any(|p| p.kind.is_option(option)) {
        return None;
    }

    let names = &model.names;
    let class = names.model();
    let mut imports = Imports::new(&names.package);
    let name = imports.reference(&class);
    let none = imports.reference(&known::none());

    let parameters: Vec<String> = model
        .properties
        .iter()
        .map(|p| {
            let rendered = format!(
                "{}: {}",
                identifier(&p.name),
                imports.render(&field_type(&p.kind, Mode::Model))
            );
            if p.kind.is_option(option) {
                format!("{} = {}", rendered, none)
            } else {
                rendered
            }
        })
        .collect();
    let arguments: Vec<String> = model
        .properties
        .iter()
        .map(|p| {
            let name = identifier(&p.name);
            format!("{} = {}", name, name)
        })
        .collect();

    let mut w = CodeWriter::new();
    write_parameters(
        &mut w,
        &format!("fun {}.{}.only", name, companion),
        &parameters,
        &format!(": {} {{", name),
    );
    w.indent();
    write_parameters(&mut w, &format!("return {}", name), &arguments, "");
    w.close("}");

    Some(GeneratedFile::assemble(
        &names.package,
        format!("{}CompanionOnly", names.base),
        &imports,
        &w.finish(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_fixtures::{make_test_standard, make_test_validatable};
    use pretty_assertions::assert_eq;

    const OPTION: &str = "arrow.core.Option";

    #[test]
    fn test_companion_of() {
        let file = generate_companion_of(&make_test_validatable(), "Companion");
        assert_eq!(file.name, "AddressCompanionOf");
        assert_eq!(
            file.content,
            r#"// Generated code. Do not modify by hand.

package com.acme

import arrow.core.Either
import arrow.core.Nel
import arrow.core.Option
import arrow.core.toNonEmptyListOrNull
import modelsmith.core.valueobject.NonEmptyString

fun Address.Companion.of(
    zip: String,
    street: String,
    note: Option<String>
): Either<Nel<AddressFieldFailure>, Address> {
    val vZip = NonEmptyString.of(zip)
    return if (vZip is Either.Right) {
        Either.Right(Address(
            zip = vZip.value,
            street = street,
            note = note
        ))
    } else {
        Either.Left(
            buildList<AddressFieldFailure> {
                if (vZip is Either.Left) add(AddressFieldFailure.Zip(vZip.value))
            }.toNonEmptyListOrNull()!!
        )
    }
}
"#
        );
    }

    #[test]
    fn test_companion_only() {
        let file = generate_companion_only(&make_test_validatable(), "Factory", OPTION).unwrap();
        assert_eq!(file.name, "AddressCompanionOnly");
        assert_eq!(
            file.content,
            r#"// Generated code. Do not modify by hand.

package com.acme

import arrow.core.None
import arrow.core.Option
import modelsmith.core.valueobject.NonEmptyString

fun Address.Factory.only(
    zip: NonEmptyString,
    street: String,
    note: Option<String> = None
): Address {
    return Address(
        zip = zip,
        street = street,
        note = note
    )
}
"#
        );
    }

    #[test]
    fn test_companion_only_requires_an_option() {
        let mut model = make_test_validatable();
        model.properties[2].kind = make_test_standard("kotlin", "String");
        assert!(generate_companion_only(&model, "Companion", OPTION).is_none());
    }
}
