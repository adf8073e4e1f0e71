//! Model and params data classes with their validating companions.

use super::file::GeneratedFile;
use super::kotlin::{identifier, CodeWriter, Imports};
use super::types::{field_type, Mode};
use super::validation::{write_factory, Factory};
use super::write_class_header;
use crate::ir::{ModelIR, Property, TypeName};

/// The model: every property, `of` returning `Either<Nel<XFieldFailure>, X>`.
pub fn generate_model(model: &ModelIR) -> GeneratedFile {
    let names = &model.names;
    generate_class(
        model,
        &model.properties,
        names.model(),
        names.field_failure(),
        Mode::Model,
    )
}

/// The params: non-external properties, nested models as their params,
/// `of` returning `Either<Nel<XRequiredFieldFailure>, XParams>`.
pub fn generate_params(model: &ModelIR) -> GeneratedFile {
    let names = &model.names;
    generate_class(
        model,
        &model.params_properties(),
        names.params(),
        names.required_field_failure(),
        Mode::Params,
    )
}

fn generate_class(
    model: &ModelIR,
    properties: &[Property],
    class: TypeName,
    failure_union: TypeName,
    mode: Mode,
) -> GeneratedFile {
    let package = &model.names.package;
    let mut imports = Imports::new(package);
    imports.declare(&class);

    let fields: Vec<String> = properties
        .iter()
        .map(|p| format!("val {}: {}", identifier(&p.name), imports.render(&field_type(&p.kind, mode))))
        .collect();

    let mut w = CodeWriter::new();
    let name = imports.reference(&class);
    write_class_header(&mut w, &name, &fields);
    w.open("companion object {");
    write_factory(
        &mut w,
        &mut imports,
        &Factory {
            name: "of",
            receiver: None,
            properties,
            constructed: class.clone(),
            field_failure: model.names.field_failure(),
            failure_union: failure_union.clone(),
            mode,
        },
    );

    let templates = model.templates.iter().filter(|t| match mode {
        Mode::Model => t.scope.includes_model(),
        Mode::Params => t.scope.includes_params(),
    });
    for template in templates {
        let prevalidated = template.apply(properties);
        w.blank();
        write_factory(
            &mut w,
            &mut imports,
            &Factory {
                name: &template.function,
                receiver: None,
                properties: &prevalidated,
                constructed: class.clone(),
                field_failure: model.names.field_failure(),
                failure_union: failure_union.clone(),
                mode,
            },
        );
    }
    w.close("}");
    w.close("}");

    GeneratedFile::assemble(package, class.simple_name(), &imports, &w.finish())
}
