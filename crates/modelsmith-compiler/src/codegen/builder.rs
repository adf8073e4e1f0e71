//! Builders: every params property staged as an `Option`.

use super::file::GeneratedFile;
use super::kotlin::{identifier, write_parameters, CodeWriter, Imports};
use super::types::builder_type;
use super::write_class_header;
use crate::diagnostic::GeneratorError;
use crate::ir::{known, ModelIR, Property, PropertyKind};

pub fn generate_builder(model: &ModelIR) -> Result<GeneratedFile, GeneratorError> {
    let names = &model.names;
    let builder = names.builder().ok_or_else(|| GeneratorError::CodegenFailed {
        message: format!("`{}` has no builder", model.declaration),
    })?;
    let params = names.params();
    let properties = model.params_properties();

    let mut imports = Imports::new(&names.package);
    imports.declare(&builder);

    let staged: Vec<(String, String)> = properties
        .iter()
        .map(|p| {
            let option = known::option(builder_type(&p.kind));
            (identifier(&p.name), imports.render(&option))
        })
        .collect();

    let mut w = CodeWriter::new();
    let name = imports.reference(&builder);
    let fields: Vec<String> = staged.iter().map(|(n, t)| format!("val {}: {}", n, t)).collect();
    write_class_header(&mut w, &name, &fields);

    let params_name = imports.reference(&params);
    w.open(format!("fun build(): {} {{", imports.render(&known::option(params.clone()))));
    write_build_chain(&mut w, &mut imports, &properties, &params_name);
    w.close("}");
    w.blank();

    let none = if staged.is_empty() {
        String::new()
    } else {
        imports.reference(&known::none())
    };
    w.open("companion object {");
    let parameters: Vec<String> = staged
        .iter()
        .map(|(n, t)| format!("{}: {} = {}", n, t, none))
        .collect();
    write_parameters(&mut w, "fun only", &parameters, &format!(": {} {{", name));
    w.indent();
    let arguments: Vec<String> = staged.iter().map(|(n, _)| format!("{} = {}", n, n)).collect();
    write_parameters(&mut w, &format!("return {}", name), &arguments, "");
    w.close("}");
    w.close("}");
    w.close("}");

    Ok(GeneratedFile::assemble(&names.package, builder.simple_name(), &imports, &w.finish()))
}

/// `a.flatMap { a -> b.map { b -> Params(a = a, b = b) } }`
fn write_build_chain(w: &mut CodeWriter, imports: &mut Imports, properties: &[Property], params: &str) {
    let arguments: Vec<String> = properties
        .iter()
        .map(|p| {
            let name = identifier(&p.name);
            format!("{} = {}", name, name)
        })
        .collect();

    if properties.is_empty() {
        let some = imports.reference(&known::some());
        w.line(format!("return {}({}())", some, params));
        return;
    }

    for (i, property) in properties.iter().enumerate() {
        let name = identifier(&property.name);
        let source = staged_source(imports, property, &name);
        let combinator = if i + 1 == properties.len() { "map" } else { "flatMap" };
        let prefix = if i == 0 { "return " } else { "" };
        w.open(format!("{}{}.{} {{ {} ->", prefix, source, combinator, name));
    }
    write_parameters(w, params, &arguments, "");
    for _ in properties {
        w.close("}");
    }
}

/// The option a property is read from; staged nested builders are built first.
fn staged_source(imports: &mut Imports, property: &Property, name: &str) -> String {
    match &property.kind {
        PropertyKind::GeneratedModel(model) if model.names.builder().is_some() => {
            if model.nullable {
                let some = imports.reference(&known::some());
                format!("{}.flatMap {{ it?.build() ?: {}(null) }}", name, some)
            } else {
                format!("{}.flatMap {{ it.build() }}", name)
            }
        }
        _ => name.to_string(),
    }
}
