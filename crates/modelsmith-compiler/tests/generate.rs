//! End-to-end generation over JSON source models.

use std::path::{Path, PathBuf};

use modelsmith_compiler::{Generator, GeneratorConfig, GeneratorError, MemoryEmitter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn make_test_config(input: &Path, output: &Path) -> GeneratorConfig {
    GeneratorConfig {
        input_dir: input.to_path_buf(),
        out_dir: output.to_path_buf(),
        ..Default::default()
    }
}

fn write_model(dir: &Path, name: &str, declarations: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(name),
        format!(r#"{{ "declarations": {} }}"#, declarations),
    )
    .unwrap();
}

fn read(out: &Path, relative: &str) -> String {
    std::fs::read_to_string(out.join(relative))
        .unwrap_or_else(|e| panic!("{} was not generated: {}", relative, e))
}

#[test]
fn test_generate_shop() {
    let out = TempDir::new().unwrap();
    let config = make_test_config(&fixture("shop/model"), out.path());
    let report = Generator::new(config).generate().unwrap();

    assert!(report.is_success(), "{:?}", report.diagnostics);
    assert_eq!(report.declarations, 3);
    assert_eq!(
        report.generated,
        vec![
            "com.acme.shop.AddressTemplate",
            "com.acme.shop.catalog.Tag",
            "com.acme.shop.UserTemplate"
        ]
    );
    assert_eq!(report.files.len(), 11);

    for relative in [
        "com/acme/shop/AddressFieldFailure.kt",
        "com/acme/shop/Address.kt",
        "com/acme/shop/AddressParams.kt",
        "com/acme/shop/AddressBuilder.kt",
        "com/acme/shop/UserFieldFailure.kt",
        "com/acme/shop/User.kt",
        "com/acme/shop/UserParams.kt",
        "com/acme/shop/UserBuilder.kt",
        "com/acme/shop/catalog/TagFieldFailure.kt",
        "com/acme/shop/catalog/TagCompanionOf.kt",
        "com/acme/shop/catalog/TagCompanionOnly.kt",
    ] {
        assert!(out.path().join(relative).is_file(), "missing {}", relative);
    }
}

#[test]
fn test_user_model_contents() {
    let out = TempDir::new().unwrap();
    Generator::new(make_test_config(&fixture("shop/model"), out.path()))
        .generate()
        .unwrap();

    let user = read(out.path(), "com/acme/shop/User.kt");
    assert!(user.starts_with("// Generated code. Do not modify by hand.\n\npackage com.acme.shop\n"));
    assert!(user.contains("import com.acme.shop.catalog.Tag\n"));
    assert!(user.contains("import kotlinx.datetime.Instant\n"));
    assert!(user.contains("import modelsmith.core.validate\n"));
    assert!(user.contains(
        "data class User(
    val id: UserId,
    val name: String50,
    val age: PositiveInt,
    val email: EmailAddress?,
    val address: Address,
    val previous: Option<Address>,
    val tags: List<Tag>,
    val creatorId: PositiveInt,
    val created: Instant
) {"
    ));
    assert!(user.contains("val vId = UserId.of(id)"));
    assert!(user.contains("val vEmail = EmailAddress.ofNullable(email)"));
    assert!(user.contains("val vTags: Either<Nel<Nel<TagFieldFailure>>, List<Tag>> = tags.validate()"));
    assert!(user.contains("fun ofTrusted("));
    assert!(user.contains("email: EmailAddress?,"));

    let failures = read(out.path(), "com/acme/shop/UserFieldFailure.kt");
    assert_eq!(failures.matches("data class ").count(), 8);
    assert!(failures.contains("data class Id(val parent: GenericValueFailure<Long>) : UserFieldFailure"));
    assert!(failures.contains("data class Name(val parent: StringLengthRangeFailure) : UserRequiredFieldFailure"));
    assert!(failures.contains("data class Tags(val parent: Nel<Nel<TagFieldFailure>>) : UserRequiredFieldFailure"));
    assert!(!failures.contains("data class Created"));
}

#[test]
fn test_params_and_builder_contents() {
    let out = TempDir::new().unwrap();
    Generator::new(make_test_config(&fixture("shop/model"), out.path()))
        .generate()
        .unwrap();

    let params = read(out.path(), "com/acme/shop/UserParams.kt");
    assert!(!params.contains("val id:"));
    assert!(!params.contains("val created:"));
    assert!(params.contains("val creatorId: PositiveInt"));
    assert!(params.contains("val address: AddressParams,"));
    assert!(params.contains("val previous: Option<AddressParams>,"));
    assert!(params.contains("): Either<Nel<UserRequiredFieldFailure>, UserParams> {"));

    let builder = read(out.path(), "com/acme/shop/UserBuilder.kt");
    assert!(builder.contains("val address: Option<AddressBuilder>,"));
    assert!(builder.contains("val previous: Option<Option<AddressParams>>,"));
    assert!(builder.contains("address.flatMap { it.build() }.flatMap { address ->"));
    assert!(builder.contains("fun build(): Option<UserParams> {"));
    assert!(builder.contains("name: Option<String50> = None,"));

    let only = read(out.path(), "com/acme/shop/catalog/TagCompanionOnly.kt");
    assert!(only.contains("fun Tag.Companion.only("));
    assert!(only.contains("note: Option<String> = None"));
}

#[test]
fn test_validatable_companion_file() {
    let out = TempDir::new().unwrap();
    Generator::new(make_test_config(&fixture("shop/model"), out.path()))
        .generate()
        .unwrap();

    assert_eq!(
        read(out.path(), "com/acme/shop/catalog/TagCompanionOf.kt"),
        r#"// Generated code. Do not modify by hand.

package com.acme.shop.catalog

import arrow.core.Either
import arrow.core.Nel
import arrow.core.Option
import arrow.core.toNonEmptyListOrNull
import modelsmith.core.valueobject.NonNegativeInt
import modelsmith.core.valueobject.String25

fun Tag.Companion.of(
    label: String,
    weight: Int,
    note: Option<String>
): Either<Nel<TagFieldFailure>, Tag> {
    val vLabel = String25.of(label)
    val vWeight = NonNegativeInt.of(weight)
    return if (vLabel is Either.Right && vWeight is Either.Right) {
        Either.Right(Tag(
            label = vLabel.value,
            weight = vWeight.value,
            note = note
        ))
    } else {
        Either.Left(
            buildList<TagFieldFailure> {
                if (vLabel is Either.Left) add(TagFieldFailure.Label(vLabel.value))
                if (vWeight is Either.Left) add(TagFieldFailure.Weight(vWeight.value))
            }.toNonEmptyListOrNull()!!
        )
    }
}
"#
    );
}

#[test]
fn test_check_writes_nothing() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("generated");
    let report = Generator::new(make_test_config(&fixture("shop/model"), &target))
        .check()
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.files.len(), 11);
    assert!(!target.exists());
}

#[test]
fn test_generation_is_byte_identical_across_runs() {
    let mut first = MemoryEmitter::new();
    let mut second = MemoryEmitter::new();
    let generator = Generator::new(make_test_config(&fixture("shop/model"), Path::new("unused")));
    generator.generate_into(&mut first).unwrap();
    generator.generate_into(&mut second).unwrap();

    assert_eq!(first.files, second.files);
}

#[test]
fn test_failing_declarations_do_not_block_others() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("model");
    write_model(
        &input,
        "models.json",
        r#"[
        { "kind": "class", "package": "com.acme", "name": "GoodTemplate", "classKind": "interface",
          "annotations": [ { "type": "modelsmith.annotation.ModelTemplate", "arguments": { "name": "Good" } } ],
          "properties": [ { "name": "age", "type": "modelsmith.core.valueobject.PositiveInt" } ] },
        { "kind": "class", "package": "com.acme", "name": "Broken", "classKind": "dataClass",
          "annotations": [ { "type": "modelsmith.annotation.ModelTemplate", "arguments": { "name": "Broken" } } ],
          "properties": [ { "name": "age", "type": "kotlin.Int" } ] },
        { "kind": "class", "package": "com.acme", "name": "Orphan", "classKind": "valueClass",
          "superTypes": [ "modelsmith.core.ValueObject<kotlin.Int>" ],
          "companion": { "superTypes": [] } },
        { "kind": "class", "package": "com.acme", "name": "UsesOrphanTemplate", "classKind": "interface",
          "annotations": [ { "type": "modelsmith.annotation.ModelTemplate", "arguments": { "name": "UsesOrphan" } } ],
          "properties": [ { "name": "value", "type": "com.acme.Orphan" } ] },
        { "kind": "class", "package": "com.acme", "name": "EmptyTemplate", "classKind": "interface",
          "annotations": [ { "type": "modelsmith.annotation.ModelTemplate", "arguments": { "name": "Empty" } } ] }
    ]"#,
    );

    let out = dir.path().join("out");
    let report = Generator::new(make_test_config(&input, &out)).generate().unwrap();

    assert_eq!(report.declarations, 4);
    assert_eq!(report.generated, vec!["com.acme.GoodTemplate"]);
    assert_eq!(report.diagnostics.len(), 3);
    assert!(out.join("com/acme/Good.kt").is_file());
    assert!(!out.join("com/acme/UsesOrphan.kt").exists());
    assert!(!out.join("com/acme/UsesOrphanFieldFailure.kt").exists());

    let by_name = |name: &str| {
        report
            .diagnostics
            .iter()
            .find(|d| d.declaration == name)
            .unwrap_or_else(|| panic!("no diagnostic for {}", name))
    };
    assert!(matches!(by_name("com.acme.Broken").error, GeneratorError::NotAnInterface { .. }));
    let orphan = &by_name("com.acme.UsesOrphanTemplate").error;
    assert!(matches!(orphan, GeneratorError::UnresolvedFailureType { .. }));
    assert!(orphan.is_fatal());
    assert!(matches!(
        by_name("com.acme.EmptyTemplate").error,
        GeneratorError::NoProperties { .. }
    ));
}

#[test]
fn test_duplicate_declarations_abort_loading() {
    let dir = TempDir::new().unwrap();
    let declaration = r#"[ { "kind": "class", "package": "com.acme", "name": "Twice", "classKind": "interface" } ]"#;
    write_model(dir.path(), "a.json", declaration);
    write_model(dir.path(), "b.json", declaration);

    let err = Generator::new(make_test_config(dir.path(), &dir.path().join("out")))
        .generate()
        .unwrap_err();
    assert!(matches!(err, GeneratorError::DuplicateDeclaration { .. }));
}

#[test]
fn test_emit_runtime() {
    let out = TempDir::new().unwrap();
    let config = GeneratorConfig {
        emit_runtime: true,
        ..make_test_config(&fixture("shop/model"), out.path())
    };
    let report = Generator::new(config).generate().unwrap();

    assert_eq!(report.files.len(), 11 + 6);
    let validator = read(out.path(), "modelsmith/core/ValueValidator.kt");
    assert!(validator.contains("interface ValueValidator<I, F : ValueFailure<I>, T : ValueObject<I>>"));
    assert!(out.path().join("modelsmith/core/valueobject/ValueObjects.kt").is_file());
}

#[test]
fn test_without_prelude_value_objects_are_standard() {
    let dir = TempDir::new().unwrap();
    write_model(
        dir.path(),
        "user.json",
        r#"[ { "kind": "class", "package": "com.acme", "name": "UserTemplate", "classKind": "interface",
              "annotations": [ { "type": "modelsmith.annotation.ModelTemplate", "arguments": { "name": "User" } } ],
              "properties": [ { "name": "age", "type": "modelsmith.core.valueobject.PositiveInt" } ] } ]"#,
    );
    let config = GeneratorConfig {
        include_prelude: false,
        ..make_test_config(dir.path(), &dir.path().join("out"))
    };

    let mut emitter = MemoryEmitter::new();
    let report = Generator::new(config).generate_into(&mut emitter).unwrap();
    assert!(report.is_success());

    let failures = emitter.get("UserFieldFailure").unwrap();
    assert!(!failures.content.contains("data class Age"));
    let user = emitter.get("User").unwrap();
    assert!(user.content.contains("return Either.Right(User("));
}

#[test]
fn test_config_file_resolves_relative_dirs() {
    let root = fixture("shop");
    let config = GeneratorConfig::load(&root.join("modelsmith.json")).unwrap().unwrap();
    assert_eq!(config.input_dir, root.join("model"));
    assert_eq!(config.out_dir, root.join("build/generated"));

    let report = Generator::new(config).check().unwrap();
    assert_eq!(report.declarations, 3);
}
