use std::fs;
use std::path::PathBuf;

use kitsmith_core::model::{Field, FieldType};
use kitsmith_core::Error;
use kitsmith_parse::Extractor;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_package(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("helloservice");
    fs::create_dir(&root).unwrap();
    for (name, source) in files {
        fs::write(root.join(name), source).unwrap();
    }
    (tmp, root)
}

#[test]
fn test_extract_signatures_in_declaration_order() {
    let (_tmp, root) = write_package(&[(
        "service.rs",
        r#"
pub struct Context;
pub struct Error;

pub trait HelloService {
    fn foo(&self, ctx: Context, a: i64) -> (String, Option<Error>);
    fn bar(&self);
}
"#,
    )]);
    let def = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap();

    assert_eq!(def.package, "helloservice");
    assert_eq!(def.root, "crate::helloservice");
    assert_eq!(def.service_name, "HelloService");
    assert_eq!(def.methods.len(), 2);

    let foo = &def.methods[0];
    assert_eq!(foo.name, "foo");
    assert_eq!(
        foo.params,
        vec![
            Field::new("ctx", FieldType::local("Context")),
            Field::new("a", FieldType::local("i64")),
        ]
    );
    assert_eq!(
        foo.results,
        vec![
            Field::new("result1", FieldType::local("String")),
            Field::new("result2", FieldType::local("Error").option()),
        ]
    );

    let bar = &def.methods[1];
    assert_eq!(bar.name, "bar");
    assert!(bar.params.is_empty());
    assert!(bar.results.is_empty());
}

#[test]
fn test_missing_interface_is_not_found() {
    let (_tmp, root) = write_package(&[("service.rs", "pub trait Other { fn x(&self); }")]);
    let err = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn test_unsupported_shape_aborts_extraction() {
    let (_tmp, root) = write_package(&[(
        "service.rs",
        "pub trait HelloService { fn go(&self, cb: fn(i64) -> i64); }",
    )]);
    let err = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }), "got {err:?}");
}

#[test]
fn test_malformed_source_is_a_parse_error() {
    let (_tmp, root) = write_package(&[
        ("service.rs", "pub trait HelloService { fn ok(&self); }"),
        ("broken.rs", "pub trait {{{"),
    ]);
    let err = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
}

#[test]
fn test_import_registry_from_use_declarations() {
    let (_tmp, root) = write_package(&[(
        "service.rs",
        r#"
use std::task::Context;
use chrono;
use serde_json as json;

pub trait HelloService {
    fn when(&self, ctx: Context, at: chrono::DateTime);
}
"#,
    )]);
    let def = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap();

    assert_eq!(def.imports.get("helloservice"), Some("crate::helloservice"));
    assert_eq!(def.imports.get("Context"), Some("std::task::Context"));
    assert_eq!(def.imports.get("chrono"), Some("chrono"));
    assert_eq!(def.imports.get("json"), Some("serde_json"));
    assert_eq!(def.imports.get("never_declared"), None);

    let when = &def.methods[0];
    assert_eq!(when.params[1].ty, FieldType::foreign("chrono", "DateTime"));
}

#[test]
fn test_slice_and_vec_resolution() {
    let (_tmp, root) = write_package(&[(
        "service.rs",
        r#"
pub trait HelloService {
    fn names(&self) -> Vec<String>;
    fn tags(&self, raw: [u8; 4]) -> Vec<Vec<i64>>;
}
"#,
    )]);
    let def = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap();

    assert_eq!(def.methods[0].results[0].ty, FieldType::local("String").vec());
    assert_eq!(def.methods[1].params[0].ty, FieldType::local("u8").vec());
    assert_eq!(
        def.methods[1].results[0].ty,
        FieldType::local("i64").vec().vec()
    );
}

#[test]
fn test_unnamed_params_get_positional_placeholders() {
    let (_tmp, root) = write_package(&[(
        "service.rs",
        "pub trait HelloService { fn set(&self, _: i64, named: String); }",
    )]);
    let def = Extractor::new()
        .extract(&root, "helloservice::HelloService")
        .unwrap();

    assert_eq!(def.methods[0].params[0].name, "param1");
    assert_eq!(def.methods[0].params[1].name, "named");
}
