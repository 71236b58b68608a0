use kitsmith_core::model::{Field, FieldType, ImportMap, Method};
use kitsmith_core::{Result, ServiceDefinition};
use kitsmith_gen::{EndpointGenerator, Generator};
use pretty_assertions::assert_eq;

fn hello_definition() -> ServiceDefinition {
    let mut imports = ImportMap::new();
    imports
        .add_as("helloservice", "crate::helloservice")
        .unwrap();
    imports.add("std::task").unwrap();
    ServiceDefinition {
        package: "helloservice".into(),
        root: "crate::helloservice".into(),
        service_name: "HelloService".into(),
        imports,
        methods: vec![
            Method {
                name: "say_hello".into(),
                params: vec![
                    Field::new("ctx", FieldType::foreign("task", "Context")),
                    Field::new("name", FieldType::local("String")),
                ],
                results: vec![
                    Field::new("result1", FieldType::local("String")),
                    Field::new("result2", FieldType::local("Error").option()),
                ],
            },
            Method {
                name: "ping".into(),
                params: vec![],
                results: vec![],
            },
        ],
    }
}

#[test]
fn test_one_factory_and_set_field_per_method() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    assert_eq!(out.matches("fn make_").count(), 2);
    assert!(out.contains("fn make_say_hello_endpoint"));
    assert!(out.contains("fn make_ping_endpoint"));
    assert_eq!(out.matches("_endpoint: Endpoint<").count(), 2);
    Ok(())
}

#[test]
fn test_zero_results_yields_null_response() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    // no response shape is declared for ping and its factory returns Ok(())
    assert!(!out.contains("PingResponse"));
    assert!(out.contains("Ok(())"));
    assert!(out.contains("Endpoint<(), ()>"));
    Ok(())
}

#[test]
fn test_context_param_excluded_from_request_shape() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    assert!(out.contains("pub struct SayHelloRequest"));
    assert!(out.contains("pub name: String"));
    assert!(!out.contains("pub ctx"));
    Ok(())
}

#[test]
fn test_failure_accessor_on_error_result() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    assert!(out.contains("pub trait Failer"));
    assert!(out.contains("impl Failer for SayHelloResponse"));
    assert!(out.contains("self.result2.as_ref()"));
    Ok(())
}

#[test]
fn test_foreign_context_package_imported() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    assert!(out.contains("use std::task;"));
    assert!(out.contains("task::Context"));
    Ok(())
}

#[test]
fn test_aggregate_stubs_panic() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    assert!(out.contains("impl HelloService for Set"));
    assert!(out.contains("endpoint not implemented: say_hello"));
    assert!(out.contains("endpoint not implemented: ping"));
    Ok(())
}

#[test]
fn test_output_parses() -> Result<()> {
    let out = EndpointGenerator::new().generate(&hello_definition())?;
    syn::parse_file(&out).expect("emitted endpoint artifact must parse");
    Ok(())
}
