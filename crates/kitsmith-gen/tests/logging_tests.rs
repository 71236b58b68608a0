use kitsmith_core::model::{Field, FieldType, ImportMap, Method};
use kitsmith_core::{Result, ServiceDefinition};
use kitsmith_gen::{Generator, LoggingGenerator, LoggingOptions};

fn hello_definition() -> ServiceDefinition {
    let mut imports = ImportMap::new();
    imports
        .add_as("helloservice", "crate::helloservice")
        .unwrap();
    ServiceDefinition {
        package: "helloservice".into(),
        root: "crate::helloservice".into(),
        service_name: "HelloService".into(),
        imports,
        methods: vec![
            Method {
                name: "say_hello".into(),
                params: vec![
                    Field::new("ctx", FieldType::local("Context")),
                    Field::new("name", FieldType::local("String")),
                ],
                results: vec![
                    Field::new("result1", FieldType::local("String")),
                    Field::new("result2", FieldType::local("Error").option()),
                ],
            },
            Method {
                name: "reset".into(),
                params: vec![],
                results: vec![],
            },
        ],
    }
}

#[test]
fn test_decorator_holds_delegate_and_logger() -> Result<()> {
    let out = LoggingGenerator::new(LoggingOptions::default()).generate(&hello_definition())?;
    assert!(out.contains("pub struct LoggingHelloService<S>"));
    assert!(out.contains("next: S"));
    assert!(out.contains("logger: Span"));
    assert!(out.contains("impl<S> HelloService for LoggingHelloService<S>"));
    Ok(())
}

#[test]
fn test_wrapper_invokes_delegate_explicitly() -> Result<()> {
    let out = LoggingGenerator::new(LoggingOptions::default()).generate(&hello_definition())?;
    assert!(out.contains("self.next.say_hello(ctx, name)"));
    assert!(out.contains("self.next.reset()"));
    Ok(())
}

#[test]
fn test_no_stack_trace_references_when_disabled() -> Result<()> {
    let out = LoggingGenerator::new(LoggingOptions::default()).generate(&hello_definition())?;
    assert!(!out.contains("stack_trace"));
    Ok(())
}

#[test]
fn test_stack_trace_for_error_results_only() -> Result<()> {
    let out = LoggingGenerator::new(LoggingOptions { stack_trace: true })
        .generate(&hello_definition())?;
    assert!(out.contains("fn stack_trace"));
    // helper definition plus the key/value pair in say_hello; reset has no
    // error-typed result and logs no trace
    assert_eq!(out.matches("stack_trace").count(), 3);
    Ok(())
}

#[test]
fn test_output_parses() -> Result<()> {
    for options in [
        LoggingOptions::default(),
        LoggingOptions { stack_trace: true },
    ] {
        let out = LoggingGenerator::new(options).generate(&hello_definition())?;
        syn::parse_file(&out).expect("emitted logging artifact must parse");
    }
    Ok(())
}
