//! Integration tests for the kitsmith CLI.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SERVICE_SOURCE: &str = r#"
pub struct Context;
pub struct Error;

pub trait HelloService {
    fn say_hello(&self, ctx: Context, name: String) -> (String, Option<Error>);
    fn reset(&self);
}
"#;

fn write_package() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("helloservice");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("service.rs"), SERVICE_SOURCE).unwrap();
    (tmp, root)
}

fn kitsmith() -> Command {
    Command::cargo_bin("kitsmith").unwrap()
}

#[test]
fn test_cli_help() {
    kitsmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kitsmith"));
}

#[test]
fn test_cli_version() {
    kitsmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_endpoint_writes_fixed_name_artifact() {
    let (_tmp, root) = write_package();
    kitsmith()
        .args(["-p", root.to_str().unwrap()])
        .args(["-s", "helloservice::HelloService"])
        .arg("endpoint")
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoints.rs"));

    let out = fs::read_to_string(root.join("endpoints.rs")).unwrap();
    assert!(out.contains("pub struct Set"));
    assert!(out.contains("fn make_say_hello_endpoint"));
    syn::parse_file(&out).expect("generated artifact must parse");
}

#[test]
fn test_transport_http_toggles() {
    let (_tmp, root) = write_package();
    kitsmith()
        .args(["-p", root.to_str().unwrap()])
        .args(["-s", "helloservice::HelloService"])
        .args(["transport", "http", "--client", "--generic-response"])
        .assert()
        .success();

    let out = fs::read_to_string(root.join("http.rs")).unwrap();
    assert!(out.contains("fn new_http_handler"));
    assert!(out.contains("fn new_http_client"));
    assert!(out.contains("fn encode_http_generic_response"));
    assert!(!out.contains("fn encode_http_say_hello_response"));
}

#[test]
fn test_logging_with_stack_trace() {
    let (_tmp, root) = write_package();
    kitsmith()
        .args(["-p", root.to_str().unwrap()])
        .args(["-s", "helloservice::HelloService"])
        .args(["logging", "--stack-trace"])
        .assert()
        .success();

    let out = fs::read_to_string(root.join("logging.rs")).unwrap();
    assert!(out.contains("pub struct LoggingHelloService"));
    assert!(out.contains("fn stack_trace"));
}

#[test]
fn test_missing_service_aborts_nonzero() {
    let (_tmp, root) = write_package();
    kitsmith()
        .args(["-p", root.to_str().unwrap()])
        .args(["-s", "helloservice::Missing"])
        .arg("endpoint")
        .assert()
        .failure();
    assert!(!root.join("endpoints.rs").exists());
}

#[test]
fn test_missing_source_flags_abort() {
    kitsmith().arg("endpoint").assert().failure();
}

#[test]
fn test_config_file_supplies_source() {
    let (tmp, root) = write_package();
    let config = tmp.path().join("kitsmith.yaml");
    fs::write(
        &config,
        format!(
            "service: helloservice::HelloService\npath: {}\n",
            root.display()
        ),
    )
    .unwrap();

    kitsmith()
        .args(["-c", config.to_str().unwrap()])
        .arg("endpoint")
        .assert()
        .success();
    assert!(root.join("endpoints.rs").exists());
}
