//! CLI integration tests
//!
//! These tests run the netpol binary end to end against JSON documents on
//! disk and check the converted or annotated output.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run(args: &[&str]) -> std::process::Output {
    let cli_bin = env!("CARGO_BIN_EXE_netpol");
    Command::new(cli_bin)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_convert_policy_to_internal_reconciles_blocks() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("policy.json");
    let output_path = temp_dir.path().join("out.json");

    fs::write(
        &input_path,
        r#"{
            "metadata": {"name": "mypolicy"},
            "spec": {"ingress": [{"from": [{
                "ipBlock": {"cidr": "1.1.2.1"},
                "ipBlocks": [{"cidr": "1.1.1.1"}, {"cidr": "2.2.2.2"}]
            }]}]}
        }"#,
    )
    .unwrap();

    let output = run(&[
        "convert",
        input_path.to_str().unwrap(),
        "--to",
        "internal",
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let converted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let blocks = &converted["spec"]["ingress"][0]["from"][0]["ipBlocks"];

    // Deprecated field disagreed with the list head, so it won outright
    assert_eq!(blocks, &serde_json::json!([{"cidr": "1.1.2.1"}]));
}

#[test]
fn test_cli_convert_peer_to_v1_derives_deprecated_field() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("peer.json");

    fs::write(
        &input_path,
        r#"{"ipBlocks": [{"cidr": "1.1.1.1"}, {"cidr": "2.2.2.2"}]}"#,
    )
    .unwrap();

    let output = run(&[
        "convert",
        input_path.to_str().unwrap(),
        "--to",
        "v1",
        "--peer",
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let converted: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(converted["ipBlock"], serde_json::json!({"cidr": "1.1.1.1"}));
    assert_eq!(
        converted["ipBlocks"],
        serde_json::json!([{"cidr": "1.1.1.1"}, {"cidr": "2.2.2.2"}])
    );
}

#[test]
fn test_cli_annotate_record_writes_change_cause() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("policy.json");

    fs::write(&input_path, r#"{"metadata": {"name": "mypolicy"}}"#).unwrap();

    let output = run(&[
        "annotate",
        input_path.to_str().unwrap(),
        "--record",
        "--change-cause",
        "change_cmd some_argument",
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let annotated: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        annotated["metadata"]["annotations"]["netpol.io/change-cause"],
        "change_cmd some_argument"
    );
}

#[test]
fn test_cli_annotate_patch_empty_without_existing_annotation() {
    // --record omitted: update-only policy, and there is nothing to update
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("policy.json");

    fs::write(&input_path, r#"{"metadata": {"name": "mypolicy"}}"#).unwrap();

    let output = run(&[
        "annotate",
        input_path.to_str().unwrap(),
        "--patch",
        "--change-cause",
        "change_cmd",
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let patch: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(patch, serde_json::json!({}));
}

#[test]
fn test_cli_convert_reports_malformed_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("garbage.json");
    fs::write(&input_path, "not json").unwrap();

    let output = run(&["convert", input_path.to_str().unwrap(), "--to", "internal"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("serialization failed"), "stderr: {stderr}");
}

#[test]
fn test_cli_convert_reports_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("does-not-exist.json");

    let output = run(&["convert", input_path.to_str().unwrap(), "--to", "internal"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("io error"), "stderr: {stderr}");
}

#[test]
fn test_cli_stdout_stays_machine_readable_under_verbose_logging() {
    // Log lines must go to stderr; a document consumer reading stdout
    // should never see them, even with the noisiest filter.
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("policy.json");

    fs::write(&input_path, r#"{"metadata": {"name": "mypolicy"}}"#).unwrap();

    let cli_bin = env!("CARGO_BIN_EXE_netpol");
    let output = Command::new(cli_bin)
        .env("RUST_LOG", "debug")
        .args([
            "annotate",
            input_path.to_str().unwrap(),
            "--record",
            "--change-cause",
            "change_cmd",
        ])
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    // from_slice rejects any leading or trailing noise around the document
    let annotated: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        annotated["metadata"]["annotations"]["netpol.io/change-cause"],
        "change_cmd"
    );
}

#[test]
fn test_cli_annotate_record_false_leaves_document_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("policy.json");

    let doc = r#"{"metadata":{"annotations":{"netpol.io/change-cause":"create_cmd"},"name":"mypolicy"}}"#;
    fs::write(&input_path, doc).unwrap();

    let output = run(&[
        "annotate",
        input_path.to_str().unwrap(),
        "--record=false",
        "--change-cause",
        "change_cmd",
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let annotated: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        annotated["metadata"]["annotations"]["netpol.io/change-cause"],
        "create_cmd"
    );
}
