//! CLI Behavioral Tests - BDD Style
//!
//! Runs the `hippo` binary end to end against edge-list files.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn edge_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file
}

fn hippo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hippo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("hippo should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

#[test]
fn given_edge_file_when_show_then_adjacency_printed() {
    // GIVEN: a -> b, c -> a
    let file = edge_file("a b\nc a\n");
    let path = file.path().to_str().unwrap();

    // WHEN: show runs
    let output = hippo(&["--input", path, "show"]);

    // THEN: Every node with its out and in lists
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Node a:\nOut: [b]\nIn: [c]\nNode b:\nOut: []\nIn: [a]\nNode c:\nOut: [a]\nIn: []\n"
    );
}

#[test]
fn given_csv_edges_when_topo_json_then_ordered_array() {
    // GIVEN: A comma separated chain listed backwards
    let file = edge_file("b,c\na,b\n");
    let path = file.path().to_str().unwrap();

    // WHEN: topo runs with JSON output
    let output = hippo(&["topo", "--input", path, "--separator", ",", "--format", "json"]);

    // THEN: The order follows the edges
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "topo");
    assert_eq!(value["order"], serde_json::json!(["a", "b", "c"]));
}

#[test]
fn given_stdin_with_blank_line_when_stop_at_blank_then_rest_ignored() {
    // GIVEN: Two edges separated by a blank line on stdin
    let mut child = Command::new(env!("CARGO_BIN_EXE_hippo"))
        .args(["--stop-at-blank", "scc"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("hippo should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"a b\nb a\n\nc d\n")
        .expect("stdin should accept input");

    // WHEN: The process finishes
    let output = child.wait_with_output().expect("hippo should finish");

    // THEN: Only the cycle before the blank line was read
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 1);
}

#[test]
fn given_malformed_line_when_any_command_then_fails_with_line_number() {
    // GIVEN: A file whose second line has three ids
    let file = edge_file("a b\na b c\n");
    let path = file.path().to_str().unwrap();

    // WHEN: A command runs
    let output = hippo(&["--input", path, "show"]);

    // THEN: Exit status is non-zero and the error names the line
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr was: {stderr}");
}

#[test]
fn given_directed_graph_when_components_then_usage_error() {
    let file = edge_file("a b\n");
    let path = file.path().to_str().unwrap();

    let output = hippo(&["--input", path, "components"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--undirected"));
}

#[test]
fn given_undirected_path_when_cycle_then_acyclic() {
    // GIVEN: a - b - c read as undirected
    let file = edge_file("a b\nb c\n");
    let path = file.path().to_str().unwrap();

    // WHEN: cycle runs
    let output = hippo(&["--input", path, "--undirected", "cycle"]);

    // THEN: The mirrored edges do not count as cycles
    assert!(output.status.success());
    assert_eq!(stdout(&output), "acyclic (undirected)\n");
}

#[test]
fn given_missing_file_when_run_then_error_mentions_path() {
    let output = hippo(&["--input", "/nonexistent/edges.txt", "show"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/edges.txt"));
}
