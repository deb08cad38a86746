//! Shared test helpers for solflat integration tests.
//!
//! Each test builds its own throwaway Truffle project in a temp directory —
//! no side effects outside it.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Create a fresh project directory with a `truffle-config.js` at its root.
pub fn setup_project() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("truffle-config.js"), "module.exports = {};\n")
        .expect("failed to write truffle-config.js");
    dir
}

/// Write a source file at `rel` (forward-slash relative path), creating
/// intermediate directories.
pub fn write_source(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("failed to create source dirs");
    }
    fs::write(full, content).expect("failed to write source");
}

/// The `// File:` marker labels of a flattened output, in emission order.
pub fn files_in_flattened_order(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("// File: "))
        .map(str::to_owned)
        .collect()
}

/// Run solflat with the given args in the given directory.
pub fn solflat_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solflat"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to execute solflat")
}

/// Run solflat and assert it succeeds. Returns stdout as string.
pub fn solflat_ok(dir: &Path, args: &[&str]) -> String {
    let out = solflat_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "solflat {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run solflat and assert it fails. Returns stderr as string.
pub fn solflat_fails(dir: &Path, args: &[&str]) -> String {
    let out = solflat_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected solflat {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}
