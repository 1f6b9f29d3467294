use std::fs;
use std::process::Command;

fn binary_output(args: &[&str]) -> std::process::Output {
    let path = env!("CARGO_BIN_EXE_hashfan");
    Command::new(path)
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run {}: {}", path, error))
}

#[test]
fn hashfan_help_lists_usage() {
    let output = binary_output(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    assert!(
        output.stderr.is_empty(),
        "help output should not write to stderr"
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("hashfan"));
}

#[test]
fn hashfan_without_operands_fails() {
    let output = binary_output(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("no input paths"));
}

#[test]
fn hashfan_hashes_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("abc.txt");
    fs::write(&path, b"abc").expect("write");
    let path_arg = path.to_str().expect("utf-8 path");

    let output = binary_output(&["-a", "sha1+crc32", path_arg]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert_eq!(
        stdout,
        format!(
            "a9993e364706816aba3e25717850c26c9cd0d89d  sha1  {path_arg}\n\
             352441c2  crc32  {path_arg}\n"
        )
    );
}

#[test]
fn hashfan_reports_partial_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.bin");
    let output = binary_output(&[missing.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn hashfan_hashes_quick_sequences() {
    for sequence in ["txt:abc", "hex:616263", "616263", "dec:97,98,99"] {
        let output = binary_output(&["-a", "crc32", "-q", sequence]);
        assert!(output.status.success(), "{sequence}");
        let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
        assert_eq!(stdout, format!("352441c2  crc32  {sequence}\n"));
    }
}

#[test]
fn hashfan_rejects_malformed_quick_sequence() {
    let output = binary_output(&["-q", "hex:abc"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("invalid hex sequence"));
}

#[test]
fn hashfan_checks_expected_value() {
    let matched = binary_output(&["-a", "crc32", "-q", "txt:abc", "-e", "352441C2"]);
    assert_eq!(matched.status.code(), Some(0));

    let mismatched = binary_output(&["-a", "crc32", "-q", "txt:abd", "-e", "352441c2"]);
    assert_eq!(mismatched.status.code(), Some(4));
    let stderr = String::from_utf8(mismatched.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("crc32 digest does not match the expected value"));
    assert!(!mismatched.stdout.is_empty());
}

#[test]
fn hashfan_checks_expected_value_for_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("abc.txt");
    fs::write(&path, b"abc").expect("write");
    let path_arg = path.to_str().expect("utf-8 path");

    let output = binary_output(&[
        "-a",
        "md5",
        "-e",
        "900150983cd24fb0d6963f7d28e17f72",
        path_arg,
    ]);
    assert_eq!(output.status.code(), Some(0));

    let output = binary_output(&["-a", "md5+crc32", "-e", "352441c2", path_arg]);
    assert_eq!(output.status.code(), Some(4));
}
