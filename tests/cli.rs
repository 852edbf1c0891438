//! Command-line behavior of the `encdetect` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn encdetect() -> Command {
    Command::new(env!("CARGO_BIN_EXE_encdetect"))
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = encdetect()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = encdetect().output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_reports_each_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0u8; 6000]).unwrap();
    file.flush().unwrap();

    let output = encdetect().arg(file.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Chi-Square Distribution:"));
    assert!(stdout.contains("Monte Carlo Pi Value: 4.000000"));
    assert!(stdout.contains("The file has a 0% confidence of encryption."));
}

#[test]
fn test_missing_file_does_not_stop_batch() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x33u8; 600]).unwrap();
    file.flush().unwrap();

    let output = encdetect()
        .arg("/nonexistent/encdetect/missing.bin")
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.bin"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("File: "));
    assert!(stdout.contains("confidence of encryption"));
}

#[test]
fn test_toml_output_and_metrics_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x10u8; 1200]).unwrap();
    file.flush().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let metrics = dir.path().join("encdetect.prom");

    let output = encdetect()
        .args(["--format", "toml", "--metrics-file"])
        .arg(&metrics)
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[[report]]"));
    assert!(stdout.contains("confidence = 0"));

    let prom = std::fs::read_to_string(&metrics).unwrap();
    assert!(prom.contains("encdetect_inputs_total{outcome=\"ok\"} 1"));
}

#[test]
fn test_invalid_config_exits_with_two() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    config.write_all(b"[analysis]\nwindow_size = 5\n").unwrap();
    config.flush().unwrap();

    let output = encdetect()
        .arg("--config")
        .arg(config.path())
        .arg("whatever.bin")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_reads_standard_input() {
    let output = run_with_stdin(&["-"], &[0u8; 600]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("File: <stdin>"));
    assert!(stdout.contains("Bytes: 600"));
}

#[test]
fn test_repeated_stdin_is_not_read_twice() {
    let output = run_with_stdin(&["-", "-"], &[0x42u8; 600]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout.matches("File: <stdin>").count(), 1);
    assert!(stdout.contains("Bytes: 600"));
    assert!(stderr.contains("already consumed"));
    assert!(!stderr.contains("empty"));
}
