#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "textwire-{tag}-{}-{}.tw",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

fn textwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_textwire"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("textwire should run")
}

fn textwire_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_textwire"))
        .args(["--log-level", "error"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("textwire should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("stdin should accept input");
    child.wait_with_output().expect("textwire should finish")
}

#[test]
fn encode_writes_raw_token_bytes() {
    let output = textwire(&["encode", "i32:-7", "u16:0", "bool:true"]);

    assert!(output.status.success());
    assert_eq!(output.stdout, b" 02-7 010 1");
}

#[test]
fn encode_plain_float_style_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_textwire"))
        .env("TEXTWIRE_FLOAT_STYLE", "plain")
        .args(["encode", "f64:150"])
        .output()
        .expect("textwire should run");

    assert!(output.status.success());
    assert_eq!(output.stdout, b" 03150");
}

#[test]
fn encode_to_file_then_decode_as_json() {
    let path = unique_temp_file("roundtrip");
    let path_arg = path.to_str().expect("temp path should be utf-8");

    let output = textwire(&[
        "encode",
        "char:R",
        "u32:42",
        "raw:name",
        "f64:-1.25",
        "--out",
        path_arg,
    ]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read(&path).expect("output file should exist"),
        b" R 0242name 07-1.25e0"
    );

    let output = textwire(&[
        "--format",
        "json",
        "decode",
        "--kinds",
        "char,u32,raw:4,f64",
        "--file",
        path_arg,
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["kind"], "u32");
    assert_eq!(lines[1]["value"], "42");
    assert_eq!(lines[1]["offset"], 2);
    assert_eq!(lines[3]["value"], "-1.25");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn decode_repeat_reads_stdin_until_boundary() {
    let output = textwire_with_stdin(
        &["--format", "raw", "decode", "--kinds", "u16,bool", "--repeat"],
        b" 011 1 012 0",
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\ntrue\n2\nfalse\n");
}

#[test]
fn framing_error_exits_with_data_invalid() {
    let output = textwire_with_stdin(&["decode", "--kinds", "i32"], b"x015");

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("decode failed at offset 0 (i32)"));
}

#[test]
fn truncated_input_exits_with_transport_error() {
    let output = textwire_with_stdin(&["decode", "--kinds", "i64"], b" 05-12");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn trailing_input_exits_with_data_invalid() {
    let output = textwire_with_stdin(&["decode", "--kinds", "u16"], b" 011extra");

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("offset 4"), "{stderr}");
}

#[test]
fn repeat_with_zero_width_kind_rejects_unread_input() {
    let output = textwire_with_stdin(&["decode", "--kinds", "raw:0", "--repeat"], b" 0");

    assert_eq!(output.status.code(), Some(60));
}

#[cfg(target_os = "linux")]
#[test]
fn encode_to_full_stdout_exits_with_transport_error() {
    let full = std::fs::OpenOptions::new()
        .write(true)
        .open("/dev/full")
        .expect("/dev/full should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_textwire"))
        .args(["--log-level", "error", "encode", "i32:1"])
        .stdout(Stdio::from(full))
        .stderr(Stdio::piped())
        .output()
        .expect("textwire should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed writing stdout"), "{stderr}");
}

#[test]
fn missing_input_file_is_usage_error() {
    let path = unique_temp_file("missing");
    let output = textwire(&[
        "decode",
        "--kinds",
        "bool",
        "--file",
        path.to_str().expect("temp path should be utf-8"),
    ]);

    assert_eq!(output.status.code(), Some(64));
}
