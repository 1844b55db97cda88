use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argbind-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn argbind() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argbind"))
}

const SCHEMA: &str = r#"{
  "format-version": 1,
  "target": "FakeOptions",
  "specifications": [
    { "member": "StringValue", "long-name": "stringvalue", "arity": { "kind": "scalar" }, "kind": "string" },
    { "member": "IntSequence", "short-name": "i", "arity": { "kind": "sequence", "min": 3, "max": 4 },
      "kind": { "sequence": { "integer": "i32" } } },
    { "member": "BoolValue", "short-name": "x", "arity": { "kind": "switch" }, "kind": "bool",
      "help": "Turn it on" },
    { "member": "LongValue", "index": 0, "arity": { "kind": "scalar" }, "kind": { "integer": "i64" } }
  ]
}"#;

fn write_schema(dir: &std::path::Path, contents: &str) -> PathBuf {
    let path = dir.join("schema.json");
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_works() {
    let out = argbind()
        .arg("--help")
        .output()
        .expect("failed to run argbind --help");
    assert!(
        out.status.success(),
        "argbind --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );
    let text = stdout(&out);
    assert!(
        text.contains("check") && text.contains("bind"),
        "unexpected help output:\n{text}"
    );
}

#[test]
fn check_accepts_valid_schema() {
    let dir = make_temp_dir("check-ok");
    let schema = write_schema(&dir, SCHEMA);
    let report = dir.join("out/report.json");

    let out = argbind()
        .arg("check")
        .arg(&schema)
        .arg("--output")
        .arg(&report)
        .output()
        .expect("failed to run argbind check");
    assert!(
        out.status.success(),
        "argbind check failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report not written"))
            .expect("report is not JSON");
    assert_eq!(report["target"], "FakeOptions");
    assert_eq!(report["options"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["options"][1]["arity"], "sequence(3..4)");
    assert!(report["error"].is_null());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_zero_bounds() {
    let dir = make_temp_dir("check-zero");
    let schema = write_schema(&dir, &SCHEMA.replace("\"min\": 3", "\"min\": 0"));

    let out = argbind()
        .arg("check")
        .arg(&schema)
        .output()
        .expect("failed to run argbind check");
    assert!(!out.status.success(), "zero bound should be rejected");
    assert!(
        stderr(&out).contains("greater than zero"),
        "unexpected stderr:\n{}",
        stderr(&out)
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bind_prints_record() {
    let dir = make_temp_dir("bind-ok");
    let schema = write_schema(&dir, SCHEMA);

    let out = argbind()
        .arg("bind")
        .arg(&schema)
        .args(["--", "--stringvalue=abc", "-i", "1", "2", "3", "-x", "-42"])
        .output()
        .expect("failed to run argbind bind");
    assert!(
        out.status.success(),
        "argbind bind failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );

    let record: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("stdout is not JSON");
    assert_eq!(
        record,
        serde_json::json!({
            "StringValue": "abc",
            "IntSequence": [1, 2, 3],
            "BoolValue": true,
            "LongValue": -42
        })
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bind_reports_every_error() {
    let dir = make_temp_dir("bind-errors");
    let schema = write_schema(&dir, SCHEMA);

    let out = argbind()
        .arg("bind")
        .arg(&schema)
        .args(["--", "--xyz", "-i", "1", "--stringvalue"])
        .output()
        .expect("failed to run argbind bind");
    assert_eq!(out.status.code(), Some(2));
    let text = stderr(&out);
    assert!(text.contains("option 'xyz' is unknown"), "stderr:\n{text}");
    assert!(text.contains("'--stringvalue' has no value"), "stderr:\n{text}");
    assert!(text.contains("'-i' has too few or too many items"), "stderr:\n{text}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bind_help_lists_options() {
    let dir = make_temp_dir("bind-help");
    let schema = write_schema(&dir, SCHEMA);

    let out = argbind()
        .arg("bind")
        .arg(&schema)
        .args(["--", "--help"])
        .output()
        .expect("failed to run argbind bind");
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("FakeOptions"), "stdout:\n{text}");
    assert!(text.contains("-x  Turn it on"), "stdout:\n{text}");

    let _ = fs::remove_dir_all(&dir);
}
