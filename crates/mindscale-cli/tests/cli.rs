use std::path::Path;
use std::process::Command;

use serde_json::{Value, json};

fn run(config_dir: &Path, args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_mindscale"))
        .arg("--config")
        .arg(config_dir.join("config.json"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "mindscale {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_responses(dir: &Path, responses: Value) -> String {
    let path = dir.join("responses.json");
    std::fs::write(&path, responses.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn short_form_escalates_and_scores_full_instrument() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(
        dir.path(),
        json!({"gad7_q1": 2, "gad7_q2": 2, "gad7_q3": 1}),
    );

    let report = run(dir.path(), &["score", "gad2", "--responses", &responses]);

    assert_eq!(report["trigger_log"]["triggered_full_scale"], "gad7");
    assert_eq!(report["outcome"]["mode"], "full_form");
    assert_eq!(report["outcome"]["score"], 5);
    assert_eq!(report["outcome"]["band"]["level"], "mild");
    assert_eq!(report["records"].as_array().unwrap().len(), 3);
}

#[test]
fn short_form_below_threshold_stays_short() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(dir.path(), json!({"gad7_q1": 1, "gad7_q2": 1}));

    let report = run(
        dir.path(),
        &["score", "gad7", "--short", "--responses", &responses],
    );

    assert_eq!(report["outcome"]["mode"], "short_form");
    assert_eq!(report["outcome"]["score"], 2);
    assert!(report["outcome"]["band"].is_null());
    assert!(report["trigger_log"]["triggered_full_scale"].is_null());
}

#[test]
fn safety_answer_surfaces_crisis_resources() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(dir.path(), json!({"phq9_q1": 0, "phq9_q9": 1}));

    let report = run(dir.path(), &["score", "phq9", "--responses", &responses]);

    assert_eq!(report["outcome"]["safety"]["state"], "triggered");
    assert_eq!(report["safety_event"]["question_id"], "phq9_q9");
    assert!(!report["crisis_resources"].as_array().unwrap().is_empty());
}

#[test]
fn rejected_safety_answer_still_raises_the_safety_branch() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(dir.path(), json!({"phq9_q1": 1, "phq9_q9": 4}));

    let report = run(dir.path(), &["score", "phq9", "--responses", &responses]);

    assert_eq!(report["rejected"][0]["question_id"], "phq9_q9");
    assert_eq!(report["outcome"]["safety"]["state"], "triggered");
    assert_eq!(report["safety_event"]["answer_value"], 4);
    assert!(!report["crisis_resources"].as_array().unwrap().is_empty());
}

#[test]
fn invalid_option_value_is_reported_not_scored() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(dir.path(), json!({"gad7_q1": 7, "gad7_q2": 1}));

    let report = run(dir.path(), &["score", "gad7", "--responses", &responses]);

    assert_eq!(report["rejected"][0]["question_id"], "gad7_q1");
    assert_eq!(report["outcome"]["score"], 1);
}

#[test]
fn daily_check_in_raises_every_red_flag() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write_responses(
        dir.path(),
        json!({
            "gad7_q1": 2,
            "gad7_q2": 1,
            "daily_sleep_duration": 5,
            "daily_sleep_quality": 0,
            "daily_stress_level": 2,
        }),
    );

    let report = run(dir.path(), &["daily", "--responses", &responses]);

    assert_eq!(report["red_flags"]["has_red_flag"], true);
    assert_eq!(report["red_flags"]["flags"].as_array().unwrap().len(), 3);
    assert_eq!(report["score"]["index"], 7);
    assert_eq!(report["trigger_log"]["short_scale"], "gad2");
}

#[test]
fn config_init_writes_a_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_mindscale"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["config", "init"])
        .env("RUST_LOG", "off")
        .status()
        .unwrap();
    assert!(status.success());

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("config.json")).unwrap())
            .unwrap();
    assert_eq!(written["config_version"], 1);
    assert_eq!(written["locale"], "en");
}

#[test]
fn legacy_config_is_migrated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"region": "CN", "locale": "zh", "hotlines": ["12356"]}"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mindscale"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["config", "show"])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(output.status.success());

    // First line names the file; the rest is the effective config.
    let stdout = String::from_utf8(output.stdout).unwrap();
    let (_, body) = stdout.split_once('\n').unwrap();
    let config: Value = serde_json::from_str(body).unwrap();
    assert_eq!(config["config_version"], 1);
    assert_eq!(config["locale"], "zh");
    assert_eq!(config["crisis_resources"][0]["contact"], "12356");
    assert_eq!(config["crisis_resources"][0]["region"], "CN");
}

#[test]
fn newer_config_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"config_version": 9}"#).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_mindscale"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .arg("list")
        .env("RUST_LOG", "off")
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn oversized_config_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"config_version": 4294967297}"#,
    )
    .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_mindscale"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .arg("list")
        .env("RUST_LOG", "off")
        .status()
        .unwrap();
    assert!(!status.success());
}
