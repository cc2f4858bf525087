//! Integration tests driving the compiled `workout-stats` binary

use assert_cmd::Command;
use tempfile::TempDir;

/// Run the binary with config lookups redirected into `home`.
fn workout_stats(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workout-stats").expect("binary is built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_summary_text() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home)
        .args(["summary", "RUN", "15000", "1", "75"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output).trim_end(),
        "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; \
         Ср. скорость: 9.750 км/ч; Потрачено ккал: 797.805."
    );
}

#[test]
fn test_summary_json() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home)
        .args(["summary", "SWM", "720", "1", "80", "25", "40", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value[0]["activity_name"], "Swimming");
    assert_eq!(value[0]["mean_speed_kmh"], 1.0);
}

#[test]
fn test_unknown_code_fails() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home)
        .args(["summary", "XYZ", "1", "2", "3"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown activity code: 'XYZ'"));
}

#[test]
fn test_arity_mismatch_fails() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home)
        .args(["summary", "WLK", "9000", "1", "75"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WLK expects 4 parameters"));
}

#[test]
fn test_negative_height_needs_permissive() {
    let home = TempDir::new().unwrap();
    let strict = workout_stats(&home)
        .args(["summary", "WLK", "9000", "1", "75", "-180"])
        .output()
        .unwrap();
    assert!(!strict.status.success());

    let permissive = workout_stats(&home)
        .args(["summary", "WLK", "9000", "1", "75", "-180", "--permissive"])
        .output()
        .unwrap();
    assert!(permissive.status.success());
    assert!(stdout_of(&permissive).contains("SportsWalking"));
}

#[test]
fn test_batch_from_stdin() {
    let home = TempDir::new().unwrap();
    let input = "{\"workout_type\": \"SWM\", \"data\": [720, 1, 80, 25, 40]}\n\
                 {\"workout_type\": \"RUN\", \"data\": [15000, 1, 75]}\n";
    let output = workout_stats(&home)
        .args(["batch", "-", "--format", "jsonl"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"activity_name\":\"Running\""));
}

#[test]
fn test_batch_stops_on_bad_package() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("packages.jsonl");
    std::fs::write(
        &path,
        "{\"workout_type\": \"RUN\", \"data\": [15000, 1, 75]}\n\
         {\"workout_type\": \"XYZ\", \"data\": [1]}\n",
    )
    .unwrap();

    let output = workout_stats(&home)
        .arg("batch")
        .arg(&path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Package 1 rejected"));
}

#[test]
fn test_config_sets_default_format() {
    let home = TempDir::new().unwrap();
    let saved = workout_stats(&home)
        .args(["config", "--format", "jsonl"])
        .output()
        .unwrap();
    assert!(saved.status.success());
    assert!(stdout_of(&saved).contains("\"output_format\": \"jsonl\""));

    let output = workout_stats(&home)
        .args(["summary", "RUN", "15000", "1", "75"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout_of(&output).trim()).unwrap();
    assert_eq!(value["activity_name"], "Running");
}

#[test]
fn test_codes_lists_table() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home).arg("codes").output().unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("RUN"));
    assert!(stdout.contains("pool_length, pool_lengths_count"));
}

#[test]
fn test_permissive_json_keeps_non_finite_tokens() {
    let home = TempDir::new().unwrap();
    let output = workout_stats(&home)
        .args(["summary", "RUN", "15000", "0", "75", "--permissive", "--format", "jsonl"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(stdout_of(&output).trim()).unwrap();
    assert_eq!(value["mean_speed_kmh"], "inf");
    assert_eq!(value["calories"], "nan");
}
