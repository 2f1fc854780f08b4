//! End-to-end tests running the `wt` binary against a throwaway database.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn wt_binary() -> String {
    env!("CARGO_BIN_EXE_wt").to_string()
}

/// Runs `wt` with an isolated home, UTC clock and English day names.
fn wt(home: &Path, args: &[&str]) -> String {
    let output = Command::new(wt_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("TZ", "UTC")
        .env("WT_LANGUAGE", "en")
        .env("WT_DATABASE_PATH", home.join("wt.db"))
        .env_remove("WT_CONSIDER_ACCUMULATED")
        .args(args)
        .output()
        .expect("failed to run wt");
    assert!(
        output.status.success(),
        "wt {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_clock_in_and_out_persist_between_runs() {
    let temp = TempDir::new().unwrap();

    let out = wt(temp.path(), &["hours", "set", "8"]);
    assert_eq!(out, "Workday set to 8h\n");

    let out = wt(
        temp.path(),
        &["clock-in", "--day", "Monday", "--at", "2025-03-10T08:00:00Z"],
    );
    assert_eq!(out, "Clocked in on Monday at 08:00\nEstimated exit: 16:00\n");

    let out = wt(
        temp.path(),
        &["clock-out", "--day", "Monday", "--at", "2025-03-10T17:00:00Z"],
    );
    assert!(out.ends_with("Worked: 09:00\n"), "unexpected output: {out}");

    let json = wt(temp.path(), &["week", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["days"][0]["name"], "Monday");
    assert_eq!(value["days"][0]["minutes"], 540.0);
    assert_eq!(value["days"].as_array().unwrap().len(), 7);

    assert!(temp.path().join("wt.db").exists());
}

#[test]
fn test_estimate_uses_stored_preference() {
    let temp = TempDir::new().unwrap();

    let out = wt(temp.path(), &["estimate", "--clock-in", "09:00", "--day", "Friday"]);
    assert_eq!(out, "Estimated exit: 16:30\n");

    wt(temp.path(), &["hours", "set", "8"]);
    let out = wt(temp.path(), &["estimate", "--clock-in", "09:00", "--day", "Friday"]);
    assert_eq!(out, "Estimated exit: 17:00\n");
}

#[test]
fn test_invalid_day_fails() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(wt_binary())
        .env("HOME", temp.path())
        .env("TZ", "UTC")
        .env("WT_LANGUAGE", "en")
        .env("WT_DATABASE_PATH", temp.path().join("wt.db"))
        .args(["day", "Lunes"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid day provided: \"Lunes\"."),
        "unexpected stderr: {stderr}"
    );
}
