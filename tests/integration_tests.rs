//! Integration tests for the weatherdash CLI
//!
//! Tests run the built binary against the fixture source, so no network
//! access is needed.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn weatherdash(config_dir: &Path, args: &[&str]) -> Output {
    weatherdash_with_source(config_dir, "fixture", args)
}

fn weatherdash_with_source(config_dir: &Path, source: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weatherdash"))
        .arg("--config")
        .arg(config_dir.join("config.toml"))
        .args(["--source", source])
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("WEATHERBIT_API_KEY")
        .env_remove("WEATHERDASH_WEATHER__API_KEY")
        .env_remove("WEATHERDASH_WEATHER__SOURCE")
        .output()
        .expect("Failed to execute weatherdash")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_weatherdash"))
        .arg("--help")
        .output()
        .expect("Failed to execute weatherdash");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"));
    assert!(stdout.contains("detail"));
}

#[test]
fn test_list_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Cities: 30"));
    assert!(stdout.contains("Tokyo"));
    assert!(stdout.contains("https://www.weatherbit.io/static/img/icons/"));
}

#[test]
fn test_list_json_filtered_by_continent() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "list", "--continent", "Oceania"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["source"], "fixture");
    let view = &json["view"];
    assert_eq!(view["stats"]["count"], 2);
    assert_eq!(view["stats"]["avg_temp"], 20.3);
    assert_eq!(view["stats"]["min_temp"], 17.4);
    assert_eq!(view["stats"]["max_temp"], 23.2);
    assert_eq!(view["by_continent"][0]["continent"], "Oceania");
    // unset range filters are reported as the data's range
    assert_eq!(view["criteria"]["min_temp"], 4.0);
    assert_eq!(view["criteria"]["max_temp"], 35.0);
}

#[test]
fn test_list_json_keeps_user_temperature_bound() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "list", "--min-temp", "30"]);

    assert!(output.status.success());
    let view = &stdout_json(&output)["view"];
    assert_eq!(view["criteria"]["min_temp"], 30.0);
    assert_eq!(view["criteria"]["max_temp"], 35.0);
    assert_eq!(view["stats"]["min_temp"], 30.0);
}

#[test]
fn test_list_json_empty_result_uses_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(
        dir.path(),
        &["--json", "list", "--min-temp", "50", "--max-temp", "60"],
    );

    assert!(output.status.success());
    let stats = &stdout_json(&output)["view"]["stats"];
    assert_eq!(stats["count"], 0);
    assert_eq!(stats["avg_temp"], "-");
    assert_eq!(stats["min_temp"], "-");
}

#[test]
fn test_detail_url_encoded_city() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "detail", "S%C3%A3o%20Paulo"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["record"]["city_name"], "São Paulo");
    assert_eq!(json["city"]["continent"], "South America");
    assert_eq!(
        json["icon_url"],
        "https://www.weatherbit.io/static/img/icons/c02d.png"
    );
}

#[test]
fn test_detail_unknown_city_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["detail", "Atlantis"]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("City not found: Atlantis"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_detail_city_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "detail", "Dhaka"]);

    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "no_data");
    assert_eq!(json["message"], "No data found.");
}

#[test]
fn test_cities_json_lists_registry() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "cities"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    let cities = json.as_array().unwrap();
    assert_eq!(cities.len(), 32);
    assert_eq!(cities[0]["name"], "Tokyo");
}

#[test]
fn test_options_include_all() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash(dir.path(), &["--json", "options"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["conditions"][0], "All");
    assert_eq!(json["continents"][0], "All");
    assert_eq!(json["temperature_bounds"]["min"], 4.0);
    assert_eq!(json["temperature_bounds"]["max"], 35.0);
}

#[test]
fn test_live_source_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = weatherdash_with_source(dir.path(), "live", &["cities"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WEATHERBIT_API_KEY"));
}
