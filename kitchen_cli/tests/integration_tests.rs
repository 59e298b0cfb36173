//! Integration tests for the kitchen binary.
//!
//! These tests verify end-to-end behavior including:
//! - Friendly ID encode / decode / validate
//! - Ingredient classification
//! - Allergen extraction and projection as JSON
//! - Inventory CSV annotation

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test directory holding a compact-output config
fn setup_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[output]\npretty = false\n").expect("Failed to write config");
    (temp_dir, config_path)
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kitchen"))
}

/// Helper to run the CLI against a known config instead of the user's own
fn cli_with_config(config_path: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--config").arg(config_path);
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout was not JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kitchen data utilities"));
}

#[test]
fn test_encode_and_decode() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("encode")
        .arg("550e8400-e29b-41d4-a716-446655440000")
        .assert()
        .success()
        .stdout("AVAdM17Ua6bLDw6Xk79Tyr\n");

    cli_with_config(&config_path)
        .arg("decode")
        .arg("AVAdM17Ua6bLDw6Xk79Tyr")
        .assert()
        .success()
        .stdout("550e8400-e29b-41d4-a716-446655440000\n");
}

#[test]
fn test_encode_pads_small_ids() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("encode")
        .arg("00000000-0000-0000-0000-000000000000")
        .assert()
        .success()
        .stdout("00000000\n");
}

#[test]
fn test_decode_rejects_invalid_character() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("decode")
        .arg("AbcIdefg")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid character 'I'"));
}

#[test]
fn test_encode_rejects_bad_uuid() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("encode")
        .arg("not-a-uuid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid UUID"));
}

#[test]
fn test_validate() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("validate")
        .arg("Xk9mR2pQ")
        .assert()
        .success()
        .stdout("valid\n");

    cli_with_config(&config_path)
        .arg("validate")
        .arg("short")
        .assert()
        .code(1)
        .stdout("invalid\n");
}

#[test]
fn test_classify() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli_with_config(&config_path)
        .arg("classify")
        .arg("--item-code")
        .arg("12345")
        .assert()
        .success()
        .stdout("purchased\n");

    cli_with_config(&config_path)
        .arg("classify")
        .arg("--source-recipe")
        .arg("6f1c2a4e-9b7d-4e3a-8c21-0d5f6a7b8c9d")
        .assert()
        .success()
        .stdout("prepared\n");

    cli_with_config(&config_path)
        .arg("classify")
        .arg("--item-code")
        .arg("Xk9mR2pQ")
        .assert()
        .success()
        .stdout("prepared\n");
}

#[test]
fn test_explicit_config_ignores_broken_user_config() {
    let (temp_dir, config_path) = setup_test_dir();
    let xdg_home = temp_dir.path().join("xdg");
    fs::create_dir_all(xdg_home.join("kitchen")).unwrap();
    fs::write(xdg_home.join("kitchen").join("config.toml"), "[output\npretty = ").unwrap();

    cli_with_config(&config_path)
        .env("XDG_CONFIG_HOME", &xdg_home)
        .arg("encode")
        .arg("00000000-0000-0000-0000-000000000001")
        .assert()
        .success()
        .stdout("00000001\n");
}

#[test]
fn test_allergen_extract_from_stdin() {
    let (_temp_dir, config_path) = setup_test_dir();

    let output = cli_with_config(&config_path)
        .arg("allergens")
        .arg("extract")
        .write_stdin(
            r#"{
                "allergen_peanut": true,
                "allergen_peanut_may_contain": true,
                "allergen_soy_may_contain": "true",
                "allergen_custom1_active": true,
                "allergen_custom1_name": "Wine",
                "allergen_custom1_may_contain": false
            }"#,
        )
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let profile = stdout_json(&output);
    assert_eq!(profile["contains"], serde_json::json!(["peanut", "wine"]));
    assert_eq!(profile["mayContain"], serde_json::json!(["soy"]));
    assert_eq!(profile["environment"], serde_json::json!([]));
}

#[test]
fn test_allergen_extract_derived_from_file() {
    let (temp_dir, config_path) = setup_test_dir();
    let record_path = temp_dir.path().join("recipe.json");
    fs::write(
        &record_path,
        r#"{"allergen_milk_contains": true, "allergen_sesame_environment": true, "allergen_egg_contains": "true"}"#,
    )
    .unwrap();

    let output = cli_with_config(&config_path)
        .arg("allergens")
        .arg("extract")
        .arg("--derived")
        .arg(&record_path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let profile = stdout_json(&output);
    assert_eq!(profile["contains"], serde_json::json!(["milk"]));
    assert_eq!(profile["environment"], serde_json::json!(["sesame"]));
}

#[test]
fn test_allergen_project() {
    let (_temp_dir, config_path) = setup_test_dir();

    let output = cli_with_config(&config_path)
        .arg("allergens")
        .arg("project")
        .arg("--contains")
        .arg("peanut")
        .arg("--may-contain")
        .arg("soy")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let columns = stdout_json(&output);
    let columns = columns.as_object().unwrap();
    assert_eq!(columns.len(), 63);
    assert_eq!(columns["allergen_peanut_contains"], true);
    assert_eq!(columns["allergen_soy_may_contain"], true);
    assert_eq!(columns.values().filter(|v| v.as_bool() == Some(true)).count(), 2);
}

#[test]
fn test_inventory_annotate_default_output() {
    let (temp_dir, config_path) = setup_test_dir();
    let input = temp_dir.path().join("inventory.csv");
    fs::write(
        &input,
        "id,name,item_code\n550e8400-e29b-41d4-a716-446655440000,Olive Oil 4L,40012345\n",
    )
    .unwrap();

    cli_with_config(&config_path)
        .arg("inventory")
        .arg("annotate")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotated 1 rows"));

    let annotated = temp_dir.path().join("inventory.annotated.csv");
    let content = fs::read_to_string(&annotated).expect("Failed to read annotated CSV");
    assert!(content.starts_with("id,name,item_code,friendly_id,ingredient_type"));
    assert!(content.contains("AVAdM17Ua6bLDw6Xk79Tyr,purchased"));
}

#[test]
fn test_inventory_annotate_uses_configured_columns() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[inventory]\nid_column = \"uuid\"\n").unwrap();

    let input = temp_dir.path().join("inventory.csv");
    let output = temp_dir.path().join("sheet.csv");
    fs::write(&input, "uuid,item_code\n00000000-0000-0000-0000-000000000001,-\n").unwrap();

    cli_with_config(&config_path)
        .arg("inventory")
        .arg("annotate")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("00000001,prepared"));
}

#[test]
fn test_inventory_annotate_missing_column_fails() {
    let (temp_dir, config_path) = setup_test_dir();
    let input = temp_dir.path().join("inventory.csv");
    fs::write(&input, "name,item_code\nFlour,12345\n").unwrap();

    cli_with_config(&config_path)
        .arg("inventory")
        .arg("annotate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
