#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn deepmerge_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("deepmerge").unwrap();
	cmd.env("DEEPMERGE_NO_USER_DEFAULTS", "1");
	cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
	let path = dir.join(name);
	fs::write(&path, content).unwrap();
	path.to_string_lossy().to_string()
}

fn stdout_json(output: &[u8]) -> Value {
	serde_json::from_slice(output).unwrap()
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	deepmerge_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("deep-merging layered"));
}

#[test]
fn test_version_flag() {
	deepmerge_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("deepmerge"));
}

#[test]
fn test_no_args_shows_help() {
	// With arg_required_else_help, no args should show help
	deepmerge_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// merge subcommand tests
// ============================================================================

#[test]
fn test_merge_without_inputs_prints_empty_object() {
	let output = deepmerge_cmd().arg("merge").assert().success();
	assert_eq!(stdout_json(&output.get_output().stdout), json!({}));
}

#[test]
fn test_merge_json_and_toml_files() {
	let temp_dir = tempfile::tempdir().unwrap();
	let defaults = write(
		temp_dir.path(),
		"defaults.toml",
		r#"
muted = false

[video]
width = 640
height = 480
codecs = ["vp8"]
"#,
	);
	let user = write(
		temp_dir.path(),
		"user.json",
		r#"{"video": {"width": 1280, "codecs": ["h264", "vp8"]}, "muted": {"audio": true}}"#,
	);

	let output = deepmerge_cmd()
		.args(["merge", &defaults, &user])
		.assert()
		.success();

	assert_eq!(
		stdout_json(&output.get_output().stdout),
		json!({
			"muted": {"audio": true},
			"video": {"width": 1280, "height": 480, "codecs": ["vp8", "h264"]},
		})
	);
}

#[test]
fn test_merge_drops_reserved_keys() {
	let temp_dir = tempfile::tempdir().unwrap();
	let polluted = write(
		temp_dir.path(),
		"polluted.json",
		r#"{"__proto__": {"polluted": true}, "safe": 1}"#,
	);

	deepmerge_cmd()
		.args(["merge", "--compact", &polluted])
		.assert()
		.success()
		.stdout(predicate::str::diff("{\"safe\":1}\n"));
}

#[test]
fn test_merge_with_overrides() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"video": {"width": 640}}"#);

	let output = deepmerge_cmd()
		.args([
			"merge",
			&base,
			"--set",
			"video.width=1280",
			"--set",
			"name=team sync",
		])
		.assert()
		.success();

	assert_eq!(
		stdout_json(&output.get_output().stdout),
		json!({"video": {"width": 1280}, "name": "team sync"})
	);
}

#[test]
fn test_merge_invalid_override() {
	deepmerge_cmd()
		.args(["merge", "--set", "novalue"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid override"));
}

#[test]
fn test_merge_from_stdin() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"a": [1, 2], "b": 1}"#);

	let output = deepmerge_cmd()
		.args(["merge", &base, "-"])
		.write_stdin(r#"{"a": [2, 3]}"#)
		.assert()
		.success();

	assert_eq!(
		stdout_json(&output.get_output().stdout),
		json!({"a": [1, 2, 3], "b": 1})
	);
}

#[test]
fn test_merge_top_level_array_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let array = write(temp_dir.path(), "array.json", "[1, 2]");

	deepmerge_cmd()
		.args(["merge", &array])
		.assert()
		.failure()
		.stderr(predicate::str::contains("must be an object"));
}

#[test]
fn test_merge_missing_file_fails() {
	deepmerge_cmd()
		.args(["merge", "/nonexistent/deepmerge/config.json"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("not found"));
}

#[test]
fn test_merge_unsupported_format_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let yaml = write(temp_dir.path(), "config.yaml", "a: 1");

	deepmerge_cmd()
		.args(["merge", &yaml])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Unsupported config format"));
}

#[test]
fn test_merge_toml_output() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"video": {"width": 1280}}"#);

	deepmerge_cmd()
		.args(["merge", "--format", "toml", &base])
		.assert()
		.success()
		.stdout(predicate::str::contains("[video]"))
		.stdout(predicate::str::contains("width = 1280"));
}

#[test]
fn test_merge_toml_output_rejects_null() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"token": null}"#);

	deepmerge_cmd()
		.args(["merge", "--format", "toml", &base])
		.assert()
		.failure()
		.stderr(predicate::str::contains("cannot be represented in TOML"));
}

#[test]
fn test_merge_writes_output_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"a": 1}"#);
	let out_path = temp_dir.path().join("merged.json");

	deepmerge_cmd()
		.args(["merge", &base, "--output"])
		.arg(&out_path)
		.assert()
		.success()
		.stdout(predicate::str::is_empty());

	let content = fs::read_to_string(&out_path).unwrap();
	assert_eq!(serde_json::from_str::<Value>(&content).unwrap(), json!({"a": 1}));
}

#[cfg(unix)]
#[test]
fn test_user_defaults_layer() {
	let home = tempfile::tempdir().unwrap();
	write(home.path(), ".deepmerge.toml", "theme = \"dark\"\nlimit = 5\n");
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"limit": 10}"#);

	let output = deepmerge_cmd()
		.env_remove("DEEPMERGE_NO_USER_DEFAULTS")
		.env("HOME", home.path())
		.args(["merge", &base])
		.assert()
		.success();
	assert_eq!(
		stdout_json(&output.get_output().stdout),
		json!({"theme": "dark", "limit": 10})
	);

	// --no-user-defaults skips the layer
	let output = deepmerge_cmd()
		.env_remove("DEEPMERGE_NO_USER_DEFAULTS")
		.env("HOME", home.path())
		.args(["merge", "--no-user-defaults", &base])
		.assert()
		.success();
	assert_eq!(stdout_json(&output.get_output().stdout), json!({"limit": 10}));
}

// ============================================================================
// sources / validate subcommand tests
// ============================================================================

#[test]
fn test_sources_lists_layers() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.json", r#"{"alpha": 1, "beta": 2}"#);

	deepmerge_cmd()
		.args(["sources", &base, "--set", "gamma=3"])
		.assert()
		.success()
		.stdout(predicate::str::contains("base.json"))
		.stdout(predicate::str::contains("keys: 2"))
		.stdout(predicate::str::contains("alpha"))
		.stdout(predicate::str::contains("<command-line overrides>"));
}

#[test]
fn test_sources_no_layers() {
	deepmerge_cmd()
		.arg("sources")
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration layers found"));
}

#[test]
fn test_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.toml", "[video]\nwidth = 1\n");

	deepmerge_cmd()
		.args(["validate", &base])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_invalid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "base.toml", "invalid toml [[[");

	deepmerge_cmd()
		.args(["validate", &base])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"))
		.stderr(predicate::str::contains("Caused by"))
		.stderr(predicate::str::contains("line 1"));
}

// ============================================================================
// Logging tests
// ============================================================================

#[test]
fn test_rust_log_enables_debug_logs() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "a.json", r#"{"a": 1}"#);

	deepmerge_cmd()
		.env("RUST_LOG", "debug")
		.args(["merge", &base])
		.assert()
		.success()
		.stderr(predicate::str::contains("loaded config layer"));
}

#[test]
fn test_log_level_flag_enables_debug_logs() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "a.json", r#"{"a": 1}"#);

	deepmerge_cmd()
		.env_remove("RUST_LOG")
		.args(["--log-level", "debug", "merge", &base])
		.assert()
		.success()
		.stderr(predicate::str::contains("loaded config layer"));
}

#[test]
fn test_default_log_level_is_quiet() {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = write(temp_dir.path(), "a.json", r#"{"a": 1}"#);

	deepmerge_cmd()
		.env_remove("RUST_LOG")
		.args(["merge", &base])
		.assert()
		.success()
		.stderr(predicate::str::is_empty());
}
