use crate::error::{MergeError, Result};
use crate::merge::classify;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Json,
	Toml,
}

impl ConfigFormat {
	/// Pick the format from a file extension.
	pub fn from_path(path: &Path) -> Result<Self> {
		let ext = path
			.extension()
			.and_then(|e| e.to_str())
			.map(|e| e.to_ascii_lowercase());

		match ext.as_deref() {
			Some("json") => Ok(ConfigFormat::Json),
			Some("toml") => Ok(ConfigFormat::Toml),
			_ => Err(MergeError::UnsupportedFormat {
				path: path.to_path_buf(),
			}),
		}
	}
}

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Map<String, Value>> {
	let format = ConfigFormat::from_path(path)?;

	let content = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			MergeError::ConfigNotFound {
				path: path.to_path_buf(),
			}
		} else {
			MergeError::ConfigReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	parse_config_str(&content, format, path)
}

/// Parse a JSON config document from a reader (used for stdin).
pub fn parse_config_reader<R: Read>(mut reader: R, path: &Path) -> Result<Map<String, Value>> {
	let mut content = String::new();
	reader
		.read_to_string(&mut content)
		.map_err(|source| MergeError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, ConfigFormat::Json, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(
	content: &str,
	format: ConfigFormat,
	path: &Path,
) -> Result<Map<String, Value>> {
	let value = match format {
		ConfigFormat::Json => {
			serde_json::from_str::<Value>(content).map_err(|source| MergeError::JsonParseError {
				path: path.to_path_buf(),
				source,
			})?
		}
		ConfigFormat::Toml => {
			let table: toml::Table =
				toml::from_str(content).map_err(|source| MergeError::ConfigParseError {
					path: path.to_path_buf(),
					source,
				})?;
			toml_to_json(toml::Value::Table(table))
		}
	};

	match value {
		Value::Object(map) => Ok(map),
		other => Err(MergeError::NotAnObject {
			path: path.to_path_buf(),
			kind: classify(&other),
		}),
	}
}

/// Convert a TOML value into a configuration value.
pub fn toml_to_json(toml: toml::Value) -> Value {
	match toml {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => serde_json::Number::from_f64(f)
			.map(Value::Number)
			.unwrap_or(Value::Null),
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => Value::Object(
			table
				.into_iter()
				.map(|(k, v)| (k, toml_to_json(v)))
				.collect(),
		),
	}
}
