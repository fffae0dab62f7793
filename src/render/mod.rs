//! Output rendering for merged documents.
//!
//! This module handles:
//! - JSON output, pretty or compact
//! - TOML output, rejecting values TOML cannot hold

use crate::error::{MergeError, Result};
use serde_json::Value;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
	#[default]
	Json,
	Toml,
}

/// Render a merged document.
///
/// `pretty` selects indented JSON or multi-line TOML arrays.
pub fn render(value: &Value, format: OutputFormat, pretty: bool) -> Result<String> {
	match format {
		OutputFormat::Json => {
			let rendered = if pretty {
				serde_json::to_string_pretty(value)
			} else {
				serde_json::to_string(value)
			};
			rendered.map_err(|source| MergeError::JsonRenderError { source })
		}
		OutputFormat::Toml => {
			let table = match json_to_toml(value, "")? {
				toml::Value::Table(table) => table,
				_ => return Err(unrepresentable("")),
			};
			let rendered = if pretty {
				toml::to_string_pretty(&table)
			} else {
				toml::to_string(&table)
			};
			rendered.map_err(|source| MergeError::TomlRenderError { source })
		}
	}
}

fn unrepresentable(key_path: &str) -> MergeError {
	MergeError::UnrepresentableInToml {
		key_path: if key_path.is_empty() {
			"<root>".to_string()
		} else {
			key_path.to_string()
		},
	}
}

/// Convert a configuration value to TOML.
///
/// `null` and integers above `i64::MAX` have no TOML form.
fn json_to_toml(value: &Value, key_path: &str) -> Result<toml::Value> {
	let converted = match value {
		Value::Null => return Err(unrepresentable(key_path)),
		Value::Bool(b) => toml::Value::Boolean(*b),
		Value::Number(n) => match n.as_i64() {
			Some(i) => toml::Value::Integer(i),
			None if n.is_u64() => return Err(unrepresentable(key_path)),
			None => toml::Value::Float(n.as_f64().unwrap_or(f64::NAN)),
		},
		Value::String(s) => toml::Value::String(s.clone()),
		Value::Array(items) => toml::Value::Array(
			items
				.iter()
				.enumerate()
				.map(|(i, item)| json_to_toml(item, &format!("{key_path}[{i}]")))
				.collect::<Result<Vec<_>>>()?,
		),
		Value::Object(map) => {
			let mut table = toml::Table::new();
			for (key, item) in map {
				let child_path = if key_path.is_empty() {
					key.clone()
				} else {
					format!("{key_path}.{key}")
				};
				table.insert(key.clone(), json_to_toml(item, &child_path)?);
			}
			toml::Value::Table(table)
		}
	};
	Ok(converted)
}
