use crate::config::types::{ConfigLayer, LayerSource};
use crate::error::{MergeError, Result};
use crate::merge::merge_objects;
use serde_json::{Map, Value};

/// Parse a `a.b.c=VALUE` expression into `{"a": {"b": {"c": VALUE}}}`.
///
/// VALUE is parsed as JSON when it is valid JSON, otherwise it is taken
/// as a raw string. So `port=8080` sets a number and `name=room` a string.
pub fn parse_override(expression: &str) -> Result<Map<String, Value>> {
	let invalid = |reason: &str| MergeError::InvalidOverride {
		expression: expression.to_string(),
		reason: reason.to_string(),
	};

	let (key_path, raw_value) = expression
		.split_once('=')
		.ok_or_else(|| invalid("expected KEY=VALUE"))?;

	if key_path.is_empty() {
		return Err(invalid("key is empty"));
	}

	let segments: Vec<&str> = key_path.split('.').collect();
	if segments.iter().any(|segment| segment.is_empty()) {
		return Err(invalid("key path has an empty segment"));
	}

	let leaf = serde_json::from_str::<Value>(raw_value)
		.unwrap_or_else(|_| Value::String(raw_value.to_string()));

	let nested = segments.iter().rev().fold(leaf, |inner, segment| {
		let mut map = Map::new();
		map.insert((*segment).to_string(), inner);
		Value::Object(map)
	});

	match nested {
		Value::Object(map) => Ok(map),
		_ => Err(invalid("key is empty")),
	}
}

/// Build one layer out of every override expression, applied in order.
pub fn overrides_layer(expressions: &[String]) -> Result<Option<ConfigLayer>> {
	if expressions.is_empty() {
		return Ok(None);
	}

	let mut value = Map::new();
	for expression in expressions {
		let parsed = parse_override(expression)?;
		value = merge_objects(&value, &parsed);
	}

	Ok(Some(ConfigLayer {
		value,
		source: LayerSource::Overrides,
	}))
}
