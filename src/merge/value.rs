use serde_json::{Map, Value};
use std::fmt;

/// Keys that are never copied into a merged document.
///
/// Merged configs are routinely handed to JavaScript consumers, where these
/// names reach the object prototype.
pub const RESERVED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Runtime tag of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	Null,
	Bool,
	Number,
	String,
	Array,
	Object,
}

impl ValueKind {
	/// Primitives always take the last-write-wins branch of a merge.
	pub fn is_primitive(self) -> bool {
		!matches!(self, ValueKind::Array | ValueKind::Object)
	}

	/// Singular noun for messages about one value, e.g. "found an array".
	pub fn singular_name(self) -> &'static str {
		match self {
			ValueKind::Null => "null",
			ValueKind::Bool => "a boolean",
			ValueKind::Number => "a number",
			ValueKind::String => "a string",
			ValueKind::Array => "an array",
			ValueKind::Object => "an object",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ValueKind::Null => "null",
			ValueKind::Bool => "booleans",
			ValueKind::Number => "numbers",
			ValueKind::String => "strings",
			ValueKind::Array => "arrays",
			ValueKind::Object => "objects",
		};
		f.write_str(name)
	}
}

/// Classify a value by its tag.
pub fn classify(value: &Value) -> ValueKind {
	match value {
		Value::Null => ValueKind::Null,
		Value::Bool(_) => ValueKind::Bool,
		Value::Number(_) => ValueKind::Number,
		Value::String(_) => ValueKind::String,
		Value::Array(_) => ValueKind::Array,
		Value::Object(_) => ValueKind::Object,
	}
}

/// Check if a value is a plain key-value object (not an array or null).
pub fn is_plain_object(value: &Value) -> bool {
	classify(value) == ValueKind::Object
}

/// Check if a key must be dropped from merge output.
pub fn is_reserved_key(key: &str) -> bool {
	RESERVED_KEYS.contains(&key)
}

/// Clone a value, dropping reserved keys at every depth.
pub(crate) fn sanitized(value: &Value) -> Value {
	match value {
		Value::Object(map) => Value::Object(sanitized_map(map)),
		Value::Array(items) => Value::Array(items.iter().map(sanitized).collect()),
		other => other.clone(),
	}
}

pub(crate) fn sanitized_map(map: &Map<String, Value>) -> Map<String, Value> {
	map.iter()
		.filter(|(key, _)| {
			let reserved = is_reserved_key(key);
			if reserved {
				tracing::warn!(key = key.as_str(), "dropping reserved key from merged config");
			}
			!reserved
		})
		.map(|(key, value)| (key.clone(), sanitized(value)))
		.collect()
}

/// Value equality used for array deduplication.
///
/// Numbers compare numerically so `1` and `1.0` are the same element;
/// arrays and objects compare structurally.
pub fn same_value(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => {
			if x.is_f64() || y.is_f64() {
				x.as_f64() == y.as_f64()
			} else {
				x == y
			}
		}
		(Value::Array(xs), Value::Array(ys)) => {
			xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
		}
		(Value::Object(xs), Value::Object(ys)) => {
			xs.len() == ys.len()
				&& xs
					.iter()
					.all(|(key, x)| ys.get(key).is_some_and(|y| same_value(x, y)))
		}
		_ => a == b,
	}
}
