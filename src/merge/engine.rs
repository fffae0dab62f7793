use crate::error::{MergeError, Result};
use crate::merge::value::{classify, is_reserved_key, same_value, sanitized, sanitized_map};
use serde_json::{Map, Value};

/// Deep-merge an ordered sequence of objects into a new object.
///
/// Merge semantics, folding left to right from `{}`:
/// - Reserved keys (`__proto__`, `constructor`, `prototype`): dropped
/// - Array onto array: set-union, first occurrence order kept
/// - Object onto object: recursive merge
/// - Anything else: later value wins
///
/// Every input must be an object. An array (or any other non-object) at
/// any position aborts the merge with [`MergeError::InvalidArgument`].
pub fn merge(inputs: &[Value]) -> Result<Value> {
	let objects = inputs
		.iter()
		.enumerate()
		.map(|(index, input)| match input {
			Value::Object(map) => Ok(map),
			other => Err(MergeError::InvalidArgument {
				index,
				kind: classify(other),
			}),
		})
		.collect::<Result<Vec<_>>>()?;

	let merged = objects
		.into_iter()
		.fold(Map::new(), |mut result, current| {
			merge_into(&mut result, current);
			result
		});

	Ok(Value::Object(merged))
}

/// Merge two objects, `overlay` taking precedence field by field.
pub fn merge_objects(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
	let mut result = sanitized_map(base);
	merge_into(&mut result, overlay);
	result
}

/// Fold `incoming` into an already-sanitized `result`.
fn merge_into(result: &mut Map<String, Value>, incoming: &Map<String, Value>) {
	for (key, value) in incoming {
		if is_reserved_key(key) {
			tracing::warn!(key = key.as_str(), "dropping reserved key from merged config");
			continue;
		}

		match (result.get_mut(key), value) {
			(Some(Value::Array(existing)), Value::Array(items)) => {
				let union = union_arrays(existing, items);
				*existing = union;
			}
			(Some(Value::Object(existing)), Value::Object(fields)) => {
				merge_into(existing, fields);
			}
			(Some(slot), _) => {
				*slot = sanitized(value);
			}
			(None, _) => {
				result.insert(key.clone(), sanitized(value));
			}
		}
	}
}

/// Union of two arrays: `existing` then `incoming`, duplicates removed.
fn union_arrays(existing: &[Value], incoming: &[Value]) -> Vec<Value> {
	let mut union: Vec<Value> = Vec::with_capacity(existing.len() + incoming.len());
	for item in existing.iter().chain(incoming) {
		let item = sanitized(item);
		if !union.iter().any(|seen| same_value(seen, &item)) {
			union.push(item);
		}
	}
	union
}
