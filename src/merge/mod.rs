//! Deep merge of configuration values.
//!
//! This module handles:
//! - Classifying values by tag
//! - Folding an ordered sequence of objects into one
//! - Array union and reserved-key exclusion

pub mod engine;
pub mod value;

pub use engine::{merge, merge_objects};
pub use value::{
	RESERVED_KEYS, ValueKind, classify, is_plain_object, is_reserved_key, same_value,
};
