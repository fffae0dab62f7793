use std::path::PathBuf;

use crate::merge::ValueKind;

/// Library-level structured errors for deepmerge.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
	#[error("Invalid merge argument at position {index}: arguments must be objects, not {kind}")]
	InvalidArgument { index: usize, kind: ValueKind },

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse TOML config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to parse JSON config file: {path}")]
	JsonParseError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Config document must be an object, found {found}: {path}", found = .kind.singular_name())]
	NotAnObject { path: PathBuf, kind: ValueKind },

	#[error("Unsupported config format (expected .json or .toml): {path}")]
	UnsupportedFormat { path: PathBuf },

	#[error("Invalid override `{expression}`: {reason}")]
	InvalidOverride { expression: String, reason: String },

	#[error("Value at `{key_path}` cannot be represented in TOML")]
	UnrepresentableInToml { key_path: String },

	#[error("Failed to render TOML output")]
	TomlRenderError {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Failed to render JSON output")]
	JsonRenderError {
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl MergeError {
	/// True for errors raised because a merge input was not an object.
	pub fn is_invalid_argument(&self) -> bool {
		matches!(
			self,
			MergeError::InvalidArgument { .. } | MergeError::NotAnObject { .. }
		)
	}
}

/// Result type alias using MergeError.
pub type Result<T> = std::result::Result<T, MergeError>;
