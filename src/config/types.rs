use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Where a configuration layer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSource {
	/// The user's `~/.deepmerge.toml`.
	UserDefaults(PathBuf),

	/// A document named on the command line.
	File(PathBuf),

	/// A JSON document read from standard input.
	Stdin,

	/// `KEY=VALUE` overrides given on the command line.
	Overrides,
}

impl fmt::Display for LayerSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LayerSource::UserDefaults(path) => write!(f, "{} (user defaults)", path.display()),
			LayerSource::File(path) => write!(f, "{}", path.display()),
			LayerSource::Stdin => f.write_str("<stdin>"),
			LayerSource::Overrides => f.write_str("<command-line overrides>"),
		}
	}
}

/// A loaded configuration document with its source for debugging/display.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
	/// The parsed top-level object.
	pub value: Map<String, Value>,

	/// Where this layer was loaded from.
	pub source: LayerSource,
}

/// Merged configuration from every layer in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// The merged document.
	pub value: Map<String, Value>,

	/// Contributing layers, lowest precedence first.
	pub sources: Vec<LayerSource>,
}

impl MergedConfig {
	pub fn to_value(&self) -> Value {
		Value::Object(self.value.clone())
	}
}

/// Options controlling which layers are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// Skip `~/.deepmerge.toml` even if it exists.
	pub skip_user_defaults: bool,

	/// `KEY=VALUE` expressions applied on top of every file.
	pub overrides: Vec<String>,
}
