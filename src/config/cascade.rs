use crate::config::overrides::overrides_layer;
use crate::config::parser::{parse_config_file, parse_config_reader};
use crate::config::types::{ConfigLayer, LayerSource, LoadOptions, MergedConfig};
use crate::error::{MergeError, Result};
use crate::merge::merge_objects;
use serde_json::Map;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the per-user defaults layer, looked up in the home directory.
pub const USER_DEFAULTS_FILE: &str = ".deepmerge.toml";

/// Environment variable that, if truthy, skips the user defaults layer.
pub const NO_USER_DEFAULTS_ENV_VAR: &str = "DEEPMERGE_NO_USER_DEFAULTS";

/// Load every layer in the cascade.
///
/// The cascade order is:
/// 1. ~/.deepmerge.toml (unless disabled)
/// 2. Each path in `paths`, in order (`-` reads JSON from stdin)
/// 3. The `KEY=VALUE` overrides in `options`
///
/// Returns layers lowest precedence first.
pub fn load_layers(paths: &[PathBuf], options: &LoadOptions) -> Result<Vec<ConfigLayer>> {
	let mut layers = Vec::new();

	if let Some(user_defaults) = load_user_defaults(options)? {
		layers.push(user_defaults);
	}

	for path in paths {
		let layer = if is_stdin_path(path) {
			ConfigLayer {
				value: parse_config_reader(std::io::stdin().lock(), path)?,
				source: LayerSource::Stdin,
			}
		} else {
			ConfigLayer {
				value: parse_config_file(path)?,
				source: LayerSource::File(path.clone()),
			}
		};
		debug!(source = %layer.source, keys = layer.value.len(), "loaded config layer");
		layers.push(layer);
	}

	if let Some(overrides) = overrides_layer(&options.overrides)? {
		debug!(count = options.overrides.len(), "applied command-line overrides");
		layers.push(overrides);
	}

	Ok(layers)
}

/// Load the user's ~/.deepmerge.toml if it exists and isn't disabled.
fn load_user_defaults(options: &LoadOptions) -> Result<Option<ConfigLayer>> {
	if options.skip_user_defaults || is_env_truthy(NO_USER_DEFAULTS_ENV_VAR) {
		debug!("user defaults lookup disabled");
		return Ok(None);
	}

	let path = user_defaults_path()?;

	if path.exists() {
		let value = parse_config_file(&path)?;
		debug!(path = %path.display(), "loaded user defaults");
		Ok(Some(ConfigLayer {
			value,
			source: LayerSource::UserDefaults(path),
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
pub fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge layers into a single effective config.
///
/// Later layers take precedence; see [`crate::merge::merge`] for the rules.
pub fn merge_layers(layers: &[ConfigLayer]) -> MergedConfig {
	let value = layers
		.iter()
		.fold(Map::new(), |merged, layer| merge_objects(&merged, &layer.value));

	MergedConfig {
		value,
		sources: layers.iter().map(|layer| layer.source.clone()).collect(),
	}
}

/// Convenience function to load and merge every layer.
pub fn load_merged_config(paths: &[PathBuf], options: &LoadOptions) -> Result<MergedConfig> {
	let layers = load_layers(paths, options)?;
	Ok(merge_layers(&layers))
}

/// Get the path to the user's defaults file.
pub fn user_defaults_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(MergeError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(USER_DEFAULTS_FILE))
}

/// True if `path` is the stdin placeholder.
pub fn is_stdin_path(path: &Path) -> bool {
	path.as_os_str() == "-"
}
