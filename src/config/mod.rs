//! Configuration loading for deepmerge.
//!
//! This module handles:
//! - JSON and TOML document parsing
//! - Layer cascade (user defaults, files, overrides)
//! - `KEY=VALUE` override expressions

pub mod cascade;
pub mod overrides;
pub mod parser;
pub mod types;

pub use cascade::{
	is_env_truthy, load_layers, load_merged_config, merge_layers, user_defaults_path,
};
pub use overrides::{overrides_layer, parse_override};
pub use parser::{ConfigFormat, parse_config_file, parse_config_reader, parse_config_str};
pub use types::{ConfigLayer, LayerSource, LoadOptions, MergedConfig};
