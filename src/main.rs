use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use deepmerge_cli::config::{LoadOptions, load_layers, merge_layers, user_defaults_path};
use deepmerge_cli::render::{OutputFormat, render};

#[derive(Parser)]
#[command(name = "deepmerge")]
#[command(
	author,
	version,
	about = "CLI tool for deep-merging layered JSON and TOML configuration documents"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, global = true, default_value = "warn")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Merge documents left to right and print the result
	Merge {
		#[command(flatten)]
		inputs: InputArgs,

		/// Output format
		#[arg(long, value_enum, default_value_t = FormatArg::Json)]
		format: FormatArg,

		/// Print compact output instead of pretty-printed
		#[arg(long)]
		compact: bool,

		/// Write the result to a file instead of stdout
		#[arg(short, long, value_name = "PATH")]
		output: Option<PathBuf>,
	},
	/// List the layers that contribute to the merge, lowest precedence first
	Sources {
		#[command(flatten)]
		inputs: InputArgs,
	},
	/// Check every layer for errors without printing the merge
	Validate {
		#[command(flatten)]
		inputs: InputArgs,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
	Json,
	Toml,
}

impl From<FormatArg> for OutputFormat {
	fn from(arg: FormatArg) -> Self {
		match arg {
			FormatArg::Json => OutputFormat::Json,
			FormatArg::Toml => OutputFormat::Toml,
		}
	}
}

#[derive(Args)]
struct InputArgs {
	/// Config documents (.json or .toml), lowest precedence first; `-` reads JSON from stdin
	#[arg(value_name = "FILE")]
	files: Vec<PathBuf>,

	/// Override a value, e.g. `--set video.width=1280` (VALUE is JSON or a raw string)
	#[arg(long = "set", value_name = "KEY=VALUE")]
	overrides: Vec<String>,

	/// Don't load ~/.deepmerge.toml
	#[arg(long)]
	no_user_defaults: bool,
}

impl InputArgs {
	fn load_options(&self) -> LoadOptions {
		LoadOptions {
			skip_user_defaults: self.no_user_defaults,
			overrides: self.overrides.clone(),
		}
	}
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	setup_logging(&cli.log_level);

	match cli.command {
		Commands::Merge {
			inputs,
			format,
			compact,
			output,
		} => handle_merge(&inputs, format.into(), compact, output.as_deref()),
		Commands::Sources { inputs } => handle_sources(&inputs),
		Commands::Validate { inputs } => handle_validate(&inputs),
	}
}

fn setup_logging(log_level: &str) {
	let level = match log_level.to_lowercase().as_str() {
		"trace" => Level::TRACE,
		"debug" => Level::DEBUG,
		"info" => Level::INFO,
		"error" => Level::ERROR,
		_ => Level::WARN,
	};

	// RUST_LOG, when set, takes precedence over --log-level.
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

	// Logs go to stderr; stdout carries the merged document.
	fmt()
		.with_env_filter(filter)
		.with_target(true)
		.with_ansi(std::io::stderr().is_terminal())
		.with_writer(std::io::stderr)
		.init();
}

fn handle_merge(
	inputs: &InputArgs,
	format: OutputFormat,
	compact: bool,
	output: Option<&Path>,
) -> Result<ExitCode> {
	let layers =
		load_layers(&inputs.files, &inputs.load_options()).context("Failed to load configuration")?;
	let merged = merge_layers(&layers);
	info!(layers = layers.len(), keys = merged.value.len(), "merged configuration");

	let rendered =
		render(&merged.to_value(), format, !compact).context("Failed to render merged config")?;

	match output {
		Some(path) => {
			std::fs::write(path, format!("{rendered}\n"))
				.with_context(|| format!("Failed to write {}", path.display()))?;
			info!(path = %path.display(), "wrote merged configuration");
		}
		None => println!("{}", rendered),
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_sources(inputs: &InputArgs) -> Result<ExitCode> {
	let layers =
		load_layers(&inputs.files, &inputs.load_options()).context("Failed to load configuration")?;

	if layers.is_empty() {
		println!("No configuration layers found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration layers (lowest precedence first):\n");

	for (i, layer) in layers.iter().enumerate() {
		println!("  {}. {}", i + 1, layer.source);
		println!("     keys: {}", layer.value.len());
		for key in layer.value.keys() {
			println!("       - {}", key);
		}
	}
	println!();

	// Show user defaults path
	if let Ok(path) = user_defaults_path() {
		println!("User defaults path: {}", path.display());
		if path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_validate(inputs: &InputArgs) -> Result<ExitCode> {
	match load_layers(&inputs.files, &inputs.load_options()) {
		Ok(layers) => {
			if layers.is_empty() {
				println!("No configuration layers found.");
			} else {
				println!("All configuration layers are valid:");
				for layer in &layers {
					println!("  {} ({} keys)", layer.source, layer.value.len());
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:?}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}
