use std::path::{Path, PathBuf};

use crate::logging;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TlsConfig {
	/// The path to the TLS certificate
	pub cert: String,

	/// The path to the TLS private key
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,

	/// Upper bound of pooled connections
	pub max_connections: u32,

	/// Apply the bundled migrations on start-up
	pub migrate: bool,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://postgres@localhost:5432/livestream".to_string(),
			max_connections: 10,
			migrate: false,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("config file not found: {0}")]
	FileNotFound(String),
	#[error("failed to resolve config file path: {0}")]
	Io(#[from] std::io::Error),
	#[error("failed to load config: {0}")]
	Load(#[from] ::config::ConfigError),
}

fn environment(prefix: &str) -> ::config::Environment {
	::config::Environment::with_prefix(prefix)
		.prefix_separator("_")
		.separator("__")
		.try_parsing(true)
}

fn locate(path: &str) -> Option<PathBuf> {
	let path = Path::new(path);
	if path.is_file() {
		return Some(path.to_path_buf());
	}

	let with_extension = path.with_extension("toml");
	with_extension.is_file().then_some(with_extension)
}

/// Layers, from lowest to highest priority: the `#[serde(default)]` values of
/// `C`, the config file, then `{prefix}_*` environment variables (`__` nests).
///
/// The file comes from `{prefix}_CONFIG_FILE` or else `config_file`. A file named
/// by the environment must exist, a missing fallback file is skipped. Returns the
/// canonical path of the file that was read.
pub fn parse<C: serde::de::DeserializeOwned>(
	prefix: &str,
	config_file: Option<String>,
) -> Result<(C, Option<String>), ConfigError> {
	let provided = ::config::Config::builder()
		.add_source(environment(prefix))
		.build()?
		.get_string("config_file")
		.ok();

	let key_provided = provided.is_some();

	let mut builder = ::config::Config::builder();
	let mut config_path = None;

	if let Some(path) = provided.or(config_file) {
		match locate(&path) {
			Some(found) => {
				builder = builder.add_source(::config::File::from(found.as_path()));
				config_path = Some(std::fs::canonicalize(&found)?.display().to_string());
			}
			None if key_provided => return Err(ConfigError::FileNotFound(path)),
			None => tracing::debug!(path = %path, "config file not found, skipping"),
		}
	}

	let config = builder.add_source(environment(prefix)).build()?.try_deserialize()?;

	Ok((config, config_path))
}
