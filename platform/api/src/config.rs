use std::net::SocketAddr;

use common::config::{ConfigError, DatabaseConfig, LoggingConfig, TlsConfig};

/// Environment variables with this prefix override the config file.
pub const ENV_PREFIX: &str = "LIVE";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
/// The API is the backend for livestream reservation and discovery
pub struct AppConfig {
	/// The path to the config file
	pub config_file: Option<String>,

	/// Name of this instance
	pub name: String,

	///  The logging config
	pub logging: LoggingConfig,

	/// API Config
	pub api: ApiConfig,

	/// Database Config
	pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,

	/// If we should use TLS for the API server
	pub tls: Option<TlsConfig>,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
			tls: None,
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			config_file: Some("config".to_string()),
			name: "livestream-api".to_string(),
			logging: LoggingConfig::default(),
			api: ApiConfig::default(),
			database: DatabaseConfig::default(),
		}
	}
}

impl AppConfig {
	pub fn parse() -> Result<Self, ConfigError> {
		let (mut config, config_file) = common::config::parse::<Self>(ENV_PREFIX, Self::default().config_file)?;

		config.config_file = config_file;

		Ok(config)
	}
}
