use std::{
	env,
	fmt::{Display, Formatter},
	net::SocketAddr,
	path::PathBuf,
	time::Duration,
};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// The environment variables the first deployments of this panel were
/// configured with. They still win over the config files when set.
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
	("PMM_BASE_URL", "pmm_base_url"),
	("PMM_ADMIN_CMD", "pmm_admin_cmd"),
	("PMM_SERVER_URL_OVERRIDE", "pmm_server_url_override"),
];

/// Reads the configuration from `config/{prod,dev}`, `APP_*` environment
/// variables and the legacy variable names, in increasing order of priority.
#[instrument]
pub fn parse_config() -> Result<AppConfig, ConfigError> {
	trace!("Reading config data...");

	let env = if cfg!(debug_assertions) {
		"dev".to_string()
	} else {
		env::var("APP_ENV").unwrap_or_else(|_| "prod".into())
	};

	let mut overrides = LEGACY_OVERRIDES
		.iter()
		.map(|(variable, key)| (*key, env::var(variable).ok()))
		.collect::<Vec<_>>();
	if let Ok(port) = env::var("PORT") {
		let host = env::var("LISTEN_HOST").unwrap_or_else(|_| "0.0.0.0".into());
		overrides.push(("bind_addr", Some(format!("{host}:{port}"))));
	}

	load(&env, overrides)
}

/// Builds the configuration for the given environment name, applying the
/// given overrides last. Overrides set to `None` are ignored.
pub(crate) fn load(
	environment: &str,
	overrides: Vec<(&str, Option<String>)>,
) -> Result<AppConfig, ConfigError> {
	let mut builder = match environment {
		"prod" | "production" => Config::builder()
			.add_source(File::with_name("config/prod").required(false))
			.set_default("environment", "production")?,
		"dev" | "development" => Config::builder()
			.add_source(File::with_name("config/dev").required(false))
			.set_default("environment", "development")?,
		unknown => {
			return Err(ConfigError::Message(format!(
				"Unknown running environment found: {unknown}"
			)));
		}
	}
	.set_default("bind_addr", "0.0.0.0:8443")?
	.set_default("pmm_base_url", "https://127.0.0.1:443")?
	.set_default("digitalocean_api_base", "https://api.digitalocean.com/v2")?
	.set_default("http_timeout_secs", 5)?
	.add_source(Environment::with_prefix("APP"));

	for (key, value) in overrides {
		builder = builder.set_override_option(key, value)?;
	}

	let mut config: AppConfig = builder.build()?.try_deserialize()?;
	config.pmm_base_url = config.pmm_base_url.trim_end_matches('/').to_string();
	config.pmm_admin_cmd = config
		.pmm_admin_cmd
		.filter(|command| !command.trim().is_empty());
	config.pmm_server_url_override = config
		.pmm_server_url_override
		.filter(|url| !url.trim().is_empty());

	Ok(config)
}

/// The configuration of the whole application. Parsed once at startup and
/// passed into [`AppState`], never read from the environment afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
	/// The environment the application is running in. This is set at runtime
	/// based on an environment variable and if the application is compiled with
	/// debug mode.
	pub environment: RunningEnvironment,
	/// The address the HTTP server listens on
	pub bind_addr: SocketAddr,
	/// The base URL of the PMM server, without a trailing slash
	pub pmm_base_url: String,
	/// A full `pmm-admin` invocation, split on whitespace. When unset,
	/// `pmm-admin` is looked up on `PATH`
	#[serde(default)]
	pub pmm_admin_cmd: Option<String>,
	/// Replaces the server URL built from the base URL and the admin password
	#[serde(default)]
	pub pmm_server_url_override: Option<String>,
	/// The base URL of the DigitalOcean REST API
	pub digitalocean_api_base: String,
	/// The timeout of every call to DigitalOcean or to the PMM HTTP API
	pub http_timeout_secs: u64,
	/// An upper bound on each `pmm-admin` invocation. Unbounded when unset
	#[serde(default)]
	pub pmm_admin_timeout_secs: Option<u64>,
	/// A directory of static files served for every unknown route
	#[serde(default)]
	pub frontend_dir: Option<PathBuf>,
}

impl AppConfig {
	/// The timeout applied to outbound HTTP requests
	pub fn http_timeout(&self) -> Duration {
		Duration::from_secs(self.http_timeout_secs)
	}

	/// The timeout applied to `pmm-admin`, if any
	pub fn pmm_admin_timeout(&self) -> Option<Duration> {
		self.pmm_admin_timeout_secs.map(Duration::from_secs)
	}
}

/// The environment the application is running in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunningEnvironment {
	/// The application is running in development mode
	Development,
	/// The application is running in production mode
	Production,
}

impl Display for RunningEnvironment {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			formatter,
			"{}",
			match self {
				RunningEnvironment::Development => "Development",
				RunningEnvironment::Production => "Production",
			}
		)
	}
}
