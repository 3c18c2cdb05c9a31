use serde::{Deserialize, Serialize};

use crate::utils::constants;

/// Creates the user PMM connects to a managed database as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
	/// The DigitalOcean API token
	#[serde(default)]
	pub do_token: String,
	/// The DigitalOcean ID of the cluster
	#[serde(default)]
	pub db_id: String,
	/// The name of the cluster. Only echoed back in conflicts
	#[serde(default)]
	pub db_name: String,
	/// The engine key of the cluster
	#[serde(default = "default_engine")]
	pub engine: String,
	/// The username to create
	#[serde(default = "default_username")]
	pub username: String,
}

impl Default for CreateUserRequest {
	fn default() -> Self {
		Self {
			do_token: String::new(),
			db_id: String::new(),
			db_name: String::new(),
			engine: default_engine(),
			username: default_username(),
		}
	}
}

fn default_engine() -> String {
	constants::DEFAULT_ENGINE_KEY.to_string()
}

fn default_username() -> String {
	constants::DEFAULT_MONITORING_USERNAME.to_string()
}

/// The credentials of the monitoring user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserResponse {
	/// The username of the monitoring user
	pub username: String,
	/// The password DigitalOcean generated for it
	pub password: String,
}
