use serde::{Deserialize, Serialize};

use crate::utils::string_or_number;

/// The endpoint to add a managed database to PMM
mod integrate;
/// The endpoint to remove a service from PMM
mod remove;

pub use self::{integrate::*, remove::*};

/// The connection details PMM registers a managed database with
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitoredInstance {
	/// The PMM service name to register the database under
	#[serde(default)]
	pub name: String,
	/// The host PMM connects to
	#[serde(default)]
	pub host: String,
	/// The port PMM connects to. Accepted as a string or a number
	#[serde(default, deserialize_with = "string_or_number")]
	pub port: String,
	/// The monitoring username
	#[serde(default)]
	pub username: String,
	/// The monitoring password
	#[serde(default)]
	pub password: String,
}

impl MonitoredInstance {
	/// The names of the required fields that are empty, in declaration order
	pub fn missing_fields(&self) -> Vec<&'static str> {
		[
			("name", &self.name),
			("host", &self.host),
			("port", &self.port),
			("username", &self.username),
			("password", &self.password),
		]
		.into_iter()
		.filter(|(_, value)| value.trim().is_empty())
		.map(|(field, _)| field)
		.collect()
	}
}

/// What the operator still has to do, or know, after a database was added to
/// PMM
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostSetupInstructions {
	/// One line describing what the commands below are for, if anything
	pub summary: String,
	/// Shell commands to run on the PMM server, in order. Empty when nothing
	/// needs to be run
	pub commands: Vec<String>,
	/// Limitations and remarks the operator should be aware of
	pub notes: Vec<String>,
}
