use serde::{Deserialize, Serialize};

use super::ManagedDatabase;

/// Lists the managed databases of one engine, marking the ones PMM already
/// monitors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListDatabasesRequest {
	/// The DigitalOcean API token
	#[serde(default)]
	pub do_token: String,
	/// The engine key to filter by (`pg`, `postgresql`, `mysql`, `mongodb`)
	#[serde(default)]
	pub engine: String,
	/// The PMM admin password. When empty, every database is reported as not
	/// monitored
	#[serde(default)]
	pub pmm_password: String,
	/// Prefer the VPC endpoint of each cluster over the public one
	#[serde(default)]
	pub use_private: bool,
}

/// The databases of the requested engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListDatabasesResponse {
	/// The filtered and enriched databases
	pub databases: Vec<ManagedDatabase>,
}
