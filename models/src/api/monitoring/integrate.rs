use serde::{Deserialize, Serialize};

use super::{MonitoredInstance, PostSetupInstructions};
use crate::utils::constants;

/// Registers a managed database as a PMM service, configuring the local PMM
/// client first if it is not connected yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrateRequest {
	/// The PMM admin password
	#[serde(default)]
	pub pmm_password: String,
	/// The engine key of the database
	#[serde(default = "default_engine")]
	pub engine: String,
	/// The database to register
	#[serde(default)]
	pub instance: MonitoredInstance,
}

fn default_engine() -> String {
	constants::DEFAULT_ENGINE_KEY.to_string()
}

/// The outcome of running `pmm-admin add`. Failures of the tool itself are
/// reported here with `ok: false` rather than through an error status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrateResponse {
	/// Whether the service was added
	pub ok: bool,
	/// A summary of the failure, empty on success
	pub message: String,
	/// The combined output of the `pmm-admin` invocations
	pub output: String,
	/// What the operator still has to do for this engine
	pub post_steps: PostSetupInstructions,
}
