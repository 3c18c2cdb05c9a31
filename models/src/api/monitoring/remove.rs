use serde::{Deserialize, Serialize};

/// Deregisters a service from PMM.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveRequest {
	/// The PMM admin password
	#[serde(default)]
	pub pmm_password: String,
	/// The PMM service name to remove
	#[serde(default)]
	pub service_name: String,
	/// The engine key of the service
	#[serde(default)]
	pub engine: String,
}

/// The outcome of running `pmm-admin remove`. Failures of the tool itself are
/// reported here with `ok: false` rather than through an error status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveResponse {
	/// Whether the service was removed
	pub ok: bool,
	/// A summary of the failure, empty on success
	pub message: String,
	/// The output of `pmm-admin remove`
	pub output: String,
}
