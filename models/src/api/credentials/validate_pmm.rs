use serde::{Deserialize, Serialize};

/// Checks a PMM admin password by listing the services registered on the PMM
/// server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatePmmRequest {
	/// The password of the PMM `admin` user
	#[serde(default)]
	pub pmm_password: String,
}

/// The password is valid. Nothing else is returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatePmmResponse {}
