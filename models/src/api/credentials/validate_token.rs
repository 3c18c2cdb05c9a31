use serde::{Deserialize, Serialize};

/// Checks a DigitalOcean API token by fetching the account it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateTokenRequest {
	/// The DigitalOcean API token to check
	#[serde(default)]
	pub do_token: String,
}

/// The token is valid. Nothing else is returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateTokenResponse {}
