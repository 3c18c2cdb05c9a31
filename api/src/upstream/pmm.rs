use std::collections::HashMap;

use models::utils::value_as_plain_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The keys of the service list response that can hold services. Each engine
/// has its own list, and some PMM versions return everything under `services`.
pub const SERVICE_CATEGORIES: [&str; 7] = [
	"postgresql",
	"mysql",
	"mongodb",
	"proxysql",
	"haproxy",
	"external",
	"services",
];

/// The response of `GET /v1/management/services`. Kept loosely typed, since the
/// shape differs between PMM versions.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ServiceList(pub Map<String, Value>);

impl ServiceList {
	/// Maps `"<address>:<port>"` to the service name, across every category.
	/// Entries without an address are skipped.
	pub fn address_lookup(&self) -> HashMap<String, String> {
		SERVICE_CATEGORIES
			.iter()
			.filter_map(|category| self.0.get(*category))
			.filter_map(Value::as_array)
			.flatten()
			.filter_map(Value::as_object)
			.filter_map(|service| {
				let address = service.get("address").map(value_as_plain_text)?;
				if address.is_empty() {
					return None;
				}
				let port = service
					.get("port")
					.map(value_as_plain_text)
					.unwrap_or_default();
				let name = service
					.get("service_name")
					.map(value_as_plain_text)
					.unwrap_or_default();
				Some((format!("{address}:{port}"), name))
			})
			.collect()
	}
}
