/// The configuration of the application
pub mod config;
/// Extractors shared by the route handlers
pub mod extractors;

/// All the constants used by the API.
pub mod constants {
	/// The user PMM's HTTP API and server URL authenticate as
	pub const PMM_ADMIN_USERNAME: &str = "admin";
	/// The path the registered services are listed at
	pub const PMM_SERVICES_PATH: &str = "/v1/management/services";
	/// The binary looked up on `PATH` when no invocation is configured
	pub const PMM_ADMIN_BINARY: &str = "pmm-admin";

	/// The node address the local agent registers itself with
	pub const PMM_NODE_ADDRESS: &str = "127.0.0.1";
	/// The node type the local agent registers itself as
	pub const PMM_NODE_TYPE: &str = "generic";
	/// The node name the local agent registers itself with
	pub const PMM_NODE_NAME: &str = "pmm3";

	/// Lowercased fragments of `pmm-admin status` output meaning the agent was
	/// never configured
	pub const NOT_SET_UP_MARKERS: [&str; 5] = [
		"not set up",
		"not setup",
		"is not configured",
		"'pmm-admin config'",
		"\"pmm-admin config\"",
	];
}
