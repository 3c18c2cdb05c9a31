use serde::{Deserialize, Serialize};

/// The endpoint to create a monitoring user on a managed database
mod create_user;
/// The endpoint to list the managed databases of an account
mod list_databases;

pub use self::{create_user::*, list_databases::*};

/// One way of connecting to a managed database
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseEndpoint {
	/// The hostname of the endpoint
	pub host: String,
	/// The port of the endpoint
	pub port: u16,
}

impl DatabaseEndpoint {
	/// The `host:port` key PMM services are matched against
	pub fn address_key(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

/// A DigitalOcean managed database, as shown to the operator. Rebuilt on every
/// list request and cross-referenced against the services already registered
/// on PMM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagedDatabase {
	/// The DigitalOcean ID of the cluster
	pub id: String,
	/// The name of the cluster
	pub name: String,
	/// The DigitalOcean engine tag (`pg`, `mysql`, `mongodb`)
	pub engine: String,
	/// The region slug the cluster runs in
	pub region: String,
	/// The host of the selected endpoint
	pub host: String,
	/// The port of the selected endpoint
	pub port: u16,
	/// The number of nodes in the cluster
	pub num_nodes: u32,
	/// The lifecycle status reported by DigitalOcean
	pub status: String,
	/// Whether a PMM service already points at the selected endpoint
	pub monitored: bool,
	/// The name of that PMM service, empty when not monitored
	pub pmm_service_name: String,
	/// The public endpoint of the cluster
	pub public_connection: DatabaseEndpoint,
	/// The VPC endpoint of the cluster, if it has one
	pub private_connection: Option<DatabaseEndpoint>,
}
