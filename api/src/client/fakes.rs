use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use super::{CreateUserOutcome, DigitalOceanApi, PmmApi};
use crate::{
	pmm_admin::{CommandRunner, PmmAdmin},
	prelude::*,
	upstream::{
		digitalocean::{Account, DatabaseCluster, DatabaseConnection, DatabaseUser},
		pmm::ServiceList,
	},
	utils::config,
};

pub const GOOD_TOKEN: &str = "dop_v1_good";
pub const PMM_PASSWORD: &str = "pmm-secret";
pub const PMM_BASE_URL: &str = "https://127.0.0.1:443";

/// An account with a fixed set of clusters, accepting only [`GOOD_TOKEN`]
#[derive(Default)]
pub struct FakeDigitalOcean {
	pub databases: Vec<DatabaseCluster>,
	/// A user that already exists on every cluster
	pub existing_user: Option<DatabaseUser>,
	/// Makes user creation fail with this status
	pub reject_create: Option<StatusCode>,
}

impl FakeDigitalOcean {
	fn authenticate(&self, token: &str) -> Result<(), ErrorType> {
		if token == GOOD_TOKEN {
			Ok(())
		} else {
			Err(ErrorType::AuthenticationFailed(
				"Invalid DigitalOcean API token.".into(),
			))
		}
	}
}

#[async_trait]
impl DigitalOceanApi for FakeDigitalOcean {
	async fn get_account(&self, token: &str) -> Result<Account, ErrorType> {
		self.authenticate(token)?;
		Ok(Account {
			uuid: "account-1".into(),
			email: "ops@example.com".into(),
			status: "active".into(),
		})
	}

	async fn list_databases(&self, token: &str) -> Result<Vec<DatabaseCluster>, ErrorType> {
		self.authenticate(token)?;
		Ok(self.databases.clone())
	}

	async fn create_user(
		&self,
		token: &str,
		_: &str,
		username: &str,
	) -> Result<CreateUserOutcome, ErrorType> {
		self.authenticate(token)?;
		if let Some(status) = self.reject_create {
			return Err(ErrorType::UpstreamRejected {
				status,
				message: "rejected".into(),
			});
		}
		if self
			.existing_user
			.as_ref()
			.is_some_and(|user| user.name == username)
		{
			return Ok(CreateUserOutcome::AlreadyExists);
		}
		Ok(CreateUserOutcome::Created(DatabaseUser {
			name: username.to_string(),
			password: "generated-password".into(),
		}))
	}

	async fn get_user(
		&self,
		token: &str,
		_: &str,
		username: &str,
	) -> Result<DatabaseUser, ErrorType> {
		self.authenticate(token)?;
		self.existing_user
			.clone()
			.filter(|user| user.name == username)
			.ok_or_else(|| ErrorType::UpstreamRejected {
				status: StatusCode::NOT_FOUND,
				message: "not found".into(),
			})
	}
}

/// A PMM server accepting only [`PMM_PASSWORD`]
pub struct FakePmm {
	pub services: Value,
	pub reachable: bool,
}

impl FakePmm {
	pub fn with_services(services: Value) -> Self {
		Self {
			services,
			reachable: true,
		}
	}
}

#[async_trait]
impl PmmApi for FakePmm {
	fn base_url(&self) -> &str {
		PMM_BASE_URL
	}

	async fn list_services(&self, password: &str) -> Result<ServiceList, ErrorType> {
		if !self.reachable {
			return Err(ErrorType::UpstreamUnreachable(format!(
				"Cannot reach PMM server at {PMM_BASE_URL}: connection refused"
			)));
		}
		if password != PMM_PASSWORD {
			return Err(ErrorType::AuthenticationFailed(
				"Invalid PMM admin password.".into(),
			));
		}
		Ok(serde_json::from_value(self.services.clone()).unwrap())
	}
}

pub fn cluster(id: &str, name: &str, engine: &str, host: &str, port: u16) -> DatabaseCluster {
	DatabaseCluster {
		id: id.into(),
		name: name.into(),
		engine: engine.into(),
		region: "nyc3".into(),
		num_nodes: Some(1),
		status: Some("online".into()),
		connection: Some(DatabaseConnection {
			host: host.into(),
			port: Some(port),
		}),
		private_connection: Some(DatabaseConnection {
			host: format!("private-{host}"),
			port: Some(port),
		}),
	}
}

/// An [`AppState`] wired to the given fakes, with `pmm-admin` as the
/// invocation
pub fn state(
	digitalocean: FakeDigitalOcean,
	pmm: FakePmm,
	runner: Arc<dyn CommandRunner>,
) -> AppState {
	let config = config::load(
		"dev",
		vec![
			("pmm_base_url", Some(PMM_BASE_URL.to_string())),
			("pmm_admin_cmd", Some("pmm-admin".to_string())),
		],
	)
	.unwrap();

	AppState::builder()
		.pmm_admin(Arc::new(PmmAdmin::from_config(&config, runner)))
		.config(Arc::new(config))
		.digitalocean(Arc::new(digitalocean))
		.pmm(Arc::new(pmm))
		.build()
}
