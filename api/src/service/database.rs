use std::collections::HashMap;

use axum::http::StatusCode;
use models::{
	api::{
		CreateUserRequest,
		CreateUserResponse,
		DatabaseEndpoint,
		ListDatabasesRequest,
		ListDatabasesResponse,
		ManagedDatabase,
	},
	utils::constants::DEFAULT_MONITORING_USERNAME,
	ConflictDetails,
	USER_ALREADY_EXISTS,
};

use super::{known_engine, supported_engine};
use crate::{
	client::CreateUserOutcome,
	prelude::*,
	upstream::digitalocean::{DatabaseCluster, DatabaseConnection},
};

/// Lists the clusters of one engine, marking those PMM already monitors.
/// PMM being unavailable never fails the listing, every cluster is then
/// reported as unmonitored.
#[instrument(skip(state, do_token, pmm_password))]
pub async fn list_databases(
	state: &AppState,
	ListDatabasesRequest {
		do_token,
		engine,
		pmm_password,
		use_private,
	}: ListDatabasesRequest,
) -> Result<ListDatabasesResponse, ErrorType> {
	let token = do_token.trim();
	if token.is_empty() {
		return Err(ErrorType::invalid_input(
			"DigitalOcean API token is required.",
		));
	}
	let engine = supported_engine(&engine)?;

	let clusters = state
		.digitalocean
		.list_databases(token)
		.await
		.map_err(|error| match error {
			// The token was accepted when it was validated, so DigitalOcean
			// refusing it now is an upstream failure
			ErrorType::AuthenticationFailed(message) => ErrorType::UpstreamRejected {
				status: StatusCode::BAD_GATEWAY,
				message,
			},
			error => error.into_bad_gateway(),
		})?;

	let monitored = monitored_services(state, &pmm_password).await;

	let databases = clusters
		.into_iter()
		.filter(|cluster| cluster.engine == engine.engine_filter())
		.map(|cluster| describe(cluster, use_private, &monitored))
		.collect::<Vec<_>>();
	debug!("Found {} {} databases", databases.len(), engine.display_name());

	Ok(ListDatabasesResponse { databases })
}

/// The `host:port` of every service PMM has registered, mapped to the
/// service name. Empty when PMM cannot be asked.
async fn monitored_services(state: &AppState, pmm_password: &str) -> HashMap<String, String> {
	if pmm_password.is_empty() {
		return HashMap::new();
	}

	match state.pmm.list_services(pmm_password).await {
		Ok(services) => services.address_lookup(),
		Err(error) => {
			warn!(
				"Unable to list PMM services, reporting every database as unmonitored: {}",
				error.message()
			);
			HashMap::new()
		}
	}
}

fn endpoint(connection: &DatabaseConnection, fallback_port: u16) -> DatabaseEndpoint {
	DatabaseEndpoint {
		host: connection.host.clone(),
		port: connection.port.unwrap_or(fallback_port),
	}
}

fn describe(
	cluster: DatabaseCluster,
	use_private: bool,
	monitored: &HashMap<String, String>,
) -> ManagedDatabase {
	let public_connection = cluster
		.connection
		.as_ref()
		.map(|connection| endpoint(connection, 0))
		.unwrap_or_default();
	let private_connection = cluster
		.private_connection
		.as_ref()
		.filter(|connection| !connection.host.is_empty())
		.map(|connection| endpoint(connection, public_connection.port));

	let selected = match &private_connection {
		Some(private) if use_private => private,
		_ => &public_connection,
	};
	let pmm_service_name = monitored
		.get(&selected.address_key())
		.cloned()
		.unwrap_or_default();

	ManagedDatabase {
		host: selected.host.clone(),
		port: selected.port,
		monitored: !pmm_service_name.is_empty(),
		pmm_service_name,
		num_nodes: cluster.num_nodes.unwrap_or(1),
		status: cluster.status.unwrap_or_else(|| "unknown".to_string()),
		id: cluster.id,
		name: cluster.name,
		engine: cluster.engine,
		region: cluster.region,
		public_connection,
		private_connection,
	}
}

/// Creates the user PMM will connect as. When the user already exists, its
/// password is reused if DigitalOcean reveals it, otherwise this is a
/// conflict the operator has to resolve.
#[instrument(skip(state, do_token))]
pub async fn create_monitoring_user(
	state: &AppState,
	CreateUserRequest {
		do_token,
		db_id,
		db_name,
		engine,
		username,
	}: CreateUserRequest,
) -> Result<CreateUserResponse, ErrorType> {
	let token = do_token.trim();
	if token.is_empty() || db_id.is_empty() {
		return Err(ErrorType::invalid_input("Missing required fields."));
	}
	known_engine(&engine)?;
	let username = if username.trim().is_empty() {
		DEFAULT_MONITORING_USERNAME.to_string()
	} else {
		username
	};

	match state
		.digitalocean
		.create_user(token, &db_id, &username)
		.await?
	{
		CreateUserOutcome::Created(user) => {
			info!("Created monitoring user `{}` on `{db_id}`", user.name);
			Ok(CreateUserResponse {
				username: user.name,
				password: user.password,
			})
		}
		CreateUserOutcome::AlreadyExists => {
			match state.digitalocean.get_user(token, &db_id, &username).await {
				Ok(user) if !user.password.is_empty() => {
					info!("Reusing existing monitoring user `{}` on `{db_id}`", user.name);
					return Ok(CreateUserResponse {
						username: user.name,
						password: user.password,
					});
				}
				Ok(_) => debug!("Existing user `{username}` has no retrievable password"),
				Err(error) => warn!(
					"Unable to fetch existing user `{username}`: {}",
					error.message()
				),
			}

			Err(ErrorType::ResourceConflict(ConflictDetails {
				error_code: USER_ALREADY_EXISTS.to_string(),
				message: format!(
					"User '{username}' already exists but could not retrieve details. Reset the \
					 user password in the DigitalOcean control panel."
				),
				username,
				db_name,
				db_id,
			}))
		}
	}
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use axum::http::StatusCode;
	use models::api::{CreateUserRequest, ListDatabasesRequest};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::{create_monitoring_user, list_databases};
	use crate::{
		client::fakes::{self, cluster, FakeDigitalOcean, FakePmm, GOOD_TOKEN, PMM_PASSWORD},
		pmm_admin::test_runner::ScriptedRunner,
		prelude::*,
		upstream::digitalocean::{DatabaseCluster, DatabaseConnection, DatabaseUser},
	};

	fn account() -> FakeDigitalOcean {
		FakeDigitalOcean {
			databases: vec![
				cluster("pg-1", "billing", "pg", "billing.db.ondigitalocean.com", 25060),
				cluster("pg-2", "reports", "pg", "reports.db.ondigitalocean.com", 25060),
				cluster("my-1", "orders", "mysql", "orders.db.ondigitalocean.com", 25060),
			],
			..Default::default()
		}
	}

	fn services() -> FakePmm {
		FakePmm::with_services(json!({
			"postgresql": [
				{ "service_name": "billing-pmm", "address": "billing.db.ondigitalocean.com", "port": 25060 },
				{ "service_name": "reports-private", "address": "private-reports.db.ondigitalocean.com", "port": "25060" },
			],
		}))
	}

	fn request(engine: &str, use_private: bool) -> ListDatabasesRequest {
		ListDatabasesRequest {
			do_token: GOOD_TOKEN.into(),
			engine: engine.into(),
			pmm_password: PMM_PASSWORD.into(),
			use_private,
		}
	}

	#[tokio::test]
	async fn databases_are_marked_monitored_by_address() {
		let state = fakes::state(account(), services(), Arc::new(ScriptedRunner::default()));

		let databases = list_databases(&state, request("pg", false))
			.await
			.unwrap()
			.databases;

		assert_eq!(databases.len(), 2);
		assert!(databases[0].monitored);
		assert_eq!(databases[0].pmm_service_name, "billing-pmm");
		assert_eq!(databases[0].host, "billing.db.ondigitalocean.com");
		assert!(!databases[1].monitored);
		assert_eq!(databases[1].pmm_service_name, "");
	}

	#[tokio::test]
	async fn private_endpoints_are_matched_when_requested() {
		let state = fakes::state(account(), services(), Arc::new(ScriptedRunner::default()));

		let databases = list_databases(&state, request("pg", true))
			.await
			.unwrap()
			.databases;

		assert_eq!(databases[0].host, "private-billing.db.ondigitalocean.com");
		assert!(!databases[0].monitored);
		assert_eq!(databases[1].pmm_service_name, "reports-private");
	}

	#[tokio::test]
	async fn unusable_private_endpoints_fall_back() {
		let blank_host = cluster("pg-1", "billing", "pg", "billing.db", 25060);
		let mut no_private_port = cluster("pg-2", "reports", "pg", "reports.db", 25060);
		let mut no_private = cluster("pg-3", "audit", "pg", "audit.db", 25060);
		let blank_host = DatabaseCluster {
			private_connection: Some(DatabaseConnection {
				host: String::new(),
				port: Some(25061),
			}),
			..blank_host
		};
		if let Some(private) = no_private_port.private_connection.as_mut() {
			private.port = None;
		}
		no_private.private_connection = None;

		let state = fakes::state(
			FakeDigitalOcean {
				databases: vec![blank_host, no_private_port, no_private],
				..Default::default()
			},
			FakePmm::with_services(json!({
				"postgresql": [
					{ "service_name": "billing-pmm", "address": "billing.db", "port": 25060 },
					{ "service_name": "reports-pmm", "address": "private-reports.db", "port": 25060 },
				],
			})),
			Arc::new(ScriptedRunner::default()),
		);

		let databases = list_databases(&state, request("pg", true))
			.await
			.unwrap()
			.databases;

		assert_eq!(databases[0].host, "billing.db");
		assert_eq!(databases[0].port, 25060);
		assert_eq!(databases[0].private_connection, None);
		assert!(databases[0].monitored);

		assert_eq!(databases[1].host, "private-reports.db");
		assert_eq!(databases[1].port, 25060);
		assert!(databases[1].monitored);
		assert_eq!(databases[1].pmm_service_name, "reports-pmm");

		assert_eq!(databases[2].host, "audit.db");
		assert_eq!(databases[2].port, 25060);
		assert!(!databases[2].monitored);
	}

	#[tokio::test]
	async fn engine_aliases_list_the_same_databases() {
		let state = fakes::state(account(), services(), Arc::new(ScriptedRunner::default()));

		assert_eq!(
			list_databases(&state, request("pg", false)).await.unwrap(),
			list_databases(&state, request("postgresql", false))
				.await
				.unwrap()
		);
	}

	#[tokio::test]
	async fn pmm_failures_only_degrade_the_listing() {
		let state = fakes::state(
			account(),
			FakePmm {
				services: json!({}),
				reachable: false,
			},
			Arc::new(ScriptedRunner::default()),
		);

		let databases = list_databases(&state, request("mysql", false))
			.await
			.unwrap()
			.databases;

		assert_eq!(databases.len(), 1);
		assert!(!databases[0].monitored);

		let mut without_password = request("mysql", false);
		without_password.pmm_password.clear();
		assert_eq!(
			list_databases(&state, without_password).await.unwrap().databases,
			databases
		);
	}

	#[tokio::test]
	async fn listing_rejects_bad_input() {
		let state = fakes::state(account(), services(), Arc::new(ScriptedRunner::default()));

		let mut no_token = request("pg", false);
		no_token.do_token = " ".into();
		assert_eq!(
			list_databases(&state, no_token).await.unwrap_err(),
			ErrorType::invalid_input("DigitalOcean API token is required.")
		);
		assert!(matches!(
			list_databases(&state, request("mongodb", false)).await,
			Err(ErrorType::NotSupported(_))
		));
		assert!(matches!(
			list_databases(&state, request("", false)).await,
			Err(ErrorType::InvalidInput(_))
		));

		let mut bad_token = request("pg", false);
		bad_token.do_token = "dop_v1_bad".into();
		assert_eq!(
			list_databases(&state, bad_token)
				.await
				.unwrap_err()
				.default_status_code(),
			StatusCode::BAD_GATEWAY
		);
	}

	fn user_request(username: &str) -> CreateUserRequest {
		CreateUserRequest {
			do_token: GOOD_TOKEN.into(),
			db_id: "my-1".into(),
			db_name: "orders".into(),
			engine: "mysql".into(),
			username: username.into(),
		}
	}

	#[tokio::test]
	async fn monitoring_user_is_created() {
		let state = fakes::state(account(), services(), Arc::new(ScriptedRunner::default()));

		let user = create_monitoring_user(&state, user_request("")).await.unwrap();

		assert_eq!(user.username, "pmm_monitor");
		assert_eq!(user.password, "generated-password");
	}

	#[tokio::test]
	async fn existing_user_with_a_password_is_reused() {
		let state = fakes::state(
			FakeDigitalOcean {
				existing_user: Some(DatabaseUser {
					name: "pmm_monitor".into(),
					password: "kept-password".into(),
				}),
				..account()
			},
			services(),
			Arc::new(ScriptedRunner::default()),
		);

		let user = create_monitoring_user(&state, user_request("pmm_monitor"))
			.await
			.unwrap();

		assert_eq!(user.password, "kept-password");
	}

	#[tokio::test]
	async fn existing_user_without_a_password_conflicts() {
		let state = fakes::state(
			FakeDigitalOcean {
				existing_user: Some(DatabaseUser {
					name: "pmm_monitor".into(),
					password: String::new(),
				}),
				..account()
			},
			services(),
			Arc::new(ScriptedRunner::default()),
		);

		match create_monitoring_user(&state, user_request("pmm_monitor"))
			.await
			.unwrap_err()
		{
			ErrorType::ResourceConflict(details) => {
				assert_eq!(details.error_code, "userAlreadyExists");
				assert_eq!(details.username, "pmm_monitor");
				assert_eq!(details.db_name, "orders");
				assert_eq!(details.db_id, "my-1");
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[tokio::test]
	async fn other_failures_forward_the_status() {
		let state = fakes::state(
			FakeDigitalOcean {
				reject_create: Some(StatusCode::UNPROCESSABLE_ENTITY),
				..account()
			},
			services(),
			Arc::new(ScriptedRunner::default()),
		);

		assert_eq!(
			create_monitoring_user(&state, user_request("pmm_monitor"))
				.await
				.unwrap_err()
				.default_status_code(),
			StatusCode::UNPROCESSABLE_ENTITY
		);

		let mut missing = user_request("pmm_monitor");
		missing.db_id.clear();
		assert_eq!(
			create_monitoring_user(&state, missing).await.unwrap_err(),
			ErrorType::invalid_input("Missing required fields.")
		);
	}
}
