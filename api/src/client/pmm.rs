use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::PmmApi;
use crate::{
	prelude::*,
	upstream::pmm::ServiceList,
	utils::constants::{PMM_ADMIN_USERNAME, PMM_SERVICES_PATH},
};

/// Talks to the PMM server over HTTPS as the `admin` user. PMM ships with a
/// self-signed certificate, so certificates are not verified.
#[derive(Debug, Clone)]
pub struct PmmClient {
	client: Client,
	base_url: String,
}

impl PmmClient {
	/// Creates a client for the PMM server at `base_url`. Every request is
	/// bounded by `timeout`.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
		Ok(Self {
			client: Client::builder()
				.timeout(timeout)
				.danger_accept_invalid_certs(true)
				.build()?,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	fn unreachable(&self, detail: impl std::fmt::Display) -> ErrorType {
		ErrorType::UpstreamUnreachable(format!(
			"Cannot reach PMM server at {}: {detail}",
			self.base_url
		))
	}
}

#[async_trait]
impl PmmApi for PmmClient {
	fn base_url(&self) -> &str {
		&self.base_url
	}

	#[instrument(skip_all)]
	async fn list_services(&self, password: &str) -> Result<ServiceList, ErrorType> {
		let response = self
			.client
			.get(format!("{}{PMM_SERVICES_PATH}", self.base_url))
			.basic_auth(PMM_ADMIN_USERNAME, Some(password))
			.send()
			.await
			.map_err(|error| {
				warn!("PMM request failed: {error}");
				self.unreachable(error)
			})?;

		match response.status() {
			StatusCode::UNAUTHORIZED => Err(ErrorType::AuthenticationFailed(
				"Invalid PMM admin password.".into(),
			)),
			status if !status.is_success() => {
				debug!("PMM rejected the service list request with {status}");
				Err(self.unreachable(format!("unexpected status {status}")))
			}
			_ => response
				.json::<ServiceList>()
				.await
				.map_err(|error| self.unreachable(error)),
		}
	}
}

#[cfg(test)]
mod test {
	use std::time::Duration;

	use axum::{
		http::{HeaderMap, StatusCode},
		routing::get,
		Json,
		Router,
	};
	use pretty_assertions::assert_eq;
	use serde_json::json;
	use tokio::net::TcpListener;

	use super::PmmClient;
	use crate::{client::PmmApi, prelude::*};

	// "admin:secret"
	const GOOD_CREDENTIALS: &str = "Basic YWRtaW46c2VjcmV0";

	async fn serve(status: StatusCode) -> PmmClient {
		let router = Router::new().route(
			"/v1/management/services",
			get(move |headers: HeaderMap| async move {
				let authorized = headers
					.get("authorization")
					.and_then(|value| value.to_str().ok()) ==
					Some(GOOD_CREDENTIALS);
				if !authorized {
					return (StatusCode::UNAUTHORIZED, Json(json!({})));
				}
				(
					status,
					Json(json!({
						"postgresql": [
							{ "service_name": "billing", "address": "pg.db.ondigitalocean.com", "port": 25060 }
						]
					})),
				)
			}),
		);
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let address = listener.local_addr().unwrap();
		tokio::spawn(async move { axum::serve(listener, router).await });

		PmmClient::new(&format!("http://{address}/"), Duration::from_secs(5)).unwrap()
	}

	#[tokio::test]
	async fn services_are_listed_with_basic_auth() {
		let client = serve(StatusCode::OK).await;

		let services = client.list_services("secret").await.unwrap();

		assert_eq!(
			services.address_lookup()["pg.db.ondigitalocean.com:25060"],
			"billing"
		);
	}

	#[tokio::test]
	async fn wrong_password_is_an_authentication_failure() {
		let client = serve(StatusCode::OK).await;

		assert_eq!(
			client.list_services("wrong").await.unwrap_err(),
			ErrorType::AuthenticationFailed("Invalid PMM admin password.".into())
		);
	}

	#[tokio::test]
	async fn server_errors_are_reported_as_unreachable() {
		let client = serve(StatusCode::SERVICE_UNAVAILABLE).await;

		match client.list_services("secret").await.unwrap_err() {
			ErrorType::UpstreamUnreachable(message) => {
				assert!(message.starts_with(&format!("Cannot reach PMM server at {}", client.base_url())))
			}
			other => panic!("unexpected error {other:?}"),
		}
	}
}
