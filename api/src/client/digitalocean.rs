use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::utf8_percent_encode;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{CreateUserOutcome, DigitalOceanApi, PATH_SEGMENT};
use crate::{
	prelude::*,
	upstream::digitalocean::{
		Account,
		AccountHolder,
		CreateDatabaseUser,
		DatabaseCluster,
		DatabaseList,
		DatabaseUser,
		DatabaseUserHolder,
		ErrorBody,
	},
};

/// Talks to the DigitalOcean REST API over HTTPS with bearer authentication.
#[derive(Debug, Clone)]
pub struct DigitalOceanClient {
	client: Client,
	base_url: String,
}

impl DigitalOceanClient {
	/// Creates a client for the API at `base_url`. Every request is bounded by
	/// `timeout`.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
		Ok(Self {
			client: Client::builder().timeout(timeout).build()?,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	fn url(&self, segments: &[&str]) -> String {
		segments.iter().fold(self.base_url.clone(), |url, segment| {
			format!("{url}/{}", utf8_percent_encode(segment, PATH_SEGMENT))
		})
	}

	async fn send(&self, request: RequestBuilder, token: &str) -> Result<Response, ErrorType> {
		request.bearer_auth(token).send().await.map_err(|error| {
			warn!("DigitalOcean API request failed: {error}");
			ErrorType::UpstreamUnreachable(format!(
				"Cannot reach DigitalOcean API at {}: {error}",
				self.base_url
			))
		})
	}
}

/// Turns a non-2xx response into the matching error
async fn reject(response: Response) -> ErrorType {
	let status = response.status();
	if status == StatusCode::UNAUTHORIZED {
		return ErrorType::AuthenticationFailed("Invalid DigitalOcean API token.".into());
	}

	let message = response
		.json::<ErrorBody>()
		.await
		.ok()
		.map(|body| body.message)
		.filter(|message| !message.is_empty())
		.unwrap_or_else(|| format!("DigitalOcean API request failed with status {status}"));
	debug!("DigitalOcean API rejected the request with {status}: {message}");

	ErrorType::UpstreamRejected { status, message }
}

async fn parse<T>(response: Response) -> Result<T, ErrorType>
where
	T: DeserializeOwned,
{
	response.json::<T>().await.map_err(|error| {
		warn!("Unable to parse DigitalOcean API response: {error}");
		ErrorType::UpstreamRejected {
			status: StatusCode::BAD_GATEWAY,
			message: format!("Unexpected response from DigitalOcean API: {error}"),
		}
	})
}

#[async_trait]
impl DigitalOceanApi for DigitalOceanClient {
	#[instrument(skip_all)]
	async fn get_account(&self, token: &str) -> Result<Account, ErrorType> {
		let response = self
			.send(self.client.get(self.url(&["account"])), token)
			.await?;
		if !response.status().is_success() {
			return Err(reject(response).await);
		}

		Ok(parse::<AccountHolder>(response).await?.account)
	}

	#[instrument(skip_all)]
	async fn list_databases(&self, token: &str) -> Result<Vec<DatabaseCluster>, ErrorType> {
		let response = self
			.send(self.client.get(self.url(&["databases"])), token)
			.await?;
		if !response.status().is_success() {
			return Err(reject(response).await);
		}

		let databases = parse::<DatabaseList>(response)
			.await?
			.databases
			.unwrap_or_default();
		trace!("DigitalOcean returned {} database clusters", databases.len());

		Ok(databases)
	}

	#[instrument(skip(self, token))]
	async fn create_user(
		&self,
		token: &str,
		database_id: &str,
		username: &str,
	) -> Result<CreateUserOutcome, ErrorType> {
		let response = self
			.send(
				self.client
					.post(self.url(&["databases", database_id, "users"]))
					.json(&CreateDatabaseUser {
						name: username.to_string(),
					}),
				token,
			)
			.await?;

		if response.status() == StatusCode::CONFLICT {
			return Ok(CreateUserOutcome::AlreadyExists);
		}
		if !response.status().is_success() {
			return Err(reject(response).await);
		}

		Ok(CreateUserOutcome::Created(
			parse::<DatabaseUserHolder>(response).await?.user,
		))
	}

	#[instrument(skip(self, token))]
	async fn get_user(
		&self,
		token: &str,
		database_id: &str,
		username: &str,
	) -> Result<DatabaseUser, ErrorType> {
		let response = self
			.send(
				self.client
					.get(self.url(&["databases", database_id, "users", username])),
				token,
			)
			.await?;
		if !response.status().is_success() {
			return Err(reject(response).await);
		}

		Ok(parse::<DatabaseUserHolder>(response).await?.user)
	}
}
