use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS};

use crate::{
	prelude::*,
	upstream::{
		digitalocean::{Account, DatabaseCluster, DatabaseUser},
		pmm::ServiceList,
	},
};

/// The DigitalOcean REST API client
mod digitalocean;
/// In-memory stand-ins for both APIs
#[cfg(test)]
pub(crate) mod fakes;
/// The PMM management API client
mod pmm;

pub use self::{digitalocean::*, pmm::*};

/// Characters that must be escaped inside a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// The result of asking DigitalOcean to create a database user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
	/// The user was created, with the password DigitalOcean generated
	Created(DatabaseUser),
	/// DigitalOcean answered with a `409`, a user with that name exists
	AlreadyExists,
}

/// The calls this panel makes against the DigitalOcean API. Every method
/// authenticates with the given token, which is never stored.
#[async_trait]
pub trait DigitalOceanApi: Send + Sync {
	/// `GET /account`
	async fn get_account(&self, token: &str) -> Result<Account, ErrorType>;

	/// `GET /databases`
	async fn list_databases(&self, token: &str) -> Result<Vec<DatabaseCluster>, ErrorType>;

	/// `POST /databases/{id}/users`
	async fn create_user(
		&self,
		token: &str,
		database_id: &str,
		username: &str,
	) -> Result<CreateUserOutcome, ErrorType>;

	/// `GET /databases/{id}/users/{username}`
	async fn get_user(
		&self,
		token: &str,
		database_id: &str,
		username: &str,
	) -> Result<DatabaseUser, ErrorType>;
}

/// The calls this panel makes against the PMM server HTTP API
#[async_trait]
pub trait PmmApi: Send + Sync {
	/// The base URL the server is reached at, without a trailing slash
	fn base_url(&self) -> &str;

	/// `GET /v1/management/services`, authenticated as `admin`
	async fn list_services(&self, password: &str) -> Result<ServiceList, ErrorType>;
}
