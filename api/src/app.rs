use std::sync::Arc;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use typed_builder::TypedBuilder;

use crate::{
	client::{DigitalOceanApi, DigitalOceanClient, PmmApi, PmmClient},
	pmm_admin::{PmmAdmin, SystemCommandRunner},
	prelude::*,
	routes,
};

/// Everything a request needs, shared by every handler. Cloning is cheap.
#[derive(Clone, TypedBuilder)]
pub struct AppState {
	/// The configuration the server was started with
	pub config: Arc<AppConfig>,
	/// The DigitalOcean API
	pub digitalocean: Arc<dyn DigitalOceanApi>,
	/// The HTTP API of the PMM server
	pub pmm: Arc<dyn PmmApi>,
	/// The `pmm-admin` CLI next to this process
	pub pmm_admin: Arc<PmmAdmin>,
}

impl AppState {
	/// Creates the real clients for the given configuration
	#[instrument(skip(config))]
	pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
		let digitalocean =
			DigitalOceanClient::new(&config.digitalocean_api_base, config.http_timeout())?;
		let pmm = PmmClient::new(&config.pmm_base_url, config.http_timeout())?;
		let pmm_admin = PmmAdmin::from_config(&config, Arc::new(SystemCommandRunner));
		debug!("Clients created");

		Ok(Self {
			config: Arc::new(config),
			digitalocean: Arc::new(digitalocean),
			pmm: Arc::new(pmm),
			pmm_admin: Arc::new(pmm_admin),
		})
	}
}

/// The full application: the API routes, request tracing and, when
/// configured, the static front-end for everything else
pub fn setup_app(state: AppState) -> Router {
	let frontend_dir = state.config.frontend_dir.clone();
	let router = match frontend_dir {
		Some(directory) => {
			debug!("Serving static files from {}", directory.display());
			routes::setup_routes(state).fallback_service(ServeDir::new(directory))
		}
		None => routes::setup_routes(state),
	};

	router.layer(TraceLayer::new_for_http())
}
