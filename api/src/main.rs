#![forbid(unsafe_code)]

//! The pmm-connect server. Lists the managed databases of a DigitalOcean
//! account, creates monitoring users on them and registers them with the PMM
//! server running next to it through the local `pmm-admin`.

use tokio::net::TcpListener;
use tracing::{Dispatch, Level};
use tracing_subscriber::{
	filter::{LevelFilter, Targets},
	fmt::{format::FmtSpan, Layer as FmtLayer},
	layer::SubscriberExt,
	prelude::*,
};

/// The shared state of the server and the router built on top of it
mod app;
/// The HTTP clients of the DigitalOcean and PMM APIs
mod client;
/// How each database engine is added to PMM
mod engine;
/// Drives the local `pmm-admin` CLI
mod pmm_admin;
/// The HTTP endpoints
mod routes;
/// The operations behind every endpoint
mod service;
/// The request and response bodies of the APIs this server calls
mod upstream;
/// Configuration, constants and extractors
mod utils;

/// The prelude module contains all the commonly used types and traits that are
/// used across the crate. This is mostly used to avoid having to import a lot
/// of things from different modules.
pub mod prelude {
	pub use models::prelude::*;
	pub use tracing::{debug, error, info, instrument, trace, warn};

	pub use crate::{
		app::AppState,
		utils::{config::*, constants},
	};
}

use prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = utils::config::parse_config()?;

	tracing::dispatcher::set_global_default(Dispatch::new(
		tracing_subscriber::registry().with(
			FmtLayer::new()
				.with_span_events(FmtSpan::NONE)
				.event_format(
					tracing_subscriber::fmt::format()
						.with_ansi(true)
						.with_file(false)
						.without_time()
						.compact(),
				)
				.with_filter(
					Targets::new()
						.with_target(env!("CARGO_PKG_NAME").replace('-', "_"), LevelFilter::TRACE)
						.with_target("models", LevelFilter::TRACE)
						.with_target("tower_http", LevelFilter::DEBUG),
				)
				.with_filter(LevelFilter::from_level(
					if config.environment == RunningEnvironment::Development {
						Level::TRACE
					} else {
						Level::DEBUG
					},
				)),
		),
	))?;
	info!("Configuration read. Running environment set to {}", config.environment);

	let bind_addr = config.bind_addr;
	let state = AppState::from_config(config)?;
	let app = app::setup_app(state);

	let listener = TcpListener::bind(bind_addr).await?;
	info!("Listening for connections on {bind_addr}");
	axum::serve(listener, app).await?;

	Ok(())
}
