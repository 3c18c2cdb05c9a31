use std::str::FromStr;

use crate::prelude::*;

/// Checking the DigitalOcean token and the PMM password
mod credentials;
/// Listing managed databases and creating monitoring users on them
mod database;
/// Adding databases to PMM and removing them
mod monitoring;

pub use self::{credentials::*, database::*, monitoring::*};

/// Resolves an engine key, failing for keys that are unknown and for engines
/// that cannot be used yet
fn supported_engine(key: &str) -> Result<DatabaseEngine, ErrorType> {
	let engine = known_engine(key)?;
	if !engine.is_supported() {
		return Err(ErrorType::NotSupported(format!(
			"{} is not yet supported.",
			engine.display_name()
		)));
	}
	Ok(engine)
}

fn known_engine(key: &str) -> Result<DatabaseEngine, ErrorType> {
	DatabaseEngine::from_str(key.trim())
		.map_err(|_| ErrorType::invalid_input(format!("Unsupported engine: {key}")))
}
