use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::DatabaseEngine;

/// An engine as listed to the front-end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineInfo {
	/// The engine key, which is also its DigitalOcean tag
	pub id: DatabaseEngine,
	/// The name shown to humans
	pub name: String,
	/// Whether the engine can be added to PMM
	pub supported: bool,
}

impl From<DatabaseEngine> for EngineInfo {
	fn from(engine: DatabaseEngine) -> Self {
		Self {
			id: engine,
			name: engine.display_name().to_string(),
			supported: engine.is_supported(),
		}
	}
}

/// Every engine the control panel knows, each listed once
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEnginesResponse {
	/// The engines, in a fixed order
	pub engines: Vec<EngineInfo>,
}

impl ListEnginesResponse {
	/// The static list of engines
	pub fn all() -> Self {
		Self {
			engines: DatabaseEngine::iter().map(EngineInfo::from).collect(),
		}
	}
}
