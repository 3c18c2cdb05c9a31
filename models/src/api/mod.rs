use serde::{Deserialize, Serialize};

/// The endpoints that check the DigitalOcean token and the PMM password
mod credentials;
/// The endpoints that list managed databases and create monitoring users
mod database;
/// The endpoint that lists the supported engines
mod engines;
/// The endpoints that add and remove databases from PMM
mod monitoring;

pub use self::{credentials::*, database::*, engines::*, monitoring::*};

/// All the database engines the control panel knows about. Each engine is
/// keyed on the wire by the tag DigitalOcean uses for it.
#[derive(
	Debug,
	Clone,
	Copy,
	Serialize,
	Deserialize,
	PartialEq,
	Eq,
	Hash,
	strum::EnumString,
	strum::Display,
	strum::EnumIter,
)]
pub enum DatabaseEngine {
	/// DigitalOcean Managed PostgreSQL. Also accepted as `postgresql`.
	#[serde(rename = "pg", alias = "postgresql")]
	#[strum(to_string = "pg", serialize = "postgresql")]
	PostgreSql,
	/// DigitalOcean Managed MySQL
	#[serde(rename = "mysql")]
	#[strum(to_string = "mysql")]
	MySql,
	/// DigitalOcean Managed MongoDB. Known, but not supported yet
	#[serde(rename = "mongodb")]
	#[strum(to_string = "mongodb")]
	MongoDb,
}

impl DatabaseEngine {
	/// The engine tag DigitalOcean reports for clusters of this engine
	pub fn engine_filter(&self) -> &'static str {
		match self {
			Self::PostgreSql => "pg",
			Self::MySql => "mysql",
			Self::MongoDb => "mongodb",
		}
	}

	/// The name shown to humans
	pub fn display_name(&self) -> &'static str {
		match self {
			Self::PostgreSql => "PostgreSQL",
			Self::MySql => "MySQL",
			Self::MongoDb => "MongoDB",
		}
	}

	/// Whether the engine can be listed and added to PMM
	pub fn is_supported(&self) -> bool {
		match self {
			Self::PostgreSql | Self::MySql => true,
			Self::MongoDb => false,
		}
	}

	/// The service type `pmm-admin add` and `pmm-admin remove` expect for this
	/// engine, if it can be managed through them
	pub fn pmm_service_type(&self) -> Option<&'static str> {
		match self {
			Self::PostgreSql => Some("postgresql"),
			Self::MySql => Some("mysql"),
			Self::MongoDb => None,
		}
	}
}

#[cfg(test)]
mod test {
	use std::str::FromStr;

	use pretty_assertions::assert_eq;
	use strum::IntoEnumIterator;

	use super::DatabaseEngine;

	#[test]
	fn aliases_resolve_to_the_same_engine() {
		assert_eq!(
			DatabaseEngine::from_str("pg").unwrap(),
			DatabaseEngine::from_str("postgresql").unwrap()
		);
		assert_eq!(
			serde_json::from_str::<DatabaseEngine>("\"postgresql\"").unwrap(),
			DatabaseEngine::PostgreSql
		);
		assert!(DatabaseEngine::from_str("redis").is_err());
	}

	#[test]
	fn engines_are_keyed_by_their_digitalocean_tag() {
		for engine in DatabaseEngine::iter() {
			assert_eq!(engine.to_string(), engine.engine_filter());
			assert_eq!(
				serde_json::to_value(engine).unwrap(),
				serde_json::json!(engine.engine_filter())
			);
		}
	}

	#[test]
	fn only_sql_engines_have_a_service_type() {
		assert_eq!(
			DatabaseEngine::PostgreSql.pmm_service_type(),
			Some("postgresql")
		);
		assert_eq!(DatabaseEngine::MySql.pmm_service_type(), Some("mysql"));
		assert_eq!(DatabaseEngine::MongoDb.pmm_service_type(), None);
		assert!(!DatabaseEngine::MongoDb.is_supported());
	}
}
