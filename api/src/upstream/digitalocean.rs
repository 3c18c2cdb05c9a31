use serde::{Deserialize, Serialize};

// Response bodies. Only the fields this panel reads are declared.

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountHolder {
	pub account: Account,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Account {
	#[serde(default)]
	pub uuid: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseList {
	// `null` when the account has no clusters
	#[serde(default)]
	pub databases: Option<Vec<DatabaseCluster>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseCluster {
	pub id: String,
	pub name: String,
	// Enum: "pg" "mysql" "redis" "mongodb" "kafka" "opensearch"
	pub engine: String,
	#[serde(default)]
	pub region: String,
	#[serde(default)]
	pub num_nodes: Option<u32>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub connection: Option<DatabaseConnection>,
	#[serde(default)]
	pub private_connection: Option<DatabaseConnection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConnection {
	#[serde(default)]
	pub host: String,
	#[serde(default)]
	pub port: Option<u16>,
}

// Request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateDatabaseUser {
	pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseUserHolder {
	pub user: DatabaseUser,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseUser {
	pub name: String,
	// Only revealed for users that have one DigitalOcean can show
	#[serde(default)]
	pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub message: String,
}
