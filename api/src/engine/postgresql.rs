use models::api::{MonitoredInstance, PostSetupInstructions};

use super::{connection_args, node_metrics_note, tls_args};
use crate::prelude::*;

/// The database every DigitalOcean PostgreSQL cluster is created with
const DEFAULT_DATABASE: &str = "defaultdb";
/// The admin user DigitalOcean creates on every cluster
const ADMIN_USER: &str = "doadmin";

pub(super) fn build_add_command(
	invocation: &[String],
	server_url: &str,
	instance: &MonitoredInstance,
) -> Vec<String> {
	let mut command = connection_args(invocation, "postgresql", instance);
	// Connect through the default database, with auto-discovery of the others off
	command.push(format!("--database={DEFAULT_DATABASE}"));
	command.push("--auto-discovery-limit=-1".to_string());
	command.extend(tls_args(server_url, "pgstatements"));
	command
}

pub(super) fn post_add_instructions(instance: &MonitoredInstance) -> PostSetupInstructions {
	let MonitoredInstance {
		host,
		port,
		username,
		..
	} = instance;

	PostSetupInstructions {
		summary: "Run the following on the PMM server to enable query analytics:".to_string(),
		commands: vec![
			"apt install -y postgresql-client".to_string(),
			format!(
				"psql \"host={host} port={port} dbname={DEFAULT_DATABASE} user={ADMIN_USER} \
				 sslmode=require\" -c \"CREATE EXTENSION IF NOT EXISTS pg_stat_statements; GRANT \
				 SELECT ON pg_stat_statements TO {username}; GRANT pg_read_all_stats TO {username};\""
			),
		],
		notes: vec![node_metrics_note(DatabaseEngine::PostgreSql)],
	}
}
