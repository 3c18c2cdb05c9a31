use models::api::{MonitoredInstance, PostSetupInstructions};

use crate::prelude::*;

/// MongoDB, known but not supported yet
mod mongodb;
/// MySQL, read through the performance schema
mod mysql;
/// PostgreSQL, read through `pg_stat_statements`
mod postgresql;

/// Builds the complete `pmm-admin add` invocation for a managed database of
/// the given engine. Fails for engines that cannot be added.
pub fn build_add_command(
	engine: DatabaseEngine,
	invocation: &[String],
	server_url: &str,
	instance: &MonitoredInstance,
) -> Result<Vec<String>, ErrorType> {
	match engine {
		DatabaseEngine::PostgreSql => Ok(postgresql::build_add_command(
			invocation, server_url, instance,
		)),
		DatabaseEngine::MySql => Ok(mysql::build_add_command(invocation, server_url, instance)),
		DatabaseEngine::MongoDb => mongodb::build_add_command(invocation, server_url, instance),
	}
}

/// What the operator has to know, or do, once the database is in PMM
pub fn post_add_instructions(
	engine: DatabaseEngine,
	instance: &MonitoredInstance,
) -> PostSetupInstructions {
	match engine {
		DatabaseEngine::PostgreSql => postgresql::post_add_instructions(instance),
		DatabaseEngine::MySql => mysql::post_add_instructions(instance),
		DatabaseEngine::MongoDb => mongodb::post_add_instructions(instance),
	}
}

/// The part of `pmm-admin add` every engine shares: credentials, address and
/// service name
fn connection_args(
	invocation: &[String],
	service_type: &str,
	instance: &MonitoredInstance,
) -> Vec<String> {
	let mut command = invocation.to_vec();
	command.extend([
		"add".to_string(),
		service_type.to_string(),
		format!("--username={}", instance.username),
		format!("--password={}", instance.password),
		format!("--host={}", instance.host),
		format!("--port={}", instance.port),
		format!("--service-name={}", instance.name),
	]);
	command
}

/// Managed databases are reached over TLS with certificates PMM cannot verify,
/// and the PMM server itself uses a self-signed one
fn tls_args(server_url: &str, query_source: &str) -> [String; 5] {
	[
		"--tls".to_string(),
		"--tls-skip-verify".to_string(),
		format!("--server-url={server_url}"),
		"--server-insecure-tls".to_string(),
		format!("--query-source={query_source}"),
	]
}

fn node_metrics_note(engine: DatabaseEngine) -> String {
	format!(
		"Node Summary metrics (CPU, RAM, disk) are not available for DigitalOcean Managed {} \
		 because node_exporter cannot be installed on the managed host. Database metrics and \
		 query analytics will still be collected.",
		engine.display_name()
	)
}
