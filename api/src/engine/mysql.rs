use models::api::{MonitoredInstance, PostSetupInstructions};

use super::{connection_args, node_metrics_note, tls_args};
use crate::prelude::*;

pub(super) fn build_add_command(
	invocation: &[String],
	server_url: &str,
	instance: &MonitoredInstance,
) -> Vec<String> {
	let mut command = connection_args(invocation, "mysql", instance);
	command.extend(tls_args(server_url, "perfschema"));
	command
}

pub(super) fn post_add_instructions(instance: &MonitoredInstance) -> PostSetupInstructions {
	PostSetupInstructions {
		summary: format!(
			"No manual step is required: '{}' was created through the DigitalOcean API and \
			 already holds the grants PMM needs.",
			instance.username
		),
		commands: vec![],
		notes: vec![node_metrics_note(DatabaseEngine::MySql)],
	}
}
