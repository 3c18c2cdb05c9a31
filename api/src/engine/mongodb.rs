use models::api::{MonitoredInstance, PostSetupInstructions};

use super::node_metrics_note;
use crate::prelude::*;

const NOT_SUPPORTED: &str = "MongoDB integration is not yet supported.";

pub(super) fn build_add_command(
	_: &[String],
	_: &str,
	_: &MonitoredInstance,
) -> Result<Vec<String>, ErrorType> {
	Err(ErrorType::NotSupported(NOT_SUPPORTED.to_string()))
}

pub(super) fn post_add_instructions(_: &MonitoredInstance) -> PostSetupInstructions {
	PostSetupInstructions {
		summary: format!("{NOT_SUPPORTED} Stay tuned for future updates."),
		commands: vec![],
		notes: vec![node_metrics_note(DatabaseEngine::MongoDb)],
	}
}
