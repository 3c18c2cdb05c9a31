use std::time::Duration;

use super::{server_url::redact, CommandRunner};
use crate::{
	prelude::*,
	utils::constants::{NOT_SET_UP_MARKERS, PMM_NODE_ADDRESS, PMM_NODE_NAME, PMM_NODE_TYPE},
};

/// The state of the local `pmm-agent`, as read from `pmm-admin status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
	/// Registered with a PMM server and connected to it
	Connected,
	/// Never configured
	NotSetUp,
	/// Anything else. Nothing is done automatically from here
	Unknown,
}

impl AgentState {
	pub fn classify(status_output: &str) -> Self {
		let output = status_output.to_lowercase();
		if output.contains("connected") && output.contains("true") {
			Self::Connected
		} else if NOT_SET_UP_MARKERS
			.iter()
			.any(|marker| output.contains(marker))
		{
			Self::NotSetUp
		} else {
			Self::Unknown
		}
	}
}

/// Makes sure the local agent is connected to the PMM server, configuring it
/// against `server_url` when it was never set up. Returns the output of the
/// calls that got it there.
#[instrument(skip(runner, invocation, server_url, password))]
pub async fn ensure_connected(
	runner: &dyn CommandRunner,
	invocation: &[String],
	server_url: &str,
	password: &str,
	timeout: Option<Duration>,
) -> Result<String, ErrorType> {
	if password.is_empty() {
		return Err(ErrorType::invalid_input("PMM admin password is required."));
	}

	let status_command = with_args(invocation, ["status"]);

	let status = runner.run(&status_command, timeout).await?;
	match AgentState::classify(&status.output) {
		AgentState::Connected => {
			debug!("pmm-agent is already connected");
			Ok(status.output)
		}
		AgentState::Unknown => {
			warn!("pmm-agent is in an unexpected state");
			Err(ErrorType::ToolingFailed {
				message: "pmm-agent is in an unexpected state".to_string(),
				output: status.output,
			})
		}
		AgentState::NotSetUp => {
			let server_url = server_url.trim_end_matches('/');
			info!("pmm-agent is not set up, configuring it against {}", redact(server_url));

			let server_url_flag = format!("--server-url={server_url}");
			let configure = runner
				.run(
					&with_args(
						invocation,
						[
							"config",
							"--server-insecure-tls",
							server_url_flag.as_str(),
							PMM_NODE_ADDRESS,
							PMM_NODE_TYPE,
							PMM_NODE_NAME,
						],
					),
					timeout,
				)
				.await?;
			let status = runner.run(&status_command, timeout).await?;
			let output = format!("{}\n{}", configure.output, status.output);

			if AgentState::classify(&status.output) == AgentState::Connected {
				info!("pmm-agent configured and connected");
				Ok(output)
			} else {
				error!(
					"pmm-agent configured but still not connected (config exited with {})",
					configure.exit_label()
				);
				Err(ErrorType::ToolingFailed {
					message: "pmm-agent configured but still not connected".to_string(),
					output,
				})
			}
		}
	}
}

pub(super) fn with_args<'a>(
	invocation: &[String],
	args: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
	invocation
		.iter()
		.cloned()
		.chain(args.into_iter().map(str::to_string))
		.collect()
}
