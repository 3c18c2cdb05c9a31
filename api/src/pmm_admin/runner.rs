use std::{io, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{process::Command, time};

use crate::prelude::*;

/// What a finished invocation left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
	/// The exit code, `None` when the process was killed by a signal
	pub code: Option<i32>,
	/// stdout followed by stderr
	pub output: String,
}

impl CommandOutput {
	pub fn success(&self) -> bool {
		self.code == Some(0)
	}

	/// The exit code as shown to the operator
	pub fn exit_label(&self) -> String {
		self.code
			.map(|code| code.to_string())
			.unwrap_or_else(|| "signal".to_string())
	}
}

/// Runs external programs. The first element of `command` is the program,
/// the rest are its arguments.
#[async_trait]
pub trait CommandRunner: Send + Sync {
	async fn run(
		&self,
		command: &[String],
		timeout: Option<Duration>,
	) -> Result<CommandOutput, ErrorType>;
}

/// Spawns real processes with [`tokio::process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
	async fn run(
		&self,
		command: &[String],
		timeout: Option<Duration>,
	) -> Result<CommandOutput, ErrorType> {
		let Some((program, args)) = command.split_first() else {
			return Err(ErrorType::ToolingUnavailable(
				"No command given to run".to_string(),
			));
		};

		trace!("Running `{program}` with {} arguments", args.len());
		let running = Command::new(program)
			.args(args)
			.stdin(Stdio::null())
			.kill_on_drop(true)
			.output();

		let result = match timeout {
			Some(timeout) => match time::timeout(timeout, running).await {
				Ok(result) => result,
				Err(_) => {
					warn!("`{program}` did not finish within {timeout:?}, killing it");
					return Err(ErrorType::ToolingFailed {
						message: format!("{program} timed out after {}s", timeout.as_secs()),
						output: String::new(),
					});
				}
			},
			None => running.await,
		};

		let output = result.map_err(|error| {
			error!("Unable to spawn `{program}`: {error}");
			if error.kind() == io::ErrorKind::NotFound {
				ErrorType::ToolingUnavailable(format!(
					"{program} not found. Install the PMM client or set PMM_ADMIN_CMD."
				))
			} else {
				ErrorType::ToolingFailed {
					message: format!("Unable to run {program}: {error}"),
					output: String::new(),
				}
			}
		})?;

		let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
		combined.push_str(&String::from_utf8_lossy(&output.stderr));

		Ok(CommandOutput {
			code: output.status.code(),
			output: combined,
		})
	}
}
