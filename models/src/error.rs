use std::{
	error::Error as StdError,
	fmt::{Display, Formatter},
};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// The error code attached to a conflict when the monitoring user already
/// exists and its password cannot be retrieved.
pub const USER_ALREADY_EXISTS: &str = "userAlreadyExists";

/// A list of all the possible errors that can be returned by the API. Every
/// failure of an external call is converted into one of these at the boundary
/// nearest to where it happened.
#[derive(Debug)]
pub enum ErrorType {
	/// A required field was missing, empty or malformed
	InvalidInput(String),
	/// The engine is known, but explicitly disabled
	NotSupported(String),
	/// The DigitalOcean token or the PMM password was rejected
	AuthenticationFailed(String),
	/// The DigitalOcean API or the PMM server could not be reached. The message
	/// names the target that was being contacted
	UpstreamUnreachable(String),
	/// The DigitalOcean API or the PMM server answered with a non-2xx status
	/// that is not covered by any other variant
	UpstreamRejected {
		/// The status to forward to the caller
		status: StatusCode,
		/// The message extracted from the upstream body, when parseable
		message: String,
	},
	/// The monitoring user already exists and cannot be reused as-is
	ResourceConflict(ConflictDetails),
	/// The `pmm-admin` binary could not be found. Reported in-band
	ToolingUnavailable(String),
	/// `pmm-admin` ran, but did not succeed. Reported in-band
	ToolingFailed {
		/// A summary, including the exit code when there is one
		message: String,
		/// The combined stdout and stderr of the failing invocation
		output: String,
	},
	/// An internal server error occurred. This should not happen unless there
	/// is a bug in the server
	InternalServerError(anyhow::Error),
}

/// Details of a monitoring user conflict, so that the caller can decide to
/// reuse or reset the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictDetails {
	/// A stable machine-readable code for the conflict
	pub error_code: String,
	/// A user-friendly description of the conflict
	#[serde(skip)]
	pub message: String,
	/// The username that was attempted
	pub username: String,
	/// The display name of the database the user was attempted on
	pub db_name: String,
	/// The ID of the database the user was attempted on
	pub db_id: String,
}

impl ErrorType {
	/// Returns the status code that should be used for this error. Tooling
	/// errors are reported in-band, so they do not escalate the status.
	pub fn default_status_code(&self) -> StatusCode {
		match self {
			Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
			Self::NotSupported(_) => StatusCode::BAD_REQUEST,
			Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
			Self::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
			Self::UpstreamRejected { status, .. } => *status,
			Self::ResourceConflict(_) => StatusCode::CONFLICT,
			Self::ToolingUnavailable(_) => StatusCode::OK,
			Self::ToolingFailed { .. } => StatusCode::OK,
			Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Returns the message that should be used for this error. This is the
	/// message that is user-friendly and can be shown to the user
	pub fn message(&self) -> String {
		match self {
			Self::InvalidInput(message) |
			Self::NotSupported(message) |
			Self::AuthenticationFailed(message) |
			Self::UpstreamUnreachable(message) |
			Self::ToolingUnavailable(message) => message.clone(),
			Self::UpstreamRejected { message, .. } => message.clone(),
			Self::ResourceConflict(details) => details.message.clone(),
			Self::ToolingFailed { message, .. } => message.clone(),
			Self::InternalServerError(_) => "An internal server error has occured".to_string(),
		}
	}

	/// A stable camelCase code identifying the kind of error
	pub fn error_code(&self) -> &'static str {
		match self {
			Self::InvalidInput(_) => "invalidInput",
			Self::NotSupported(_) => "notSupported",
			Self::AuthenticationFailed(_) => "authenticationFailed",
			Self::UpstreamUnreachable(_) => "upstreamUnreachable",
			Self::UpstreamRejected { .. } => "upstreamRejected",
			Self::ResourceConflict(_) => "resourceConflict",
			Self::ToolingUnavailable(_) => "toolingUnavailable",
			Self::ToolingFailed { .. } => "toolingFailed",
			Self::InternalServerError(_) => "internalServerError",
		}
	}

	/// The captured tool output, if this error carries any
	pub fn output(&self) -> Option<&str> {
		match self {
			Self::ToolingFailed { output, .. } => Some(output),
			_ => None,
		}
	}

	/// Whether this error is reported with `ok=false` inside a successful HTTP
	/// response instead of an error status
	pub fn is_in_band(&self) -> bool {
		matches!(self, Self::ToolingUnavailable(_) | Self::ToolingFailed { .. })
	}

	/// Relabels an upstream rejection as a bad gateway, for operations whose
	/// callers only distinguish "upstream failed" from everything else
	pub fn into_bad_gateway(self) -> Self {
		match self {
			Self::UpstreamRejected { message, .. } => Self::UpstreamRejected {
				status: StatusCode::BAD_GATEWAY,
				message,
			},
			other => other,
		}
	}

	/// Creates an [`ErrorType::InvalidInput`] with the given message
	pub fn invalid_input(message: impl Into<String>) -> Self {
		Self::InvalidInput(message.into())
	}

	/// Creates an [`ErrorType::InternalServerError`] with the given message
	pub fn server_error(message: impl Display) -> Self {
		Self::InternalServerError(anyhow::anyhow!(message.to_string()))
	}
}

impl PartialEq for ErrorType {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::InternalServerError(_), Self::InternalServerError(_)) => true,
			(Self::InvalidInput(a), Self::InvalidInput(b)) |
			(Self::NotSupported(a), Self::NotSupported(b)) |
			(Self::AuthenticationFailed(a), Self::AuthenticationFailed(b)) |
			(Self::UpstreamUnreachable(a), Self::UpstreamUnreachable(b)) |
			(Self::ToolingUnavailable(a), Self::ToolingUnavailable(b)) => a == b,
			(
				Self::UpstreamRejected {
					status: status_a,
					message: message_a,
				},
				Self::UpstreamRejected {
					status: status_b,
					message: message_b,
				},
			) => status_a == status_b && message_a == message_b,
			(Self::ResourceConflict(a), Self::ResourceConflict(b)) => a == b,
			(
				Self::ToolingFailed {
					message: message_a,
					output: output_a,
				},
				Self::ToolingFailed {
					message: message_b,
					output: output_b,
				},
			) => message_a == message_b && output_a == output_b,
			_ => false,
		}
	}
}

impl Eq for ErrorType {}

impl<Error> From<Error> for ErrorType
where
	Error: StdError + Send + Sync + 'static,
{
	fn from(error: Error) -> Self {
		Self::InternalServerError(error.into())
	}
}

impl Clone for ErrorType {
	fn clone(&self) -> Self {
		match self {
			Self::InvalidInput(message) => Self::InvalidInput(message.clone()),
			Self::NotSupported(message) => Self::NotSupported(message.clone()),
			Self::AuthenticationFailed(message) => Self::AuthenticationFailed(message.clone()),
			Self::UpstreamUnreachable(message) => Self::UpstreamUnreachable(message.clone()),
			Self::UpstreamRejected { status, message } => Self::UpstreamRejected {
				status: *status,
				message: message.clone(),
			},
			Self::ResourceConflict(details) => Self::ResourceConflict(details.clone()),
			Self::ToolingUnavailable(message) => Self::ToolingUnavailable(message.clone()),
			Self::ToolingFailed { message, output } => Self::ToolingFailed {
				message: message.clone(),
				output: output.clone(),
			},
			Self::InternalServerError(error) => {
				Self::InternalServerError(anyhow::anyhow!(error.to_string()))
			}
		}
	}
}

impl Display for ErrorType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message())
	}
}

impl Serialize for ErrorType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.error_code())
	}
}
