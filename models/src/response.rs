use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::{
	utils::{False, True},
	ConflictDetails,
	ErrorType,
};

/// This struct represents a successful response from the API. It contains the
/// status code and the body.
#[derive(Debug, Clone)]
pub struct ApiSuccessResponse<T> {
	/// The status code of the success response. Ideally in the 2xx range.
	pub status_code: StatusCode,
	/// The body of the success response, wrapped in the `ok: true` envelope
	/// when it is rendered.
	pub body: T,
}

impl<T> ApiSuccessResponse<T> {
	/// A `200 OK` response with the given body
	pub fn ok(body: T) -> Self {
		Self {
			status_code: StatusCode::OK,
			body,
		}
	}
}

impl<T> IntoResponse for ApiSuccessResponse<T>
where
	T: Serialize,
{
	fn into_response(self) -> axum::response::Response {
		(
			self.status_code,
			Json(ApiSuccessResponseBody {
				ok: True,
				response: self.body,
			}),
		)
			.into_response()
	}
}

/// This struct represents the JSON body of successful response from the API.
/// This is mostly used internally and would ideally not need to be constructed
/// manually.
///
/// Use [`ApiSuccessResponse`] to create a success response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiSuccessResponseBody<T> {
	/// Whether the request was successful or not. This is always true.
	pub ok: True,
	/// The JSON body of the response. This is flattened so that the fields of
	/// the body are at the top level.
	#[serde(flatten)]
	pub response: T,
}

/// This struct represents an error response from the API. It contains the
/// status code and the body of the response.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
	/// The status code of the error response. In the 4xx or 5xx range, except
	/// for tooling errors which are reported in-band with a 200.
	pub status_code: StatusCode,
	/// The body of the error response. This is a JSON object that contains the
	/// error message.
	pub body: ApiErrorResponseBody,
}

impl ApiErrorResponse {
	/// Creates a new [`ApiErrorResponse`] with the given [`ErrorType`], using
	/// the default status code.
	pub fn error(error: ErrorType) -> Self {
		let message = error.message();
		Self::error_with_message(error, message)
	}

	/// Creates a new [`ApiErrorResponse`] with the given [`ErrorType`] and the
	/// given message, using the default status code.
	pub fn error_with_message(error: ErrorType, message: impl Into<String>) -> Self {
		let conflict = match &error {
			ErrorType::ResourceConflict(details) => Some(details.clone()),
			_ => None,
		};
		Self {
			status_code: error.default_status_code(),
			body: ApiErrorResponseBody {
				ok: False,
				output: error.output().map(str::to_string),
				message: message.into(),
				conflict,
				error,
			},
		}
	}
}

impl From<ErrorType> for ApiErrorResponse {
	fn from(error: ErrorType) -> Self {
		Self::error(error)
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> axum::response::Response {
		(self.status_code, Json(self.body)).into_response()
	}
}

/// This struct represents the JSON body of an error response from the API.
/// This is mostly used internally and would ideally not need to be constructed
/// manually.
///
/// Use [`ApiErrorResponse`] to create an error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiErrorResponseBody {
	/// Whether the request was successful or not. This is always false.
	pub ok: False,
	/// The error type of the response.
	pub error: ErrorType,
	/// A user-friendly message describing the error.
	pub message: String,
	/// The captured `pmm-admin` output, for errors that carry one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<String>,
	/// The attempted username and database, for user conflicts
	#[serde(flatten)]
	pub conflict: Option<ConflictDetails>,
}
