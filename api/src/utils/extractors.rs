use axum::{
	body::Bytes,
	extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::prelude::*;

/// A JSON body, parsed whatever `Content-Type` the client sent. Anything that
/// does not parse is rejected as invalid input.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
	T: DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = ApiErrorResponse;

	async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Ok(body) = Bytes::from_request(request, state).await else {
			debug!("Failed to read body");
			return Err(ApiErrorResponse::error(ErrorType::invalid_input(
				"Invalid body",
			)));
		};

		serde_json::from_slice(&body).map(JsonBody).map_err(|error| {
			debug!("Failed to parse body: {error}");
			ApiErrorResponse::error(ErrorType::invalid_input(format!(
				"Invalid JSON body: {error}"
			)))
		})
	}
}
