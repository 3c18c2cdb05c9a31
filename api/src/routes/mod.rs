use axum::{
	extract::State,
	routing::{get, post},
	Json,
	Router,
};
use models::api::{
	CreateUserRequest,
	CreateUserResponse,
	IntegrateRequest,
	IntegrateResponse,
	ListDatabasesRequest,
	ListDatabasesResponse,
	ListEnginesResponse,
	RemoveRequest,
	RemoveResponse,
	ValidatePmmRequest,
	ValidatePmmResponse,
	ValidateTokenRequest,
	ValidateTokenResponse,
};
use serde::Serialize;

use crate::{prelude::*, service, utils::extractors::JsonBody};

type ApiResult<T> = Result<ApiSuccessResponse<T>, ApiErrorResponse>;

/// Mounts every endpoint of the API under `/api`
pub fn setup_routes(state: AppState) -> Router {
	Router::new()
		.route("/api/validate-token", post(validate_token))
		.route("/api/validate-pmm", post(validate_pmm))
		.route("/api/databases", post(list_databases))
		.route("/api/create-user", post(create_user))
		.route("/api/integrate", post(integrate))
		.route("/api/remove", post(remove))
		.route("/api/engines", get(list_engines))
		.route("/api/health", get(health))
		.with_state(state)
}

async fn validate_token(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<ValidateTokenRequest>,
) -> ApiResult<ValidateTokenResponse> {
	Ok(ApiSuccessResponse::ok(
		service::validate_token(&state, request).await?,
	))
}

async fn validate_pmm(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<ValidatePmmRequest>,
) -> ApiResult<ValidatePmmResponse> {
	Ok(ApiSuccessResponse::ok(
		service::validate_pmm_password(&state, request).await?,
	))
}

async fn list_databases(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<ListDatabasesRequest>,
) -> ApiResult<ListDatabasesResponse> {
	Ok(ApiSuccessResponse::ok(
		service::list_databases(&state, request).await?,
	))
}

async fn create_user(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<CreateUserRequest>,
) -> ApiResult<CreateUserResponse> {
	Ok(ApiSuccessResponse::ok(
		service::create_monitoring_user(&state, request).await?,
	))
}

// These two carry their own `ok`, since `pmm-admin` failures are answered
// with a 200
async fn integrate(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<IntegrateRequest>,
) -> Result<Json<IntegrateResponse>, ApiErrorResponse> {
	Ok(Json(service::integrate(&state, request).await?))
}

async fn remove(
	State(state): State<AppState>,
	JsonBody(request): JsonBody<RemoveRequest>,
) -> Result<Json<RemoveResponse>, ApiErrorResponse> {
	Ok(Json(service::remove(&state, request).await?))
}

async fn list_engines() -> ApiSuccessResponse<ListEnginesResponse> {
	ApiSuccessResponse::ok(ListEnginesResponse::all())
}

#[derive(Serialize)]
struct Healthy {}

async fn health() -> ApiSuccessResponse<Healthy> {
	ApiSuccessResponse::ok(Healthy {})
}
