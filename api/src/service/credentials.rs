use models::api::{ValidatePmmRequest, ValidatePmmResponse, ValidateTokenRequest, ValidateTokenResponse};

use crate::prelude::*;

/// Checks that the token can read the DigitalOcean account it belongs to
#[instrument(skip_all)]
pub async fn validate_token(
	state: &AppState,
	ValidateTokenRequest { do_token }: ValidateTokenRequest,
) -> Result<ValidateTokenResponse, ErrorType> {
	let token = do_token.trim();
	if token.is_empty() {
		return Err(ErrorType::invalid_input(
			"DigitalOcean API token is required.",
		));
	}

	let account = state
		.digitalocean
		.get_account(token)
		.await
		.map_err(ErrorType::into_bad_gateway)?;
	debug!("Token belongs to account `{}`", account.uuid);

	Ok(ValidateTokenResponse {})
}

/// Checks that the password lets the `admin` user list PMM services
#[instrument(skip_all)]
pub async fn validate_pmm_password(
	state: &AppState,
	ValidatePmmRequest { pmm_password }: ValidatePmmRequest,
) -> Result<ValidatePmmResponse, ErrorType> {
	if pmm_password.is_empty() {
		return Err(ErrorType::invalid_input("PMM admin password is required."));
	}

	state.pmm.list_services(&pmm_password).await?;
	debug!("PMM password accepted by {}", state.pmm.base_url());

	Ok(ValidatePmmResponse {})
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use axum::http::StatusCode;
	use models::api::{ValidatePmmRequest, ValidateTokenRequest};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::{validate_pmm_password, validate_token};
	use crate::{
		client::fakes::{self, FakeDigitalOcean, FakePmm, GOOD_TOKEN, PMM_PASSWORD},
		pmm_admin::test_runner::ScriptedRunner,
		prelude::*,
	};

	fn state(pmm: FakePmm) -> AppState {
		fakes::state(
			FakeDigitalOcean::default(),
			pmm,
			Arc::new(ScriptedRunner::default()),
		)
	}

	fn token(do_token: &str) -> ValidateTokenRequest {
		ValidateTokenRequest {
			do_token: do_token.into(),
		}
	}

	#[tokio::test]
	async fn token_checks() {
		let state = state(FakePmm::with_services(json!({})));

		assert!(validate_token(&state, token(&format!("  {GOOD_TOKEN} ")))
			.await
			.is_ok());
		assert_eq!(
			validate_token(&state, token("   ")).await.unwrap_err().default_status_code(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			validate_token(&state, token("dop_v1_bad"))
				.await
				.unwrap_err()
				.default_status_code(),
			StatusCode::UNAUTHORIZED
		);
	}

	#[tokio::test]
	async fn password_checks() {
		let password = |pmm_password: &str| ValidatePmmRequest {
			pmm_password: pmm_password.into(),
		};

		let state = state(FakePmm::with_services(json!({})));
		assert!(validate_pmm_password(&state, password(PMM_PASSWORD))
			.await
			.is_ok());
		assert_eq!(
			validate_pmm_password(&state, password("wrong"))
				.await
				.unwrap_err(),
			ErrorType::AuthenticationFailed("Invalid PMM admin password.".into())
		);
		assert_eq!(
			validate_pmm_password(&state, password("")).await.unwrap_err(),
			ErrorType::invalid_input("PMM admin password is required.")
		);

		let unreachable = self::state(FakePmm {
			services: json!({}),
			reachable: false,
		});
		assert_eq!(
			validate_pmm_password(&unreachable, password(PMM_PASSWORD))
				.await
				.unwrap_err()
				.default_status_code(),
			StatusCode::BAD_GATEWAY
		);
	}
}
