use models::api::{IntegrateRequest, IntegrateResponse, RemoveRequest, RemoveResponse};

use super::{known_engine, supported_engine};
use crate::{engine, prelude::*};

/// Adds a managed database to PMM, connecting the local agent first when it
/// is not. Failures of `pmm-admin` itself are reported in the response,
/// alongside the post-setup instructions.
#[instrument(skip(state, pmm_password, instance), fields(service = %instance.name))]
pub async fn integrate(
	state: &AppState,
	IntegrateRequest {
		pmm_password,
		engine,
		instance,
	}: IntegrateRequest,
) -> Result<IntegrateResponse, ErrorType> {
	let missing = instance.missing_fields();
	if !missing.is_empty() || pmm_password.is_empty() {
		let missing = if missing.is_empty() {
			"pmm_password".to_string()
		} else {
			missing.join(", ")
		};
		return Err(ErrorType::invalid_input(format!("Missing fields: {missing}")));
	}
	let engine = supported_engine(&engine)?;
	let post_steps = engine::post_add_instructions(engine, &instance);

	let result = async {
		let invocation = state.pmm_admin.locate()?;
		let server_url = state.pmm_admin.server_url(state.pmm.base_url(), &pmm_password);
		let command = engine::build_add_command(engine, &invocation, &server_url, &instance)?;

		state
			.pmm_admin
			.add_service(&invocation, &server_url, &pmm_password, command)
			.await
	}
	.await;

	match result {
		Ok(output) => Ok(IntegrateResponse {
			ok: true,
			message: String::new(),
			output,
			post_steps,
		}),
		Err(error) if error.is_in_band() => {
			warn!("Unable to add `{}` to PMM: {}", instance.name, error.message());
			Ok(IntegrateResponse {
				ok: false,
				message: error.message(),
				output: error.output().unwrap_or_default().to_string(),
				post_steps,
			})
		}
		Err(error) => Err(error),
	}
}

/// Removes a service from PMM. Failures of `pmm-admin` itself are reported in
/// the response.
#[instrument(skip(state, pmm_password))]
pub async fn remove(
	state: &AppState,
	RemoveRequest {
		pmm_password,
		service_name,
		engine,
	}: RemoveRequest,
) -> Result<RemoveResponse, ErrorType> {
	let service_name = service_name.trim();
	let engine = engine.trim();
	if pmm_password.is_empty() || service_name.is_empty() || engine.is_empty() {
		return Err(ErrorType::invalid_input(
			"Missing pmm_password, service_name, or engine.",
		));
	}
	let engine = known_engine(engine)?;
	let Some(service_type) = engine.pmm_service_type() else {
		return Err(ErrorType::NotSupported(format!(
			"{} is not yet supported.",
			engine.display_name()
		)));
	};

	let result = async {
		let invocation = state.pmm_admin.locate()?;
		let server_url = state.pmm_admin.server_url(state.pmm.base_url(), &pmm_password);

		state
			.pmm_admin
			.remove_service(&invocation, &server_url, service_type, service_name)
			.await
	}
	.await;

	match result {
		Ok(output) => Ok(RemoveResponse {
			ok: true,
			message: String::new(),
			output,
		}),
		Err(error) if error.is_in_band() => {
			warn!("Unable to remove `{service_name}` from PMM: {}", error.message());
			Ok(RemoveResponse {
				ok: false,
				message: error.message(),
				output: error.output().unwrap_or_default().to_string(),
			})
		}
		Err(error) => Err(error),
	}
}
