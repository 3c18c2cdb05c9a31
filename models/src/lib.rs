#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Wire types shared by the pmm-connect API: the request and response bodies
//! of every endpoint, the managed database descriptor and the error taxonomy
//! that every failure is classified into before it reaches the HTTP surface.

/// The request and response bodies of every endpoint.
pub mod api;
/// Serde helpers and constants shared by the wire types.
pub mod utils;

/// Commonly used items, re-exported for convenience.
pub mod prelude {
	pub use crate::{
		api::DatabaseEngine,
		utils::{False, True},
		ApiErrorResponse,
		ApiSuccessResponse,
		ErrorType,
	};
}

/// The error taxonomy of the API.
mod error;
/// The success and error response envelopes.
mod response;

pub use self::{error::*, response::*};
