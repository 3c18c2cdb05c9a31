mod bools;
mod string_or_number;

pub use self::{bools::*, string_or_number::*};

/// All the constants used in the application.
/// Constants are used to avoid hardcoding values, since that might introduce
/// typos.
pub mod constants {
	/// The username the monitoring user is created with when none is given
	pub const DEFAULT_MONITORING_USERNAME: &str = "pmm_monitor";
	/// The engine key assumed when a request does not name one
	pub const DEFAULT_ENGINE_KEY: &str = "pg";
}
