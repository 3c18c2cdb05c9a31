/// The endpoint to check a PMM admin password
mod validate_pmm;
/// The endpoint to check a DigitalOcean API token
mod validate_token;

pub use self::{validate_pmm::*, validate_token::*};
