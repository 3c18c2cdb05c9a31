/// Bodies of the DigitalOcean REST API
pub mod digitalocean;
/// Bodies of the PMM management API
pub mod pmm;
