use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::utils::constants::PMM_ADMIN_USERNAME;

/// Everything but ASCII alphanumerics and `-_.~` is escaped
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'~');

/// Builds the URL `pmm-admin` reaches the PMM server at, with the admin
/// credentials embedded. Always ends with a `/`.
pub fn build_server_url(base_url: &str, password: &str, url_override: Option<&str>) -> String {
	let mut url = match url_override {
		Some(url) => url.to_string(),
		None => {
			let host = base_url
				.split_once("://")
				.map_or(base_url, |(_, rest)| rest)
				.trim_end_matches('/');
			format!(
				"https://{PMM_ADMIN_USERNAME}:{}@{host}/",
				utf8_percent_encode(password, USERINFO)
			)
		}
	};
	if !url.ends_with('/') {
		url.push('/');
	}
	url
}

/// Hides the password of a server URL, for logs
pub fn redact(url: &str) -> String {
	let Some((credentials, rest)) = url.split_once('@') else {
		return url.to_string();
	};
	match credentials.rsplit_once(':') {
		Some((user, password)) if !password.starts_with("//") => {
			format!("{user}:***@{rest}")
		}
		_ => url.to_string(),
	}
}
