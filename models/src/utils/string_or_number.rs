use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field that browsers send either as a JSON string or as a
/// JSON number (ports, mostly) into its string form. `null` becomes an empty
/// string, so that required-field validation can treat it as missing.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::Null => Ok(String::new()),
		Value::String(value) => Ok(value),
		Value::Number(value) => Ok(value.to_string()),
		other => Err(D::Error::custom(format!(
			"expected a string or a number, found {other}"
		))),
	}
}

/// Renders a JSON value as the bare text a port or address should be keyed by.
/// Strings lose their quotes, numbers keep their digits, `null` is empty.
pub fn value_as_plain_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(value) => value.clone(),
		other => other.to_string(),
	}
}
