use reqwest::header::AUTHORIZATION;
use serde_json::Map;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		essenza_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");
	assert_eq!(value, "Bearer secret");
}

#[test]
fn forwards_default_headers() {
	let mut defaults = Map::new();
	defaults.insert("X-Provider-Tier".to_string(), serde_json::Value::String("pro".to_string()));
	let headers =
		essenza_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("X-Provider-Tier").expect("Missing default header."), "pro");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();
	defaults.insert("X-Retries".to_string(), serde_json::Value::from(3));

	assert!(essenza_providers::auth_headers("secret", &defaults).is_err());
}
