use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;
use uuid::Uuid;

use essenza_api::{routes, state::AppState};
use essenza_service::EssenzaService;
use essenza_testkit::{ScriptedCompletion, TestStores, product, sample_config};

fn app(completion: ScriptedCompletion) -> (TestStores, axum::Router) {
	let stores = TestStores::new();
	let service = EssenzaService::with_completion(
		sample_config(),
		stores.stores(),
		Arc::new(completion),
	);
	let router = routes::router(AppState::with_service(Arc::new(service)));

	(stores, router)
}

#[tokio::test]
async fn health_ok() {
	let (_stores, app) = app(ScriptedCompletion::new(Vec::<String>::new()));
	let response = app
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_returns_products_and_explanation() {
	let (stores, app) = app(ScriptedCompletion::new([
		r#"{"sortByPrice": "asc", "limit": 1, "explanation": "El más accesible."}"#,
	]));

	stores.catalog.add_product(product("Tope", "ESS-001", 1_500_000));
	stores.catalog.add_product(product("Accesible", "ESS-002", 350_000));

	let payload = serde_json::json!({ "query": "el más barato" });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/search")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/search.");

	assert_eq!(response.status(), StatusCode::OK);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(json["total"], 1);
	assert_eq!(json["products"][0]["name"], "Accesible");
	assert_eq!(json["explanation"], "El más accesible.");
	assert_eq!(json["degraded"], false);
}

#[tokio::test]
async fn match_without_profile_maps_to_conflict() {
	let (stores, app) = app(ScriptedCompletion::new(Vec::<String>::new()));
	let entry = product("Brisa", "ESS-001", 500_000);
	let product_id = entry.product_id;

	stores.catalog.add_product(entry);

	let uri = format!("/v1/users/{}/matches/{product_id}", Uuid::new_v4());
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call match route.");

	assert_eq!(response.status(), StatusCode::CONFLICT);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(json["error_code"], "profile_incomplete");
}

#[tokio::test]
async fn blank_search_maps_to_bad_request() {
	let (_stores, app) = app(ScriptedCompletion::new(Vec::<String>::new()));
	let payload = serde_json::json!({ "query": "  " });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/search")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/search.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
