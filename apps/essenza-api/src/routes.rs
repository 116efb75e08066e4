use std::collections::HashMap;

use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use essenza_service::{
	BrowseRequest, BrowseResponse, MatchOutcome, SearchRequest, SearchResponse, ServiceError,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/catalog/browse", post(browse))
		.route("/v1/users/{user_id}/matches/{product_id}", get(get_match))
		.route("/v1/users/{user_id}/matches/batch", post(batch_match))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;
	Ok(Json(response))
}

async fn browse(
	State(state): State<AppState>,
	Json(payload): Json<BrowseRequest>,
) -> Result<Json<BrowseResponse>, ApiError> {
	let response = state.service.browse(payload).await?;
	Ok(Json(response))
}

async fn get_match(
	State(state): State<AppState>,
	Path((user_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MatchOutcome>, ApiError> {
	let outcome = state.service.get_match(user_id, product_id).await?;
	Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
struct BatchMatchRequest {
	product_ids: Vec<Uuid>,
}

async fn batch_match(
	State(state): State<AppState>,
	Path(user_id): Path<Uuid>,
	Json(payload): Json<BatchMatchRequest>,
) -> Json<HashMap<Uuid, MatchOutcome>> {
	Json(state.service.batch_match(user_id, &payload.product_ids).await)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			// Both precondition misses are ordinary states for the UI: it
			// hides the match badge instead of surfacing an error page.
			ServiceError::ProfileIncomplete { .. } => (StatusCode::CONFLICT, "profile_incomplete"),
			ServiceError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
