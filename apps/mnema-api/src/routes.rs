use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use mnema_service::{
	AddNoteRequest, Error as ServiceError, ListResponse, NoteResponse, SearchRequest,
	SearchResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/notes", post(create_note).get(list_notes))
		.route("/v1/notes/search", post(search_notes))
		.route("/v1/notes/{id}", get(get_note).delete(delete_note))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn create_note(
	State(state): State<AppState>,
	Json(payload): Json<AddNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
	let response = state.service.add_note(payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list_notes().await?;

	Ok(Json(response))
}

async fn get_note(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<Json<NoteResponse>, ApiError> {
	let Some(note) = state.service.get_note(id).await? else {
		return Err(not_found(id));
	};

	Ok(Json(note))
}

async fn delete_note(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
	if state.service.delete_note(id).await? {
		Ok(StatusCode::NO_CONTENT)
	} else {
		Err(not_found(id))
	}
}

async fn search_notes(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search_notes(payload).await?;

	Ok(Json(response))
}

fn not_found(id: i64) -> ApiError {
	json_error(StatusCode::NOT_FOUND, "not_found", format!("Note with ID {id} was not found."))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError { status, error_code: code.to_string(), message: message.into() }
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::Provider { message } =>
				json_error(StatusCode::BAD_GATEWAY, "embedding_provider_error", message),
			ServiceError::Storage { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
