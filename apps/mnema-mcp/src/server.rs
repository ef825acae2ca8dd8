use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use color_eyre::Result;
use rmcp::{
	ErrorData, ServerHandler,
	handler::server::router::tool::ToolRouter,
	model::{CallToolResult, JsonObject, ServerCapabilities, ServerInfo},
	transport::streamable_http_server::{
		StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
	},
};
use serde_json::Value;
use tokio::net::TcpListener;

use mnema_service::{AddNoteRequest, NoteService, SearchRequest};

#[derive(Clone)]
struct MnemaMcp {
	service: Arc<NoteService>,
	tool_router: ToolRouter<Self>,
}
impl MnemaMcp {
	fn new(service: Arc<NoteService>) -> Self {
		Self { service, tool_router: Self::tool_router() }
	}
}

#[rmcp::tool_router]
impl MnemaMcp {
	#[rmcp::tool(
		name = "create_note",
		description = "Create a note from the given content. Its embedding is computed and stored alongside it.",
		input_schema = create_note_schema()
	)]
	async fn create_note(&self, mut params: JsonObject) -> Result<CallToolResult, ErrorData> {
		let content = take_required_string(&mut params, "content")?;

		tracing::info!("MCP: creating note.");

		let response =
			self.service.add_note(AddNoteRequest { content }).await.map_err(tool_error)?;

		structured(response)
	}

	#[rmcp::tool(
		name = "get_note",
		description = "Fetch a single note by its id.",
		input_schema = note_id_schema()
	)]
	async fn get_note(&self, mut params: JsonObject) -> Result<CallToolResult, ErrorData> {
		let id = take_required_id(&mut params)?;

		match self.service.get_note(id).await.map_err(tool_error)? {
			Some(note) => structured(note),
			None => Ok(CallToolResult::structured_error(not_found(id))),
		}
	}

	#[rmcp::tool(
		name = "list_notes",
		description = "List every stored note.",
		input_schema = list_notes_schema()
	)]
	async fn list_notes(&self, _params: JsonObject) -> Result<CallToolResult, ErrorData> {
		structured(self.service.list_notes().await.map_err(tool_error)?)
	}

	#[rmcp::tool(
		name = "delete_note",
		description = "Delete a note by its id. Reports whether a note existed and was removed.",
		input_schema = note_id_schema()
	)]
	async fn delete_note(&self, mut params: JsonObject) -> Result<CallToolResult, ErrorData> {
		let id = take_required_id(&mut params)?;

		tracing::info!(id, "MCP: deleting note.");

		let deleted = self.service.delete_note(id).await.map_err(tool_error)?;

		structured(serde_json::json!({ "note_id": id, "deleted": deleted }))
	}

	#[rmcp::tool(
		name = "search_notes",
		description = "Search notes by semantic similarity to the query. Returns up to `limit` results (default 5) with scores.",
		input_schema = search_notes_schema()
	)]
	async fn search_notes(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		let request: SearchRequest = serde_json::from_value(Value::Object(params))
			.map_err(|err| ErrorData::invalid_params(format!("Invalid search request: {err}"), None))?;

		structured(self.service.search_notes(request).await.map_err(tool_error)?)
	}
}

#[rmcp::tool_handler]
impl ServerHandler for MnemaMcp {
	fn get_info(&self) -> ServerInfo {
		ServerInfo {
			instructions: Some(
				"mnema MCP server exposing note storage and similarity search tools.".to_string(),
			),
			capabilities: ServerCapabilities::builder().enable_tools().build(),
			..Default::default()
		}
	}
}

pub async fn serve_mcp(bind_addr: &str, service: Arc<NoteService>) -> Result<()> {
	let bind_addr: SocketAddr = bind_addr.parse()?;
	let session_manager: Arc<LocalSessionManager> = Default::default();
	let mcp_service = StreamableHttpService::new(
		move || Ok(MnemaMcp::new(service.clone())),
		session_manager,
		StreamableHttpServerConfig::default(),
	);
	let router = Router::new().fallback_service(mcp_service);
	let listener = TcpListener::bind(bind_addr).await?;

	tracing::info!(%bind_addr, "MCP server listening.");

	axum::serve(listener, router).await?;

	Ok(())
}

fn structured<T: serde::Serialize>(value: T) -> Result<CallToolResult, ErrorData> {
	let json = serde_json::to_value(value).map_err(|err| {
		ErrorData::internal_error(format!("Failed to encode tool result: {err}"), None)
	})?;

	Ok(CallToolResult::structured(json))
}

fn tool_error(err: mnema_service::Error) -> ErrorData {
	match err {
		mnema_service::Error::InvalidRequest { message } =>
			ErrorData::invalid_params(message, None),
		other => ErrorData::internal_error(other.to_string(), None),
	}
}

fn not_found(id: i64) -> Value {
	serde_json::json!({
		"error_code": "not_found",
		"message": format!("Note with ID {id} was not found."),
	})
}

fn take_required_string(params: &mut JsonObject, key: &str) -> Result<String, ErrorData> {
	let value = params
		.remove(key)
		.ok_or_else(|| ErrorData::invalid_params(format!("{key} is required."), None))?;
	let text = value
		.as_str()
		.ok_or_else(|| ErrorData::invalid_params(format!("{key} must be a string."), None))?;

	if text.trim().is_empty() {
		return Err(ErrorData::invalid_params(format!("{key} must be non-empty."), None));
	}

	Ok(text.to_string())
}

fn take_required_id(params: &mut JsonObject) -> Result<i64, ErrorData> {
	let value = params
		.remove("note_id")
		.ok_or_else(|| ErrorData::invalid_params("note_id is required.", None))?;

	value
		.as_i64()
		.ok_or_else(|| ErrorData::invalid_params("note_id must be an integer.", None))
}

fn create_note_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["content"],
		"properties": {
			"content": { "type": "string" }
		}
	}))
}

fn note_id_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["note_id"],
		"properties": {
			"note_id": { "type": "integer" }
		}
	}))
}

fn list_notes_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"properties": {}
	}))
}

fn search_notes_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["query"],
		"properties": {
			"query": { "type": "string" },
			"limit": { "type": ["integer", "null"] }
		}
	}))
}

#[cfg(test)]
mod tests {
	use rmcp::model::ErrorCode;

	use super::*;

	#[test]
	fn schemas_declare_their_required_keys() {
		for (schema, key) in [
			(create_note_schema(), "content"),
			(note_id_schema(), "note_id"),
			(search_notes_schema(), "query"),
		] {
			let required = schema
				.get("required")
				.and_then(|value| value.as_array())
				.expect("schema must declare required keys");

			assert!(
				required.iter().any(|value| value == key),
				"Schema is missing required key: {key}."
			);
		}
	}

	#[test]
	fn required_strings_must_be_non_empty() {
		let mut params = JsonObject::new();

		params.insert("content".to_string(), Value::String("  ".to_string()));

		let err = take_required_string(&mut params, "content").expect_err("expected error");

		assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
	}

	#[test]
	fn missing_note_id_is_invalid_params() {
		let mut params = JsonObject::new();
		let err = take_required_id(&mut params).expect_err("expected error");

		assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
	}

	#[test]
	fn non_integer_note_id_is_rejected() {
		let mut params = JsonObject::new();

		params.insert("note_id".to_string(), Value::String("7".to_string()));

		let err = take_required_id(&mut params).expect_err("expected error");

		assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
	}

	#[test]
	fn invalid_request_maps_to_invalid_params() {
		let err = tool_error(mnema_service::Error::InvalidRequest {
			message: "content must be non-empty.".to_string(),
		});

		assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

		let err = tool_error(mnema_service::Error::Storage { message: "disk full".to_string() });

		assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
	}
}
