use serde::{Deserialize, Serialize};

use mnema_storage::timestamp;

use crate::{Error, NoteResponse, NoteService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddNoteRequest {
	pub content: String,
}

impl NoteService {
	pub async fn add_note(&self, req: AddNoteRequest) -> Result<NoteResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "content must be non-empty.".to_string(),
			});
		}

		// Embed before touching storage; a provider failure must never leave a
		// persisted note without an embedding.
		let embedding = self.embed_text(&req.content).await?;
		let embedding_text = serde_json::to_string(&embedding)?;
		let created_at = timestamp::now();
		let created_text = timestamp::format(created_at)?;
		let id: i64 = sqlx::query_scalar(
			"INSERT INTO notes (content, created_at, embedding) VALUES (?, ?, ?) RETURNING id",
		)
		.bind(&req.content)
		.bind(&created_text)
		.bind(&embedding_text)
		.fetch_one(&self.db.pool)
		.await?;

		tracing::info!(id, "Stored note.");

		Ok(NoteResponse { id, content: req.content, created_at })
	}
}
