use serde::{Deserialize, Serialize};

use mnema_storage::models::NoteRow;

use crate::{NoteResponse, NoteService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<NoteResponse>,
}

impl NoteService {
	/// Every persisted note in insertion order.
	pub async fn list_notes(&self) -> Result<ListResponse> {
		let rows: Vec<NoteRow> =
			sqlx::query_as("SELECT id, content, created_at, embedding FROM notes ORDER BY id")
				.fetch_all(&self.db.pool)
				.await?;
		let mut items = Vec::with_capacity(rows.len());

		for row in rows {
			let note = row.into_note()?;

			items.push(NoteResponse {
				id: note.id,
				content: note.content,
				created_at: note.created_at,
			});
		}

		Ok(ListResponse { items })
	}
}
