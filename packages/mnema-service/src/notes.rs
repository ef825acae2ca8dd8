use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use mnema_storage::models::NoteRow;

use crate::{NoteService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteResponse {
	pub id: i64,
	pub content: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: PrimitiveDateTime,
}

impl NoteService {
	/// An absent id is a normal outcome, not an error.
	pub async fn get_note(&self, id: i64) -> Result<Option<NoteResponse>> {
		let row: Option<NoteRow> =
			sqlx::query_as("SELECT id, content, created_at, embedding FROM notes WHERE id = ?")
				.bind(id)
				.fetch_optional(&self.db.pool)
				.await?;
		let Some(row) = row else {
			return Ok(None);
		};
		let note = row.into_note()?;

		Ok(Some(NoteResponse { id: note.id, content: note.content, created_at: note.created_at }))
	}
}
