use time::PrimitiveDateTime;

use crate::{Result, timestamp};

/// A `notes` row as persisted: timestamp and embedding still in their text encodings.
#[derive(Debug, sqlx::FromRow)]
pub struct NoteRow {
	pub id: i64,
	pub content: String,
	pub created_at: String,
	pub embedding: Option<String>,
}

/// A decoded note. `embedding` is `None` only for rows written outside the service;
/// every note the service persists has one.
#[derive(Debug)]
pub struct Note {
	pub id: i64,
	pub content: String,
	pub created_at: PrimitiveDateTime,
	pub embedding: Option<Vec<f32>>,
}

impl NoteRow {
	pub fn into_note(self) -> Result<Note> {
		let created_at = timestamp::parse(&self.created_at)?;
		let embedding = match self.embedding {
			Some(raw) => Some(serde_json::from_str(&raw)?),
			None => None,
		};

		Ok(Note { id: self.id, content: self.content, created_at, embedding })
	}
}
