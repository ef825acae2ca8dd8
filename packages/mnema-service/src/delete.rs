use crate::{NoteService, Result};

impl NoteService {
	/// Reports whether a note existed and was removed. Deleting an absent id is
	/// `false`, not an error, so the operation is idempotent to the caller.
	pub async fn delete_note(&self, id: i64) -> Result<bool> {
		let result =
			sqlx::query("DELETE FROM notes WHERE id = ?").bind(id).execute(&self.db.pool).await?;
		let deleted = result.rows_affected() > 0;

		if deleted {
			tracing::info!(id, "Deleted note.");
		}

		Ok(deleted)
	}
}
