use serde::{Deserialize, Serialize};

use mnema_storage::models::NoteRow;

use crate::{Error, NoteResponse, NoteService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default = "default_limit")]
	pub limit: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchItem {
	pub note: NoteResponse,
	pub similarity: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<SearchItem>,
}

pub(crate) fn default_limit() -> i64 {
	5
}

impl NoteService {
	/// Linear scan: the query is embedded once, then every persisted note with an
	/// embedding is refetched and compared. No index, no vector cache across calls.
	pub async fn search_notes(&self, req: SearchRequest) -> Result<SearchResponse> {
		if req.query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let query_vec = self.embed_text(&req.query).await?;
		// Non-positive limits clamp to an empty result rather than wrapping around.
		let limit = usize::try_from(req.limit).unwrap_or(0);
		let rows: Vec<NoteRow> =
			sqlx::query_as("SELECT id, content, created_at, embedding FROM notes ORDER BY id")
				.fetch_all(&self.db.pool)
				.await?;
		let mut items = Vec::with_capacity(rows.len());

		for row in rows {
			let note = row.into_note()?;
			let Some(embedding) = note.embedding else {
				continue;
			};
			let similarity = cosine_similarity(&query_vec, &embedding);

			items.push(SearchItem {
				note: NoteResponse {
					id: note.id,
					content: note.content,
					created_at: note.created_at,
				},
				similarity,
			});
		}

		// Stable sort: equal scores keep insertion order.
		items.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
		items.truncate(limit);

		Ok(SearchResponse { items })
	}
}

/// Normalized dot product in `[-1, 1]`. Magnitude matters for raw embeddings, so plain
/// dot product would not do. Zero-magnitude vectors score 0.0.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	let mut dot = 0.0_f32;
	let mut norm_a = 0.0_f32;
	let mut norm_b = 0.0_f32;

	for (x, y) in a.iter().zip(b.iter()) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	let denom = norm_a.sqrt() * norm_b.sqrt();

	if denom == 0.0 {
		return 0.0;
	}

	dot / denom
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_vectors_score_one() {
		let vec = [0.5, 1.5, -2.0];

		assert!((cosine_similarity(&vec, &vec) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn orthogonal_vectors_score_zero() {
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
	}

	#[test]
	fn opposite_vectors_score_negative_one() {
		let score = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);

		assert!((score + 1.0).abs() < 1e-6);
	}

	#[test]
	fn magnitude_does_not_change_the_score() {
		let a = [1.0, 2.0, 3.0];
		let b = [10.0, 20.0, 30.0];

		assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn zero_vectors_score_zero() {
		assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
	}

	#[test]
	fn default_limit_is_five() {
		let req: SearchRequest =
			serde_json::from_str(r#"{ "query": "anything" }"#).expect("parse failed");

		assert_eq!(req.limit, 5);
	}
}
