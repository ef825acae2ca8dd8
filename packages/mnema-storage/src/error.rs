#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Failed to format timestamp.")]
	FormatTimestamp(#[from] time::error::Format),
	#[error("Failed to parse stored timestamp.")]
	ParseTimestamp(#[from] time::error::Parse),
	#[error("Failed to decode stored embedding.")]
	DecodeEmbedding(#[from] serde_json::Error),
}
