pub mod add_note;
pub mod delete;
pub mod list;
pub mod notes;
pub mod search;
pub mod time_serde;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use add_note::AddNoteRequest;
pub use error::{Error, Result};
pub use list::ListResponse;
pub use notes::NoteResponse;
pub use search::{SearchItem, SearchRequest, SearchResponse};

use mnema_config::{Config, EmbeddingProviderConfig};
use mnema_providers::embedding;
use mnema_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam for the external embedding service, so tests can supply a deterministic
/// embedder instead of a network client.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

/// The note store. Owns the persistence pool and the embedding seam; HTTP and MCP
/// handlers construct one explicitly per process rather than sharing module state.
pub struct NoteService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

impl NoteService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}

	pub(crate) async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let embeddings = self.providers.embedding.embed(cfg, &[text.to_string()]).await?;
		let Some(vec) = embeddings.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vec.len() != cfg.dimensions as usize {
			return Err(Error::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vec)
	}
}
