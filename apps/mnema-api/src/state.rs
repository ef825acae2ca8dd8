use std::sync::Arc;

use mnema_service::NoteService;
use mnema_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NoteService>,
}
impl AppState {
	pub async fn new(config: mnema_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.sqlite).await?;

		db.ensure_schema().await?;

		let service = NoteService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
