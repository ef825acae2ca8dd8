pub mod server;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use mnema_service::NoteService;
use mnema_storage::db::Db;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> Result<()> {
	let config = mnema_config::load(&args.config)?;

	init_tracing(&config);

	let mcp_bind = config.service.mcp_bind.clone();
	let db = Db::connect(&config.storage.sqlite).await?;

	db.ensure_schema().await?;

	// The service is constructed here and handed to each session; there is no
	// process-wide shared instance.
	let service = Arc::new(NoteService::new(config, db));

	server::serve_mcp(&mcp_bind, service).await
}

fn init_tracing(config: &mnema_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
