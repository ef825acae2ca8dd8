use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mnema_api::Args::parse();

	mnema_api::run(args).await
}
