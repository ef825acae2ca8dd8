use clap::Parser;

use mnema_mcp::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	let args = Args::parse();

	mnema_mcp::run(args).await
}
