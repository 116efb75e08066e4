use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = essenza_api::Args::parse();
	essenza_api::run(args).await
}
