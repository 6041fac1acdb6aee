mod app;
mod cli;
mod effects;
mod logging;
mod render;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::initialize(cli.log.into());
    app::run(cli).await
}
