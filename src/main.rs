use anyhow::Result;
use clap::Parser;
use spotlight::cli::{Cli, Config};
use spotlight::games::spotlight::run_game;
use spotlight::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_telemetry(&config)?;

    run_game(config).await
}
