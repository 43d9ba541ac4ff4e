mod cli;
mod commands;

use clap::Parser;
use shared::{init_tracing, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    cli::run(cli, config).await
}
