use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use planforge_cli::commands::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let exit_code = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute().await })?;

    std::process::exit(exit_code);
}
