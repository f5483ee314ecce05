mod builds;
mod checkout;
mod cli;
mod config;
mod context;
mod error;
mod model;
mod platform;
mod util;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use context::Context;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    // Load config
    let config = config::load_config(cli.config.as_deref())?;
    let ctx = Context::connect(config);

    let mut stdout = std::io::stdout();
    cli::run(&ctx, cli.command, &mut stdout).await?;

    Ok(())
}
