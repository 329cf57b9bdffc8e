// Leaders table entry point.
//
// Startup sequence:
// 1. Pick the log destination and initialize tracing
// 2. Parse the command line
// 3. Load config
// 4. Build the HTTP stats source and leaders service
// 5. Render the requested table to stdout

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use leaders_app::cli::{self, Cli};
use leaders_app::config;
use leaders_app::logging::{self, LogDestination};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    let destination = LogDestination::from_os_args(std::env::args_os());
    logging::init_tracing(&destination)?;

    // 2. Command line
    let cli = Cli::parse();

    // 3. Config
    let config =
        config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    info!(
        team_id = config.bot.team_id,
        game_type = %config.stats.game_type,
        "config loaded"
    );

    // 4. Leaders service
    let leaders = cli::build_leaders(&config)?;

    // 5. Render
    match cli::run(&cli, &leaders).await {
        Ok(table) => {
            print!("{table}");
            Ok(())
        }
        Err(e) => {
            error!("{e:#}");
            Err(e)
        }
    }
}
