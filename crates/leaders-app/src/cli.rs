// Command line front end: render one role's leaders table to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use leaders_core::{CachePolicy, HttpStatsSource, LeaderRequest, Leaders, Role, StatsSource};

use crate::config::Config;
use crate::logging::is_log_arg;

#[derive(Debug, Parser)]
#[command(name = "leaders", about = "Render a team's league leaders table")]
pub struct Cli {
    /// hitter or pitcher
    pub role: Role,

    /// Stat keys to render, in order. Defaults to every category for the role.
    /// A trailing `log=stdout` (or `log=1`) sends logs to stdout.
    pub stats: Vec<String>,

    /// Season; defaults to the current calendar year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Provider game type code; defaults to the configured one.
    #[arg(long)]
    pub game_type: Option<String>,

    /// Leaders kept per category; defaults to the configured count.
    #[arg(long)]
    pub count: Option<usize>,

    /// Config file; defaults to config/leaders.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip any cached result and fetch again.
    #[arg(long)]
    pub refresh: bool,
}

impl Cli {
    /// Requested stat keys, lowercased, with `log=` arguments removed. Empty
    /// means all of the role's categories.
    pub fn stat_keys(&self) -> Vec<String> {
        let keys: Vec<String> = self
            .stats
            .iter()
            .filter(|arg| !is_log_arg(arg))
            .map(|arg| arg.to_lowercase())
            .collect();
        if keys.is_empty() {
            self.role
                .categories()
                .iter()
                .map(|c| c.key.to_string())
                .collect()
        } else {
            keys
        }
    }

    pub fn request(&self) -> LeaderRequest {
        let mut request = LeaderRequest {
            year: self.year,
            game_type: self.game_type.clone(),
            count: self.count,
            ..LeaderRequest::default()
        };
        if self.refresh {
            request.policy = CachePolicy::Refresh;
        }
        request
    }
}

/// Build the HTTP-backed leaders service from config.
pub fn build_leaders(config: &Config) -> anyhow::Result<Leaders<HttpStatsSource>> {
    let source = HttpStatsSource::with_settings(
        config.stats.base_url.clone(),
        &config.bot.full_user_agent(),
        config.http.connect_timeout(),
        config.http.read_timeout(),
    )
    .context("failed to build HTTP client")?;
    Ok(leaders_for(source, config))
}

/// Wrap any stats source with the configured team and defaults.
pub fn leaders_for<S: StatsSource>(source: S, config: &Config) -> Leaders<S> {
    Leaders::new(source, config.bot.team_id)
        .with_defaults(config.stats.game_type.clone(), config.stats.count)
}

/// Render the table the command line asks for.
pub async fn run<S: StatsSource>(cli: &Cli, leaders: &Leaders<S>) -> anyhow::Result<String> {
    let keys = cli.stat_keys();
    for key in &keys {
        if cli.role.category(key).is_none() {
            warn!(role = %cli.role, key = %key, "not a ranked category, row will be empty");
        }
    }

    let request = cli.request();
    let table = leaders
        .render_table(cli.role, keys.as_slice(), &request)
        .await
        .with_context(|| format!("failed to load {} leaders", cli.role))?;
    info!(role = %cli.role, rows = keys.len(), "leaders table rendered");
    Ok(table)
}
