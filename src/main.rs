use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use battleboard::api::state::AppState;
use battleboard::api::{build_router, parse_player_list};
use battleboard::calculate::{aggregate, rank, StatsError};
use battleboard::config::AppConfig;
use battleboard::fetch::{HttpProviderConfig, HttpStatsProvider, StatsProvider};
use battleboard::models::{MetricKey, Mode, Period, Shard, SortDirection, StatsContext};

#[derive(Parser)]
#[command(name = "battleboard")]
#[command(about = "Battle-royale player stats tracker with multi-player comparison")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch, compare and rank a set of players in the terminal
    Compare {
        /// Comma-separated player names (max 10)
        #[arg(long)]
        players: String,

        /// Time period: last7d, last30d, last90d
        #[arg(long, default_value = "last7d")]
        period: String,

        /// Game mode: solo, duo, squad
        #[arg(long, default_value = "squad")]
        mode: String,

        /// Platform shard: steam, xbox, psn, kakao, stadia
        #[arg(long, default_value = "steam")]
        shard: String,

        /// Metric to rank by
        #[arg(long, default_value = "kd_ratio")]
        sort_by: String,

        /// Sort direction: ascending or descending
        #[arg(long, default_value = "descending")]
        direction: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    // Initialize tracing: RUST_LOG wins, then --log-level, then the file.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            cli.log_level.as_deref().unwrap_or(&config.log_level),
        )
    });

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting battleboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let provider = build_provider(&config)?;
            let state = AppState::new(provider, config.profile.clone());

            let app = build_router(state).layer(cors_layer(&config.server.cors_origin)?);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{addr}");
            axum::serve(listener, app).await?;
        }
        Commands::Compare {
            players,
            period,
            mode,
            shard,
            sort_by,
            direction,
        } => {
            let period: Period = period.parse().map_err(anyhow::Error::msg)?;
            let mode: Mode = mode.parse().map_err(anyhow::Error::msg)?;
            let shard: Shard = shard.parse().map_err(anyhow::Error::msg)?;
            let sort_by: MetricKey = sort_by.parse().map_err(anyhow::Error::msg)?;
            let direction: SortDirection = direction.parse().map_err(anyhow::Error::msg)?;
            let context = StatsContext::new(period, mode, shard);

            let list = parse_player_list(&players).map_err(anyhow::Error::msg)?;
            let provider = build_provider(&config)?;

            let mut entries = Vec::with_capacity(list.len());
            let mut failed: Vec<String> = Vec::new();
            for (player_id, display_name) in list {
                match provider.fetch_raw_stats(&player_id, &context).await {
                    Ok(raw) => entries.push((player_id, display_name, raw)),
                    Err(e) => {
                        tracing::error!("Failed to fetch stats for {player_id}: {e}");
                        failed.push(player_id.to_string());
                    }
                }
            }
            if !failed.is_empty() {
                anyhow::bail!(StatsError::Aggregation { players: failed });
            }

            let dataset = aggregate(context, &entries)?;
            let rows = rank(&dataset, sort_by, direction)?;

            println!("\n=== Player Comparison ({context}) ===\n");
            println!(
                "{:<20} {:>7} {:>7} {:>9} {:>9} {:>9} {:>8}",
                "Player", "Kills", "K/D", "Win Rate", "Damage", "Survival", "Matches"
            );
            for entry in &dataset.entries {
                let m = &entry.metrics;
                println!(
                    "{:<20} {:>7.2} {:>7.2} {:>8.1}% {:>9.0} {:>9.0} {:>8}",
                    entry.display_name,
                    m.kills,
                    m.kd_ratio,
                    m.win_rate * 100.0,
                    m.damage_dealt,
                    m.survival_time,
                    m.matches_played
                );
            }

            println!("\n=== Leaderboard ({sort_by}, {direction}) ===\n");
            for row in &rows {
                println!(
                    "  #{:<3} {:<20} {:>8.2}",
                    row.rank,
                    row.entry.display_name,
                    row.entry.metrics.metric(sort_by)
                );
            }
        }
    }

    Ok(())
}

/// Build the HTTP stats provider from configuration.
fn build_provider(config: &AppConfig) -> Result<Arc<dyn StatsProvider>> {
    let api_key = std::env::var(&config.upstream.api_key_env).unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!(
            "{} is not set; upstream requests will be rejected",
            config.upstream.api_key_env
        );
    }

    let provider = HttpStatsProvider::new(HttpProviderConfig {
        base_url: Url::parse(&config.upstream.base_url)?,
        api_key,
        timeout: Duration::from_secs(config.upstream.timeout_seconds),
        cache_dir: config.cache_dir.clone(),
        cache_ttl: Duration::from_secs(config.upstream.cache_ttl_seconds),
    })?;
    Ok(Arc::new(provider))
}

/// CORS layer for the configured origin.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    if origin == "*" {
        return Ok(CorsLayer::permissive());
    }
    let origin: HeaderValue = origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
