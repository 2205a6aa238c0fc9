use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tasker_core::config::TaskerConfig;
use tracing::{info, warn};

mod app;
mod http;

/// Personal task scheduler: task API, repeat-date calculator and web UI.
#[derive(Debug, Parser)]
#[command(name = "tasker-gateway", version)]
struct Cli {
    /// Path to tasker.toml (default: ~/.tasker/tasker.toml).
    #[arg(long, env = "TASKER_CONFIG")]
    config: Option<String>,

    /// Listen port, overriding the config file.
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file, overriding the config file.
    #[arg(long)]
    db: Option<String>,

    /// Pin "today" to a YYYYMMDD date instead of the host clock.
    #[arg(long, env = "TASKER_TODAY", value_parser = parse_today)]
    today: Option<NaiveDate>,
}

fn parse_today(text: &str) -> Result<NaiveDate, String> {
    tasker_scheduler::parse_date(text).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasker_gateway=info,tasker_tasks=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = TaskerConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        TaskerConfig::default()
    });
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    let db = open_database(&config.database.path)?;
    let tasks = tasker_tasks::TaskStore::new(db)?;
    info!("database schema ready");

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    info!(web_dir = %config.web.dir, "serving static files");

    let clock = match cli.today {
        Some(date) => {
            warn!(today = %date, "clock pinned, ignoring the host date");
            app::Clock::Fixed(date)
        }
        None => app::Clock::System,
    };
    let state = Arc::new(app::AppState::new(config, tasks).with_clock(clock));
    let router = app::build_router(state);

    info!("Tasker listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tasker stopped");
    Ok(())
}

/// Open the SQLite file, creating its parent directory on first run.
fn open_database(path: &str) -> tasker_core::Result<rusqlite::Connection> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    info!(path = %path, "opening SQLite database");

    let db = rusqlite::Connection::open(path)
        .map_err(|e| tasker_core::TaskerError::Database(e.to_string()))?;
    db.execute_batch("PRAGMA journal_mode=WAL;")
        .map_err(|e| tasker_core::TaskerError::Database(e.to_string()))?;
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
