//! todo-backend
//!
//! HTTP JSON backend for a to-do list stored in SQLite.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::Path;
use todo_backend::api::start_server;
use todo_backend::cli::Cli;
use todo_backend::config::Config;
use todo_backend::db::Database;
use todo_backend::logging::{self, LogTarget};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref().map(Path::new))?;
    cli.apply_overrides(&mut config);
    config.ensure_db_dir()?;

    info!("Database: {}", config.database.url);
    let db = Database::open(&config.database.url)?;

    let mut server = start_server(db.clone(), &config.server.host, config.server.port).await?;

    let stopped = tokio::select! {
        result = server.wait() => Some(result),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            None
        }
    };

    let outcome = match stopped {
        Some(Ok(())) => Err(anyhow!("server stopped before shutdown was requested")),
        Some(Err(e)) => Err(e.context("server failed")),
        None => {
            info!("Received Ctrl-C");
            server.shutdown().await
        }
    };

    if let Err(e) = &outcome {
        error!("{e:#}");
    }

    if db.close()? {
        info!("Database closed");
    } else {
        warn!("Database still referenced at shutdown; leaving it to drop");
    }

    outcome
}
