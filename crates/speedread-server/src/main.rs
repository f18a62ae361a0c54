mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;

use speedread_api::auth::{self, AppStateInner};
use speedread_db::Database;

use crate::config::{Cli, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speedread=debug,speedread_api=debug,speedread_db=debug,tower_http=debug".into()),
        )
        .init();

    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Serve);
    let config = Config::from_cli(cli);

    match command {
        Command::Serve => serve(config).await,
        Command::GenKey => {
            println!("{}", speedread_crypto::key_to_base64(&speedread_crypto::generate_key()));
            Ok(())
        }
        Command::AddUser { username, password } => {
            let key = config
                .app_key()?
                .context("add-user needs SPEEDREAD_APP_KEY (generate one with `speedread gen-key`)")?;
            let db = Database::open(&config.db_path)?;
            auth::add_user(&db, &key, &username, &password)
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let app_key = config.app_key()?;
    let db = Database::open(&config.db_path)?;
    let state = AppStateInner::new(db, app_key);

    let app = speedread_api::router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("speedread listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down...");
    }
}
