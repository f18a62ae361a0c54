use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// Speed-reading tracker dashboard.
///
/// Every option can also come from the environment (or a `.env` file).
#[derive(Debug, Parser)]
#[command(name = "speedread", version)]
pub struct Cli {
    /// SQLite file holding books, sessions and logins
    #[arg(long, env = "SPEEDREAD_DB_PATH", default_value = "app.db", global = true)]
    pub db_path: PathBuf,

    #[arg(long, env = "SPEEDREAD_HOST", default_value = "127.0.0.1", global = true)]
    pub host: String,

    #[arg(long, env = "SPEEDREAD_PORT", default_value_t = 8050, global = true)]
    pub port: u16,

    /// Base64 AES-256 key sealing stored passwords; enables login when set
    #[arg(long, env = "SPEEDREAD_APP_KEY", hide_env_values = true, global = true)]
    pub app_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the dashboard (default)
    Serve,
    /// Print a fresh base64 app key
    GenKey,
    /// Store a dashboard login, sealed with the app key
    AddUser { username: String, password: String },
}

#[derive(Debug)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    app_key: Option<String>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            db_path: cli.db_path,
            host: cli.host,
            port: cli.port,
            app_key: cli.app_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Decoded on demand so `gen-key` still runs while the configured key is bad.
    pub fn app_key(&self) -> Result<Option<[u8; 32]>> {
        self.app_key
            .as_deref()
            .map(speedread_crypto::key_from_base64)
            .transpose()
            .context("SPEEDREAD_APP_KEY is not a base64 256-bit key")
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
