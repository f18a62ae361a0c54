pub mod migrations;
pub mod models;
pub mod queries;

pub use models::{BookRow, CredentialRow, SessionRow, Table, TableRow};

use anyhow::Result;
use rusqlite::{Connection, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Handle to the SQLite file. Holds no connection: every access opens its
/// own, so reads always see what is on disk.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = connect(path)?;
        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = connect(&self.path)?;
        f(&conn)
    }

    /// Run `f` inside an IMMEDIATE transaction. The write lock is taken up
    /// front so a max-id read and the insert that follows it cannot interleave
    /// with another writer.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = connect(&self.path)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;

    // WAL mode for concurrent reads
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.busy_timeout(Duration::from_secs(5))?;

    Ok(conn)
}
