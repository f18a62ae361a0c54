use std::sync::Arc;

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tracing::{info, warn};

use speedread_crypto::{SealedPassword, encrypt_password, verify_password};
use speedread_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Key sealing the `auth` table. `None` leaves the dashboard open.
    pub app_key: Option<[u8; 32]>,
}

impl AppStateInner {
    pub fn new(db: Database, app_key: Option<[u8; 32]>) -> AppState {
        if app_key.is_none() {
            warn!("No app key configured; dashboard authentication is disabled");
        }
        Arc::new(Self { db, app_key })
    }
}

/// Split an `Authorization: Basic ...` value into username and password.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = B64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Whether `username` exists and its stored password decrypts to `password`.
pub fn check_credentials(
    db: &Database,
    key: &[u8; 32],
    username: &str,
    password: &str,
) -> Result<bool> {
    let Some(row) = db.get_credential(username)? else {
        return Ok(false);
    };

    let sealed = SealedPassword {
        ciphertext: row.password,
        nonce: row.nonce,
    };
    Ok(verify_password(key, &sealed, password))
}

/// Seal and store a dashboard login.
pub fn add_user(db: &Database, key: &[u8; 32], username: &str, password: &str) -> Result<()> {
    let sealed = encrypt_password(key, password)?;
    db.upsert_credential(username, &sealed.ciphertext, &sealed.nonce)?;
    info!("Stored credentials for {}", username);
    Ok(())
}
