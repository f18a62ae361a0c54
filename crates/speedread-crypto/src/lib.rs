/// Speedread Crypto Library
///
/// Passwords in the `auth` table are sealed with AES-256-GCM under a single
/// application key supplied out-of-band (`SPEEDREAD_APP_KEY`, base64).
pub mod credentials;
pub mod keys;

pub use credentials::{SealedPassword, decrypt_password, encrypt_password, verify_password};
pub use keys::{generate_key, key_from_base64, key_to_base64};
