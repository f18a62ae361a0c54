use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Generate a random 256-bit application key, the value `speedread gen-key`
/// prints for `SPEEDREAD_APP_KEY`.
pub fn generate_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode a key to base64 for the environment file.
pub fn key_to_base64(key: &[u8; 32]) -> String {
    BASE64.encode(key)
}

/// Decode a `SPEEDREAD_APP_KEY` value. Surrounding whitespace from a `.env`
/// line is ignored; anything but exactly 32 bytes is rejected.
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32]> {
    let bytes = BASE64.decode(encoded.trim())?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("Invalid key length"))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip_tolerates_trailing_newline() {
        let key = generate_key();
        let encoded = format!("{}\n", key_to_base64(&key));
        assert_eq!(key_from_base64(&encoded).unwrap(), key);
    }

    #[test]
    fn short_key_is_rejected() {
        let err = key_from_base64(&BASE64.encode([7u8; 16])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid key length");
    }

    #[test]
    fn keys_are_random() {
        assert_ne!(generate_key(), generate_key());
    }
}
