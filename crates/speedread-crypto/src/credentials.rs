use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, rand_core::RngCore},
};
use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use subtle::ConstantTimeEq;

/// A password as stored in the `auth` table: base64 ciphertext and nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPassword {
    pub ciphertext: String,
    pub nonce: String,
}

/// Encrypt a password with AES-256-GCM under the application key.
pub fn encrypt_password(key: &[u8; 32], password: &str) -> Result<SealedPassword> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; 12];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, password.as_bytes())
        .map_err(|e| anyhow!("Encryption failed: {}", e))?;

    Ok(SealedPassword {
        ciphertext: BASE64.encode(ciphertext),
        nonce: BASE64.encode(nonce_bytes),
    })
}

/// Decrypt a stored password.
pub fn decrypt_password(key: &[u8; 32], sealed: &SealedPassword) -> Result<String> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let ciphertext = BASE64.decode(&sealed.ciphertext)?;
    let nonce_bytes = BASE64.decode(&sealed.nonce)?;
    if nonce_bytes.len() != 12 {
        return Err(anyhow!("Invalid nonce length"));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_slice())
        .map_err(|e| anyhow!("Decryption failed: {}", e))?;

    Ok(String::from_utf8(plaintext)?)
}

/// Check `candidate` against a stored password without an early exit on
/// the first differing byte. Any decryption failure counts as a mismatch.
pub fn verify_password(key: &[u8; 32], sealed: &SealedPassword, candidate: &str) -> bool {
    match decrypt_password(key, sealed) {
        Ok(stored) => stored.as_bytes().ct_eq(candidate.as_bytes()).into(),
        Err(_) => false,
    }
}
