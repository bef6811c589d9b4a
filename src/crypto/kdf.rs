//! Password-based key derivation.
//!
//! Turns a master password plus a per-session random salt into a fixed-length
//! symmetric key using Argon2id, a deliberately slow and memory-hard function
//! so offline password guessing stays expensive. The salt is not secret and is
//! stored unencrypted alongside the ciphertext in the session record.

use argon2::{Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroize;

/// Size of the derived symmetric key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the per-session salt in bytes.
pub const SALT_SIZE: usize = 32;

/// Argon2id memory cost in KiB (64 MiB).
const ARGON2_MEMORY_KIB: u32 = 65536;

/// Argon2id iteration count.
const ARGON2_ITERATIONS: u32 = 3;

/// Argon2id lane count.
const ARGON2_PARALLELISM: u32 = 4;

/// Errors that can occur during key derivation.
#[derive(Error, Debug)]
pub enum KdfError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),
}

/// A master password held in a scrubbing buffer.
///
/// The buffer is zeroized on drop, so consuming a `Password` is enough to
/// guarantee the cleartext does not outlive the call that used it.
pub struct Password(Vec<u8>);

impl Password {
    /// Wraps password bytes. The original buffer is moved, not copied.
    pub fn new(password: impl Into<Vec<u8>>) -> Self {
        Self(password.into())
    }

    /// Returns the raw password bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose password material in debug output
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

/// A derived 256-bit symmetric key, zeroized on drop.
pub struct MasterKey([u8; KEY_SIZE]);

impl MasterKey {
    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MasterKey").field(&"[REDACTED]").finish()
    }
}

/// Generates a fresh random per-session salt.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derives a fixed-length key from a password and salt.
///
/// Deterministic for the same inputs; the password buffer is only borrowed
/// and never copied or logged here.
pub fn derive(password: &Password, salt: &[u8; SALT_SIZE]) -> Result<MasterKey, KdfError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_SIZE),
    )
    .map_err(|e| KdfError::DerivationFailed(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| KdfError::DerivationFailed(e.to_string()))?;

    Ok(MasterKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let password = Password::new("hunter2");
        let salt = generate_salt();

        let key1 = derive(&password, &salt).unwrap();
        let key2 = derive(&password, &salt).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salts_different_keys() {
        let password = Password::new("hunter2");
        let salt1 = generate_salt();
        let salt2 = generate_salt();

        let key1 = derive(&password, &salt1).unwrap();
        let key2 = derive(&password, &salt2).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let salt = generate_salt();

        let key1 = derive(&Password::new("hunter2"), &salt).unwrap();
        let key2 = derive(&Password::new("hunter3"), &salt).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_salt_uniqueness() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_debug_output_redacts() {
        let password = Password::new("hunter2");
        let salt = generate_salt();
        let key = derive(&password, &salt).unwrap();

        assert!(!format!("{:?}", password).contains("hunter2"));
        assert!(format!("{:?}", key).contains("REDACTED"));
    }
}
