//! Authenticated encryption of serialized session state.
//!
//! ChaCha20-Poly1305 with a fresh random nonce per call. The 16-byte
//! Poly1305 tag is carried separately from the ciphertext so the persisted
//! session record stores {nonce, ciphertext, tag} as distinct fields and a
//! ciphertext is never written without its tag.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use super::kdf::MasterKey;

/// Nonce size for ChaCha20-Poly1305.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size.
pub const TAG_SIZE: usize = 16;

/// Errors that can occur during authenticated encryption.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Wrong key or tampered data. Deliberately carries no detail about
    /// where verification failed.
    #[error("Authentication failure: wrong password or tampered data")]
    AuthenticationFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Output of one encryption call.
#[derive(Debug, Clone)]
pub struct SealedBox {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_SIZE],
}

/// Encrypts plaintext under the given key with a fresh random nonce.
pub fn encrypt(plaintext: &[u8], key: &MasterKey) -> Result<SealedBox, CipherError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // encrypt() appends the tag to the ciphertext; split it back off
    let mut combined = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let split_at = combined.len() - TAG_SIZE;
    let tag_bytes = combined.split_off(split_at);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&tag_bytes);

    Ok(SealedBox {
        nonce: nonce_bytes,
        ciphertext: combined,
        tag,
    })
}

/// Decrypts and verifies a sealed box.
///
/// Any mismatch (wrong key, flipped ciphertext bit, flipped tag bit) fails
/// with [`CipherError::AuthenticationFailure`] and returns no partial
/// plaintext. Tag comparison happens inside the AEAD in constant time.
pub fn decrypt(
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
    key: &MasterKey,
) -> Result<Vec<u8>, CipherError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CipherError::AuthenticationFailure)?;

    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);

    cipher
        .decrypt(Nonce::from_slice(nonce), combined.as_slice())
        .map_err(|_| CipherError::AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(fill: u8) -> MasterKey {
        MasterKey::from_bytes([fill; 32])
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key(0x42);
        let plaintext = b"field store bytes";

        let sealed = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &key).unwrap();

        assert_eq!(plaintext.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = encrypt(b"secret", &test_key(0x01)).unwrap();
        let result = decrypt(
            &sealed.nonce,
            &sealed.ciphertext,
            &sealed.tag,
            &test_key(0x02),
        );

        assert!(matches!(result, Err(CipherError::AuthenticationFailure)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key(0x42);
        let mut sealed = encrypt(b"secret data", &key).unwrap();

        for bit in [0, 3, 7] {
            sealed.ciphertext[0] ^= 1 << bit;
            let result = decrypt(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &key);
            assert!(matches!(result, Err(CipherError::AuthenticationFailure)));
            sealed.ciphertext[0] ^= 1 << bit;
        }

        // Untampered still decrypts
        assert!(decrypt(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &key).is_ok());
    }

    #[test]
    fn test_tampered_tag_fails() {
        let key = test_key(0x42);
        let mut sealed = encrypt(b"secret data", &key).unwrap();

        sealed.tag[TAG_SIZE - 1] ^= 0x80;
        let result = decrypt(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &key);

        assert!(matches!(result, Err(CipherError::AuthenticationFailure)));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let key = test_key(0x42);
        let a = encrypt(b"same input", &key).unwrap();
        let b = encrypt(b"same input", &key).unwrap();

        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key(0x42);
        let sealed = encrypt(b"", &key).unwrap();

        assert!(sealed.ciphertext.is_empty());
        let decrypted = decrypt(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &key).unwrap();
        assert!(decrypted.is_empty());
    }
}
