//! Cryptographic operations for Ghostpass.
//!
//! This module provides:
//! - Password-based key derivation (Argon2id)
//! - Authenticated encryption of serialized session state (ChaCha20-Poly1305)

pub mod cipher;
pub mod kdf;

pub use cipher::{decrypt, encrypt, CipherError, SealedBox, NONCE_SIZE, TAG_SIZE};
pub use kdf::{derive, generate_salt, KdfError, MasterKey, Password, KEY_SIZE, SALT_SIZE};
