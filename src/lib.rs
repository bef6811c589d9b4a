//! # Ghostpass - secrets hidden in plain sight
//!
//! Ghostpass is a local secret manager with a twist: beyond encrypting a
//! named-secret store under a master password, any single secret can be
//! re-encoded into ordinary-looking carrier text, so the artifact you store
//! or share never visibly resembles a secret container.
//!
//! ## Overview
//!
//! - A **session** is an encrypted collection of named secret fields,
//!   persisted as one JSON record keyed by uuid
//! - The master password is stretched with Argon2id over a per-session
//!   random salt; the field store is sealed with ChaCha20-Poly1305, so any
//!   tampering with the record is detected on open
//! - The **plainsight codec** embeds a secret's bytes into the letter case
//!   of a carrier text's words; the result reads like the carrier and
//!   decodes back bit-for-bit with no password and no original carrier
//! - Secret material (passwords, derived keys, field values) lives in
//!   scrubbing buffers zeroized on every exit path
//!
//! ## Example
//!
//! ```rust
//! use ghostpass::{Config, Corpus, Password, RecordStore, SecretValue, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let config = Config::with_dir(dir.path());
//! let store = RecordStore::open(&config)?;
//!
//! let corpus = Corpus::new("the quick brown fox jumps over the lazy dog ".repeat(40));
//!
//! // Create a session, add a secret, persist it
//! let mut session = Session::init_state(Password::new("hunter2"), &corpus, None)?;
//! session.add("email", SecretValue::new("a@b.com"))?;
//! let record = session.export(&store)?;
//!
//! // Reopen it later with the same password
//! let session = Session::open(&record, Password::new("hunter2"))?;
//! assert_eq!(session.view("email")?.as_bytes(), b"a@b.com");
//!
//! // Share one secret as innocuous-looking text
//! let stego = session.encrypt_field("email", &corpus)?;
//! assert_eq!(Session::decrypt_field(&stego)?.as_bytes(), b"a@b.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: key derivation (Argon2id) and authenticated encryption
//!   (ChaCha20-Poly1305)
//! - [`stego`]: the plainsight codec over carrier text
//! - [`session`]: field store, session lifecycle, persisted records
//! - [`config`]: explicit runtime configuration

pub mod config;
pub mod crypto;
pub mod session;
pub mod stego;

// Re-export commonly used types at the crate root
pub use config::{Config, ConfigError};
pub use crypto::{CipherError, KdfError, MasterKey, Password, SealedBox};
pub use session::{
    FieldError, FieldStore, RecordError, RecordStore, SecretValue, Session, SessionError,
    SessionRecord, FORMAT_VERSION,
};
pub use stego::{Corpus, CorpusError, StegoError, FRAME_OVERHEAD, STEGO_VERSION};
