//! Persisted session records and the directory-keyed record store.
//!
//! Each session lives in one JSON file named by its uuid. Byte fields are
//! base64-encoded strings. The salt and nonce are not secret; all field
//! data is inside `ciphertext`, sealed by `tag`, and a ciphertext is never
//! written without its tag.

use std::fs;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::crypto::{NONCE_SIZE, SALT_SIZE, TAG_SIZE};

/// Current on-disk record format version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors that can occur in the record store.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("No sessions exist yet")]
    Empty,

    #[error("Multiple sessions match; specify one by uuid or name")]
    Ambiguous,

    #[error("Session record is corrupt: {0}")]
    Corrupt(String),

    #[error("Unsupported record format version: {0}")]
    UnsupportedVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One persisted session: everything needed to reopen it with the master
/// password.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionRecord {
    /// Record format version, checked on load.
    pub format_version: u32,
    /// Immutable session identity.
    pub uuid: Uuid,
    /// Optional human-readable label, stored in the clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base64 of the KDF salt.
    pub salt: String,
    /// Base64 of the AEAD nonce.
    pub nonce: String,
    /// Base64 of the encrypted field store.
    pub ciphertext: String,
    /// Base64 of the authentication tag.
    pub tag: String,
}

impl SessionRecord {
    /// Assembles a record from raw parts, base64-encoding the byte fields.
    pub fn new(
        uuid: Uuid,
        name: Option<String>,
        salt: &[u8; SALT_SIZE],
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
        tag: &[u8; TAG_SIZE],
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            uuid,
            name,
            salt: BASE64.encode(salt),
            nonce: BASE64.encode(nonce),
            ciphertext: BASE64.encode(ciphertext),
            tag: BASE64.encode(tag),
        }
    }

    pub fn salt_bytes(&self) -> Result<[u8; SALT_SIZE], RecordError> {
        decode_fixed(&self.salt, "salt")
    }

    pub fn nonce_bytes(&self) -> Result<[u8; NONCE_SIZE], RecordError> {
        decode_fixed(&self.nonce, "nonce")
    }

    pub fn tag_bytes(&self) -> Result<[u8; TAG_SIZE], RecordError> {
        decode_fixed(&self.tag, "tag")
    }

    pub fn ciphertext_bytes(&self) -> Result<Vec<u8>, RecordError> {
        BASE64
            .decode(&self.ciphertext)
            .map_err(|e| RecordError::Corrupt(format!("ciphertext: {e}")))
    }
}

fn decode_fixed<const N: usize>(encoded: &str, field: &str) -> Result<[u8; N], RecordError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| RecordError::Corrupt(format!("{field}: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| RecordError::Corrupt(format!("{field}: wrong length")))
}

/// Directory-keyed store of session records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Opens the store, creating the session directory if needed.
    pub fn open(config: &Config) -> Result<Self, RecordError> {
        fs::create_dir_all(&config.session_dir)?;
        Ok(Self {
            dir: config.session_dir.clone(),
        })
    }

    fn record_path(&self, uuid: &Uuid) -> PathBuf {
        self.dir.join(format!("{uuid}.json"))
    }

    /// Saves a record atomically: write to a temp file in the same
    /// directory, then rename over the final path. A partially written
    /// record is never observable, even across an interrupt.
    pub fn save(&self, record: &SessionRecord) -> Result<(), RecordError> {
        let path = self.record_path(&record.uuid);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RecordError::Corrupt(e.to_string()))?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Loads a record by uuid, checking the format version.
    pub fn load(&self, uuid: &Uuid) -> Result<SessionRecord, RecordError> {
        let path = self.record_path(uuid);
        if !path.exists() {
            return Err(RecordError::NotFound(uuid.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let record: SessionRecord =
            serde_json::from_str(&content).map_err(|e| RecordError::Corrupt(e.to_string()))?;

        if record.format_version != FORMAT_VERSION {
            return Err(RecordError::UnsupportedVersion(record.format_version));
        }
        Ok(record)
    }

    /// Deletes a record.
    pub fn delete(&self, uuid: &Uuid) -> Result<(), RecordError> {
        let path = self.record_path(uuid);
        if !path.exists() {
            return Err(RecordError::NotFound(uuid.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Lists every readable session record. Foreign files in the session
    /// directory are ignored.
    pub fn list(&self) -> Result<Vec<SessionRecord>, RecordError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            if let Ok(record) = serde_json::from_str::<SessionRecord>(&content) {
                if record.format_version == FORMAT_VERSION {
                    records.push(record);
                }
            }
        }
        records.sort_by_key(|r| r.uuid);
        Ok(records)
    }

    /// Resolves a session by uuid, uuid prefix, or name. With no selector,
    /// falls back to the single existing session, as the interactive flow
    /// expects when only one vault exists.
    pub fn resolve(&self, selector: Option<&str>) -> Result<SessionRecord, RecordError> {
        let records = self.list()?;

        let Some(selector) = selector else {
            let mut iter = records.into_iter();
            return match (iter.next(), iter.next()) {
                (Some(only), None) => Ok(only),
                (None, _) => Err(RecordError::Empty),
                _ => Err(RecordError::Ambiguous),
            };
        };

        let mut matches = records.into_iter().filter(|r| {
            r.name.as_deref() == Some(selector) || r.uuid.to_string().starts_with(selector)
        });

        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(RecordError::NotFound(selector.to_string())),
            _ => Err(RecordError::Ambiguous),
        }
    }
}
