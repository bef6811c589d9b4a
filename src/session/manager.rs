//! Session lifecycle: create, mutate, persist, reopen, destroy.
//!
//! A `Session` only exists in the initialized state: construction goes
//! through [`Session::init_state`] or [`Session::open`], and
//! [`Session::destruct`] consumes the value, so no operation can run on a
//! destroyed session. Key material and field values are zeroized when the
//! session is dropped on any path.

use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::crypto::{self, CipherError, MasterKey, Password, SALT_SIZE};
use crate::session::fields::{FieldError, FieldStore, SecretValue};
use crate::session::record::{RecordError, RecordStore, SessionRecord};
use crate::stego::{self, Corpus, StegoError};

/// Errors that can occur across the session lifecycle.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Wrong master password or tampered session record. Deliberately
    /// carries no detail about what failed or which fields exist.
    #[error("Authentication failure: wrong password or tampered record")]
    AuthenticationFailure,

    /// The record is structurally broken (bad base64, wrong lengths, or
    /// undecodable field data after a successful decrypt).
    #[error("Session record is corrupt")]
    CorruptRecord,

    /// The carrier supplied at initialization cannot hold any payload.
    #[error("Carrier cannot hold any payload")]
    EmptyCarrier,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Stego(#[from] StegoError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Key derivation failed: {0}")]
    Kdf(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),
}

/// An open, decrypted session.
pub struct Session {
    uuid: Uuid,
    name: Option<String>,
    salt: [u8; SALT_SIZE],
    key: MasterKey,
    fields: FieldStore,
}

impl Session {
    /// Creates a fresh session: new uuid, new random salt, key derived from
    /// the password. The carrier is checked here so a useless corpus is
    /// rejected before anything gets persisted. The password is consumed
    /// and its buffer zeroized before this returns.
    pub fn init_state(
        password: Password,
        corpus: &Corpus,
        name: Option<String>,
    ) -> Result<Self, SessionError> {
        if corpus.capacity_bits() == 0 {
            return Err(SessionError::EmptyCarrier);
        }

        let salt = crypto::generate_salt();
        let key = crypto::derive(&password, &salt).map_err(|e| SessionError::Kdf(e.to_string()))?;
        drop(password);

        Ok(Self {
            uuid: Uuid::new_v4(),
            name,
            salt,
            key,
            fields: FieldStore::new(),
        })
    }

    /// The session's immutable identity.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The session's optional human-readable label.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a secret field. Fails on duplicate names without touching the
    /// store.
    pub fn add(&mut self, name: &str, value: SecretValue) -> Result<(), SessionError> {
        Ok(self.fields.add(name, value)?)
    }

    /// Removes a secret field.
    pub fn remove(&mut self, name: &str) -> Result<(), SessionError> {
        Ok(self.fields.remove(name)?)
    }

    /// Returns a field's value.
    pub fn view(&self, name: &str) -> Result<&SecretValue, SessionError> {
        Ok(self.fields.view(name)?)
    }

    /// Returns all field names.
    pub fn list(&self) -> Vec<&str> {
        self.fields.list()
    }

    /// Serializes and encrypts the field store, then writes the session
    /// record. Safe to call repeatedly; each call atomically overwrites the
    /// same record.
    pub fn export(&self, store: &RecordStore) -> Result<SessionRecord, SessionError> {
        let mut plaintext = self.fields.serialize();
        let sealed = crypto::encrypt(&plaintext, &self.key).map_err(|e| match e {
            CipherError::AuthenticationFailure => SessionError::AuthenticationFailure,
            CipherError::EncryptionFailed(msg) => SessionError::Encryption(msg),
        });
        plaintext.zeroize();
        let sealed = sealed?;

        let record = SessionRecord::new(
            self.uuid,
            self.name.clone(),
            &self.salt,
            &sealed.nonce,
            &sealed.ciphertext,
            &sealed.tag,
        );
        store.save(&record)?;
        Ok(record)
    }

    /// Reopens a persisted session with the master password.
    ///
    /// Wrong password and tampered record are indistinguishable from the
    /// outside: both fail with [`SessionError::AuthenticationFailure`] and
    /// reveal nothing about the fields. The password is consumed and
    /// zeroized before this returns.
    pub fn open(record: &SessionRecord, password: Password) -> Result<Self, SessionError> {
        let salt = record
            .salt_bytes()
            .map_err(|_| SessionError::CorruptRecord)?;
        let nonce = record
            .nonce_bytes()
            .map_err(|_| SessionError::CorruptRecord)?;
        let tag = record.tag_bytes().map_err(|_| SessionError::CorruptRecord)?;
        let ciphertext = record
            .ciphertext_bytes()
            .map_err(|_| SessionError::CorruptRecord)?;

        let key = crypto::derive(&password, &salt).map_err(|e| SessionError::Kdf(e.to_string()))?;
        drop(password);

        let mut plaintext = crypto::decrypt(&nonce, &ciphertext, &tag, &key)
            .map_err(|_| SessionError::AuthenticationFailure)?;
        let fields = FieldStore::deserialize(&plaintext).map_err(|_| SessionError::CorruptRecord);
        plaintext.zeroize();

        Ok(Self {
            uuid: record.uuid,
            name: record.name.clone(),
            salt,
            key,
            fields: fields?,
        })
    }

    /// Re-encodes one field's value as plainsight text for out-of-band
    /// sharing. The carrier is an explicit parameter; nothing couples it to
    /// the corpus supplied at initialization.
    pub fn encrypt_field(&self, name: &str, corpus: &Corpus) -> Result<String, SessionError> {
        let value = self.fields.view(name)?;
        Ok(stego::encode(value.as_bytes(), corpus)?)
    }

    /// Recovers a value from plainsight text. Needs no session state or
    /// password; the embedded frame is self-contained.
    pub fn decrypt_field(stego_text: &str) -> Result<SecretValue, SessionError> {
        let payload = stego::decode(stego_text)?;
        Ok(SecretValue::new(payload))
    }

    /// Destroys the session: deletes the persisted record and consumes the
    /// in-memory state. Key material and field values are zeroized as the
    /// value drops. A record that was never exported is not an error.
    pub fn destruct(self, store: &RecordStore) -> Result<(), SessionError> {
        match store.delete(&self.uuid) {
            Ok(()) | Err(RecordError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("fields", &self.fields.list())
            .field("key", &"[REDACTED]")
            .finish()
    }
}
