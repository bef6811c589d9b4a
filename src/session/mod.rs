//! Session lifecycle and persistence.
//!
//! This module provides:
//! - The in-memory field store of named secrets
//! - The session manager composing key derivation, encryption, and the codec
//! - The persisted session record and its directory-keyed store

pub mod fields;
pub mod manager;
pub mod record;

pub use fields::{FieldError, FieldStore, SecretValue};
pub use manager::{Session, SessionError};
pub use record::{RecordError, RecordStore, SessionRecord, FORMAT_VERSION};
