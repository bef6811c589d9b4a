//! Named secret fields and their canonical byte encoding.
//!
//! The field store is the only place decrypted secrets live. Values sit in
//! scrubbing buffers zeroized on drop, and the canonical serialization is
//! deterministic: identical field sets always produce identical plaintext
//! bytes, regardless of insertion order.

use std::collections::BTreeMap;

use thiserror::Error;
use zeroize::Zeroize;

/// Errors that can occur on field store operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// `add` refuses to overwrite an existing field.
    #[error("Field already exists: {0}")]
    DuplicateField(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Serialized store bytes do not parse. The store is left untouched.
    #[error("Secret store bytes are malformed")]
    CorruptStore,
}

/// A secret value held in a scrubbing buffer, zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(Vec<u8>);

impl SecretValue {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self(value.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SecretValue {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretValue").field(&"[REDACTED]").finish()
    }
}

/// In-memory mapping of unique field names to secret values.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldStore {
    // BTreeMap keeps names sorted, which is what makes serialize canonical
    fields: BTreeMap<String, SecretValue>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new field. Fails with [`FieldError::DuplicateField`] if the
    /// name is taken; the store is unchanged on failure.
    pub fn add(&mut self, name: &str, value: SecretValue) -> Result<(), FieldError> {
        if self.fields.contains_key(name) {
            return Err(FieldError::DuplicateField(name.to_string()));
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes a field. Fails with [`FieldError::FieldNotFound`] if absent;
    /// the store is unchanged on failure.
    pub fn remove(&mut self, name: &str) -> Result<(), FieldError> {
        match self.fields.remove(name) {
            Some(_) => Ok(()),
            None => Err(FieldError::FieldNotFound(name.to_string())),
        }
    }

    /// Returns a field's value without mutating anything.
    pub fn view(&self, name: &str) -> Result<&SecretValue, FieldError> {
        self.fields
            .get(name)
            .ok_or_else(|| FieldError::FieldNotFound(name.to_string()))
    }

    /// Returns all field names in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical length-prefixed encoding: a u32 field count, then per
    /// field a u32 name length, the UTF-8 name, a u32 value length, and the
    /// value bytes, all big-endian, in sorted name order.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.fields.len() as u32).to_be_bytes());
        for (name, value) in &self.fields {
            out.extend_from_slice(&(name.len() as u32).to_be_bytes());
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(&(value.as_bytes().len() as u32).to_be_bytes());
            out.extend_from_slice(value.as_bytes());
        }
        out
    }

    /// Inverse of [`serialize`](Self::serialize). Fails with
    /// [`FieldError::CorruptStore`] on any structural problem, leaving no
    /// partial state behind.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, FieldError> {
        let mut cursor = 0usize;
        let count = read_u32(bytes, &mut cursor)? as usize;

        let mut fields = BTreeMap::new();
        for _ in 0..count {
            let name_len = read_u32(bytes, &mut cursor)? as usize;
            let name_bytes = read_slice(bytes, &mut cursor, name_len)?;
            let name = std::str::from_utf8(name_bytes)
                .map_err(|_| FieldError::CorruptStore)?
                .to_string();

            let value_len = read_u32(bytes, &mut cursor)? as usize;
            let value = read_slice(bytes, &mut cursor, value_len)?;

            if fields.insert(name, SecretValue::new(value)).is_some() {
                return Err(FieldError::CorruptStore);
            }
        }

        if cursor != bytes.len() {
            return Err(FieldError::CorruptStore);
        }

        Ok(Self { fields })
    }
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32, FieldError> {
    let slice = read_slice(bytes, cursor, 4)?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(slice);
    Ok(u32::from_be_bytes(buf))
}

fn read_slice<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8], FieldError> {
    let end = cursor.checked_add(len).ok_or(FieldError::CorruptStore)?;
    if end > bytes.len() {
        return Err(FieldError::CorruptStore);
    }
    let slice = &bytes[*cursor..end];
    *cursor = end;
    Ok(slice)
}
