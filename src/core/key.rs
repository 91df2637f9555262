//! Scope public keys.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::cipher::KEY_SIZE;
use crate::core::types::KeyId;
use crate::error::{CipherError, Result};

/// The active public key of one scope.
///
/// Fetched once per dispatch and never cached across targets: scopes
/// rotate their keys independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    key_id: KeyId,
    bytes: [u8; KEY_SIZE],
}

impl PublicKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKeyLength` unless `bytes` is exactly
    /// 32 bytes long.
    pub fn new(key_id: impl Into<KeyId>, bytes: &[u8]) -> Result<Self> {
        let array = <[u8; KEY_SIZE]>::try_from(bytes).map_err(|_| CipherError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self {
            key_id: key_id.into(),
            bytes: array,
        })
    }

    /// Decode a key as returned by the public key endpoint (standard base64).
    pub fn from_base64(key_id: impl Into<KeyId>, encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidKeyEncoding(e.to_string()))?;
        Self::new(key_id, &bytes)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}
