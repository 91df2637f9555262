//! Sealed secrets ready for submission.

use crate::core::cipher;
use crate::core::key::PublicKey;
use crate::core::secret::SecretBytes;
use crate::core::types::{EncryptedValue, KeyId, SecretName};
use crate::error::Result;

/// A secret value sealed under one scope's public key.
///
/// Sealing is randomized: the same plaintext and key give a different,
/// equally valid ciphertext every time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecret {
    name: SecretName,
    ciphertext: Vec<u8>,
    key_id: KeyId,
}

impl EncryptedSecret {
    /// Seal `value` for `key`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if sealing fails.
    pub fn seal(name: &str, value: &SecretBytes, key: &PublicKey) -> Result<Self> {
        let ciphertext = cipher::seal(value.expose(), key.as_bytes())?;
        Ok(Self {
            name: name.to_string(),
            ciphertext,
            key_id: key.key_id().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Base64 of the ciphertext, the `encrypted_value` field of a write.
    pub fn encoded_value(&self) -> EncryptedValue {
        cipher::encode(&self.ciphertext)
    }
}
