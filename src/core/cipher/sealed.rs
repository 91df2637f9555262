//! Sealed box backend.
//!
//! libsodium-compatible `crypto_box_seal`: a fresh X25519 ephemeral key
//! pair per call, XSalsa20-Poly1305 under the shared secret, nonce
//! derived with BLAKE2b from the ephemeral and recipient public keys.
//! Output is `ephemeral_pk || ciphertext || tag`.

use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use tracing::trace;

use super::Cipher;
use crate::error::{CipherError, Result};

/// Public key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Bytes added to every plaintext: ephemeral public key plus Poly1305 tag.
pub const SEAL_OVERHEAD: usize = KEY_SIZE + 16;

/// Anonymous-sender sealed box.
pub struct SealedBox;

impl Cipher for SealedBox {
    type Recipient = [u8];
    type Identity = SecretKey;

    fn name(&self) -> &'static str {
        "sealed-box"
    }

    fn encrypt(&self, plaintext: &[u8], recipient: &[u8]) -> Result<Vec<u8>> {
        let key = <[u8; KEY_SIZE]>::try_from(recipient).map_err(|_| {
            CipherError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: recipient.len(),
            }
        })?;

        trace!(cipher = self.name(), plaintext_len = plaintext.len(), "sealing");

        let sealed = PublicKey::from(key)
            .seal(&mut OsRng, plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = sealed.len(), "sealed");
        Ok(sealed)
    }

    fn decrypt(&self, ciphertext: &[u8], identity: &SecretKey) -> Result<Vec<u8>> {
        trace!(cipher = self.name(), ciphertext_len = ciphertext.len(), "opening");

        if ciphertext.len() < SEAL_OVERHEAD {
            return Err(CipherError::DecryptionFailed(format!(
                "ciphertext too short: {} bytes",
                ciphertext.len()
            ))
            .into());
        }

        identity
            .unseal(ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()).into())
    }
}
