//! Cryptographic operations.
//!
//! Secrets are sealed for a scope's public key with an anonymous-sender
//! sealed box, the construction the remote decrypts with. The [`Cipher`]
//! trait keeps the pipeline independent of the concrete primitive.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file next to `sealed.rs`
//! 3. Re-export from this module

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::types::EncryptedValue;
use crate::error::Result;

mod sealed;

pub use sealed::{SealedBox, KEY_SIZE, SEAL_OVERHEAD};

/// Re-exported recipient private key type, used to open sealed values.
pub use crypto_box::SecretKey as Identity;

/// Public-key encryption backend.
pub trait Cipher {
    /// Recipient public key material.
    type Recipient: ?Sized;

    /// Recipient private key.
    type Identity;

    /// Encrypt plaintext for a recipient.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the recipient key is malformed or
    /// encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipient: &Self::Recipient) -> Result<Vec<u8>>;

    /// Decrypt ciphertext with the recipient's private key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the ciphertext was not sealed for this
    /// identity or has been tampered with.
    fn decrypt(&self, ciphertext: &[u8], identity: &Self::Identity) -> Result<Vec<u8>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Seal `plaintext` for a 32-byte public key.
///
/// This is a convenience wrapper around `SealedBox::encrypt`.
pub fn seal(plaintext: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
    SealedBox.encrypt(plaintext, public_key)
}

/// Open a sealed value with the recipient's private key.
///
/// This is a convenience wrapper around `SealedBox::decrypt`.
pub fn open(ciphertext: &[u8], identity: &Identity) -> Result<Vec<u8>> {
    SealedBox.decrypt(ciphertext, identity)
}

/// Base64 (standard alphabet) of a ciphertext, as the write endpoint expects.
pub fn encode(ciphertext: &[u8]) -> EncryptedValue {
    STANDARD.encode(ciphertext)
}
