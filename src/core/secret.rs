//! Redacted wrapper for sensitive values.
//!
//! Plaintext secret values and the API credential live inside [`Secret`]
//! for their whole lifetime. Formatting never shows the inner value and
//! the memory is zeroized on drop; reading it takes an explicit
//! [`Secret::expose`] call.

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value that is never printed and is wiped on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T: Zeroize> {
    inner: T,
}

/// A secret UTF-8 string, e.g. the bearer credential.
pub type SecretString = Secret<String>;

/// A secret byte string, e.g. a plaintext secret value.
pub type SecretBytes = Secret<Vec<u8>>;

impl<T: Zeroize> Secret<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the inner value.
    pub fn expose(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&REDACTED).finish()
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Secret::new(value)
    }
}

impl From<&str> for SecretBytes {
    fn from(value: &str) -> Self {
        Secret::new(value.as_bytes().to_vec())
    }
}

impl From<String> for SecretBytes {
    fn from(value: String) -> Self {
        Secret::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(value: Vec<u8>) -> Self {
        Secret::new(value)
    }
}
