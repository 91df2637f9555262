//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret name (e.g., API_KEY, DEPLOY_TOKEN).
pub type SecretName = String;

/// Identifier of a scope's active public key.
pub type KeyId = String;

/// Base64 of a sealed-box ciphertext, as submitted to the API.
pub type EncryptedValue = String;

/// A target exactly as the user wrote it, trimmed.
pub type TargetLabel = String;
