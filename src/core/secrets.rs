//! The set of secrets to distribute.
//!
//! A [`SecretSet`] is an ordered name → plaintext mapping. Enumeration
//! follows insertion order so progress output and results line up with
//! the input file.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::secret::SecretBytes;
use crate::core::types::SecretName;
use crate::error::{ConfigError, Error, Result, ValidationError};

/// One named plaintext secret.
#[derive(Debug, Clone)]
pub struct SecretEntry {
    name: SecretName,
    value: SecretBytes,
}

impl SecretEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SecretBytes {
        &self.value
    }
}

/// Ordered mapping from unique, non-empty secret names to plaintext values.
#[derive(Debug, Clone, Default)]
pub struct SecretSet {
    entries: Vec<SecretEntry>,
}

impl SecretSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or already present.
    pub fn insert(&mut self, name: impl Into<SecretName>, value: impl Into<SecretBytes>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptySecretName.into());
        }
        if self.contains(&name) {
            return Err(ValidationError::DuplicateSecret(name).into());
        }
        self.entries.push(SecretEntry {
            name,
            value: value.into(),
        });
        Ok(())
    }

    /// Build a set from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<SecretName>,
        V: Into<SecretBytes>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value)?;
        }
        Ok(set)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecretEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Load secrets from a JSON file.
    ///
    /// Accepts `{"secret": {"NAME": "value", ...}}` or a flat object of
    /// string values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, and
    /// `ValidationError` if it holds no secrets, a repeated name, or a
    /// non-string value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading secrets file");

        let contents = std::fs::read_to_string(path)
            .map(Zeroizing::new)
            .map_err(|source| ConfigError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
        let set = Self::from_json(&contents).map_err(|e| match e {
            Error::Config(ConfigError::Json { source, .. }) => ConfigError::Json {
                path: path.display().to_string(),
                source,
            }
            .into(),
            other => other,
        })?;

        debug!(secrets = set.len(), "secrets file loaded");
        Ok(set)
    }

    /// Parse the JSON secrets document.
    ///
    /// Every key of the secrets object is inserted in document order, so a
    /// name repeated in the file is rejected rather than overwritten.
    pub fn from_json(contents: &str) -> Result<Self> {
        let document: Node = serde_json::from_str(contents).map_err(|source| ConfigError::Json {
            path: "<input>".to_string(),
            source,
        })?;

        let entries = secrets_object(document)?;

        let mut set = Self::new();
        for (name, value) in entries {
            match value {
                Node::String(mut value) => {
                    set.insert(name, std::mem::take(&mut *value))?;
                }
                _ => return Err(ValidationError::NonStringValue(name).into()),
            }
        }

        if set.is_empty() {
            return Err(ValidationError::EmptySecretSet.into());
        }
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a SecretSet {
    type Item = &'a SecretEntry;
    type IntoIter = std::slice::Iter<'a, SecretEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The entries holding the secrets: the `secret` wrapper if present,
/// otherwise the document itself.
fn secrets_object(document: Node) -> Result<Vec<(String, Node)>> {
    let Node::Object(root) = document else {
        return Err(invalid_document("expected a JSON object of secret names to values"));
    };

    let is_wrapper =
        |key: &str, value: &Node| key == constants::SECRETS_FILE_KEY && matches!(value, Node::Object(_));
    match root.iter().filter(|(key, value)| is_wrapper(key.as_str(), value)).count() {
        0 => Ok(root),
        1 => root
            .into_iter()
            .find_map(|(key, value)| match value {
                Node::Object(inner) if key == constants::SECRETS_FILE_KEY => Some(inner),
                _ => None,
            })
            .ok_or_else(|| invalid_document("missing secret object")),
        _ => Err(invalid_document("the secret object appears more than once")),
    }
}

fn invalid_document(reason: &str) -> Error {
    ConfigError::InvalidValue {
        field: "secrets file",
        reason: reason.to_string(),
    }
    .into()
}

/// A JSON value as far as the secrets file cares about it.
///
/// Objects keep every entry in document order, repeated keys included;
/// strings are wiped when dropped without being claimed.
enum Node {
    Object(Vec<(String, Node)>),
    String(Zeroizing<String>),
    Other,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::String(Zeroizing::new(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::String(Zeroizing::new(v)))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Node, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Node::Other)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Node, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            entries.push((key, value));
        }
        Ok(Node::Object(entries))
    }
}
