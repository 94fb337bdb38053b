use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Namespace assigned to identifiers written without an explicit one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// A namespaced identifier in `namespace:path` form.
///
/// Identifiers key every registry in the tab system: tab names, item
/// references, background and tab-strip textures. The namespace accepts
/// `[a-z0-9_.-]`, the path additionally `/`. A bare string without a `:`
/// parses into the [`DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId {
    namespace: String,
    path: String,
}

/// Errors from parsing an identifier string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    /// The identifier or its path part was empty.
    #[error("empty identifier")]
    Empty,

    /// The namespace contains a character outside `[a-z0-9_.-]`.
    #[error("invalid character '{ch}' in identifier namespace '{text}'")]
    InvalidNamespace { text: String, ch: char },

    /// The path contains a character outside `[a-z0-9_.\-/]`.
    #[error("invalid character '{ch}' in identifier path '{text}'")]
    InvalidPath { text: String, ch: char },
}

fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl ResourceId {
    /// Build an identifier from explicit parts, validating both.
    pub fn new(namespace: &str, path: &str) -> Result<Self, ParseIdError> {
        if namespace.is_empty() || path.is_empty() {
            return Err(ParseIdError::Empty);
        }
        if let Some(ch) = namespace.chars().find(|c| !valid_namespace_char(*c)) {
            return Err(ParseIdError::InvalidNamespace {
                text: namespace.to_string(),
                ch,
            });
        }
        if let Some(ch) = path.chars().find(|c| !valid_path_char(*c)) {
            return Err(ParseIdError::InvalidPath {
                text: path.to_string(),
                ch,
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Identifier in the default namespace. `path` must be valid; intended
    /// for well-known built-in names.
    pub fn core(path: &str) -> Self {
        debug_assert!(
            !path.is_empty() && path.chars().all(valid_path_char),
            "invalid built-in identifier path: {path}"
        );
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Parse `namespace:path`, or a bare path in the default namespace.
    pub fn parse(text: &str) -> Result<Self, ParseIdError> {
        match text.split_once(':') {
            Some((namespace, path)) if namespace.is_empty() => {
                Self::new(DEFAULT_NAMESPACE, path)
            }
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, text),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
