//! URL path prefix

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The sub-path a site is served under (e.g. `/blog`)
///
/// Always stored normalized: empty for a site served at the domain root,
/// otherwise exactly one leading `/` and no trailing `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// Normalize a raw configured prefix
    ///
    /// # Examples
    /// ```
    /// use folio::route::PathPrefix;
    /// assert_eq!(PathPrefix::new("blog/").as_str(), "/blog");
    /// assert_eq!(PathPrefix::new("/").as_str(), "");
    /// ```
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    /// The normalized prefix, empty when serving from the root
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Qualify a site-relative path with the prefix
    ///
    /// `qualify("about/")` under `/blog` yields `/blog/about/`, and
    /// `qualify("")` yields the prefixed root `/blog/`.
    pub fn qualify(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// The prefixed root path
    pub fn root(&self) -> String {
        self.qualify("")
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathPrefix {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for PathPrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PathPrefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::new(raw.as_deref().unwrap_or("")))
    }
}
