// Identity resolution.
// Turns a user-supplied location into the account name and its cache key.

use std::fmt;

use url::Url;

use crate::error::{GitmarksError, Result};

/// Namespace prefix shared by every cache key.
const KEY_PREFIX: &str = "_gitmarks_.";

/// The GitHub account whose starred repositories are browsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Resolve an identity from a raw string, trimming surrounding whitespace.
    pub fn resolve(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GitmarksError::MissingIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve an identity from a location: a bare name, a path such as
    /// `/octocat/whatever`, or a full URL. The first path segment wins.
    pub fn from_location(location: &str) -> Result<Self> {
        let location = location.trim();

        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|_| GitmarksError::MissingIdentity)?;
            let first = url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .unwrap_or_default();
            return Self::resolve(first);
        }

        let path = location.strip_prefix('/').unwrap_or(location);
        Self::resolve(path.split('/').next().unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the cache key for this identity.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey(format!("{}{}", KEY_PREFIX, self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of one identity's snapshot in the durable store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
