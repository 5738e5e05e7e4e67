// GitHub API response types.
// Defines structs for deserializing the starred repositories listing.

use serde::{Deserialize, Serialize};

/// Owner of a starred repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One item of `GET /users/{user}/starred`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarredRepository {
    pub name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
