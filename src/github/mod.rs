// GitHub API module.
// Provides the client and types for the starred repositories listing.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::MAX_PER_PAGE;
pub use types::*;
