// Normalized starred repository rows.

use serde::{Deserialize, Serialize};

use crate::github::StarredRepository;

/// One starred repository as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub owner: String,
    pub repo: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(alias = "stargazers")]
    pub stars: u64,
}

impl Row {
    /// `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Description for display; missing descriptions render as empty.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}", self.full_name())
    }
}

impl From<StarredRepository> for Row {
    fn from(starred: StarredRepository) -> Self {
        Self {
            owner: starred.owner.login,
            repo: starred.name,
            description: starred.description,
            language: starred.language,
            stars: starred.stargazers_count,
        }
    }
}
