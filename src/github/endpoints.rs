// GitHub API endpoint functions.
// Provides the typed starred-repositories listing and its page fetcher binding.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::identity::Identity;
use crate::state::PageFetcher;

use super::client::GitHubClient;
use super::types::StarredRepository;

/// Largest `per_page` the GitHub REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get one page of repositories starred by `user`.
    pub async fn get_starred(
        &mut self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>> {
        let params = [
            ("per_page", &per_page.to_string()),
            ("page", &page.to_string()),
        ];
        let response = self
            .get_with_params(&["users", user, "starred"], &params, user)
            .await?;
        let repos: Vec<StarredRepository> = response.json().await?;
        debug!(
            user,
            page,
            count = repos.len(),
            remaining = self.rate_limit().remaining,
            "starred page"
        );
        Ok(repos)
    }
}

#[async_trait]
impl PageFetcher for GitHubClient {
    async fn fetch_page(
        &mut self,
        identity: &Identity,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>> {
        self.get_starred(identity.as_str(), page, per_page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn starred_json(count: usize) -> serde_json::Value {
        let items: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "name": format!("repo-{}", i),
                    "owner": { "login": "someone" },
                    "description": null,
                    "language": "Rust",
                    "stargazers_count": i
                })
            })
            .collect();
        serde_json::Value::Array(items)
    }

    #[tokio::test]
    async fn test_get_starred_sends_paging_params() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/starred"))
            .and(query_param("per_page", "100"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(starred_json(3)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        let repos = client.get_starred("octocat", 2, MAX_PER_PAGE).await.unwrap();

        assert_eq!(repos.len(), 3);
        assert_eq!(repos[2].name, "repo-2");
    }

    #[tokio::test]
    async fn test_empty_page_is_ok() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/starred"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        let identity = Identity::resolve("octocat").unwrap();
        let repos = client.fetch_page(&identity, 1, MAX_PER_PAGE).await.unwrap();

        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/starred"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        let err = client.get_starred("octocat", 1, MAX_PER_PAGE).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransportError);
    }

    #[tokio::test]
    async fn test_identity_stays_inside_its_path_segment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        for user in ["octocat?x", "octocat#frag", "octo cat"] {
            let err = client.get_starred(user, 1, MAX_PER_PAGE).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IdentityNotFound);
        }

        let requests = mock_server.received_requests().await.unwrap();
        let targets: Vec<_> = requests
            .iter()
            .map(|r| (r.url.path().to_string(), r.url.query().map(String::from)))
            .collect();
        let query = Some("per_page=100&page=1".to_string());
        assert_eq!(
            targets,
            vec![
                ("/users/octocat%3Fx/starred".to_string(), query.clone()),
                ("/users/octocat%23frag/starred".to_string(), query.clone()),
                ("/users/octo%20cat/starred".to_string(), query),
            ]
        );
    }
}
