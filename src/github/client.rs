// GitHub API HTTP client.
// Handles headers, rate limit tracking, and status classification.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{GitmarksError, Result};

use super::types::RateLimit;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with optional authentication and rate limit tracking.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a new GitHub client against `base_url`.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| GitmarksError::Transport(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gitmarks"));

        let base_url = Url::parse(base_url)
            .map_err(|e| GitmarksError::Transport(format!("invalid API URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GitmarksError::Transport(format!(
                "invalid API URL {}",
                base_url
            )));
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GitmarksError::Api)?;

        Ok(Self {
            client,
            base_url,
            rate_limit: RateLimit::default(),
        })
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.token.as_deref())
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Append `segments` to the base URL, escaping each one.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request with query parameters.
    ///
    /// `segments` are path segments under the base URL; `subject` names the
    /// resource owner for not-found reporting.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &mut self,
        segments: &[&str],
        params: &T,
        subject: &str,
    ) -> Result<Response> {
        let url = self.endpoint_url(segments);
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| GitmarksError::Transport(e.to_string()))?;

        self.update_rate_limit(&response);
        self.check_response(response, subject).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }

        if self.rate_limit.limit > 0 && self.rate_limit.remaining == 0 {
            warn!(reset = self.rate_limit.reset, "GitHub rate limit exhausted");
        }
    }

    /// Check response status and convert errors.
    ///
    /// Only 200 counts as success for listings.
    async fn check_response(&self, response: Response, subject: &str) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::NOT_FOUND => Err(GitmarksError::IdentityNotFound(subject.to_string())),
            status => Err(GitmarksError::Transport(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    #[tokio::test]
    async fn test_not_found_classified() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost-user/starred"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        let err = client
            .get_with_params(&["users", "ghost-user", "starred"], &[("page", "1")], "ghost-user")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IdentityNotFound);
        assert_eq!(err.to_string(), "User \"ghost-user\" not found.");
    }

    #[tokio::test]
    async fn test_non_ok_is_transport_error() {
        let mock_server = MockServer::start().await;
        for (route, status) in [("/a", 500), ("/b", 403), ("/c", 201)] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(status))
                .mount(&mock_server)
                .await;
        }

        let mut client = GitHubClient::new(&mock_server.uri(), None).unwrap();
        for route in ["a", "b", "c"] {
            let err = client
                .get_with_params(&[route], &[("page", "1")], "octocat")
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TransportError);
        }
    }

    #[tokio::test]
    async fn test_token_and_rate_limit_headers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ratelimit-limit", "60")
                    .insert_header("x-ratelimit-remaining", "59")
                    .insert_header("x-ratelimit-reset", "1700000000")
                    .set_body_string("[]"),
            )
            .mount(&mock_server)
            .await;

        let mut client = GitHubClient::new(&format!("{}/", mock_server.uri()), Some("secret"))
            .unwrap();
        client
            .get_with_params(&["ping"], &[("page", "1")], "octocat")
            .await
            .unwrap();

        assert_eq!(client.rate_limit().limit, 60);
        assert_eq!(client.rate_limit().remaining, 59);
        assert_eq!(client.rate_limit().reset, 1_700_000_000);
    }

    #[test]
    fn test_endpoint_url_escapes_segments() {
        let client = GitHubClient::new("https://ghe.example/api/v3/", None).unwrap();
        let url = client.endpoint_url(&["users", "octocat?x#frag/other", "starred"]);
        assert_eq!(
            url.as_str(),
            "https://ghe.example/api/v3/users/octocat%3Fx%23frag%2Fother/starred"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(GitHubClient::new("not a url", None).is_err());
        assert!(GitHubClient::new("mailto:someone@example.com", None).is_err());
    }
}
