use crate::search::{Post, SearchError};
use std::time::Duration;

/// Runs one geocoded keyword search and returns every matching post.
pub trait SearchClient {
    fn search(&self, query: &str) -> Result<Vec<Post>, SearchError>;
}

/// User-Agent naming this crate, sent with every search request.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; search-buffers/0.1)";

/// Search client for an HTTP endpoint answering `GET ?q=<query>` with a
/// JSON array of posts.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    bearer_token: Option<String>,
    max_results: Option<u32>,
}

impl HttpSearchClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bearer_token: None,
            max_results: None,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Caps the number of posts the endpoint may return per region.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }
}

impl SearchClient for HttpSearchClient {
    fn search(&self, query: &str) -> Result<Vec<Post>, SearchError> {
        let mut request = self.client.get(&self.endpoint).query(&[("q", query)]);
        if let Some(max) = self.max_results {
            request = request.query(&[("max_results", max)]);
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| SearchError::Http(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SearchError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 500),
            });
        }

        serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// Truncates a response body for error messages, appending "..." when cut.
fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}
