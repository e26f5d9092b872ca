//! HTTP client for the LLM-backed reminder parsing endpoint.
//!
//! One POST, no retries, and deliberately no request timeout: the backend's
//! LLM call can be slow, and a failure here just means we parse locally, so
//! there is nothing useful to do early. Quote-style calls elsewhere are the
//! ones that set timeouts.

use crate::models::ParsedCondition;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Default backend address, matching the dashboard's dev server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const USER_AGENT: &str = concat!("remindtop/", env!("CARGO_PKG_VERSION"));

/// Everything that can go wrong talking to the parse endpoint.
///
/// All of these are recovered by the local fallback; the variants exist so
/// logs can tell a dead network from an unhappy server.
#[derive(Debug, Error)]
pub enum ParseApiError {
    #[error("could not reach parse endpoint: {0}")]
    Network(reqwest::Error),
    #[error("parse endpoint returned {0}")]
    Status(StatusCode),
    #[error("could not decode parse response: {0}")]
    Body(reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

/// Client for `POST /reminders/parse`.
pub struct ParseClient {
    client: Client,
    base_url: String,
}

impl ParseClient {
    /// Create a client against the given backend base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the backend to parse reminder text into a structured condition.
    ///
    /// The response arrives already enriched with a live price lookup when
    /// the backend recognized a ticker, and carries the server's own
    /// provenance tag (`llm` or `regex_fallback`).
    pub async fn parse(&self, text: &str) -> Result<ParsedCondition, ParseApiError> {
        let url = parse_endpoint(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ParseRequest { text })
            .send()
            .await
            .map_err(ParseApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParseApiError::Status(status));
        }

        response.json().await.map_err(ParseApiError::Body)
    }
}

fn parse_endpoint(base_url: &str) -> String {
    format!("{}/reminders/parse", base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_url() {
        assert_eq!(
            parse_endpoint("http://127.0.0.1:8000"),
            "http://127.0.0.1:8000/reminders/parse"
        );
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = ParseClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        // Port 9 (discard) is as close to guaranteed-closed as it gets.
        let client = ParseClient::new("http://127.0.0.1:9").unwrap();
        let err = client.parse("AAPL above $200").await.unwrap_err();
        assert!(matches!(err, ParseApiError::Network(_)));
    }
}
