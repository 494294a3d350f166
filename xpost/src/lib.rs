//! Minimal X (Twitter) API v2 client.
//!
//! This crate provides a focused client for posting tweets with:
//! - OAuth 1.0a user-context request signing (HMAC-SHA1)
//! - Credentials from explicit values or environment variables
//! - Typed errors distinguishing network, API, and configuration failures
//!
//! The publish call is a single attempt; retry policy belongs to the
//! caller's scheduler, not this client.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod oauth;

const API_BASE: &str = "https://api.twitter.com";

/// Environment variables holding the four OAuth 1.0a credentials.
const CREDENTIAL_VARS: [&str; 4] = [
    "X_API_KEY",
    "X_API_SECRET",
    "X_ACCESS_TOKEN",
    "X_ACCESS_TOKEN_SECRET",
];

/// Errors that can occur when using the X client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing credentials: {missing} (set them in the environment or .env)")]
    MissingCredentials { missing: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// OAuth 1.0a user-context credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Read all four credentials from the environment, reporting every
    /// missing variable at once.
    pub fn from_env() -> Result<Self, Error> {
        let missing: Vec<&str> = CREDENTIAL_VARS
            .iter()
            .filter(|name| std::env::var(name).map(|v| v.is_empty()).unwrap_or(true))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingCredentials {
                missing: missing.join(", "),
            });
        }

        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Ok(Credentials {
            api_key: var("X_API_KEY"),
            api_secret: var("X_API_SECRET"),
            access_token: var("X_ACCESS_TOKEN"),
            access_token_secret: var("X_ACCESS_TOKEN_SECRET"),
        })
    }
}

/// A successfully created post.
#[derive(Debug, Clone)]
pub struct PostReceipt {
    pub id: String,
    pub text: String,
}

/// X API client.
#[derive(Clone)]
pub struct XClient {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl XClient {
    /// Create a new client with the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            credentials,
            base_url: API_BASE.to_string(),
        }
    }

    /// Create a client from the X_* environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Publish a post. A single attempt; non-2xx responses surface as
    /// `Error::Api` with the response body.
    pub async fn post(&self, text: &str) -> Result<PostReceipt, Error> {
        let url = format!("{}/2/tweets", self.base_url);
        let authorization = oauth::authorization_header(
            &self.credentials,
            "POST",
            &url,
            &[],
            &nonce(),
            Utc::now().timestamp(),
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", authorization)
            .json(&ApiPostRequest { text })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiPostResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(PostReceipt {
            id: api_response.data.id,
            text: api_response.data.text,
        })
    }
}

/// Random alphanumeric nonce for OAuth signing.
fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiPostRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiPostResponse {
    data: ApiTweet,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
}
