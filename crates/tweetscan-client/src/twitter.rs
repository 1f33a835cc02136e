//! Twitter-style search client
//!
//! Implements the application-only authentication flow:
//!
//! 1. `open` exchanges the consumer key and secret for a bearer token at the
//!    authorization endpoint (`grant_type=client_credentials`).
//! 2. `search` sends `GET <endpoint>?q=<term>` with that token.
//! 3. `close` forgets the token.
//!
//! Requests are made with an async `reqwest` client driven by a
//! current-thread runtime owned by the client, so callers stay synchronous.
//! There is no retry: a failed request is reported as-is.
//!
//! # Examples
//!
//! ```no_run
//! use tweetscan_client::{ClientConfig, TwitterClient};
//! use tweetscan_domain::traits::SearchClient;
//! use tweetscan_domain::Credentials;
//!
//! # fn main() -> Result<(), tweetscan_client::ClientError> {
//! let mut client = TwitterClient::new(ClientConfig::default())?;
//! client.open(Credentials {
//!     consumer_key: "key",
//!     consumer_secret: "secret",
//!     application_name: "tweetscan",
//!     auth_endpoint: "https://api.twitter.com/oauth2/token",
//! })?;
//! let body = client.search("https://api.twitter.com/1.1/search/tweets.json", "#rust")?;
//! client.close();
//! # Ok(())
//! # }
//! ```

use crate::{ClientConfig, ClientError};
use serde::Deserialize;
use tokio::runtime::Runtime;
use tracing::{debug, info};
use tweetscan_domain::traits::SearchClient;
use tweetscan_domain::Credentials;

/// Token response from the authorization endpoint
#[derive(Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

/// Authenticated state between `open` and `close`
struct Session {
    token: String,
    user_agent: String,
}

/// HTTP search client using application-only bearer tokens
pub struct TwitterClient {
    config: ClientConfig,
    runtime: Runtime,
    http: reqwest::Client,
    session: Option<Session>,
}

impl TwitterClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, or if the HTTP client
    /// or its runtime cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::Other)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Runtime(e.to_string()))?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            runtime,
            http,
            session: None,
        })
    }

    /// Create a client with default transport settings
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// Whether a bearer token is currently held
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// The transport settings in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

async fn request_token(
    http: &reqwest::Client,
    credentials: Credentials<'_>,
    user_agent: &str,
) -> Result<String, ClientError> {
    // Key and secret are form-encoded before being joined for Basic auth.
    let key = urlencoding::encode(credentials.consumer_key);
    let secret = urlencoding::encode(credentials.consumer_secret);

    let response = http
        .post(credentials.auth_endpoint)
        .basic_auth(key, Some(secret))
        .header(reqwest::header::USER_AGENT, user_agent)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| ClientError::Communication(format!("Token request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Communication(format!("Failed to read token response: {}", e)))?;

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ClientError::Auth(format!("HTTP {}: {}", status, body)));
    }
    if !status.is_success() {
        return Err(ClientError::Communication(format!("HTTP {}: {}", status, body)));
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse token response: {}", e)))?;

    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(ClientError::Auth(format!(
            "Unexpected token type '{}'",
            token.token_type
        )));
    }
    if token.access_token.is_empty() {
        return Err(ClientError::Auth("Empty access token".to_string()));
    }

    Ok(token.access_token)
}

async fn run_search(
    http: &reqwest::Client,
    session: &Session,
    endpoint: &str,
    term: &str,
) -> Result<Option<String>, ClientError> {
    let response = http
        .get(endpoint)
        .query(&[("q", term)])
        .bearer_auth(&session.token)
        .header(reqwest::header::USER_AGENT, session.user_agent.as_str())
        .send()
        .await
        .map_err(|e| ClientError::Communication(format!("Search request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Communication(format!("Failed to read search response: {}", e)))?;

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ClientError::Auth(format!("HTTP {}: {}", status, body)));
    }
    if !status.is_success() {
        return Err(ClientError::Communication(format!("HTTP {}: {}", status, body)));
    }

    if body.is_empty() {
        Ok(None)
    } else {
        Ok(Some(body))
    }
}

impl SearchClient for TwitterClient {
    type Error = ClientError;

    fn open(&mut self, credentials: Credentials<'_>) -> Result<(), Self::Error> {
        let user_agent = self
            .config
            .user_agent
            .clone()
            .unwrap_or_else(|| credentials.application_name.to_string());

        debug!("Requesting bearer token from {}", credentials.auth_endpoint);

        let token = self
            .runtime
            .block_on(request_token(&self.http, credentials, &user_agent))?;

        info!("Search client connected as '{}'", user_agent);
        self.session = Some(Session { token, user_agent });
        Ok(())
    }

    fn search(&mut self, endpoint: &str, term: &str) -> Result<Option<String>, Self::Error> {
        let session = self.session.as_ref().ok_or(ClientError::NotConnected)?;

        debug!("Searching {} for '{}'", endpoint, term);

        let body = self
            .runtime
            .block_on(run_search(&self.http, session, endpoint, term))?;

        debug!(
            "Search response length: {} chars",
            body.as_ref().map_or(0, String::len)
        );
        Ok(body)
    }

    fn close(&mut self) {
        if self.session.take().is_some() {
            debug!("Search client closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TwitterClient::with_defaults().unwrap();
        assert!(!client.is_connected());
        assert_eq!(client.config(), &ClientConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(TwitterClient::new(config), Err(ClientError::Other(_))));
    }

    #[test]
    fn test_search_requires_open() {
        let mut client = TwitterClient::with_defaults().unwrap();
        let result = client.search("http://127.0.0.1:9/search", "rust");
        assert!(matches!(result, Err(ClientError::NotConnected)));
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let mut client = TwitterClient::with_defaults().unwrap();
        client.close();
        client.close();
        assert!(!client.is_connected());
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{"token_type":"bearer","access_token":"AAAA%2FAAA%3DAAAAAAAA"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.access_token, "AAAA%2FAAA%3DAAAAAAAA");
    }
}
