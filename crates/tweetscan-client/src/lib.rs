//! Tweetscan Search Client Layer
//!
//! Fetch collaborator implementations of the `SearchClient` trait from
//! `tweetscan-domain`.
//!
//! # Clients
//!
//! - `MockSearchClient`: Deterministic in-memory client for testing
//! - `TwitterClient`: App-only bearer-token search over HTTP
//!
//! # Examples
//!
//! ```
//! use tweetscan_client::MockSearchClient;
//! use tweetscan_domain::traits::SearchClient;
//! use tweetscan_domain::Credentials;
//!
//! let mut client = MockSearchClient::new(r#"{"statuses": []}"#);
//! client.open(Credentials {
//!     consumer_key: "key",
//!     consumer_secret: "secret",
//!     application_name: "app",
//!     auth_endpoint: "https://auth.example",
//! }).unwrap();
//!
//! let body = client.search("https://search.example", "rust").unwrap();
//! assert_eq!(body.as_deref(), Some(r#"{"statuses": []}"#));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod twitter;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tweetscan_domain::traits::SearchClient;
use tweetscan_domain::Credentials;

pub use config::ClientConfig;
pub use twitter::TwitterClient;

/// Errors that can occur while talking to the search service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credentials rejected or token exchange failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// `search` called before a successful `open`
    #[error("Client not connected - call open() first")]
    NotConnected,

    /// Async runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic error
    #[error("Client error: {0}")]
    Other(String),
}

/// Calls recorded by [`MockSearchClient`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    /// Number of `open` calls
    pub opens: usize,
    /// Number of `search` calls
    pub searches: usize,
    /// Number of `close` calls
    pub closes: usize,
    /// Consumer key passed to the last `open`
    pub last_consumer_key: Option<String>,
    /// `(endpoint, term)` passed to the last `search`
    pub last_search: Option<(String, String)>,
}

/// Mock search client for deterministic testing
///
/// Returns pre-configured bodies without making any network calls. Clones
/// share their call log, so a test can keep one clone and hand the other to
/// a stage.
///
/// # Examples
///
/// ```
/// use tweetscan_client::MockSearchClient;
/// use tweetscan_domain::traits::SearchClient;
/// use tweetscan_domain::Credentials;
///
/// let mut client = MockSearchClient::new("default body");
/// client.add_response("rust", "rust body");
///
/// let handle = client.clone();
/// client.open(Credentials {
///     consumer_key: "k",
///     consumer_secret: "s",
///     application_name: "a",
///     auth_endpoint: "https://auth.example",
/// }).unwrap();
///
/// assert_eq!(client.search("u", "rust").unwrap().as_deref(), Some("rust body"));
/// assert_eq!(client.search("u", "go").unwrap().as_deref(), Some("default body"));
/// assert_eq!(handle.calls().searches, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockSearchClient {
    default_response: Option<String>,
    responses: Arc<Mutex<HashMap<String, String>>>,
    open_error: Option<String>,
    search_error: Option<String>,
    connected: bool,
    calls: Arc<Mutex<MockCalls>>,
}

impl MockSearchClient {
    /// Create a client returning a fixed body for every search
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            open_error: None,
            search_error: None,
            connected: false,
            calls: Arc::new(Mutex::new(MockCalls::default())),
        }
    }

    /// Create a client whose searches return no body
    pub fn without_body() -> Self {
        Self {
            default_response: None,
            ..Self::new("")
        }
    }

    /// Add a specific body for a given search term
    pub fn add_response(&mut self, term: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(term.into(), response.into());
    }

    /// Make `open` fail with the given message
    pub fn with_open_error(mut self, message: impl Into<String>) -> Self {
        self.open_error = Some(message.into());
        self
    }

    /// Make `search` fail with the given message
    pub fn with_search_error(mut self, message: impl Into<String>) -> Self {
        self.search_error = Some(message.into());
        self
    }

    /// Snapshot of the calls made so far (shared across clones)
    pub fn calls(&self) -> MockCalls {
        lock(&self.calls).clone()
    }

    /// Whether `open` succeeded and `close` has not been called since
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new(r#"{"statuses": [], "search_metadata": {"query": ""}}"#)
    }
}

impl SearchClient for MockSearchClient {
    type Error = ClientError;

    fn open(&mut self, credentials: Credentials<'_>) -> Result<(), Self::Error> {
        {
            let mut calls = lock(&self.calls);
            calls.opens += 1;
            calls.last_consumer_key = Some(credentials.consumer_key.to_string());
        }

        if let Some(message) = &self.open_error {
            return Err(ClientError::Auth(message.clone()));
        }

        self.connected = true;
        Ok(())
    }

    fn search(&mut self, endpoint: &str, term: &str) -> Result<Option<String>, Self::Error> {
        {
            let mut calls = lock(&self.calls);
            calls.searches += 1;
            calls.last_search = Some((endpoint.to_string(), term.to_string()));
        }

        if !self.connected {
            return Err(ClientError::NotConnected);
        }
        if let Some(message) = &self.search_error {
            return Err(ClientError::Communication(message.clone()));
        }

        if let Some(response) = lock(&self.responses).get(term) {
            return Ok(Some(response.clone()));
        }
        Ok(self.default_response.clone())
    }

    fn close(&mut self) {
        lock(&self.calls).closes += 1;
        self.connected = false;
    }
}

// A panicking test thread must not hide the call log from the others.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
