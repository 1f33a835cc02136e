//! Connection descriptor - parameters for the single search request of a run

use std::collections::HashMap;

/// Parameter names as they appear in the descriptor payload
pub mod keys {
    /// Credential identifier
    pub const CONSUMER_KEY: &str = "consumerKey";
    /// Credential secret
    pub const CONSUMER_SECRET: &str = "consumerSecret";
    /// Application name sent to the search service
    pub const APPLICATION_NAME: &str = "applicationName";
    /// Authorization endpoint URL
    pub const AUTH_ENDPOINT: &str = "endPointAuthUrl";
    /// Search endpoint URL
    pub const SEARCH_ENDPOINT: &str = "endPointUrl";
    /// Search term
    pub const SEARCH_TERM: &str = "searchTerm";

    /// All required keys, in payload order
    pub const REQUIRED: [&str; 6] = [
        CONSUMER_KEY,
        CONSUMER_SECRET,
        APPLICATION_NAME,
        AUTH_ENDPOINT,
        SEARCH_ENDPOINT,
        SEARCH_TERM,
    ];
}

/// Decoded parameter set needed to perform the external search request
///
/// All fields are guaranteed non-empty once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    consumer_key: String,
    consumer_secret: String,
    application_name: String,
    auth_endpoint: String,
    search_endpoint: String,
    search_term: String,
}

/// Borrowed credentials handed to the fetch collaborator's `open`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Credential identifier
    pub consumer_key: &'a str,
    /// Credential secret
    pub consumer_secret: &'a str,
    /// Application name
    pub application_name: &'a str,
    /// Authorization endpoint URL
    pub auth_endpoint: &'a str,
}

impl ConnectionDescriptor {
    /// Build a descriptor from named parameters
    ///
    /// # Errors
    /// Returns the name of the first required parameter that is missing or
    /// empty (after trimming whitespace).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use tweetscan_domain::ConnectionDescriptor;
    /// use tweetscan_domain::descriptor::keys;
    ///
    /// let params: HashMap<String, String> = keys::REQUIRED
    ///     .iter()
    ///     .map(|k| (k.to_string(), format!("value-{}", k)))
    ///     .collect();
    ///
    /// let descriptor = ConnectionDescriptor::from_params(&params).unwrap();
    /// assert_eq!(descriptor.search_term(), "value-searchTerm");
    /// ```
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let take = |key: &str| -> Result<String, String> {
            match params.get(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.clone()),
                Some(_) => Err(format!("Connection parameter '{}' is empty", key)),
                None => Err(format!("Connection parameter '{}' is missing", key)),
            }
        };

        Ok(Self {
            consumer_key: take(keys::CONSUMER_KEY)?,
            consumer_secret: take(keys::CONSUMER_SECRET)?,
            application_name: take(keys::APPLICATION_NAME)?,
            auth_endpoint: take(keys::AUTH_ENDPOINT)?,
            search_endpoint: take(keys::SEARCH_ENDPOINT)?,
            search_term: take(keys::SEARCH_TERM)?,
        })
    }

    /// Credentials for opening the fetch connection
    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            consumer_key: &self.consumer_key,
            consumer_secret: &self.consumer_secret,
            application_name: &self.application_name,
            auth_endpoint: &self.auth_endpoint,
        }
    }

    /// Application name
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Authorization endpoint URL
    pub fn auth_endpoint(&self) -> &str {
        &self.auth_endpoint
    }

    /// Search endpoint URL
    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    /// Search term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("application_name", &self.application_name)
            .field("auth_endpoint", &self.auth_endpoint)
            .field("search_endpoint", &self.search_endpoint)
            .field("search_term", &self.search_term)
            .finish()
    }
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("application_name", &self.application_name)
            .field("auth_endpoint", &self.auth_endpoint)
            .finish()
    }
}
