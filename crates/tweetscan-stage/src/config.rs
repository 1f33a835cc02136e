//! Stage configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! feedback_size = 1000
//!
//! [fields]
//! id = "tweet_id"
//! user_id = "author_id"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tweetscan_domain::RowShape;
use tweetscan_extractor::{ConfigError, OutputFieldNames};

/// Default number of written rows between progress lines
pub const DEFAULT_FEEDBACK_SIZE: u64 = 50_000;

/// Stage configuration error
#[derive(Debug, Error)]
pub enum StageConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Output field names are invalid
    #[error("Invalid output fields: {0}")]
    Fields(#[from] ConfigError),
}

/// Configuration for a [`crate::SearchStage`]
///
/// # Examples
///
/// ```
/// use tweetscan_stage::StageConfig;
///
/// let config = StageConfig::from_toml("feedback_size = 10").unwrap();
/// assert_eq!(config.feedback_size, 10);
/// assert_eq!(config.fields.id, "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Log a progress line every this many written rows; 0 disables it
    #[serde(default = "default_feedback_size")]
    pub feedback_size: u64,

    /// Names of the appended output fields
    #[serde(default)]
    pub fields: OutputFieldNames,
}

fn default_feedback_size() -> u64 {
    DEFAULT_FEEDBACK_SIZE
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            feedback_size: DEFAULT_FEEDBACK_SIZE,
            fields: OutputFieldNames::default(),
        }
    }
}

impl StageConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), StageConfigError> {
        self.fields.validate()?;
        Ok(())
    }

    /// Validate the configuration for rows of the given input shape
    pub fn validate_for_input(&self, input: &RowShape) -> Result<(), StageConfigError> {
        self.fields.validate_against(input)?;
        Ok(())
    }

    /// Whether a progress line is due after `rows_written` rows
    pub fn feedback_due(&self, rows_written: u64) -> bool {
        self.feedback_size > 0 && rows_written > 0 && rows_written % self.feedback_size == 0
    }

    /// Load and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, StageConfigError> {
        let config: StageConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, StageConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StageConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tweetscan_domain::FieldMeta;

    #[test]
    fn test_default_config() {
        let config = StageConfig::default();
        assert_eq!(config.feedback_size, 50_000);
        assert_eq!(config.fields, OutputFieldNames::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_for_input() {
        let input = RowShape::new(vec![FieldMeta::string("params"), FieldMeta::string("text")]);

        let err = StageConfig::default().validate_for_input(&input).unwrap_err();
        assert!(matches!(
            err,
            StageConfigError::Fields(ConfigError::InputCollision(ref name)) if name == "text"
        ));

        let mut renamed = StageConfig::default();
        renamed.fields.text = "status_text".to_string();
        assert!(renamed.validate_for_input(&input).is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(StageConfig::from_toml("").unwrap(), StageConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            feedback_size = 100

            [fields]
            id = "tweet_id"
            hashtags = "tags"
        "#;

        let config = StageConfig::from_toml(toml).unwrap();
        assert_eq!(config.feedback_size, 100);
        assert_eq!(config.fields.id, "tweet_id");
        assert_eq!(config.fields.hashtags, "tags");
        assert_eq!(config.fields.text, "text");
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let toml = r#"
            [fields]
            id = "text"
        "#;

        assert!(matches!(
            StageConfig::from_toml(toml),
            Err(StageConfigError::Fields(ConfigError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            StageConfig::from_toml("feedback_size = \"lots\""),
            Err(StageConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = StageConfig {
            feedback_size: 7,
            ..Default::default()
        };
        let parsed = StageConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "feedback_size = 3").unwrap();
        writeln!(file, "[fields]").unwrap();
        writeln!(file, "query = \"search_query\"").unwrap();

        let config = StageConfig::from_file(file.path()).unwrap();
        assert_eq!(config.feedback_size, 3);
        assert_eq!(config.fields.query, "search_query");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StageConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(StageConfigError::FileRead(_))));
    }

    #[test]
    fn test_feedback_due() {
        let config = StageConfig {
            feedback_size: 2,
            ..Default::default()
        };
        assert!(!config.feedback_due(0));
        assert!(!config.feedback_due(1));
        assert!(config.feedback_due(2));
        assert!(config.feedback_due(4));

        let disabled = StageConfig {
            feedback_size: 0,
            ..Default::default()
        };
        assert!(!disabled.feedback_due(2));
    }
}
