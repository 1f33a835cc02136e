//! Names of the fields appended to each output row

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tweetscan_domain::RowShape;

/// Names of the seven appended output fields
///
/// Field positions are fixed; only the names are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFieldNames {
    /// Status identifier
    pub id: String,

    /// Status text
    pub text: String,

    /// Author identifier
    pub user_id: String,

    /// Author relationship count
    pub friends_count: String,

    /// Decoded echoed query
    pub query: String,

    /// Serialized mentions
    pub mentions: String,

    /// Serialized hashtags
    pub hashtags: String,
}

impl Default for OutputFieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            text: "text".to_string(),
            user_id: "user_id".to_string(),
            friends_count: "friends_count".to_string(),
            query: "query".to_string(),
            mentions: "mentions".to_string(),
            hashtags: "hashtags".to_string(),
        }
    }
}

impl OutputFieldNames {
    /// Names in output order, paired with their setting key
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("id", self.id.as_str()),
            ("text", self.text.as_str()),
            ("user_id", self.user_id.as_str()),
            ("friends_count", self.friends_count.as_str()),
            ("query", self.query.as_str()),
            ("mentions", self.mentions.as_str()),
            ("hashtags", self.hashtags.as_str()),
        ]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (key, name) in self.entries() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName(key));
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Validate the names and check that none shadows an input field
    pub fn validate_against(&self, input: &RowShape) -> Result<(), ConfigError> {
        self.validate()?;
        match self
            .entries()
            .into_iter()
            .find(|(_, name)| input.index_of(name).is_some())
        {
            Some((_, name)) => Err(ConfigError::InputCollision(name.to_string())),
            None => Ok(()),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str)
            .map_err(|e| ConfigError::Format(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Format(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetscan_domain::FieldMeta;

    #[test]
    fn test_default_names_are_valid() {
        let names = OutputFieldNames::default();
        assert!(names.validate().is_ok());
        assert_eq!(names.entries()[3], ("friends_count", "friends_count"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let names = OutputFieldNames {
            query: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(names.validate(), Err(ConfigError::EmptyName("query")));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let names = OutputFieldNames {
            hashtags: "mentions".to_string(),
            ..Default::default()
        };
        assert_eq!(
            names.validate(),
            Err(ConfigError::DuplicateName("mentions".to_string()))
        );
    }

    #[test]
    fn test_input_collision_rejected() {
        let names = OutputFieldNames {
            id: "params".to_string(),
            ..Default::default()
        };
        let input = RowShape::new(vec![FieldMeta::string("params")]);

        assert!(names.validate().is_ok());
        assert_eq!(
            names.validate_against(&input),
            Err(ConfigError::InputCollision("params".to_string()))
        );
        assert!(OutputFieldNames::default().validate_against(&input).is_ok());
    }

    #[test]
    fn test_validate_against_checks_names_first() {
        let names = OutputFieldNames {
            text: String::new(),
            ..Default::default()
        };
        assert_eq!(
            names.validate_against(&RowShape::default()),
            Err(ConfigError::EmptyName("text"))
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let names = OutputFieldNames::from_toml(r#"id = "tweet_id""#).unwrap();
        assert_eq!(names.id, "tweet_id");
        assert_eq!(names.text, "text");
    }

    #[test]
    fn test_toml_round_trip() {
        let names = OutputFieldNames {
            user_id: "author".to_string(),
            ..Default::default()
        };
        let parsed = OutputFieldNames::from_toml(&names.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, names);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            OutputFieldNames::from_toml("id = 3"),
            Err(ConfigError::Format(_))
        ));
    }
}
