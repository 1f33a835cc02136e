//! Decode the connection descriptor carried in field 0 of the input row

use crate::error::{Result, StageError};
use serde_json::Value;
use std::collections::HashMap;
use tweetscan_domain::descriptor::keys;
use tweetscan_domain::{ConnectionDescriptor, FieldValue, Row};

/// Decode the JSON object in field 0 into a descriptor
///
/// String, number and boolean values are accepted; nulls are treated as
/// absent and unknown keys are ignored.
pub fn decode_descriptor(row: &Row) -> Result<ConnectionDescriptor> {
    let payload = match row.get(0) {
        Some(FieldValue::String(s)) if !s.trim().is_empty() => s,
        Some(FieldValue::Integer(_)) => {
            return Err(StageError::Configuration(
                "Connection parameters in field 0 must be text".to_string(),
            ))
        }
        _ => {
            return Err(StageError::Configuration(
                "No connection parameters in field 0".to_string(),
            ))
        }
    };

    let json: Value = serde_json::from_str(payload).map_err(|e| {
        StageError::Configuration(format!("Connection parameters are not valid JSON: {}", e))
    })?;
    let object = json.as_object().ok_or_else(|| {
        StageError::Configuration("Connection parameters must be a JSON object".to_string())
    })?;

    let mut params = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                if keys::REQUIRED.contains(&key.as_str()) {
                    return Err(StageError::Configuration(format!(
                        "Connection parameter '{}' must be a string",
                        key
                    )));
                }
                continue;
            }
        };
        params.insert(key.clone(), text);
    }

    ConnectionDescriptor::from_params(&params).map_err(StageError::Configuration)
}
