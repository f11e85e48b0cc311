//! Structural validation of imported configurations

use crate::domain::diagram::DiagramConfiguration;
use crate::error::{Result, ScadaError};
use serde_json::Value;

/// Shallow shape check for a candidate configuration.
///
/// Only the outer structure is inspected: element shapes inside
/// `components` and `groups` are left to the typed decode.
pub fn validate_shape(value: &Value) -> std::result::Result<(), String> {
    let Some(obj) = value.as_object() else {
        return Err("expected a JSON object".to_string());
    };

    if !obj.get("name").is_some_and(Value::is_string) {
        return Err("'name' must be a string".to_string());
    }
    if !obj.get("timestamp").is_some_and(Value::is_number) {
        return Err("'timestamp' must be a number".to_string());
    }
    if !obj.get("version").is_some_and(Value::is_string) {
        return Err("'version' must be a string".to_string());
    }

    let canvas = match obj.get("canvas") {
        Some(c) if !c.is_null() => c,
        _ => return Err("'canvas' is missing".to_string()),
    };
    for field in ["scale", "panX", "panY"] {
        if !canvas.get(field).is_some_and(Value::is_number) {
            return Err(format!("'canvas.{}' must be a number", field));
        }
    }

    for field in ["components", "groups"] {
        if !obj.get(field).is_some_and(Value::is_array) {
            return Err(format!("'{}' must be an array", field));
        }
    }

    Ok(())
}

/// Parse and validate configuration text.
///
/// Malformed JSON is an `ImportParse` error. A value that fails the shape
/// check, or whose elements do not decode into the typed model, is an
/// `InvalidConfiguration` error.
pub fn parse_configuration(text: &str) -> Result<DiagramConfiguration> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ScadaError::ImportParse(e.to_string()))?;

    validate_shape(&value).map_err(ScadaError::InvalidConfiguration)?;

    serde_json::from_value(value).map_err(|e| ScadaError::InvalidConfiguration(e.to_string()))
}
