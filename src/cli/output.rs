//! Output formatting utilities

use crate::domain::{DiagramConfiguration, IntegrityIssue};
use chrono::{DateTime, Utc};

const UNKNOWN_TIME: &str = "??-??-???? ??:??";

/// Render epoch milliseconds; non-finite or out-of-range values show as unknown
fn format_timestamp(millis: f64) -> String {
    if !millis.is_finite() {
        return UNKNOWN_TIME.to_string();
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64)
        .map(|dt| dt.format("%d-%m-%Y %H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Format saved configurations for display
pub fn format_configuration_list(configs: &[DiagramConfiguration]) -> String {
    if configs.is_empty() {
        return "No configurations found".to_string();
    }

    let mut output = String::new();
    for config in configs {
        output.push_str(&format!(
            "{}  {}  ({} components, {} groups)",
            format_timestamp(config.timestamp),
            config.name,
            config.components.len(),
            config.groups.len()
        ));
        if let Some(description) = &config.description {
            output.push_str(&format!("  - {}", description));
        }
        output.push('\n');
    }
    output
}

/// Format integrity issues as an indented list
pub fn format_integrity_issues(issues: &[IntegrityIssue]) -> String {
    let mut output = String::new();
    for issue in issues {
        output.push_str(&format!("  • {}\n", issue));
    }
    output
}
