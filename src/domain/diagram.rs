//! Diagram configuration schema

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Schema version stamped on every saved configuration
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Suffix appended to exported configuration files
pub const EXPORT_SUFFIX: &str = ".scada.json";

/// Identifier of a component or group.
///
/// Kept as the JSON number it was read from, so negative, fractional and
/// very large ids survive a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Number);

impl From<i64> for ElementId {
    fn from(id: i64) -> Self {
        ElementId(Number::from(id))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Facing of a directional component (pumps, valves)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// View transform of the editor canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        CanvasState {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// A placed diagram element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedComponent {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<ElementId>,
}

/// A container of components and nested groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGroup {
    pub id: ElementId,
    pub components: Vec<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ElementId>>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<ElementId>,
}

impl SavedGroup {
    /// Direct child group ids (empty when the group has no nested groups)
    pub fn child_groups(&self) -> &[ElementId] {
        self.groups.as_deref().unwrap_or(&[])
    }
}

/// One named, timestamped snapshot of a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfiguration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Epoch milliseconds at save time, any JSON number on import
    pub timestamp: f64,
    pub version: String,
    pub canvas: CanvasState,
    pub components: Vec<SavedComponent>,
    pub groups: Vec<SavedGroup>,
}

impl DiagramConfiguration {
    /// Build a configuration stamped with the current schema version.
    ///
    /// The component and group slices are copied, so the caller's live
    /// editing state is never aliased by the stored snapshot.
    pub fn new(
        name: &str,
        components: &[SavedComponent],
        groups: &[SavedGroup],
        canvas: CanvasState,
        description: Option<&str>,
        timestamp: f64,
    ) -> Self {
        DiagramConfiguration {
            name: name.to_string(),
            description: description.map(str::to_string),
            timestamp,
            version: SCHEMA_VERSION.to_string(),
            canvas,
            components: components.to_vec(),
            groups: groups.to_vec(),
        }
    }

    /// File name used when exporting this configuration
    pub fn export_filename(&self) -> String {
        format!("{}{}", slug(&self.name), EXPORT_SUFFIX)
    }
}

/// Filesystem-safe, lower-cased form of a configuration name.
///
/// Every UTF-16 code unit outside `[A-Za-z0-9]` becomes `_`, so a character
/// outside the Basic Multilingual Plane turns into two underscores.
pub fn slug(name: &str) -> String {
    name.encode_utf16()
        .map(|unit| match u8::try_from(unit) {
            Ok(b) if b.is_ascii_alphanumeric() => char::from(b.to_ascii_lowercase()),
            _ => '_',
        })
        .collect()
}

/// Editor state handed to `save`: everything except name and stamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSnapshot {
    #[serde(default)]
    pub canvas: CanvasState,
    #[serde(default)]
    pub components: Vec<SavedComponent>,
    #[serde(default)]
    pub groups: Vec<SavedGroup>,
}
