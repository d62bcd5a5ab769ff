//! Generic database record as stored in the line-delimited JSON source

use serde::Deserialize;

/// A generic entity record, before any game-system specialization.
///
/// Every line of the source database deserializes into one of these.
/// The `system` and `flags` payloads stay opaque until a specialization
/// knows what shape to expect.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    /// Unique identifier within the database. Immutable.
    #[serde(rename = "_id")]
    pub id: String,

    /// System metadata; `system_id` decides which specialization applies.
    #[serde(rename = "_stats")]
    pub stats: ModelStats,

    /// Display name.
    pub name: String,

    /// Entity type tag (`character`, `mook`, `skill`, `weapon`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Relative path to the entity's image asset.
    pub img: String,

    /// Opaque system-specific payload.
    #[serde(default)]
    pub system: serde_json::Value,

    /// Opaque module/system flags payload.
    #[serde(default)]
    pub flags: serde_json::Value,

    /// Optional relative path to a thumbnail asset.
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Embedded child documents. Actor records carry their owned items
    /// inline; everything else deserializes an empty list.
    #[serde(default)]
    pub items: Vec<Model>,
}

/// Per-record system metadata block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    pub system_id: String,
    #[serde(default)]
    pub system_version: Option<String>,
    #[serde(default)]
    pub core_version: Option<String>,
    /// Last modification time, epoch milliseconds.
    #[serde(default)]
    pub modified_time: Option<i64>,
}
