use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::level::LogLevel;

/// A persisted (or about to be persisted) log entry.
///
/// `id` is zero until the store assigns one on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub id: i64,
    pub service_name: String,
    pub log_level: Option<LogLevel>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub metadata: serde_json::Value,
}

/// Log entry as submitted by a client, before validation and defaults.
///
/// An `id` sent by the client is not part of this shape and is dropped on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewLogRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub log_level: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
