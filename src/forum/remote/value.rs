//! Firestore document encoding
//!
//! Firestore's REST API wraps every field in a typed value object
//! (`{"stringValue": "..."}`, `{"integerValue": "3"}`, ...). These helpers
//! build the few shapes the forum writes and read them back into
//! [`Post`]/[`Reply`] records.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::shared::post::{format_timestamp, now_timestamp};
use crate::shared::{Post, PostId, Reply};

/// A document as returned by reads
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Full resource name, ending in the document id
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// The last segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    fn string(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.get("stringValue"))
            .and_then(Value::as_str)
    }

    fn integer(&self, field: &str) -> Option<i64> {
        let raw = self.fields.get(field)?.get("integerValue")?;
        match raw {
            Value::String(s) => s.parse().ok(),
            other => other.as_i64(),
        }
    }

    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        let raw = self
            .fields
            .get(field)?
            .get("timestampValue")?
            .as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Display timestamp for this document.
    ///
    /// Prefers the server-assigned `timestamp`; a document read before the
    /// server value materialized falls back to its `created_at` string.
    pub fn display_timestamp(&self) -> String {
        if let Some(at) = self.timestamp("timestamp") {
            return format_timestamp(at);
        }
        match self.string("created_at") {
            Some(created_at) => display_from_iso(created_at),
            None => now_timestamp(),
        }
    }

    pub fn to_post(&self, replies: Vec<Reply>) -> Post {
        Post {
            id: PostId::from(self.id()),
            name: self.string("name").unwrap_or_default().to_string(),
            topic: self.string("topic").unwrap_or_default().to_string(),
            message: self.string("message").unwrap_or_default().to_string(),
            timestamp: self.display_timestamp(),
            reply_count: self.integer("reply_count").unwrap_or(0).max(0) as u64,
            replies,
        }
    }

    pub fn to_reply(&self) -> Reply {
        Reply {
            name: self.string("name").unwrap_or_default().to_string(),
            message: self.string("message").unwrap_or_default().to_string(),
            timestamp: self.display_timestamp(),
        }
    }
}

/// `2024-01-01T10:00:00.123456Z` -> `2024-01-01 10:00:00`
pub fn display_from_iso(iso: &str) -> String {
    iso.chars().take(19).collect::<String>().replace('T', " ")
}

/// Client-side creation time stored alongside the server timestamp
pub fn client_created_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

pub fn integer_value(value: i64) -> Value {
    json!({ "integerValue": value.to_string() })
}

/// Field transform setting `timestamp` to the commit time
pub fn server_timestamp_transform() -> Value {
    json!({ "fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME" })
}
