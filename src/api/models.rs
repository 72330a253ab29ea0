//! Wire models for the Dreaming external time API

use chrono::NaiveDate;
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Language tracks supported by Dreaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// Spanish
    Es,
    /// French
    Fr,
}

impl Language {
    /// Two-letter code used in API query parameters
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Es => "Spanish",
            Language::Fr => "French",
        }
    }
}

/// Kind of activity a time entry records.
///
/// The service keeps adding recognized values, so anything we don't know is
/// carried through verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Watching,
    Listening,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Watching => write!(f, "watching"),
            ActivityType::Listening => write!(f, "listening"),
            ActivityType::Other(other) => write!(f, "{other}"),
        }
    }
}

/// One logged unit of learning activity, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Duration in seconds, always positive
    pub time_seconds: u32,
    #[serde(rename = "type")]
    pub entry_type: ActivityType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source-assigned identifier; never resent on submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Payload for creating an entry on the target account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub time_seconds: u32,
    #[serde(rename = "type")]
    pub entry_type: ActivityType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Client-generated, unique per submission attempt
    pub idempotency_key: String,
}

impl TimeEntry {
    /// Build the target-submission payload: same metadata, no source id, and
    /// a fresh idempotency key so the target treats it as a novel record.
    pub fn to_submission(&self) -> NewTimeEntry {
        NewTimeEntry {
            title: self.title.clone(),
            description: self.description.clone(),
            time_seconds: self.time_seconds,
            entry_type: self.entry_type.clone(),
            date: self.date,
            url: self.url.clone(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// One page of the list endpoint.
#[derive(Debug, Clone, Default)]
pub struct EntryPage {
    pub entries: Vec<TimeEntry>,
    pub next_cursor: Option<String>,
}

impl EntryPage {
    /// Keys older deployments wrapped the entry array under.
    const WRAPPER_KEYS: &'static [&'static str] =
        &["externalTimes", "entries", "data", "items", "results"];

    /// Normalize a list response.
    ///
    /// The service has returned a bare array, an object wrapping the array
    /// under several different keys, and double-encoded JSON at various
    /// points; accept all of them. Entries that fail to decode are skipped
    /// with a warning rather than failing the page.
    pub fn from_json(json: Value) -> Self {
        // Double-encoded payloads arrive as a JSON string; unwrap once.
        let json = match json {
            Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            other => other,
        };

        let (raw_entries, next_cursor) = match json {
            Value::Array(items) => (items, None),
            Value::Object(mut map) => {
                let next_cursor = map
                    .get("nextCursor")
                    .and_then(|c| c.as_str())
                    .map(|s| s.to_string());
                let items = Self::WRAPPER_KEYS
                    .iter()
                    .find_map(|key| match map.remove(*key) {
                        Some(Value::Array(items)) => Some(items),
                        _ => None,
                    })
                    // No wrapper key: treat the object as a single entry.
                    .unwrap_or_else(|| vec![Value::Object(map)]);
                (items, next_cursor)
            }
            other => {
                warn!("Unexpected list response shape: {other}");
                (Vec::new(), None)
            }
        };

        let entries = raw_entries
            .into_iter()
            .filter_map(|raw| {
                // Individual entries have shown up as JSON strings too.
                let raw = match raw {
                    Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
                    other => other,
                };
                match serde_json::from_value::<TimeEntry>(raw) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Skipping list entry that failed to decode: {e}");
                        None
                    }
                }
            })
            .collect();

        Self {
            entries,
            next_cursor,
        }
    }
}
