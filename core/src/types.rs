//! Domain DTOs for the fasting log API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Field
//! names are camelCase on the wire (`fastType`), dates are `YYYY-MM-DD`.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// The kind of fast being logged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FastType {
    Religious,
    Intermittent,
}

impl FastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastType::Religious => "RELIGIOUS",
            FastType::Intermittent => "INTERMITTENT",
        }
    }
}

impl fmt::Display for FastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RELIGIOUS" => Ok(FastType::Religious),
            "INTERMITTENT" => Ok(FastType::Intermittent),
            other => Err(format!(
                "unknown fast type `{other}` (expected religious or intermittent)"
            )),
        }
    }
}

/// A single fasting log entry returned by the API.
///
/// `id` is `None` only for entries that have not been persisted yet; every
/// entry held by the controller carries one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FastLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub fast_type: FastType,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

/// Request payload for creating or updating an entry: every field except `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FastLogForm {
    pub date: NaiveDate,
    pub fast_type: FastType,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl FastLogForm {
    /// A blank form for `date`: religious, not completed, no notes.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            fast_type: FastType::Religious,
            completed: false,
            notes: String::new(),
        }
    }

    /// A blank form dated today in the local timezone.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl From<&FastLog> for FastLogForm {
    fn from(log: &FastLog) -> Self {
        Self {
            date: log.date,
            fast_type: log.fast_type,
            completed: log.completed,
            notes: log.notes.clone(),
        }
    }
}

// The backend stores notes as a nullable column.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
