//! Task identifiers
//!
//! Generated IDs have the form `t-{10-char-hash}` (e.g. `t-7f2b4c19ae`).
//! The hash is derived from the title, the creation timestamp and a nonce,
//! so the same title created twice gets two different IDs.
//!
//! IDs read from storage are treated as opaque: any non-empty string is a
//! valid ID, which keeps blobs written by other tools loadable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const HASH_LEN: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID cannot be empty")]
    Empty,
}

/// Generates a short hash from title, timestamp and nonce
fn generate_hash(title: &str, timestamp: DateTime<Utc>, nonce: u32) -> String {
    let input = format!(
        "{}{}{}",
        title,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..HASH_LEN].to_string()
}

/// Opaque, unique task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Creates a fresh ID for a task with the given title
    pub fn generate(title: &str, timestamp: DateTime<Utc>, nonce: u32) -> Self {
        Self(format!("t-{}", generate_hash(title, timestamp, nonce)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    /// Keeps `s` exactly as given, surrounding whitespace included
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}
