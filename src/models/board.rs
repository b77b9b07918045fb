use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_TITLE_REQUIRED, ERR_TITLE_TOO_LONG, MAX_TITLE_LENGTH};
use crate::error::{AppError, Result};

/// Board record stored in redb, keyed by board id
/// Uses Unix timestamp for compact storage with bincode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub title: String,
    pub org_id: String,
    pub author_id: String,
    pub author_name: String,
    pub image_url: String,
    /// When the board was created (Unix timestamp)
    pub created_at: i64,
}

/// Fields supplied by the caller when inserting a board
/// The store assigns the id and creation time
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub org_id: String,
    pub author_id: String,
    pub author_name: String,
    pub image_url: String,
}

/// Board model for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    pub org_id: String,
    pub author_id: String,
    pub author_name: String,
    pub image_url: String,
    /// RFC 3339 creation time
    pub created_at: String,
}

impl Board {
    pub fn from_record(id: impl Into<String>, record: BoardRecord) -> Self {
        Self {
            id: id.into(),
            title: record.title,
            org_id: record.org_id,
            author_id: record.author_id,
            author_name: record.author_name,
            image_url: record.image_url,
            created_at: timestamp_to_rfc3339(record.created_at),
        }
    }

    /// Trim a requested title and check it is 1..=MAX_TITLE_LENGTH UTF-16 units
    ///
    /// A byte order mark counts as whitespace for trimming. Returns the
    /// trimmed title on success.
    pub fn validate_title(title: &str) -> Result<&str> {
        let trimmed = title.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');

        if trimmed.is_empty() {
            return Err(AppError::InvalidInput(ERR_TITLE_REQUIRED.to_string()));
        }

        if trimmed.encode_utf16().count() > MAX_TITLE_LENGTH {
            return Err(AppError::InvalidInput(ERR_TITLE_TOO_LONG.to_string()));
        }

        Ok(trimmed)
    }
}

/// Convert Unix timestamp to RFC3339 string, defaulting to now if invalid
pub fn timestamp_to_rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}
