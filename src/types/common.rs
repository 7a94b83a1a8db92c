//! Common types shared across resources.

use serde::{Deserialize, Serialize};

/// A page of results from a listing command.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCollection<T> {
    /// Returned items. Ids the API could not resolve come back as `null`.
    pub items: Vec<Option<T>>,
    /// Zero-based page number.
    #[serde(default)]
    pub page_number: Option<i64>,
    /// Page size.
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Total number of items, or -1 when not requested.
    #[serde(default)]
    pub total_count: Option<i64>,
}

impl<T> ItemCollection<T> {
    /// Returns the resolved items, dropping `null` entries.
    pub fn into_items(self) -> Vec<T> {
        self.items.into_iter().flatten().collect()
    }
}

/// Sort field for listing and search commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    /// Title.
    DisplayName,
    /// Referenced id.
    ReferenceId,
    /// Publish date.
    PublishDate,
    /// Creation date.
    CreationDate,
    /// Last modification date.
    ModifiedDate,
    /// Total plays.
    PlaysTotal,
    /// Plays over the trailing week.
    PlaysTrailingWeek,
}

impl SortBy {
    /// Returns the wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::DisplayName => "DISPLAY_NAME",
            SortBy::ReferenceId => "REFERENCE_ID",
            SortBy::PublishDate => "PUBLISH_DATE",
            SortBy::CreationDate => "CREATION_DATE",
            SortBy::ModifiedDate => "MODIFIED_DATE",
            SortBy::PlaysTotal => "PLAYS_TOTAL",
            SortBy::PlaysTrailingWeek => "PLAYS_TRAILING_WEEK",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Dates travel as strings holding milliseconds since the Unix epoch.
pub(crate) mod epoch_millis {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.timestamp_millis().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let millis = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_i64(),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            other => return Err(de::Error::custom(format!("invalid date: {}", other))),
        };

        match millis {
            Some(millis) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("date out of range: {}", millis))),
            None => Err(de::Error::custom("date is not a millisecond timestamp")),
        }
    }
}
