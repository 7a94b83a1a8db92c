//! Video types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::epoch_millis;

/// Monetization of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Economics {
    /// No ads.
    Free,
    /// Ads may be served.
    AdSupported,
}

/// Lifecycle state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    /// Playable.
    Active,
    /// Hidden from players.
    Inactive,
    /// Scheduled for removal.
    Deleted,
}

/// A video asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Video id. Absent on videos that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Publisher-assigned id.
    #[serde(default, alias = "referenceID", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Related link.
    #[serde(default, rename = "linkURL", skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Related link text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    /// Still image URL.
    #[serde(default, rename = "videoStillURL", skip_serializing_if = "Option::is_none")]
    pub video_still_url: Option<String>,
    /// Thumbnail URL.
    #[serde(default, rename = "thumbnailURL", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Rendition URL (only returned to tokens with URL access).
    #[serde(default, rename = "FLVURL", skip_serializing_if = "Option::is_none")]
    pub flv_url: Option<String>,
    /// Duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    /// Monetization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economics: Option<Economics>,
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_state: Option<ItemState>,
    /// Total plays.
    #[serde(default, skip_serializing)]
    pub plays_total: Option<i64>,
    /// Plays over the trailing week.
    #[serde(default, skip_serializing)]
    pub plays_trailing_week: Option<i64>,
    /// Creation time.
    #[serde(default, with = "epoch_millis", skip_serializing)]
    pub creation_date: Option<DateTime<Utc>>,
    /// Publication time.
    #[serde(default, with = "epoch_millis", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, with = "epoch_millis", skip_serializing)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Video {
    /// Creates a video with a title, ready to be uploaded.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the short description.
    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }

    /// Sets the reference id.
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
