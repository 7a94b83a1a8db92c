//! Playlist types.

use serde::{Deserialize, Serialize};

use super::video::Video;

/// How a playlist selects its videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaylistType {
    /// Hand-picked videos.
    Explicit,
    /// Most recently activated first.
    NewestToOldest,
    /// Oldest first.
    OldestToNewest,
    /// Alphabetical by title.
    Alphabetical,
    /// Most played first.
    PlaysTotal,
    /// Most played this week first.
    PlaysTrailingWeek,
}

/// A playlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Playlist id. Absent on playlists that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Publisher-assigned id.
    #[serde(default, alias = "referenceID", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Selection rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_type: Option<PlaylistType>,
    /// Ids of the videos in the playlist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub video_ids: Vec<i64>,
    /// Full video records, when the API included them.
    #[serde(default, deserialize_with = "nullable_vec", skip_serializing)]
    pub videos: Vec<Video>,
    /// Thumbnail URL.
    #[serde(default, rename = "thumbnailURL", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Playlist {
    /// Creates an explicit playlist with a title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            playlist_type: Some(PlaylistType::Explicit),
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

    /// Sets the video ids.
    pub fn with_video_ids(mut self, video_ids: impl IntoIterator<Item = i64>) -> Self {
        self.video_ids = video_ids.into_iter().collect();
        self
    }
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<Video>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let videos: Option<Vec<Option<Video>>> = Option::deserialize(deserializer)?;
    Ok(videos.unwrap_or_default().into_iter().flatten().collect())
}
