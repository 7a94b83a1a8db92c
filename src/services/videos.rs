//! Video service.

use async_trait::async_trait;

use super::{find_by_reference_ids, parse_entity, parse_items, parse_record, single, ReferenceLookup};
use crate::client::EncosionClient;
use crate::errors::{EncosionError, EncosionResult};
use crate::finder::{Found, Resource};
use crate::query::Options;
use crate::transport::FileUpload;
use crate::types::{SortBy, SortOrder, Video};

const REFERENCE_LOOKUP: ReferenceLookup = ReferenceLookup {
    resource_name: "Video",
    one_command: "find_video_by_reference_id",
    one_key: "reference_id",
    many_command: "find_videos_by_reference_ids",
    many_key: "reference_ids",
};

/// Tag and text terms for `search_videos`.
///
/// Terms use the API's `field:value` syntax, e.g. `tag:ocean` or
/// `topic:learned`. Empty term groups are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSearch {
    all: Vec<String>,
    any: Vec<String>,
    none: Vec<String>,
    sort: Option<(SortBy, SortOrder)>,
}

impl VideoSearch {
    /// Creates an empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a term to match.
    pub fn all(mut self, term: impl Into<String>) -> Self {
        self.all.push(term.into());
        self
    }

    /// Adds a term of which at least one must match.
    pub fn any(mut self, term: impl Into<String>) -> Self {
        self.any.push(term.into());
        self
    }

    /// Excludes videos matching a term.
    pub fn none(mut self, term: impl Into<String>) -> Self {
        self.none.push(term.into());
        self
    }

    /// Sorts the results.
    pub fn sort(mut self, by: SortBy, order: SortOrder) -> Self {
        self.sort = Some((by, order));
        self
    }

    fn apply(self, options: &mut Options) {
        for (key, terms) in [("all", self.all), ("any", self.any), ("none", self.none)] {
            if !terms.is_empty() {
                options.insert(key, terms);
            }
        }
        if let Some((by, order)) = self.sort {
            options.insert("sort_by", by.as_str());
            options.insert("sort_order", order.as_str());
        }
    }
}

/// Video lookups, search and writes.
#[derive(Debug, Clone, Copy)]
pub struct VideoService<'a> {
    client: &'a EncosionClient,
}

impl<'a> VideoService<'a> {
    /// Creates a service over a client.
    pub fn new(client: &'a EncosionClient) -> Self {
        Self { client }
    }

    /// Finds videos by reference id. One distinct id yields a single
    /// video; several yield a list.
    pub async fn find_by_reference_ids<I, S>(
        &self,
        reference_ids: I,
        options: Options,
    ) -> EncosionResult<Found<Video>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reference_ids = reference_ids.into_iter().map(Into::into).collect();
        find_by_reference_ids(self.client, &REFERENCE_LOOKUP, reference_ids, options).await
    }

    /// Finds one video by reference id.
    pub async fn find_by_reference_id(
        &self,
        reference_id: impl Into<String>,
        options: Options,
    ) -> EncosionResult<Video> {
        let found = self.find_by_reference_ids([reference_id.into()], options).await?;
        single(found, REFERENCE_LOOKUP.resource_name)
    }

    /// Searches videos. Paging goes in `options` (`page_size`,
    /// `page_number`).
    pub async fn search(&self, search: VideoSearch, mut options: Options) -> EncosionResult<Vec<Video>> {
        search.apply(&mut options);
        let response = self.client.read("search_videos", &options).await?;
        parse_items(response)
    }

    /// Uploads a video and returns its new id.
    pub async fn create(&self, video: &Video, file: FileUpload) -> EncosionResult<i64> {
        if file.is_empty() {
            return Err(EncosionError::MissingFile {
                message: format!("create_video needs file contents for {}", file.file_name),
            });
        }

        let options = Options::new().with("video", serde_json::to_value(video)?);
        let result = self.client.write("create_video", &options, Some(file)).await?;
        parse_entity(result)
    }

    /// Updates a video's metadata and returns it as stored.
    pub async fn update(&self, video: &Video) -> EncosionResult<Video> {
        let options = Options::new().with("video", serde_json::to_value(video)?);
        let result = self.client.write("update_video", &options, None).await?;
        parse_record(result, REFERENCE_LOOKUP.resource_name)
    }

    /// Deletes a video. With `cascade`, it is also removed from every
    /// playlist that holds it.
    pub async fn delete(&self, video_id: i64, cascade: bool) -> EncosionResult<()> {
        let options = Options::new()
            .with("video_id", video_id)
            .with("cascade", cascade);
        self.client.write("delete_video", &options, None).await?;
        Ok(())
    }
}

#[async_trait]
impl<'a> Resource for VideoService<'a> {
    type Id = i64;
    type Entity = Video;

    fn resource_name(&self) -> &'static str {
        "Video"
    }

    async fn find_one(&self, id: i64, mut options: Options) -> EncosionResult<Video> {
        options.insert("video_id", id);
        let response = self.client.read("find_video_by_id", &options).await?;
        parse_record(response, self.resource_name())
    }

    async fn find_some(&self, ids: Vec<i64>, mut options: Options) -> EncosionResult<Vec<Video>> {
        options.insert("video_ids", ids);
        let response = self.client.read("find_videos_by_ids", &options).await?;
        parse_items(response)
    }

    async fn find_all(&self, options: Options) -> EncosionResult<Vec<Video>> {
        let response = self.client.read("find_all_videos", &options).await?;
        parse_items(response)
    }
}
