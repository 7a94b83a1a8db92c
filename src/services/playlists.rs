//! Playlist service.

use async_trait::async_trait;

use super::{find_by_reference_ids, parse_entity, parse_items, parse_record, single, ReferenceLookup};
use crate::client::EncosionClient;
use crate::errors::EncosionResult;
use crate::finder::{Found, Resource};
use crate::query::Options;
use crate::types::Playlist;

const REFERENCE_LOOKUP: ReferenceLookup = ReferenceLookup {
    resource_name: "Playlist",
    one_command: "find_playlist_by_reference_id",
    one_key: "reference_id",
    many_command: "find_playlists_by_reference_ids",
    many_key: "reference_ids",
};

/// Playlist lookups and writes.
#[derive(Debug, Clone, Copy)]
pub struct PlaylistService<'a> {
    client: &'a EncosionClient,
}

impl<'a> PlaylistService<'a> {
    /// Creates a service over a client.
    pub fn new(client: &'a EncosionClient) -> Self {
        Self { client }
    }

    /// Finds playlists by reference id. One distinct id yields a single
    /// playlist; several yield a list.
    pub async fn find_by_reference_ids<I, S>(
        &self,
        reference_ids: I,
        options: Options,
    ) -> EncosionResult<Found<Playlist>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reference_ids = reference_ids.into_iter().map(Into::into).collect();
        find_by_reference_ids(self.client, &REFERENCE_LOOKUP, reference_ids, options).await
    }

    /// Finds one playlist by reference id.
    pub async fn find_by_reference_id(
        &self,
        reference_id: impl Into<String>,
        options: Options,
    ) -> EncosionResult<Playlist> {
        let found = self.find_by_reference_ids([reference_id.into()], options).await?;
        single(found, REFERENCE_LOOKUP.resource_name)
    }

    /// Creates a playlist and returns its new id.
    pub async fn create(&self, playlist: &Playlist) -> EncosionResult<i64> {
        let options = Options::new().with("playlist", serde_json::to_value(playlist)?);
        let result = self.client.write("create_playlist", &options, None).await?;
        parse_entity(result)
    }

    /// Updates a playlist and returns it as stored.
    pub async fn update(&self, playlist: &Playlist) -> EncosionResult<Playlist> {
        let options = Options::new().with("playlist", serde_json::to_value(playlist)?);
        let result = self.client.write("update_playlist", &options, None).await?;
        parse_record(result, REFERENCE_LOOKUP.resource_name)
    }

    /// Deletes a playlist. With `cascade`, it is also removed from any
    /// player that references it.
    pub async fn delete(&self, playlist_id: i64, cascade: bool) -> EncosionResult<()> {
        let options = Options::new()
            .with("playlist_id", playlist_id)
            .with("cascade", cascade);
        self.client.write("delete_playlist", &options, None).await?;
        Ok(())
    }
}

#[async_trait]
impl<'a> Resource for PlaylistService<'a> {
    type Id = i64;
    type Entity = Playlist;

    fn resource_name(&self) -> &'static str {
        "Playlist"
    }

    async fn find_one(&self, id: i64, mut options: Options) -> EncosionResult<Playlist> {
        options.insert("playlist_id", id);
        let response = self.client.read("find_playlist_by_id", &options).await?;
        parse_record(response, self.resource_name())
    }

    async fn find_some(&self, ids: Vec<i64>, mut options: Options) -> EncosionResult<Vec<Playlist>> {
        options.insert("playlist_ids", ids);
        let response = self.client.read("find_playlists_by_ids", &options).await?;
        parse_items(response)
    }

    async fn find_all(&self, options: Options) -> EncosionResult<Vec<Playlist>> {
        let response = self.client.read("find_all_playlists", &options).await?;
        parse_items(response)
    }
}
