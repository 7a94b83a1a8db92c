//! Id-based resolution shared by every resource type.
//!
//! A resource supplies three hooks ([`Resource::find_one`],
//! [`Resource::find_some`], [`Resource::find_all`]); [`find`] decides which
//! one a request maps to. The dispatcher itself never touches the network.
//!
//! ```rust,no_run
//! use encosion_client::{EncosionClient, Options, Selector};
//! use encosion_client::finder::Resource;
//!
//! # async fn run(client: EncosionClient) -> encosion_client::EncosionResult<()> {
//! let playlists = client.playlists();
//! let one = playlists.find(Selector::one(42), Options::new()).await?.into_one();
//! let many = playlists.find(Selector::ids([1, 2, 3]), Options::new()).await?.into_vec();
//! let all = playlists.all(Options::new()).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::errors::{EncosionError, EncosionResult};
use crate::query::Options;

/// What a `find` call asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<I> {
    /// Every entity of the resource type.
    All,
    /// One or more ids passed individually. A single resolved id yields a
    /// single entity.
    Ids(Vec<I>),
    /// Ids passed as one list. The result is always a list, and an empty
    /// list is answered with an empty list.
    List(Vec<I>),
}

impl<I> Selector<I> {
    /// Selects a single id.
    pub fn one(id: I) -> Self {
        Selector::Ids(vec![id])
    }

    /// Selects individually passed ids.
    pub fn ids(ids: impl IntoIterator<Item = I>) -> Self {
        Selector::Ids(ids.into_iter().collect())
    }

    /// Selects a list of ids.
    pub fn list(ids: impl IntoIterator<Item = I>) -> Self {
        Selector::List(ids.into_iter().collect())
    }
}

/// Result of a `find` call, shaped by the selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Found<T> {
    /// A single entity.
    One(T),
    /// A list of entities.
    Many(Vec<T>),
}

impl<T> Found<T> {
    /// Returns the entities as a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Found::One(item) => vec![item],
            Found::Many(items) => items,
        }
    }

    /// Returns the single entity, if the result is single.
    pub fn into_one(self) -> Option<T> {
        match self {
            Found::One(item) => Some(item),
            Found::Many(_) => None,
        }
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        match self {
            Found::One(_) => 1,
            Found::Many(items) => items.len(),
        }
    }

    /// Returns true if no entity was returned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability interface implemented per resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Display + Send + Sync;
    /// Decoded entity type.
    type Entity: Send;

    /// Human-readable resource name, used in error messages.
    fn resource_name(&self) -> &'static str;

    /// Fetches one entity by id.
    async fn find_one(&self, id: Self::Id, options: Options) -> EncosionResult<Self::Entity>;

    /// Fetches several entities by id.
    async fn find_some(
        &self,
        ids: Vec<Self::Id>,
        options: Options,
    ) -> EncosionResult<Vec<Self::Entity>>;

    /// Fetches every entity.
    async fn find_all(&self, options: Options) -> EncosionResult<Vec<Self::Entity>>;

    /// Resolves a selector through the hooks above.
    async fn find(
        &self,
        selector: Selector<Self::Id>,
        options: Options,
    ) -> EncosionResult<Found<Self::Entity>>
    where
        Self: Sized,
    {
        find(self, selector, options).await
    }

    /// Alias for `find(Selector::All, options)`.
    async fn all(&self, options: Options) -> EncosionResult<Vec<Self::Entity>>
    where
        Self: Sized,
    {
        find_all(self, options).await
    }
}

/// Dispatches a selector to the matching resource hook.
pub async fn find<R>(
    resource: &R,
    selector: Selector<R::Id>,
    options: Options,
) -> EncosionResult<Found<R::Entity>>
where
    R: Resource + ?Sized,
{
    let (ids, expects_list) = match selector {
        Selector::All => return Ok(Found::Many(resource.find_all(options).await?)),
        Selector::List(ids) if ids.is_empty() => return Ok(Found::Many(Vec::new())),
        Selector::List(ids) => (ids, true),
        Selector::Ids(ids) => (ids, false),
    };

    let mut ids = unique(ids);

    match ids.len() {
        0 => Err(EncosionError::not_found(format!(
            "Couldn't find {} without an ID",
            resource.resource_name()
        ))),
        1 => {
            let id = ids.remove(0);
            let entity = resource.find_one(id, options).await?;
            Ok(if expects_list {
                Found::Many(vec![entity])
            } else {
                Found::One(entity)
            })
        }
        _ => Ok(Found::Many(resource.find_some(ids, options).await?)),
    }
}

/// Fetches every entity of a resource.
pub async fn find_all<R>(resource: &R, options: Options) -> EncosionResult<Vec<R::Entity>>
where
    R: Resource + ?Sized,
{
    resource.find_all(options).await
}

/// Removes duplicate ids, keeping the first occurrence of each.
pub fn unique<I: Clone + Eq + Hash>(ids: Vec<I>) -> Vec<I> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        One(u64, Options),
        Some(Vec<u64>, Options),
        All(Options),
    }

    #[derive(Default)]
    struct RecordingResource {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingResource {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Resource for RecordingResource {
        type Id = u64;
        type Entity = String;

        fn resource_name(&self) -> &'static str {
            "Thing"
        }

        async fn find_one(&self, id: u64, options: Options) -> EncosionResult<String> {
            self.calls.lock().unwrap().push(Call::One(id, options));
            Ok(format!("thing-{}", id))
        }

        async fn find_some(&self, ids: Vec<u64>, options: Options) -> EncosionResult<Vec<String>> {
            self.calls.lock().unwrap().push(Call::Some(ids.clone(), options));
            Ok(ids.iter().map(|id| format!("thing-{}", id)).collect())
        }

        async fn find_all(&self, options: Options) -> EncosionResult<Vec<String>> {
            self.calls.lock().unwrap().push(Call::All(options));
            Ok(vec!["thing-1".to_string(), "thing-2".to_string()])
        }
    }

    #[tokio::test]
    async fn test_single_id_is_unwrapped() {
        let resource = RecordingResource::default();
        let found = resource.find(Selector::one(7), Options::new()).await.unwrap();

        assert_eq!(found, Found::One("thing-7".to_string()));
        assert_eq!(resource.calls(), vec![Call::One(7, Options::new())]);
    }

    #[tokio::test]
    async fn test_single_id_in_list_is_wrapped() {
        let resource = RecordingResource::default();
        let found = resource.find(Selector::list([7]), Options::new()).await.unwrap();

        assert_eq!(found, Found::Many(vec!["thing-7".to_string()]));
        assert_eq!(resource.calls(), vec![Call::One(7, Options::new())]);
    }

    #[tokio::test]
    async fn test_several_ids_call_find_some_once() {
        let resource = RecordingResource::default();
        let found = resource.find(Selector::ids([7, 8, 9]), Options::new()).await.unwrap();

        assert_eq!(found.len(), 3);
        assert_eq!(resource.calls(), vec![Call::Some(vec![7, 8, 9], Options::new())]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_collapse() {
        let resource = RecordingResource::default();
        let found = resource.find(Selector::ids([5, 5, 5]), Options::new()).await.unwrap();

        assert_eq!(found, Found::One("thing-5".to_string()));
        assert_eq!(resource.calls(), vec![Call::One(5, Options::new())]);
    }

    #[tokio::test]
    async fn test_dedup_keeps_first_occurrence_order() {
        let resource = RecordingResource::default();
        resource.find(Selector::list([9, 3, 9, 1, 3]), Options::new()).await.unwrap();

        assert_eq!(resource.calls(), vec![Call::Some(vec![9, 3, 1], Options::new())]);
    }

    #[tokio::test]
    async fn test_explicit_empty_list_returns_empty_without_calls() {
        let resource = RecordingResource::default();
        let found = resource.find(Selector::list(Vec::<u64>::new()), Options::new()).await.unwrap();

        assert_eq!(found, Found::Many(vec![]));
        assert!(resource.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_ids_is_not_found() {
        let resource = RecordingResource::default();
        let error = resource
            .find(Selector::ids(Vec::<u64>::new()), Options::new())
            .await
            .unwrap_err();

        assert!(matches!(error, EncosionError::AssetNotFound { .. }));
        assert!(error.to_string().contains("Thing"));
        assert!(resource.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_forwards_options() {
        let resource = RecordingResource::default();
        let options = Options::new().with("topic", "x");
        let items = resource.all(options.clone()).await.unwrap();

        assert_eq!(items, vec!["thing-1".to_string(), "thing-2".to_string()]);
        assert_eq!(resource.calls(), vec![Call::All(options)]);
    }

    #[tokio::test]
    async fn test_find_all_selector_matches_all_alias() {
        let resource = RecordingResource::default();
        let found = resource
            .find(Selector::All, Options::new().with("page_size", json!(10)))
            .await
            .unwrap();

        assert_eq!(found.into_vec().len(), 2);
        assert!(matches!(resource.calls().as_slice(), [Call::All(_)]));
    }

    #[test]
    fn test_found_accessors() {
        assert_eq!(Found::One(1).into_vec(), vec![1]);
        assert_eq!(Found::Many(vec![1, 2]).into_one(), None);
        assert!(Found::<u8>::Many(vec![]).is_empty());
    }
}
