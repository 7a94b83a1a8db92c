//! Resource services built on the finder.
//!
//! Each service borrows the client and maps finder hooks and write
//! operations onto API commands.

pub mod playlists;
pub mod videos;

pub use playlists::PlaylistService;
pub use videos::{VideoSearch, VideoService};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::EncosionClient;
use crate::errors::{EncosionError, EncosionResult};
use crate::finder::{unique, Found};
use crate::query::Options;
use crate::types::ItemCollection;

fn parse_entity<T: DeserializeOwned>(value: Value) -> EncosionResult<T> {
    Ok(serde_json::from_value(value)?)
}

/// Decodes a stored entity. A body without an `id` is not an entity.
fn parse_record<T: DeserializeOwned>(value: Value, resource_name: &str) -> EncosionResult<T> {
    if value.get("id").map_or(true, Value::is_null) {
        return Err(EncosionError::Serialization {
            message: format!("{} response carries no id", resource_name),
        });
    }
    parse_entity(value)
}

fn parse_items<T: DeserializeOwned>(value: Value) -> EncosionResult<Vec<T>> {
    let collection: ItemCollection<T> = serde_json::from_value(value)?;
    Ok(collection.into_items())
}

/// Commands and parameter names of a reference-id lookup.
struct ReferenceLookup {
    resource_name: &'static str,
    one_command: &'static str,
    one_key: &'static str,
    many_command: &'static str,
    many_key: &'static str,
}

/// Resolves reference ids with the same empty/one/many rule as `find`.
async fn find_by_reference_ids<T: DeserializeOwned>(
    client: &EncosionClient,
    lookup: &ReferenceLookup,
    reference_ids: Vec<String>,
    mut options: Options,
) -> EncosionResult<Found<T>> {
    let mut reference_ids = unique(reference_ids);

    match reference_ids.len() {
        0 => Err(EncosionError::not_found(format!(
            "Couldn't find {} without a reference ID",
            lookup.resource_name
        ))),
        1 => {
            options.insert(lookup.one_key, reference_ids.remove(0));
            let response = client.read(lookup.one_command, &options).await?;
            Ok(Found::One(parse_record(response, lookup.resource_name)?))
        }
        _ => {
            options.insert(lookup.many_key, reference_ids);
            let response = client.read(lookup.many_command, &options).await?;
            Ok(Found::Many(parse_items(response)?))
        }
    }
}

fn single<T>(found: Found<T>, resource_name: &str) -> EncosionResult<T> {
    match found {
        Found::One(item) => Ok(item),
        Found::Many(mut items) => items
            .pop()
            .ok_or_else(|| EncosionError::not_found(format!("Couldn't find {}", resource_name))),
    }
}
