//! Type definitions for the media API.

pub mod common;
pub mod playlist;
pub mod video;

pub use common::{ItemCollection, SortBy, SortOrder};
pub use playlist::{Playlist, PlaylistType};
pub use video::{Economics, ItemState, Video};
