//! Encosion Client Library
//!
//! An async Rust client for the Brightcove Media API read and write
//! services, covering playlists and videos.
//!
//! # Features
//!
//! - **Id-based lookups**: one id, several ids, or everything, through a
//!   single [`finder::Resource::find`] call
//! - **Typed errors**: HTTP failures, empty results and API faults each
//!   map to their own [`EncosionError`] variant
//! - **Timeout retries**: API timeouts (fault code 103) are re-issued
//!   immediately up to a configured bound
//! - **Uploads**: write calls carry an optional file as a multipart part
//! - **Observability**: `tracing` events and per-command metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use encosion_client::{EncosionClient, EncosionConfig, Options, Selector};
//! use encosion_client::finder::Resource;
//! use encosion_client::services::VideoSearch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EncosionConfig::builder()
//!         .read_token("your-read-token")
//!         .build()?;
//!     let client = EncosionClient::new(config)?;
//!
//!     let video = client.videos().find(Selector::one(496518762), Options::new()).await?;
//!     println!("{:?}", video.into_one().and_then(|v| v.name));
//!
//!     let learned = client
//!         .videos()
//!         .search(VideoSearch::new().all("topic:learned"), Options::new())
//!         .await?;
//!     println!("{} videos", learned.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod finder;
pub mod observability;
pub mod query;
pub mod resilience;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use auth::{AccessIntent, Credentials};
pub use client::{EncosionClient, EncosionClientBuilder};
pub use config::EncosionConfig;
pub use errors::{EncosionError, EncosionResult, ErrorKind};
pub use finder::{Found, Resource, Selector};
pub use query::Options;
pub use transport::FileUpload;

// Type re-exports
pub use types::{Playlist, PlaylistType, Video};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
