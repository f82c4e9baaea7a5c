//! YouTube Music API client library.
//!
//! Provides blocking access to the YouTube Music web ("InnerTube") API:
//! catalogue search, library playlists, playlist contents, liked songs and
//! listening history.
//!
//! # Authentication
//!
//! Library endpoints need a signed-in account. [`auth::Credentials`] covers
//! the supported forms: an OAuth token file, a browser headers file, a bare
//! `__Secure-3PSID` cookie, or anonymous access (search only).
//!
//! ```no_run
//! use ytmusic_api::auth::{BrowserHeaders, Credentials, default_headers_path};
//! use ytmusic_api::{SearchFilter, YtMusicClient};
//!
//! let headers = BrowserHeaders::load(&default_headers_path().unwrap()).unwrap();
//! let client = YtMusicClient::new(Credentials::Browser(headers)).unwrap();
//! let songs = client.search("gekirin", SearchFilter::Songs, 5).unwrap();
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                  | InnerTube request                         | Description       |
//! |-----------------------------------------|-------------------------------------------|-------------------|
//! | [`YtMusicClient::search`]               | `search`                                  | Search catalogue  |
//! | [`YtMusicClient::library_playlists`]    | `browse` `FEmusic_liked_playlists`        | Library playlists |
//! | [`YtMusicClient::playlist`]             | `browse` `VL{id}`                         | Playlist tracks   |
//! | [`YtMusicClient::liked_songs`]          | `browse` `VLLM`                           | Liked songs       |
//! | [`YtMusicClient::history`]              | `browse` `FEmusic_history`                | Play history      |
//!
//! # Records
//!
//! Results are returned as [`serde_json::Value`] records that keep the
//! service's own field names and display strings. Shapes differ between
//! endpoints; consumers are expected to normalize them.

pub mod auth;
pub mod client;
mod crypto;
pub mod error;
mod library;
mod parsing;
mod playlist;
pub mod provider;
mod search;
pub mod types;

pub use client::{ClientConfig, YtMusicClient};
pub use error::{Result, YtMusicError};
pub use provider::MusicProvider;
pub use types::SearchFilter;
