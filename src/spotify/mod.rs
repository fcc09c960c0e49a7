//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the sync
//! pipeline: authentication, playlist reads and mutations, and track metadata
//! lookups. It abstracts away HTTP communication, OAuth flows, error handling
//! and rate limiting behind a small set of async functions.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Sync Pipeline)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Request Execution (backoff, rate limits)
//!     ├── Playlist Operations (read, add, remove, reorder, metadata)
//!     └── Track Metadata (batch lookups)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Rate Limiting
//!
//! Every mutating or paginated call is funneled through
//! [`request::with_backoff`], which retries 429 Too Many Requests responses
//! with exponential backoff (respecting the `Retry-After` header when
//! present) up to a configured retry budget. All other failures are
//! classified as fatal for that single operation and returned to the caller,
//! which decides whether the surrounding pipeline continues.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - paginated snapshot with added-at dates
//! - `POST /playlists/{id}/tracks` - add tracks in batches
//! - `DELETE /playlists/{id}/tracks` - remove all occurrences of tracks
//! - `PUT /playlists/{id}/tracks` - move a contiguous range (reorder)
//! - `PUT /playlists/{id}` - change playlist description
//! - `PUT /playlists/{id}/images` - upload base64 JPEG cover art
//! - `GET /tracks` - batch track metadata (up to 50 ids)
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Types
//!
//! All API functions return [`request::ApiError`], which distinguishes
//! retryable rate limits from rejected requests and transport failures.

pub mod auth;
pub mod playlist;
pub mod request;
pub mod tracks;
