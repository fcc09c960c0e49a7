//! # CLI Module
//!
//! The command-line interface layer for sporsync. Each function here backs
//! one user-facing command and delegates to the sync pipeline, management
//! and Spotify API modules.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//! - [`sync`] - Full synchronization of all configured playlists
//! - [`metadata`] - Metadata-only refresh (description + cover) for all
//!   playlists, leaving track membership untouched
//! - [`info`] - Shows the configured playlist mappings and global settings
//!
//! ## Error Handling Philosophy
//!
//! Fatal conditions (missing configuration, no token, API unreachable)
//! terminate with a clear message before anything is mutated; per-playlist
//! and per-batch failures are logged and the run continues, since a re-run
//! converges to the desired state.

mod auth;
mod info;
mod metadata;
mod sync;

pub use auth::auth;
pub use info::info;
pub use metadata::metadata;
pub use sync::sync;
