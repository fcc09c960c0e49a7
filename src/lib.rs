//! Spotify Playlist Sync CLI Library
//!
//! This library keeps curated "target" playlists on Spotify in sync with one
//! or more "source" playlists. It merges and deduplicates source tracks,
//! reconciles them against the current remote state, trims to a size cap,
//! reorders in place without disturbing per-track "added" timestamps, and
//! refreshes the playlist description and cover image.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Environment variables and playlist configuration
//! - `management` - Persisted records, last-update gate and token storage
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Reconciliation, trimming, reordering and metadata refresh
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use sporsync::{config, sync};
//!
//! #[tokio::main]
//! async fn main() -> sporsync::Res<()> {
//!     config::load_env().await?;
//!     sync::run_all(false, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// Result alias over a boxed dynamic error, `Send + Sync` for async
/// contexts. Seams with a meaningful failure taxonomy use their own error
/// enums instead (see `spotify::request::ApiError`).
///
/// # Example
///
/// ```
/// use sporsync::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point. Used for
/// general status updates throughout the pipeline.
///
/// # Example
///
/// ```
/// use sporsync::info;
///
/// info!("Starting sync for {} playlists", 3);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// use sporsync::success;
///
/// success!("Playlist {} synchronized", "weekly-picks");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and terminates the
/// program with exit code 1. Only for unrecoverable conditions such as
/// missing credentials or a malformed configuration file; anything a re-run
/// can fix uses [`warning!`] instead.
///
/// # Example
///
/// ```no_run
/// use sporsync::error;
///
/// error!("Failed to load playlist configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark. Used for
/// recoverable issues such as a failed batch or a skipped move operation.
///
/// # Example
///
/// ```
/// use sporsync::warning;
///
/// warning!("Failed to add batch {}: {}", 2, "rate limited");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
