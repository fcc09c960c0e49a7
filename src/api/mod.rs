//! # API Module
//!
//! HTTP endpoints for the temporary local web server used during
//! authentication. The server only lives for the duration of the OAuth
//! flow started by `sporsync auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the OAuth callback from Spotify's authorization
//!   server, completing the PKCE flow by exchanging the authorization code
//!   for an access token.
//! - [`health`] - Health check returning application status and version.
//!
//! ## Related Modules
//!
//! - [`crate::spotify::auth`] - the PKCE flow that spawns this server
//! - [`crate::types`] - token type definitions

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
