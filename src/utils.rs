use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Removes duplicate track ids in place, keeping the first occurrence of each
/// id. First-seen order decides precedence everywhere a track appears in
/// several source lists.
pub fn dedup_track_ids(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// Address advertised when no contact email is configured.
pub const DEFAULT_CONTACT_EMAIL: &str = "default@example.com";

/// Builds the playlist description from the configured template.
///
/// The template carries one `{}` slot for the lead artist of the current top
/// track. The submission/cover attribution line is always appended, falling
/// back to [`DEFAULT_CONTACT_EMAIL`] when none is configured.
pub fn format_description(template: &str, artist_name: &str, contact_email: Option<&str>) -> String {
    let formatted = if template.contains("{}") {
        template.replacen("{}", artist_name, 1)
    } else {
        format!("{} Featuring {}.", template, artist_name)
    };

    format!(
        "{} For submissions, contact: {}. Cover: {}",
        formatted,
        contact_email.unwrap_or(DEFAULT_CONTACT_EMAIL),
        artist_name
    )
}
