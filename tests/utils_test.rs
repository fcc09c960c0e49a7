use sporsync::config::ReorderStrategy;
use sporsync::utils::*;

// Helper to build an owned id list
fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_dedup_track_ids() {
    let mut tracks = ids(&["id1", "id2", "id1", "id3", "id2"]);

    dedup_track_ids(&mut tracks);

    // Should keep the first occurrence of each unique ID, in order
    assert_eq!(tracks, ids(&["id1", "id2", "id3"]));
}

#[test]
fn test_dedup_track_ids_no_duplicates() {
    let mut tracks = ids(&["a", "b", "c"]);
    dedup_track_ids(&mut tracks);
    assert_eq!(tracks, ids(&["a", "b", "c"]));
}

#[test]
fn test_dedup_track_ids_empty() {
    let mut tracks: Vec<String> = Vec::new();
    dedup_track_ids(&mut tracks);
    assert!(tracks.is_empty());
}

#[test]
fn test_format_description_with_slot_and_email() {
    let result = format_description(
        "Fresh picks, featuring {}.",
        "Artist A",
        Some("contact@example.com"),
    );
    assert_eq!(
        result,
        "Fresh picks, featuring Artist A. For submissions, contact: contact@example.com. Cover: Artist A"
    );
}

#[test]
fn test_format_description_without_email_uses_default_contact() {
    // The attribution line is fixed; an unset email falls back to the default
    let result = format_description("Featuring {}.", "Artist B", None);
    assert_eq!(
        result,
        format!(
            "Featuring Artist B. For submissions, contact: {}. Cover: Artist B",
            DEFAULT_CONTACT_EMAIL
        )
    );
}

#[test]
fn test_format_description_template_without_slot() {
    // Templates without a slot still mention the artist
    let result = format_description("Updated daily.", "Artist C", Some("c@example.com"));
    assert!(result.starts_with("Updated daily. Featuring Artist C."));
    assert!(result.ends_with("For submissions, contact: c@example.com. Cover: Artist C"));
}

#[test]
fn test_format_description_replaces_only_first_slot() {
    let result = format_description("{} and {}", "X", Some("c@example.com"));
    assert!(result.starts_with("X and {}"));
}

#[test]
fn test_reorder_strategy_display() {
    assert_eq!(ReorderStrategy::Smart.to_string(), "smart");
    assert_eq!(ReorderStrategy::Random.to_string(), "random");
    assert_eq!(ReorderStrategy::Chronological.to_string(), "chronological");
}

#[test]
fn test_reorder_strategy_default() {
    assert_eq!(ReorderStrategy::default(), ReorderStrategy::Smart);
}
