use std::collections::HashSet;

use sporltui::types::{Album, Artist, CurrentlyPlaying, Track};
use sporltui::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str], duration_ms: u64) -> Track {
    Track {
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| Artist {
                name: a.to_string(),
                uri: format!("spotify:artist:{}", a.to_lowercase()),
            })
            .collect(),
        album: Album {
            name: "Test Album".to_string(),
            uri: "spotify:album:test".to_string(),
        },
        duration_ms,
        uri: "spotify:track:test".to_string(),
    }
}

fn playing(track: Track, progress_ms: u64, is_playing: bool) -> CurrentlyPlaying {
    CurrentlyPlaying {
        is_playing,
        item: Some(track),
        progress_ms: Some(progress_ms),
        timestamp: 0,
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // 32 bytes, base64url without padding
    assert_eq!(state.len(), 43);
    assert!(
        state
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    // Should never repeat in practice
    let states: HashSet<String> = (0..100).map(|_| generate_state()).collect();
    assert_eq!(states.len(), 100);
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");

    // Should be deterministic
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest, base64url without padding
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('='));
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0), "0:00");
    assert_eq!(format_duration_ms(999), "0:00");
    assert_eq!(format_duration_ms(61_000), "1:01");
    assert_eq!(format_duration_ms(3_599_000), "59:59");
    assert_eq!(format_duration_ms(3_600_000), "60:00");
}

#[test]
fn test_join_artists() {
    let track = create_test_track("Song", &["Alpha", "Beta", "Gamma"], 1000);
    assert_eq!(join_artists(&track), "Alpha, Beta, Gamma");

    let solo = create_test_track("Song", &[], 1000);
    assert_eq!(join_artists(&solo), "");
}

#[test]
fn test_format_track_info_playing() {
    let current = playing(
        create_test_track("Windowlicker", &["Aphex Twin"], 367_000),
        65_000,
        true,
    );

    assert_eq!(
        format_track_info(&current),
        "Aphex Twin - Windowlicker (1:05/6:07)"
    );
}

#[test]
fn test_format_track_info_paused() {
    let current = playing(create_test_track("Song", &["A", "B"], 120_000), 0, false);

    assert_eq!(format_track_info(&current), "Paused: A, B - Song (0:00/2:00)");
}

#[test]
fn test_format_track_info_nothing_playing() {
    assert_eq!(format_track_info(&CurrentlyPlaying::idle()), NOTHING_PLAYING);

    // A track without a name counts as nothing loaded
    let unnamed = playing(create_test_track("", &["A"], 1000), 0, true);
    assert_eq!(format_track_info(&unnamed), NOTHING_PLAYING);
}

#[test]
fn test_format_progress_without_progress() {
    let mut current = playing(create_test_track("Song", &["A"], 90_000), 0, true);
    current.progress_ms = None;

    assert_eq!(format_progress(&current), "0:00/1:30");
}
