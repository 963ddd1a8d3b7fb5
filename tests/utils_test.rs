use tempodeck::utils::*;

#[test]
fn test_generate_state_token() {
    let token = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(token.len(), 32);

    // Should contain only alphanumeric characters
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_state_token();
    assert_ne!(token, token2);
}

#[test]
fn test_recover_track_id_from_plain_href() {
    let href = "https://api.reccobeats.com/v1/track/3n3Ppam7vgaVa1iaRUc9Lp";
    assert_eq!(
        recover_track_id(href),
        Some("3n3Ppam7vgaVa1iaRUc9Lp".to_string())
    );
}

#[test]
fn test_recover_track_id_tolerates_trailing_slash_and_query() {
    // Trailing slash
    let href = "https://api.reccobeats.com/v1/track/3n3Ppam7vgaVa1iaRUc9Lp/";
    assert_eq!(
        recover_track_id(href),
        Some("3n3Ppam7vgaVa1iaRUc9Lp".to_string())
    );

    // Query string after the id
    let href = "https://api.reccobeats.com/v1/track/3n3Ppam7vgaVa1iaRUc9Lp?market=DE";
    assert_eq!(
        recover_track_id(href),
        Some("3n3Ppam7vgaVa1iaRUc9Lp".to_string())
    );

    // Fragment after the id
    let href = "https://api.reccobeats.com/v1/track/3n3Ppam7vgaVa1iaRUc9Lp#x";
    assert_eq!(
        recover_track_id(href),
        Some("3n3Ppam7vgaVa1iaRUc9Lp".to_string())
    );
}

#[test]
fn test_recover_track_id_rejects_non_ids() {
    // Wrong length
    assert_eq!(recover_track_id("https://x.test/track/abc123"), None);

    // Right length, invalid characters
    assert_eq!(
        recover_track_id("https://x.test/track/3n3Ppam7vgaVa1iaRUc9L_"),
        None
    );

    // No path at all
    assert_eq!(recover_track_id(""), None);
    assert_eq!(recover_track_id("/"), None);
}

#[test]
fn test_round_bpm() {
    assert_eq!(round_bpm(127.6), 128);
    assert_eq!(round_bpm(127.4), 127);
    assert_eq!(round_bpm(120.0), 120);
}

#[test]
fn test_fraction_to_percent_rounds_not_truncates() {
    assert_eq!(fraction_to_percent(0.873), 87);
    assert_eq!(fraction_to_percent(0.876), 88);

    // Boundary cases around a half percent: round, never floor
    assert_eq!(fraction_to_percent(0.005), 1);
    assert_eq!(fraction_to_percent(0.004), 0);

    // Range endpoints
    assert_eq!(fraction_to_percent(0.0), 0);
    assert_eq!(fraction_to_percent(1.0), 100);
}
