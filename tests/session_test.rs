use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use tempodeck::management::SessionCodec;
use tempodeck::types::{Session, SessionUser};

// Helper function to create a test session
fn create_test_session() -> Session {
    Session {
        access_token: "BQCaccess".to_string(),
        refresh_token: "AQCrefresh".to_string(),
        expires_at: 1_700_000_000_000,
        user: SessionUser {
            id: "wizzler".to_string(),
            name: "Wizzler".to_string(),
            email: Some("wizzler@example.com".to_string()),
            image: Some("https://i.scdn.co/image/abc".to_string()),
        },
    }
}

#[test]
fn test_encode_decode_roundtrip() {
    let codec = SessionCodec::new("a-test-secret");
    let session = create_test_session();

    let value = codec.encode(&session);
    let decoded = codec.decode(&value).expect("roundtrip should decode");

    assert_eq!(decoded.access_token, session.access_token);
    assert_eq!(decoded.refresh_token, session.refresh_token);
    assert_eq!(decoded.expires_at, session.expires_at);
    assert_eq!(decoded.user.id, session.user.id);
    assert_eq!(decoded.user.name, session.user.name);
    assert_eq!(decoded.user.email, session.user.email);
    assert_eq!(decoded.user.image, session.user.image);
}

#[test]
fn test_payload_uses_camel_case_field_names() {
    let codec = SessionCodec::new("a-test-secret");
    let value = codec.encode(&create_test_session());

    // The payload before the dot is plain base64url JSON with the cookie's
    // historical field names
    let (payload_b64, _) = value.split_once('.').expect("value has a tag");
    let payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    assert!(json.get("accessToken").is_some());
    assert!(json.get("refreshToken").is_some());
    assert!(json.get("expiresAt").is_some());
    assert_eq!(json["user"]["id"], "wizzler");
}

#[test]
fn test_malformed_values_decode_to_error_never_panic() {
    let codec = SessionCodec::new("a-test-secret");

    // Anything that is not payload.tag is malformed
    assert!(codec.decode("").is_err());
    assert!(codec.decode("no-dot-at-all").is_err());
    assert!(codec.decode(".").is_err());
    assert!(codec.decode("..").is_err());
    assert!(codec.decode("not!base64.not!base64").is_err());
    assert!(codec.decode("äöü.😀").is_err());

    // Valid base64 but garbage JSON still fails closed
    let payload = URL_SAFE_NO_PAD.encode(b"not json");
    assert!(codec.decode(&format!("{payload}.{payload}")).is_err());
}

#[test]
fn test_tampered_payload_is_rejected() {
    let codec = SessionCodec::new("a-test-secret");
    let value = codec.encode(&create_test_session());

    let (payload_b64, tag_b64) = value.split_once('.').unwrap();

    // Re-encode a modified payload under the original tag
    let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
    let position = payload.iter().position(|b| *b == b'w').unwrap();
    payload[position] = b'v';
    let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), tag_b64);

    assert!(codec.decode(&forged).is_err());
}

#[test]
fn test_different_secret_is_rejected() {
    let codec = SessionCodec::new("a-test-secret");
    let other = SessionCodec::new("another-secret");

    let value = codec.encode(&create_test_session());

    // Same payload, tag keyed differently: secret rotation logs everyone out
    assert!(other.decode(&value).is_err());
    assert!(codec.decode(&value).is_ok());
}
