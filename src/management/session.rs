use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::Session;

pub const SESSION_COOKIE: &str = "spotify_session";
pub const STATE_COOKIE: &str = "spotify_auth_state";
pub const SESSION_MAX_AGE_DAYS: i64 = 30;
pub const STATE_MAX_AGE_MINUTES: i64 = 10;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug)]
pub enum SessionDecodeError {
    Malformed,
    BadSignature,
    SerdeError(serde_json::Error),
}

impl From<serde_json::Error> for SessionDecodeError {
    fn from(err: serde_json::Error) -> Self {
        SessionDecodeError::SerdeError(err)
    }
}

/// Encodes and decodes the session cookie value.
///
/// The cookie value is `base64url(json).base64url(hmac-sha256(json))`; the
/// tag keeps a tampered payload from decoding, which funnels every failure
/// mode into the one path callers already handle: treat it as no session.
pub struct SessionCodec {
    key: Vec<u8>,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        SessionCodec {
            key: secret.as_bytes().to_vec(),
        }
    }

    pub fn encode(&self, session: &Session) -> String {
        // Session is Serialize with no failing cases, so this cannot error
        let payload = serde_json::to_vec(session).expect("session serialization failed");
        let tag = self.sign(&payload);
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    pub fn decode(&self, value: &str) -> Result<Session, SessionDecodeError> {
        let (payload_b64, tag_b64) = value.split_once('.').ok_or(SessionDecodeError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SessionDecodeError::Malformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| SessionDecodeError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(&payload);
        mac.verify_slice(&tag)
            .map_err(|_| SessionDecodeError::BadSignature)?;

        let session: Session = serde_json::from_slice(&payload)?;
        Ok(session)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
