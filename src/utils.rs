use once_cell::sync::Lazy;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

/// Matches a bare 22-character base62 Spotify id.
static TRACK_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]{22}$").unwrap());

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Recovers a catalog track id from an analysis-provider `href`.
///
/// The provider responds with its own entry ids, but the `href` links back
/// to the catalog entry, so the original id sits in the trailing path
/// segment. Query strings and trailing slashes are tolerated.
pub fn recover_track_id(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let segment = path.rsplit('/').find(|s| !s.is_empty())?;
    TRACK_ID.is_match(segment).then(|| segment.to_string())
}

/// Rounds a provider tempo (fractional BPM) to the nearest whole BPM.
pub fn round_bpm(tempo: f64) -> i64 {
    tempo.round() as i64
}

/// Converts a provider fraction in [0, 1] to a rounded 0-100 percentage.
/// Rounds, never truncates: 0.005 -> 1, 0.004 -> 0.
pub fn fraction_to_percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
