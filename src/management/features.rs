use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use crate::{
    analysis::{AnalysisClient, AnalysisError},
    types::{AnalysisResponse, AudioFeatureSummary, Track},
    utils,
};

/// Entries older than this are treated as absent.
pub const FEATURE_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Canonical cache key for a set of track ids: sorted lexicographically and
/// comma-joined, so the same set hits the same entry regardless of the
/// playlist order the ids were gathered in.
pub fn cache_key(ids: &[String]) -> String {
    let mut sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    sorted.sort_unstable();
    sorted.join(",")
}

struct CacheEntry {
    response: AnalysisResponse,
    written_at: i64,
}

/// Process-lifetime cache of raw provider responses.
///
/// Values are immutable once written, so two writers racing to the same key
/// overwrite each other with equivalent data - a stampede inefficiency, not
/// a correctness hazard. A restart clears the cache with no correctness
/// impact, only a latency/cost one.
pub struct FeatureCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl_ms: i64,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self::with_ttl(FEATURE_TTL_MS)
    }

    pub fn with_ttl(ttl_ms: i64) -> Self {
        FeatureCache {
            entries: Mutex::new(HashMap::new()),
            ttl_ms,
        }
    }

    /// TTL is checked on read: a present-but-expired entry is a miss and
    /// stays in place until the next `set` overwrites it.
    pub fn get(&self, ids: &[String], now_ms: i64) -> Option<AnalysisResponse> {
        let entries = self.entries.lock().expect("feature cache lock poisoned");
        let entry = entries.get(&cache_key(ids))?;
        if now_ms - entry.written_at > self.ttl_ms {
            return None;
        }
        Some(entry.response.clone())
    }

    pub fn set(&self, ids: &[String], response: AnalysisResponse, now_ms: i64) {
        let mut entries = self.entries.lock().expect("feature cache lock poisoned");
        entries.insert(
            cache_key(ids),
            CacheEntry {
                response,
                written_at: now_ms,
            },
        );
    }
}

impl Default for FeatureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches provider entries back to the ids that were requested.
///
/// Entries whose `id` is one of the requested catalog ids pass through;
/// otherwise the catalog id is recovered from the `href` trailing path
/// segment. Entries that resolve to nothing requested are dropped.
pub fn resolve_features(
    requested: &[String],
    response: &AnalysisResponse,
) -> Vec<AudioFeatureSummary> {
    let wanted: HashSet<&str> = requested.iter().map(|id| id.as_str()).collect();

    let mut features = Vec::new();
    for entry in &response.content {
        let id = if wanted.contains(entry.id.as_str()) {
            entry.id.clone()
        } else {
            match entry.href.as_deref().and_then(utils::recover_track_id) {
                Some(id) if wanted.contains(id.as_str()) => id,
                _ => continue,
            }
        };

        features.push(AudioFeatureSummary {
            id,
            tempo: entry.tempo.map(utils::round_bpm),
            danceability: entry.danceability.map(utils::fraction_to_percent),
            energy: entry.energy.map(utils::fraction_to_percent),
        });
    }
    features
}

/// Cache-backed lookup of normalized audio features.
pub struct FeatureService {
    client: AnalysisClient,
    cache: FeatureCache,
}

impl FeatureService {
    pub fn new(client: AnalysisClient) -> Self {
        FeatureService {
            client,
            cache: FeatureCache::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(AnalysisClient::from_env())
    }

    pub async fn batch(
        &self,
        ids: &[String],
        now_ms: i64,
    ) -> Result<Vec<AudioFeatureSummary>, AnalysisError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw = match self.cache.get(ids, now_ms) {
            Some(hit) => hit,
            None => {
                let fetched = self.client.batch_features(ids).await?;
                self.cache.set(ids, fetched.clone(), now_ms);
                fetched
            }
        };

        Ok(resolve_features(ids, &raw))
    }

    pub async fn single(
        &self,
        id: &str,
        now_ms: i64,
    ) -> Result<Option<AudioFeatureSummary>, AnalysisError> {
        let ids = vec![id.to_string()];
        Ok(self.batch(&ids, now_ms).await?.into_iter().next())
    }

    /// Fills in the feature fields of already-shaped tracks. Provider
    /// failures degrade to "features unavailable" for the whole batch
    /// instead of failing the containing response.
    pub async fn annotate(&self, tracks: &mut [Track], now_ms: i64) {
        let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        match self.batch(&ids, now_ms).await {
            Ok(features) => {
                let by_id: HashMap<&str, &AudioFeatureSummary> =
                    features.iter().map(|f| (f.id.as_str(), f)).collect();
                for track in tracks.iter_mut() {
                    if let Some(f) = by_id.get(track.id.as_str()) {
                        track.tempo = f.tempo;
                        track.danceability = f.danceability;
                        track.energy = f.energy;
                    }
                }
            }
            Err(err) => {
                tracing::warn!("audio features unavailable: {err}");
            }
        }
    }
}
