use serde::{Deserialize, Serialize};

// --- Session ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute expiry of `access_token` in milliseconds since epoch.
    pub expires_at: i64,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Spotify does not always rotate the refresh token on refresh.
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

// --- Spotify wire types ---

#[derive(Debug, Clone, Deserialize)]
pub struct PrivateUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Paging<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    /// Local files in a playlist carry no catalog id.
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub album: AlbumObject,
    pub artists: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub tracks: TrackCount,
    pub owner: PlaylistOwner,
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackCount {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistFull {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub tracks: Paging<PlaylistItem>,
    pub owner: PlaylistOwner,
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// `None` for episodes or tracks removed from the catalog.
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(rename = "type")]
    pub device_type: String,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub context: Option<PlaybackContext>,
    pub device: Option<Device>,
    pub progress_ms: Option<u64>,
    pub item: Option<PlaybackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackContext {
    pub uri: String,
    #[serde(rename = "type")]
    pub context_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackItem {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

// --- Audio-analysis wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub content: Vec<AnalysisEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    /// The provider's own id; not necessarily the catalog id we asked for.
    pub id: String,
    pub tempo: Option<f64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub href: Option<String>,
}

// --- Shapes served to the UI ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    /// Artist names joined with ", ".
    pub artists: String,
    pub album: String,
    pub album_image: Option<String>,
    pub duration: u64,
    pub tempo: Option<i64>,
    pub danceability: Option<i64>,
    pub energy: Option<i64>,
    /// Client-side fetch state, initialized here so the UI never sees an
    /// undefined field.
    pub audio_features_loading: bool,
    pub features_error: bool,
}

impl Track {
    /// Shapes a Spotify track object for the UI. Returns `None` for local
    /// files without a catalog id.
    pub fn from_wire(track: TrackObject) -> Option<Self> {
        let id = track.id?;
        Some(Track {
            id,
            name: track.name,
            uri: track.uri,
            artists: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name,
            album_image: track.album.images.first().map(|i| i.url.clone()),
            duration: track.duration_ms,
            tempo: None,
            danceability: None,
            energy: None,
            audio_features_loading: false,
            features_error: false,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub track_count: u64,
    pub owner_id: String,
    pub uri: String,
    /// Derived from the current playback context; never persisted.
    pub is_playing: bool,
}

impl Playlist {
    pub fn from_summary(playlist: PlaylistSummary, playing_context: Option<&str>) -> Self {
        let is_playing = playing_context == Some(playlist.uri.as_str());
        Playlist {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description.filter(|d| !d.is_empty()),
            image: playlist
                .images
                .as_ref()
                .and_then(|images| images.first())
                .map(|i| i.url.clone()),
            track_count: playlist.tracks.total,
            owner_id: playlist.owner.id,
            uri: playlist.uri,
            is_playing,
        }
    }

    /// Splits a full playlist payload into its UI shape and the shaped
    /// track list. The embedded paging total is authoritative for
    /// `track_count`; the item list may be shorter (local files are
    /// dropped).
    pub fn from_full(playlist: PlaylistFull) -> (Self, Vec<Track>) {
        let tracks: Vec<Track> = playlist
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter_map(Track::from_wire)
            .collect();

        let info = Playlist {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description.filter(|d| !d.is_empty()),
            image: playlist
                .images
                .as_ref()
                .and_then(|images| images.first())
                .map(|i| i.url.clone()),
            track_count: playlist.tracks.total.unwrap_or(tracks.len() as u64),
            owner_id: playlist.owner.id,
            uri: playlist.uri,
            is_playing: false,
        };

        (info, tracks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatureSummary {
    pub id: String,
    pub tempo: Option<i64>,
    pub danceability: Option<i64>,
    pub energy: Option<i64>,
}

// --- Request bodies accepted from the UI ---

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistBody {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlaylistBody {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackUrisBody {
    pub track_uris: Vec<String>,
    #[serde(default)]
    pub dedupe: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
    pub old_index: usize,
    pub new_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTracksBody {
    pub target_id: String,
    pub track_uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayBody {
    #[serde(rename = "type")]
    pub play_type: String,
    pub uri: String,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseBody {
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub device_id: String,
    #[serde(default)]
    pub play: bool,
}
