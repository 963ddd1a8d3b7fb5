use std::collections::HashSet;

use crate::spotify::error::SpotifyError;

/// The playlist operations the orchestrator sequences, behind a trait so
/// multi-step flows can be tested against a scripted fake.
#[allow(async_fn_in_trait)]
pub trait PlaylistApi {
    async fn track_uris(&self, token: &str, playlist_id: &str)
    -> Result<Vec<String>, SpotifyError>;

    async fn append_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError>;

    async fn remove_by_uri(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError>;

    async fn move_range(
        &self,
        token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), SpotifyError>;
}

/// Translates a UI drag (old visual index, new visual index) into Spotify's
/// `(range_start, insert_before)` reorder contract.
///
/// `insert_before` names the slot the moved track lands in front of,
/// evaluated against the list as it looked before the move. Moving down,
/// removing the track from its old slot first shifts everything after it
/// up by one, so the target has to be bumped by one to compensate. Moving
/// up needs no adjustment because the shift happens behind the target slot.
pub fn translate_reorder(old_index: usize, new_index: usize) -> (usize, usize) {
    let insert_before = if old_index < new_index {
        new_index + 1
    } else {
        new_index
    };
    (old_index, insert_before)
}

/// Outcome of an add: how many URIs were requested, sent upstream, and
/// skipped because the playlist already contained them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddReport {
    pub requested: usize,
    pub added: usize,
    pub skipped: usize,
}

/// Which step of a two-phase move failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Add,
    Remove,
}

/// A move that did not complete. `added` tells the caller whether the
/// tracks made it into the target before the failure: when the remove
/// phase fails after a successful add, the tracks exist in both playlists
/// and the caller must say so instead of claiming an all-or-nothing
/// failure.
#[derive(Debug)]
pub struct MoveError {
    pub phase: MovePhase,
    pub added: bool,
    pub cause: SpotifyError,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            MovePhase::Add => write!(f, "adding to the target playlist failed: {}", self.cause),
            MovePhase::Remove => write!(
                f,
                "removing from the source playlist failed after the add succeeded, \
                 the tracks now exist in both playlists: {}",
                self.cause
            ),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Adds tracks to a playlist, optionally skipping URIs already present.
///
/// The dedupe variant reads the current tracklist first and diffs by URI.
/// That read-then-append is not atomic against concurrent external edits;
/// a racing writer can still produce a duplicate (last writer wins).
pub async fn add_tracks<A: PlaylistApi>(
    api: &A,
    token: &str,
    playlist_id: &str,
    uris: &[String],
    dedupe: bool,
) -> Result<AddReport, SpotifyError> {
    let requested = uris.len();

    let to_add: Vec<String> = if dedupe {
        let existing: HashSet<String> = api
            .track_uris(token, playlist_id)
            .await?
            .into_iter()
            .collect();
        uris.iter()
            .filter(|uri| !existing.contains(*uri))
            .cloned()
            .collect()
    } else {
        uris.to_vec()
    };

    if !to_add.is_empty() {
        api.append_tracks(token, playlist_id, &to_add).await?;
    }

    Ok(AddReport {
        requested,
        added: to_add.len(),
        skipped: requested - to_add.len(),
    })
}

/// Moves tracks from one playlist to another: add to target, then remove
/// from source. The two upstream calls are not atomic and a failed remove
/// is not rolled back; the error reports exactly how far the move got.
pub async fn move_tracks<A: PlaylistApi>(
    api: &A,
    token: &str,
    source_id: &str,
    target_id: &str,
    uris: &[String],
) -> Result<(), MoveError> {
    api.append_tracks(token, target_id, uris)
        .await
        .map_err(|cause| MoveError {
            phase: MovePhase::Add,
            added: false,
            cause,
        })?;

    api.remove_by_uri(token, source_id, uris)
        .await
        .map_err(|cause| MoveError {
            phase: MovePhase::Remove,
            added: true,
            cause,
        })?;

    Ok(())
}

/// Reorders one track inside a playlist from its old visual index to the
/// new one. Equal indices are a no-op that never reaches upstream.
pub async fn reorder_track<A: PlaylistApi>(
    api: &A,
    token: &str,
    playlist_id: &str,
    old_index: usize,
    new_index: usize,
) -> Result<(), SpotifyError> {
    if old_index == new_index {
        return Ok(());
    }

    let (range_start, insert_before) = translate_reorder(old_index, new_index);
    api.move_range(token, playlist_id, range_start, insert_before)
        .await
}
