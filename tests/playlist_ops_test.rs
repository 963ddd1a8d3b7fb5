use std::collections::HashMap;
use std::sync::Mutex;

use tempodeck::management::{
    MovePhase, PlaylistApi, add_tracks, move_tracks, reorder_track, translate_reorder,
};
use tempodeck::spotify::error::SpotifyError;

/// In-memory playlist store speaking the upstream contract: appends go to
/// the end, removal is by URI value (all occurrences), and reordering uses
/// the range_start/insert_before semantics.
struct FakePlaylists {
    playlists: Mutex<HashMap<String, Vec<String>>>,
    fail_append: bool,
    fail_remove: bool,
}

impl FakePlaylists {
    fn new(playlists: &[(&str, &[&str])]) -> Self {
        let map = playlists
            .iter()
            .map(|(id, uris)| {
                (
                    id.to_string(),
                    uris.iter().map(|u| u.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect();
        FakePlaylists {
            playlists: Mutex::new(map),
            fail_append: false,
            fail_remove: false,
        }
    }

    fn uris(&self, id: &str) -> Vec<String> {
        self.playlists.lock().unwrap().get(id).cloned().unwrap_or_default()
    }

    fn upstream_error() -> SpotifyError {
        SpotifyError::Upstream {
            status: 502,
            message: "bad gateway".to_string(),
        }
    }
}

impl PlaylistApi for FakePlaylists {
    async fn track_uris(&self, _token: &str, playlist_id: &str) -> Result<Vec<String>, SpotifyError> {
        Ok(self.uris(playlist_id))
    }

    async fn append_tracks(
        &self,
        _token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError> {
        if self.fail_append {
            return Err(Self::upstream_error());
        }
        let mut playlists = self.playlists.lock().unwrap();
        playlists
            .entry(playlist_id.to_string())
            .or_default()
            .extend(uris.iter().cloned());
        Ok(())
    }

    async fn remove_by_uri(
        &self,
        _token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError> {
        if self.fail_remove {
            return Err(Self::upstream_error());
        }
        let mut playlists = self.playlists.lock().unwrap();
        if let Some(list) = playlists.get_mut(playlist_id) {
            // every occurrence of a URI disappears, as upstream does
            list.retain(|uri| !uris.contains(uri));
        }
        Ok(())
    }

    async fn move_range(
        &self,
        _token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), SpotifyError> {
        let mut playlists = self.playlists.lock().unwrap();
        let list = playlists.get_mut(playlist_id).unwrap();
        apply_upstream_reorder(list, range_start, insert_before);
        Ok(())
    }
}

/// Upstream reorder semantics: the moved item is lifted out first, which
/// shifts every later index down by one before insert_before is applied.
fn apply_upstream_reorder<T>(list: &mut Vec<T>, range_start: usize, insert_before: usize) {
    let item = list.remove(range_start);
    let target = if insert_before > range_start {
        insert_before - 1
    } else {
        insert_before
    };
    list.insert(target, item);
}

/// The UI-side expectation: remove at the old index, insert at the new one.
fn local_move<T>(list: &mut Vec<T>, old_index: usize, new_index: usize) {
    let item = list.remove(old_index);
    list.insert(new_index, item);
}

#[test]
fn test_translate_reorder_known_vectors() {
    // Moving down bumps insert_before by one
    assert_eq!(translate_reorder(0, 2), (0, 3));

    // Moving up keeps the target index as is
    assert_eq!(translate_reorder(3, 0), (3, 0));
}

#[test]
fn test_translate_reorder_matches_local_move_exhaustively() {
    for len in 2..=6usize {
        for old_index in 0..len {
            for new_index in 0..len {
                if old_index == new_index {
                    continue;
                }

                let original: Vec<usize> = (0..len).collect();

                let mut expected = original.clone();
                local_move(&mut expected, old_index, new_index);

                let mut actual = original.clone();
                let (range_start, insert_before) = translate_reorder(old_index, new_index);
                apply_upstream_reorder(&mut actual, range_start, insert_before);

                assert_eq!(
                    actual, expected,
                    "len={len} old={old_index} new={new_index} range_start={range_start} insert_before={insert_before}"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_reorder_through_fake_produces_expected_orders() {
    let fake = FakePlaylists::new(&[("p1", &["A", "B", "C", "D"])]);

    reorder_track(&fake, "token", "p1", 0, 2).await.unwrap();
    assert_eq!(fake.uris("p1"), ["B", "C", "A", "D"]);

    let fake = FakePlaylists::new(&[("p1", &["A", "B", "C", "D"])]);
    reorder_track(&fake, "token", "p1", 3, 0).await.unwrap();
    assert_eq!(fake.uris("p1"), ["D", "A", "B", "C"]);
}

#[tokio::test]
async fn test_reorder_equal_indices_is_a_noop() {
    // An equal pair never reaches upstream; the fake would panic on an
    // unknown playlist if it did
    let fake = FakePlaylists::new(&[]);
    reorder_track(&fake, "token", "missing", 2, 2).await.unwrap();
}

#[tokio::test]
async fn test_add_without_dedupe_appends_everything() {
    let fake = FakePlaylists::new(&[("p1", &["spotify:track:a"])]);
    let uris = vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()];

    let report = add_tracks(&fake, "token", "p1", &uris, false).await.unwrap();

    assert_eq!(report.requested, 2);
    assert_eq!(report.added, 2);
    assert_eq!(report.skipped, 0);

    // The duplicate is visible: no dedup at this layer by default
    assert_eq!(
        fake.uris("p1"),
        ["spotify:track:a", "spotify:track:a", "spotify:track:b"]
    );
}

#[tokio::test]
async fn test_add_with_dedupe_skips_existing_uris() {
    let fake = FakePlaylists::new(&[("p1", &["spotify:track:a"])]);
    let uris = vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()];

    let report = add_tracks(&fake, "token", "p1", &uris, true).await.unwrap();

    assert_eq!(report.requested, 2);
    assert_eq!(report.added, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(fake.uris("p1"), ["spotify:track:a", "spotify:track:b"]);
}

#[tokio::test]
async fn test_add_with_dedupe_everything_present_sends_nothing() {
    let fake = FakePlaylists {
        // appending would fail, proving no append happens
        fail_append: true,
        ..FakePlaylists::new(&[("p1", &["spotify:track:a"])])
    };
    let uris = vec!["spotify:track:a".to_string()];

    let report = add_tracks(&fake, "token", "p1", &uris, true).await.unwrap();

    assert_eq!(report.added, 0);
    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn test_move_happy_path() {
    let fake = FakePlaylists::new(&[
        ("source", &["spotify:track:a", "spotify:track:b"]),
        ("target", &["spotify:track:c"]),
    ]);
    let uris = vec!["spotify:track:a".to_string()];

    move_tracks(&fake, "token", "source", "target", &uris)
        .await
        .unwrap();

    assert_eq!(fake.uris("source"), ["spotify:track:b"]);
    assert_eq!(fake.uris("target"), ["spotify:track:c", "spotify:track:a"]);
}

#[tokio::test]
async fn test_move_add_failure_reports_add_phase() {
    let fake = FakePlaylists {
        fail_append: true,
        ..FakePlaylists::new(&[("source", &["spotify:track:a"]), ("target", &[])])
    };
    let uris = vec!["spotify:track:a".to_string()];

    let err = move_tracks(&fake, "token", "source", "target", &uris)
        .await
        .unwrap_err();

    assert_eq!(err.phase, MovePhase::Add);
    assert!(!err.added);

    // Nothing moved anywhere
    assert_eq!(fake.uris("source"), ["spotify:track:a"]);
    assert_eq!(fake.uris("target"), Vec::<String>::new());
}

#[tokio::test]
async fn test_move_remove_failure_reports_partial_completion() {
    let fake = FakePlaylists {
        fail_remove: true,
        ..FakePlaylists::new(&[("source", &["spotify:track:a"]), ("target", &[])])
    };
    let uris = vec!["spotify:track:a".to_string()];

    let err = move_tracks(&fake, "token", "source", "target", &uris)
        .await
        .unwrap_err();

    // The error names the failed phase and that the add went through
    assert_eq!(err.phase, MovePhase::Remove);
    assert!(err.added);

    // The track verifiably exists in the target (and still in the source)
    assert_eq!(fake.uris("target"), ["spotify:track:a"]);
    assert_eq!(fake.uris("source"), ["spotify:track:a"]);
}

#[tokio::test]
async fn test_rerunning_remove_after_partial_move_is_safe() {
    // Recovery from the duplicated state: removing from the source again
    // converges to the moved state, and a second remove is a safe no-op
    let fake = FakePlaylists::new(&[
        ("source", &["spotify:track:a"]),
        ("target", &["spotify:track:a"]),
    ]);
    let uris = vec!["spotify:track:a".to_string()];

    fake.remove_by_uri("token", "source", &uris).await.unwrap();
    assert_eq!(fake.uris("source"), Vec::<String>::new());

    fake.remove_by_uri("token", "source", &uris).await.unwrap();
    assert_eq!(fake.uris("source"), Vec::<String>::new());
    assert_eq!(fake.uris("target"), ["spotify:track:a"]);
}

#[tokio::test]
async fn test_remove_deletes_all_occurrences() {
    let fake = FakePlaylists::new(&[(
        "p1",
        &["spotify:track:a", "spotify:track:b", "spotify:track:a"],
    )]);
    let uris = vec!["spotify:track:a".to_string()];

    fake.remove_by_uri("token", "p1", &uris).await.unwrap();

    // Removal is by URI value, not position: both copies are gone
    assert_eq!(fake.uris("p1"), ["spotify:track:b"]);
}
