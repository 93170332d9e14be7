//! Sequencing engine
//!
//! Pure decisions about which track plays next or previous. Nothing here
//! mutates state; the reducer applies the result.
//!
//! Shuffle draws without replacement over one cycle of the active playlist,
//! tracked by the played-id set, so every track is heard once before any
//! repeats.

use crate::random::RandomSource;
use crate::state::PlaybackState;
use crate::types::RepeatMode;
use cadence_core::Track;
use tracing::debug;

/// Outcome of a "next" query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Track that should play
    pub track: Track,

    /// Every track of the cycle was already played; the played-id set must
    /// be cleared before this track starts
    pub cycle_exhausted: bool,
}

impl Selection {
    fn fresh(track: Track) -> Self {
        Self {
            track,
            cycle_exhausted: false,
        }
    }
}

/// Decide which track follows the current one
///
/// `None` means playback should stop: the playlist is empty, or the end was
/// reached with repeat off.
pub fn compute_next(state: &PlaybackState, rng: &mut dyn RandomSource) -> Option<Selection> {
    if state.repeat_mode == RepeatMode::One {
        if let Some(current) = &state.current_track {
            return Some(Selection::fresh(current.clone()));
        }
    }

    let playlist = &state.active_playlist;
    if playlist.is_empty() {
        return None;
    }

    if state.is_shuffled {
        let unplayed: Vec<&Track> = playlist
            .iter()
            .filter(|track| !state.played_ids.contains(&track.id))
            .collect();

        if unplayed.is_empty() {
            debug!(len = playlist.len(), "Shuffle cycle exhausted, starting over");
            let track = playlist[pick_index(rng, playlist.len())].clone();
            return Some(Selection {
                track,
                cycle_exhausted: true,
            });
        }

        let track = unplayed[pick_index(rng, unplayed.len())].clone();
        return Some(Selection::fresh(track));
    }

    let Some(index) = state.current_index() else {
        return Some(Selection::fresh(playlist[0].clone()));
    };

    match playlist.get(index + 1) {
        Some(track) => Some(Selection::fresh(track.clone())),
        None if state.repeat_mode == RepeatMode::All => Some(Selection::fresh(playlist[0].clone())),
        None => None,
    }
}

/// Decide which track precedes the current one
///
/// Sequential only: shuffle has no meaningful "previous" beyond the wrap.
pub fn compute_previous(state: &PlaybackState) -> Option<Track> {
    let playlist = &state.active_playlist;
    if playlist.is_empty() || state.current_track.is_none() {
        return None;
    }

    match state.current_index() {
        Some(index) if index > 0 => Some(playlist[index - 1].clone()),
        _ if state.repeat_mode == RepeatMode::All => playlist.last().cloned(),
        _ => None,
    }
}

/// Index in `0..len` from `rng`; `len` must be non-zero
///
/// Host sources may answer out of range, so the pick is reduced modulo `len`.
fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    rng.pick(len) % len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use cadence_core::TrackId;

    fn track(id: &str) -> Track {
        Track::new(TrackId::new(id), id.to_uppercase(), format!("/music/{}.mp3", id))
    }

    fn state_with(ids: &[&str], current: Option<&str>, repeat: RepeatMode) -> PlaybackState {
        let mut state = PlaybackState::default();
        state.active_playlist = ids.iter().map(|id| track(id)).collect();
        state.current_track = current.map(track);
        state.repeat_mode = repeat;
        state
    }

    fn next_id(state: &PlaybackState) -> Option<String> {
        compute_next(state, &mut SequenceRandom::default()).map(|s| s.track.id.to_string())
    }

    #[test]
    fn empty_playlist_yields_nothing() {
        let state = state_with(&[], None, RepeatMode::All);
        assert_eq!(next_id(&state), None);
        assert_eq!(compute_previous(&state), None);
    }

    #[test]
    fn no_current_track_starts_at_first() {
        let state = state_with(&["a", "b", "c"], None, RepeatMode::Off);
        assert_eq!(next_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn current_track_missing_from_playlist_starts_at_first() {
        let state = state_with(&["a", "b"], Some("z"), RepeatMode::Off);
        assert_eq!(next_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn sequential_advances() {
        let state = state_with(&["a", "b", "c"], Some("a"), RepeatMode::Off);
        assert_eq!(next_id(&state).as_deref(), Some("b"));
    }

    #[test]
    fn end_of_playlist_stops_without_repeat() {
        let state = state_with(&["a", "b", "c"], Some("c"), RepeatMode::Off);
        assert_eq!(next_id(&state), None);
    }

    #[test]
    fn end_of_playlist_wraps_with_repeat_all() {
        let state = state_with(&["a", "b", "c"], Some("c"), RepeatMode::All);
        assert_eq!(next_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn repeat_one_returns_current_even_when_shuffled() {
        let mut state = state_with(&["a", "b", "c"], Some("b"), RepeatMode::One);
        state.is_shuffled = true;
        assert_eq!(next_id(&state).as_deref(), Some("b"));
    }

    #[test]
    fn repeat_one_without_current_falls_through() {
        let state = state_with(&["a", "b"], None, RepeatMode::One);
        assert_eq!(next_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn shuffle_picks_from_unplayed_only() {
        let mut state = state_with(&["a", "b", "c"], Some("a"), RepeatMode::Off);
        state.is_shuffled = true;
        state.played_ids = [TrackId::new("a"), TrackId::new("c")].into();

        // Only "b" is unplayed; any scripted index lands on it
        let selection = compute_next(&state, &mut SequenceRandom::new([7])).unwrap();
        assert_eq!(selection.track.id.as_str(), "b");
        assert!(!selection.cycle_exhausted);
    }

    #[test]
    fn shuffle_signals_cycle_reset_when_all_played() {
        let mut state = state_with(&["a", "b"], Some("b"), RepeatMode::Off);
        state.is_shuffled = true;
        state.played_ids = [TrackId::new("a"), TrackId::new("b")].into();

        let selection = compute_next(&state, &mut SequenceRandom::new([0])).unwrap();
        assert!(selection.cycle_exhausted);
        assert_eq!(selection.track.id.as_str(), "a");
    }

    /// Source that ignores the requested bound
    struct Unbounded(usize);

    impl RandomSource for Unbounded {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn shuffle_tolerates_out_of_range_picks() {
        let mut state = state_with(&["a", "b", "c"], Some("a"), RepeatMode::Off);
        state.is_shuffled = true;
        state.played_ids.insert(TrackId::new("a"));

        // Unplayed: [b, c]; 5 % 2 = 1
        let selection = compute_next(&state, &mut Unbounded(5)).unwrap();
        assert_eq!(selection.track.id.as_str(), "c");

        let selection = compute_next(&state, &mut Unbounded(usize::MAX)).unwrap();
        assert!(["b", "c"].contains(&selection.track.id.as_str()));

        // Exhausted cycle draws from the whole playlist
        state.played_ids.extend([TrackId::new("b"), TrackId::new("c")]);
        let selection = compute_next(&state, &mut Unbounded(4)).unwrap();
        assert!(selection.cycle_exhausted);
        assert_eq!(selection.track.id.as_str(), "b");
    }

    #[test]
    fn previous_steps_back() {
        let state = state_with(&["a", "b", "c"], Some("c"), RepeatMode::Off);
        assert_eq!(compute_previous(&state).unwrap().id.as_str(), "b");
    }

    #[test]
    fn previous_at_start_is_noop_without_repeat_all() {
        let off = state_with(&["a", "b", "c"], Some("a"), RepeatMode::Off);
        let one = state_with(&["a", "b", "c"], Some("a"), RepeatMode::One);
        assert_eq!(compute_previous(&off), None);
        assert_eq!(compute_previous(&one), None);
    }

    #[test]
    fn previous_at_start_wraps_with_repeat_all() {
        let state = state_with(&["a", "b", "c"], Some("a"), RepeatMode::All);
        assert_eq!(compute_previous(&state).unwrap().id.as_str(), "c");
    }

    #[test]
    fn previous_without_current_is_none() {
        let state = state_with(&["a", "b"], None, RepeatMode::All);
        assert_eq!(compute_previous(&state), None);
    }
}
