use voxplay::kernel::resolve::TransportCommand;
use voxplay::kernel::transport::PlaybackState;

fn mid_playback() -> PlaybackState {
    PlaybackState {
        position_seconds: 10.0,
        is_playing: true,
        duration_seconds: 120.0,
    }
}

#[test]
fn test_seek_moves_position() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::SeekRelative {
        delta_seconds: 30.0,
    });
    assert_eq!(state.position_seconds, 40.0);
    assert!(state.is_playing, "seeking must not touch the play flag");
}

#[test]
fn test_seek_clamps_to_end() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::SeekRelative {
        delta_seconds: 999_999.0,
    });
    assert_eq!(
        state.position_seconds, 120.0,
        "seeking past the end lands exactly on the end"
    );
}

#[test]
fn test_seek_clamps_to_start() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::SeekRelative {
        delta_seconds: -999_999.0,
    });
    assert_eq!(state.position_seconds, 0.0);
}

#[test]
fn test_stop_and_rewind() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::StopAndRewind);
    assert_eq!(state.position_seconds, 0.0);
    assert!(!state.is_playing);

    // Regardless of prior state
    let mut paused = PlaybackState {
        position_seconds: 60.0,
        is_playing: false,
        duration_seconds: 120.0,
    };
    paused.apply(&TransportCommand::StopAndRewind);
    assert_eq!(paused.position_seconds, 0.0);
    assert!(!paused.is_playing);
}

#[test]
fn test_play_is_idempotent() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::Play);
    let once = state.clone();
    state.apply(&TransportCommand::Play);
    assert_eq!(state, once, "applying Play twice must equal applying it once");
}

#[test]
fn test_pause_is_idempotent() {
    let mut state = mid_playback();
    state.apply(&TransportCommand::Pause);
    let once = state.clone();
    state.apply(&TransportCommand::Pause);
    assert_eq!(state, once);
}
