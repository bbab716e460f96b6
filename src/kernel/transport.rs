use serde::{Serialize, Deserialize};

use super::resolve::TransportCommand;

/// What the video is currently doing.
///
/// Mutated only through [`PlaybackState::apply`]; the underlying player may
/// also move it out-of-band (user drags the scrub bar), which is not
/// modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub position_seconds: f64,
    pub is_playing: bool,
    pub duration_seconds: f64,
}

impl PlaybackState {
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            position_seconds: 0.0,
            is_playing: false,
            duration_seconds,
        }
    }

    /// Strict reduction: state + command -> mutated state. Total and
    /// synchronous; seeking past either end lands exactly on that end.
    pub fn apply(&mut self, command: &TransportCommand) {
        match command {
            TransportCommand::SeekRelative { delta_seconds } => {
                self.position_seconds =
                    (self.position_seconds + delta_seconds).clamp(0.0, self.duration_seconds);
            }
            TransportCommand::Play => {
                self.is_playing = true;
            }
            TransportCommand::Pause => {
                self.is_playing = false;
            }
            TransportCommand::StopAndRewind => {
                self.position_seconds = 0.0;
                self.is_playing = false;
            }
        }
    }
}
