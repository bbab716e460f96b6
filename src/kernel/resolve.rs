use serde::{Serialize, Deserialize};
use tracing::debug;

use super::duration::normalize_duration;
use super::extract::{Extracted, PlaybackAction};

/// One canonical playback action. Exactly one variant is produced per
/// recognized intent; everything else resolves to no command at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data")]
pub enum TransportCommand {
    SeekRelative { delta_seconds: f64 },
    Play,
    Pause,
    StopAndRewind,
}

/// Collapse an extraction into at most one command.
///
/// `None` is a designed outcome, distinguishable from every real command,
/// so callers can silently ignore unrelated turns. Failures never
/// propagate past this boundary.
pub fn resolve(extracted: Extracted) -> Option<TransportCommand> {
    match extracted {
        Extracted::Seek {
            direction,
            duration,
        } => match normalize_duration(&duration) {
            Ok(seconds) => Some(TransportCommand::SeekRelative {
                delta_seconds: direction.signum() * seconds,
            }),
            Err(err) => {
                debug!("Seek dropped: {}", err);
                None
            }
        },
        Extracted::Playback(PlaybackAction::Play) => Some(TransportCommand::Play),
        Extracted::Playback(PlaybackAction::Pause) => Some(TransportCommand::Pause),
        Extracted::Playback(PlaybackAction::Stop) => Some(TransportCommand::StopAndRewind),
        Extracted::Playback(PlaybackAction::Unrecognized) => None,
        Extracted::NoMatch => None,
    }
}
