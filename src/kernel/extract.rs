use thiserror::Error;
use tracing::debug;

use super::duration::DurationSpec;
use super::intent::{PLAY_PAUSE_STOP, SEEK_VIDEO};
use super::value::{Fields, TypedValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Forward,
    Backward,
}

impl SeekDirection {
    pub fn signum(self) -> f64 {
        match self {
            SeekDirection::Forward => 1.0,
            SeekDirection::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Play,
    Pause,
    Stop,
    /// Value outside the play/pause/stop vocabulary. Not an error; this
    /// intentionally resolves to no command downstream.
    Unrecognized,
}

/// Type-resolved parameters for one recognized intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Seek {
        direction: SeekDirection,
        duration: DurationSpec,
    },
    Playback(PlaybackAction),
    /// Intent unrelated to transport control. The normal outcome for
    /// turns like small talk, not an error.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("required parameter `{field}` is missing or has the wrong kind")]
    MissingParameter { field: &'static str },
}

fn missing(field: &'static str) -> ExtractError {
    ExtractError::MissingParameter { field }
}

/// Pull the fields relevant to the named intent out of the parameter tree,
/// reading each value through its kind tag.
pub fn extract(intent: &str, parameters: &Fields) -> Result<Extracted, ExtractError> {
    match intent {
        SEEK_VIDEO => extract_seek(parameters),
        PLAY_PAUSE_STOP => extract_playback(parameters),
        _ => Ok(Extracted::NoMatch),
    }
}

fn extract_seek(parameters: &Fields) -> Result<Extracted, ExtractError> {
    // Fallback policy: anything that is not an explicit "past" seeks
    // forward, absent and null included. Keeps the transport responsive
    // to imperfect oracle output.
    let direction = match parameters.get("PointInTime") {
        Some(TypedValue::String(s)) if s == "past" => SeekDirection::Backward,
        Some(TypedValue::String(s)) if s == "future" => SeekDirection::Forward,
        Some(TypedValue::String(s)) => {
            debug!("PointInTime '{}' outside vocabulary, defaulting to forward", s);
            SeekDirection::Forward
        }
        Some(other) => {
            debug!("PointInTime has kind {:?}, defaulting to forward", other.kind());
            SeekDirection::Forward
        }
        None => SeekDirection::Forward,
    };

    let duration = parameters
        .get("duration")
        .and_then(TypedValue::as_struct)
        .ok_or_else(|| missing("duration"))?;

    let amount = duration
        .get("amount")
        .and_then(TypedValue::as_number)
        .ok_or_else(|| missing("amount"))?;

    let unit = duration
        .get("unit")
        .and_then(TypedValue::as_str)
        .ok_or_else(|| missing("unit"))?;

    Ok(Extracted::Seek {
        direction,
        duration: DurationSpec {
            amount,
            unit: unit.to_string(),
        },
    })
}

fn extract_playback(parameters: &Fields) -> Result<Extracted, ExtractError> {
    let action = parameters
        .get("PlayPauseStop")
        .and_then(TypedValue::as_str)
        .ok_or_else(|| missing("PlayPauseStop"))?;

    let action = match action {
        "play" => PlaybackAction::Play,
        "pause" => PlaybackAction::Pause,
        "stop" => PlaybackAction::Stop,
        other => {
            debug!("PlayPauseStop '{}' outside vocabulary", other);
            PlaybackAction::Unrecognized
        }
    };

    Ok(Extracted::Playback(action))
}
