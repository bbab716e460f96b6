use serde::{Serialize, Deserialize};

use super::value::Fields;

/// Intent display names the kernel handles. Anything else is an unhandled
/// turn (small talk, unrelated agent intents) and produces no command.
pub const SEEK_VIDEO: &str = "SeekVideo";
pub const PLAY_PAUSE_STOP: &str = "PlayPauseStop";

/// One structured result from the NLU oracle for a single utterance.
///
/// The intent name together with the parameters fully determines the
/// resulting command; interpretation reads no other state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: String,
    pub parameters: Fields,
}

impl IntentResult {
    pub fn new(intent: impl Into<String>, parameters: Fields) -> Self {
        Self {
            intent: intent.into(),
            parameters,
        }
    }
}
