use tracing::debug;

use super::extract::extract;
use super::intent::IntentResult;
use super::resolve::{resolve, TransportCommand};
use super::transport::PlaybackState;

/// Pure interpretation step: one structured result in, at most one command
/// out. Extraction failures collapse to no command here and never
/// propagate further; a misread intent does nothing rather than risking a
/// wrong seek.
pub fn interpret(result: &IntentResult) -> Option<TransportCommand> {
    match extract(&result.intent, &result.parameters) {
        Ok(extracted) => resolve(extracted),
        Err(err) => {
            debug!("Intent '{}' dropped: {}", result.intent, err);
            None
        }
    }
}

/// Interpret one result and apply the outcome. A no-op interpretation
/// leaves the state untouched. Returns the command that was applied, if
/// any, so the driver can log the transition.
pub fn dispatch(state: &mut PlaybackState, result: &IntentResult) -> Option<TransportCommand> {
    let command = interpret(result);

    if let Some(command) = &command {
        state.apply(command);
    }

    command
}
