use serde::{Serialize, Deserialize};
use thiserror::Error;

/// The oracle's system duration entity emits exactly these unit tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "s" => Some(DurationUnit::Seconds),
            "min" => Some(DurationUnit::Minutes),
            "h" => Some(DurationUnit::Hours),
            _ => None,
        }
    }

    pub fn seconds_multiplier(self) -> f64 {
        match self {
            DurationUnit::Seconds => 1.0,
            DurationUnit::Minutes => 60.0,
            DurationUnit::Hours => 3600.0,
        }
    }
}

/// Amount plus raw unit token as extracted from a SeekVideo intent.
/// Transient: built per utterance, discarded after conversion to seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSpec {
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("unsupported duration unit `{unit}`")]
    UnsupportedUnit { unit: String },
}

/// Canonical time offset in seconds.
///
/// An unrecognized unit fails rather than guessing; the caller treats that
/// as "cannot resolve command". No upper bound here, the executor clamps.
pub fn normalize_duration(spec: &DurationSpec) -> Result<f64, NormalizeError> {
    let unit = DurationUnit::parse(&spec.unit).ok_or_else(|| NormalizeError::UnsupportedUnit {
        unit: spec.unit.clone(),
    })?;

    Ok(spec.amount * unit.seconds_multiplier())
}
