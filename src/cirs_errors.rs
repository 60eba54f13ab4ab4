use ordered_float::FloatIsNan;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CirsError {
    #[error("Invalid catalog source: {0}")]
    InvalidSource(String),

    #[error("Invalid observer location: {0}")]
    InvalidObserver(String),

    #[error("Unable to parse observing epoch: {0}")]
    InvalidEpoch(String),

    #[error("Date JD {0} (TDB) is outside the Earth-Sun ephemeris range")]
    EphemerisOutOfRange(f64),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid benchmark parameter: {0}")]
    InvalidBenchParameter(String),

    #[error("NaN value encountered: {0}")]
    NanValue(#[from] FloatIsNan),
}

impl PartialEq for CirsError {
    fn eq(&self, other: &Self) -> bool {
        use CirsError::*;
        match (self, other) {
            (InvalidSource(a), InvalidSource(b)) => a == b,
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,
            (EphemerisOutOfRange(a), EphemerisOutOfRange(b)) => a == b,
            (DegenerateGeometry(a), DegenerateGeometry(b)) => a == b,
            (InvalidBenchParameter(a), InvalidBenchParameter(b)) => a == b,

            // FloatIsNan carries no payload
            (NanValue(_), NanValue(_)) => true,

            _ => false,
        }
    }
}
