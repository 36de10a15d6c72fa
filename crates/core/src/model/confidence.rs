use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("confidence must be between 1 and 5, got {value}")]
pub struct ConfidenceError {
    value: i64,
}

/// Learner's self-reported certainty at the moment of answering (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: Confidence = Confidence(3);

    /// # Errors
    ///
    /// Returns `ConfidenceError` when `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, ConfidenceError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(u8::try_from(value).map_err(|_| ConfidenceError { value })?))
        } else {
            Err(ConfidenceError { value })
        }
    }

    /// Clamp any integer into range, the way a 1..5 slider does.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(value).unwrap_or(Self::DEFAULT.0))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}
