use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What happens when the learner advances past the last question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Wrap back to the first question and keep going.
    #[default]
    Loop,
    /// Finish the session; only `Restart` is accepted afterwards.
    Stop,
    /// Wrap, drawing a fresh presentation order each time round.
    Reshuffle,
}

impl AdvancePolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Stop => "stop",
            Self::Reshuffle => "reshuffle",
        }
    }
}

impl fmt::Display for AdvancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown advance policy {0:?} (expected loop, stop or reshuffle)")]
pub struct ParsePolicyError(String);

impl FromStr for AdvancePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "stop" => Ok(Self::Stop),
            "reshuffle" | "shuffle" => Ok(Self::Reshuffle),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Per-session knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub advance: AdvancePolicy,
    /// Seed for `AdvancePolicy::Reshuffle`. `None` seeds from the OS.
    pub shuffle_seed: Option<u64>,
}

impl SessionConfig {
    #[must_use]
    pub fn with_advance(mut self, advance: AdvancePolicy) -> Self {
        self.advance = advance;
        self
    }

    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_and_displays() {
        for policy in [AdvancePolicy::Loop, AdvancePolicy::Stop, AdvancePolicy::Reshuffle] {
            assert_eq!(policy.to_string().parse::<AdvancePolicy>().unwrap(), policy);
        }
        assert_eq!(" STOP ".parse::<AdvancePolicy>().unwrap(), AdvancePolicy::Stop);
        assert!("forever".parse::<AdvancePolicy>().is_err());
    }

    #[test]
    fn default_config_loops() {
        let config = SessionConfig::default();
        assert_eq!(config.advance, AdvancePolicy::Loop);
        assert_eq!(config.shuffle_seed, None);
    }
}
