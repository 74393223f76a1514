use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest a single round can run, in seconds
const ROUND_LENGTH_SECS: u16 = 5 * 60;

/// Elapsed time within a round, written `M:SS` or `MM:SS`
///
/// Two times are equal when they denote the same second, so `"03:45"` and
/// `"3:45"` compare equal. `Display` always produces the normalized `M:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FightTime {
    seconds: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FightTimeError {
    #[error("time must be formatted as M:SS, got '{0}'")]
    Format(String),

    #[error("time '{0}' is outside a five minute round")]
    OutOfRange(String),
}

impl FightTime {
    pub fn from_seconds(seconds: u16) -> Self {
        Self { seconds }
    }

    pub fn seconds(&self) -> u16 {
        self.seconds
    }
}

impl FromStr for FightTime {
    type Err = FightTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let format_err = || FightTimeError::Format(trimmed.to_string());

        let (minutes, seconds) = trimmed.split_once(':').ok_or_else(format_err)?;

        if minutes.is_empty()
            || minutes.len() > 2
            || seconds.len() != 2
            || !minutes.chars().all(|c| c.is_ascii_digit())
            || !seconds.chars().all(|c| c.is_ascii_digit())
        {
            return Err(format_err());
        }

        let minutes: u16 = minutes.parse().map_err(|_| format_err())?;
        let seconds: u16 = seconds.parse().map_err(|_| format_err())?;

        if seconds >= 60 {
            return Err(FightTimeError::OutOfRange(trimmed.to_string()));
        }

        let total = minutes * 60 + seconds;
        if total == 0 || total > ROUND_LENGTH_SECS {
            return Err(FightTimeError::OutOfRange(trimmed.to_string()));
        }

        Ok(Self { seconds: total })
    }
}

impl fmt::Display for FightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

impl TryFrom<String> for FightTime {
    type Error = FightTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FightTime> for String {
    fn from(time: FightTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_normalize() {
        let time: FightTime = "03:45".parse().unwrap();
        assert_eq!(time.seconds(), 225);
        assert_eq!(time.to_string(), "3:45");
        assert_eq!(time, "3:45".parse().unwrap());
    }

    #[test]
    fn test_full_round_is_accepted() {
        let time: FightTime = "5:00".parse().unwrap();
        assert_eq!(time.seconds(), 300);
    }

    #[test]
    fn test_rejects_malformed_times() {
        for input in ["", "345", "3:4", "3:456", "a:45", ":45", "123:00", "3.45"] {
            assert!(
                matches!(input.parse::<FightTime>(), Err(FightTimeError::Format(_))),
                "expected format error for {input:?}"
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range_times() {
        for input in ["0:00", "3:60", "5:01", "6:00"] {
            assert!(
                matches!(input.parse::<FightTime>(), Err(FightTimeError::OutOfRange(_))),
                "expected range error for {input:?}"
            );
        }
    }

    #[test]
    fn test_serde_uses_string_form() {
        let time: FightTime = serde_json::from_str("\"04:05\"").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"4:05\"");
        assert!(serde_json::from_str::<FightTime>("\"9:99\"").is_err());
    }
}
