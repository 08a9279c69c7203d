//! Time units for user-entered durations
//!
//! Motion and caucus durations are entered as an amount plus a unit; all
//! timer math happens in whole seconds.

use serde::{Deserialize, Serialize};

/// Unit attached to a user-entered duration amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
}

impl TimeUnit {
    /// Number of seconds in one unit
    pub fn seconds(&self) -> u32 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
        }
    }

    /// Convert an amount in this unit to whole seconds
    pub fn to_seconds(&self, amount: u32) -> u32 {
        amount * self.seconds()
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "sec"),
            TimeUnit::Minutes => write!(f, "min"),
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "mins" | "minutes" => Ok(TimeUnit::Minutes),
            _ => Err(format!("Unknown time unit: {}. Valid: seconds, minutes", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_seconds() {
        assert_eq!(TimeUnit::Seconds.to_seconds(45), 45);
        assert_eq!(TimeUnit::Minutes.to_seconds(10), 600);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("min".parse::<TimeUnit>().ok(), Some(TimeUnit::Minutes));
        assert_eq!("seconds".parse::<TimeUnit>().ok(), Some(TimeUnit::Seconds));
        assert!("hours".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_default_is_minutes() {
        assert_eq!(TimeUnit::default(), TimeUnit::Minutes);
    }
}
