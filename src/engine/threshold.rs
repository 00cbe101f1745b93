//! Flagging threshold policy.
//!
//! Two caller surfaces configure flagging differently: the service API
//! exposes a binary strict/normal switch, the extension a three-way
//! yellow/red/off warn mode. Both resolve through this single policy type;
//! there is one threshold-selection function, not two divergent
//! algorithms.
//!
//! | Mode   | Normal | Strict |
//! |--------|--------|--------|
//! | Yellow | 35     | 25     |
//! | Red    | 60     | 55     |
//! | Off    | never  | never  |
//!
//! The cutoffs are fixed policy constants, preserved as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const YELLOW_NORMAL: u32 = 35;
const YELLOW_STRICT: u32 = 25;
const RED_NORMAL: u32 = 60;
const RED_STRICT: u32 = 55;

/// One past the maximum score: a threshold that never fires.
const NEVER: u32 = 101;

/// Warn-threshold mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Standard sensitivity. The service API's strict/normal switch lives
    /// entirely within this mode.
    #[default]
    Yellow,
    /// Only high-risk findings fire.
    Red,
    /// Flagging disabled; scores and risk labels are still computed.
    Off,
}

impl ThresholdMode {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ThresholdMode::Yellow => "yellow",
            ThresholdMode::Red => "red",
            ThresholdMode::Off => "off",
        }
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yellow" => Ok(ThresholdMode::Yellow),
            "red" => Ok(ThresholdMode::Red),
            "off" => Ok(ThresholdMode::Off),
            other => Err(format!("invalid threshold mode: {other} (use yellow, red, off)")),
        }
    }
}

/// Resolved flagging policy for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdPolicy {
    /// Warn mode selecting the threshold pair.
    pub mode: ThresholdMode,
    /// Strict sensitivity: selects the lower cutoff of the pair.
    pub strict: bool,
}

impl ThresholdPolicy {
    /// Policy for the given mode and sensitivity.
    pub fn new(mode: ThresholdMode, strict: bool) -> Self {
        Self { mode, strict }
    }

    /// The service API's binary switch: yellow mode, strict bit as given.
    pub fn from_strict(strict: bool) -> Self {
        Self::new(ThresholdMode::Yellow, strict)
    }

    /// Score cutoff at or above which a result is flagged.
    pub fn flag_threshold(self) -> u32 {
        match (self.mode, self.strict) {
            (ThresholdMode::Yellow, false) => YELLOW_NORMAL,
            (ThresholdMode::Yellow, true) => YELLOW_STRICT,
            (ThresholdMode::Red, false) => RED_NORMAL,
            (ThresholdMode::Red, true) => RED_STRICT,
            (ThresholdMode::Off, _) => NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table() {
        assert_eq!(ThresholdPolicy::from_strict(false).flag_threshold(), 35);
        assert_eq!(ThresholdPolicy::from_strict(true).flag_threshold(), 25);
        assert_eq!(ThresholdPolicy::new(ThresholdMode::Red, false).flag_threshold(), 60);
        assert_eq!(ThresholdPolicy::new(ThresholdMode::Red, true).flag_threshold(), 55);
        assert_eq!(ThresholdPolicy::new(ThresholdMode::Off, false).flag_threshold(), 101);
        assert_eq!(ThresholdPolicy::new(ThresholdMode::Off, true).flag_threshold(), 101);
    }

    #[test]
    fn test_strict_never_raises_threshold() {
        for mode in [ThresholdMode::Yellow, ThresholdMode::Red, ThresholdMode::Off] {
            let normal = ThresholdPolicy::new(mode, false).flag_threshold();
            let strict = ThresholdPolicy::new(mode, true).flag_threshold();
            assert!(strict <= normal, "strict raised threshold in {mode:?}");
        }
    }

    #[test]
    fn test_off_mode_never_fires() {
        // Scores are clamped to 100, so 101 can never be reached.
        assert!(ThresholdPolicy::new(ThresholdMode::Off, true).flag_threshold() > 100);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("yellow".parse::<ThresholdMode>().unwrap(), ThresholdMode::Yellow);
        assert_eq!("RED".parse::<ThresholdMode>().unwrap(), ThresholdMode::Red);
        assert_eq!("off".parse::<ThresholdMode>().unwrap(), ThresholdMode::Off);
        assert!("purple".parse::<ThresholdMode>().is_err());
    }
}
