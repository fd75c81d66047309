//! Run settings consumed by the search process.
//!
//! Strategies never read these; they are carried here so the harness and the
//! search loop share one definition and one set of defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of satisfying examples required before a run may stop
pub const DEFAULT_MIN_SATISFYING_EXAMPLES: u32 = 5;

/// Default cap on examples tried per run
pub const DEFAULT_MAX_EXAMPLES: u32 = 200;

/// Default wall-clock budget for a run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Satisfying examples to find before the run may stop early
    pub min_satisfying_examples: u32,

    /// Maximum number of examples to try
    pub max_examples: u32,

    /// Maximum time for the run, written as seconds in JSON
    #[serde(with = "seconds")]
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_satisfying_examples: DEFAULT_MIN_SATISFYING_EXAMPLES,
            max_examples: DEFAULT_MAX_EXAMPLES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Build settings, using the default for anything unset or zero.
    pub fn new(
        min_satisfying_examples: Option<u32>,
        max_examples: Option<u32>,
        timeout: Option<Duration>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            min_satisfying_examples: min_satisfying_examples
                .filter(|&n| n > 0)
                .unwrap_or(defaults.min_satisfying_examples),
            max_examples: max_examples.filter(|&n| n > 0).unwrap_or(defaults.max_examples),
            timeout: timeout
                .filter(|t| *t > Duration::from_secs(0))
                .unwrap_or(defaults.timeout),
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `Duration` as a plain number of seconds.
mod seconds {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 || secs >= u64::MAX as f64 {
            return Err(de::Error::custom(format!("invalid timeout of {} seconds", secs)));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
