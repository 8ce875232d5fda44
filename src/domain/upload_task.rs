use std::time::Duration;

use serde::Deserialize;

/// State of an asynchronous course import task as reported by Studio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Succeeded,
    Failed,
    /// Any other value; the raw string is kept for logging.
    Pending(String),
}

impl TaskState {
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "Succeeded" => TaskState::Succeeded,
            "Failed" => TaskState::Failed,
            other => TaskState::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Pending(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Succeeded => "Succeeded",
            TaskState::Failed => "Failed",
            TaskState::Pending(raw) => raw,
        }
    }
}

/// How long to keep polling an import task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollPolicy {
    /// Delay after the first non-terminal poll.
    #[serde(
        default = "default_interval",
        rename = "poll_interval_ms",
        deserialize_with = "millis::deserialize"
    )]
    pub interval: Duration,
    /// Upper bound for the doubling delay.
    #[serde(
        default = "default_max_interval",
        rename = "max_interval_ms",
        deserialize_with = "millis::deserialize"
    )]
    pub max_interval: Duration,
    /// Number of status checks before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            max_interval: default_max_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollPolicy {
    /// Delay to sleep after the `attempt`-th (1-based) pending status.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.interval.saturating_mul(factor).min(self.max_interval.max(self.interval))
    }
}

fn default_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_max_interval() -> Duration {
    Duration::from_secs(16)
}

fn default_max_attempts() -> u32 {
    300
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
