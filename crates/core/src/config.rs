//! Process-wide configuration.
//!
//! Built once at startup and passed into each component; nothing reads the
//! environment at call time.

use std::time::Duration;

/// Pass/fail thresholds for the daily check-in.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Quiz score a check-in must exceed to pass
    pub quiz_pass_score: u8,

    /// Focus minutes a check-in must exceed to pass
    pub focus_min_minutes: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            quiz_pass_score: 7,
            focus_min_minutes: 60,
        }
    }
}

/// Fail-safe windows for interventions awaiting a mentor.
#[derive(Debug, Clone, Copy)]
pub struct FailSafe {
    /// Hours a mentor has to act before an intervention escalates
    pub mentor_response_deadline_hours: i64,

    /// Hours after assignment before the student is auto-unlocked
    pub auto_unlock_hours: i64,
}

impl Default for FailSafe {
    fn default() -> Self {
        Self {
            mentor_response_deadline_hours: 12,
            auto_unlock_hours: 24,
        }
    }
}

/// Immutable configuration for the whole process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Check-in pass/fail thresholds
    pub thresholds: Thresholds,

    /// Escalation fail-safe windows
    pub fail_safe: FailSafe,

    /// Period between escalation sweeps
    pub sweep_period: Duration,

    /// Outbound mentor-notification webhook, if configured
    pub webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            fail_safe: FailSafe::default(),
            sweep_period: Duration::from_secs(10 * 60),
            webhook_url: None,
        }
    }
}

impl Config {
    /// Read recognized options from the environment, falling back to defaults.
    ///
    /// Recognized: `QUIZ_PASS_SCORE`, `FOCUS_MIN_MINUTES`,
    /// `MENTOR_RESPONSE_DEADLINE_HOURS`, `AUTO_UNLOCK_HOURS`,
    /// `SWEEP_PERIOD_SECS`, `MENTOR_WEBHOOK_URL`.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            thresholds: Thresholds {
                quiz_pass_score: env_parse("QUIZ_PASS_SCORE")
                    .unwrap_or(defaults.thresholds.quiz_pass_score),
                focus_min_minutes: env_parse("FOCUS_MIN_MINUTES")
                    .unwrap_or(defaults.thresholds.focus_min_minutes),
            },
            fail_safe: FailSafe {
                mentor_response_deadline_hours: env_parse("MENTOR_RESPONSE_DEADLINE_HOURS")
                    .unwrap_or(defaults.fail_safe.mentor_response_deadline_hours),
                auto_unlock_hours: env_parse("AUTO_UNLOCK_HOURS")
                    .unwrap_or(defaults.fail_safe.auto_unlock_hours),
            },
            sweep_period: env_parse("SWEEP_PERIOD_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_period),
            webhook_url: std::env::var("MENTOR_WEBHOOK_URL")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let config = Config::default();
        assert_eq!(config.thresholds.quiz_pass_score, 7);
        assert_eq!(config.thresholds.focus_min_minutes, 60);
        assert_eq!(config.fail_safe.mentor_response_deadline_hours, 12);
        assert_eq!(config.fail_safe.auto_unlock_hours, 24);
        assert_eq!(config.sweep_period, Duration::from_secs(600));
        assert!(config.webhook_url.is_none());
    }
}
