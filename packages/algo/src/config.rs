//! Learning Configuration
//!
//! Defaults:
//! - `max_questions`: 10 cards per selection
//! - `failed_review_cap_secs`: 3600, the longest wait after a wrong answer
//! - `levels`: the six-level interval/weight table
//!
//! Overrides come from `TANGO_MAX_QUESTIONS` / `TANGO_FAILED_REVIEW_CAP_SECS`
//! (missing or unparsable values keep the default) or from a JSON document.
//! JSON configs are validated: weights strictly decrease, `Expert` weighs 0,
//! and intervals are non-negative and non-decreasing.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize_count, sanitize_interval_secs};
use crate::types::{
    MasteryLevel, MasteryTable, DEFAULT_MAX_QUESTIONS, FAILED_REVIEW_CAP_SECS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("weight of level {level} ({weight}) must be lower than the level below ({previous})")]
    WeightNotDecreasing {
        level: MasteryLevel,
        weight: u32,
        previous: u32,
    },
    #[error("expert level must have weight 0, got {0}")]
    ExpertWeight(u32),
    #[error("review interval of level {level} is negative: {secs}s")]
    NegativeInterval { level: MasteryLevel, secs: i64 },
    #[error("review interval of level {level} ({secs}s) is shorter than the level below")]
    IntervalNotIncreasing { level: MasteryLevel, secs: i64 },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable scheduling parameters.
///
/// Raw numeric fields are kept signed so malformed input survives
/// deserialization; accessors sanitize them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub max_questions: i64,
    pub failed_review_cap_secs: i64,
    pub levels: MasteryTable,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS as i64,
            failed_review_cap_secs: FAILED_REVIEW_CAP_SECS,
            levels: MasteryTable::default(),
        }
    }
}

impl LearningConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_questions = parse_or(
            std::env::var("TANGO_MAX_QUESTIONS").ok(),
            defaults.max_questions,
        );
        let failed_review_cap_secs = parse_or(
            std::env::var("TANGO_FAILED_REVIEW_CAP_SECS").ok(),
            defaults.failed_review_cap_secs,
        );

        Self {
            max_questions,
            failed_review_cap_secs,
            levels: defaults.levels,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let levels = &self.levels.levels;

        for (level, profile) in MasteryLevel::ALL.iter().zip(levels.iter()) {
            if profile.review_interval_secs < 0 {
                return Err(ConfigError::NegativeInterval {
                    level: *level,
                    secs: profile.review_interval_secs,
                });
            }
        }

        for (i, pair) in levels.windows(2).enumerate() {
            let level = MasteryLevel::ALL[i + 1];
            if pair[1].weight >= pair[0].weight {
                return Err(ConfigError::WeightNotDecreasing {
                    level,
                    weight: pair[1].weight,
                    previous: pair[0].weight,
                });
            }
            if pair[1].review_interval_secs < pair[0].review_interval_secs {
                return Err(ConfigError::IntervalNotIncreasing {
                    level,
                    secs: pair[1].review_interval_secs,
                });
            }
        }

        let expert = self.levels.weight(MasteryLevel::Expert);
        if expert != 0 {
            return Err(ConfigError::ExpertWeight(expert));
        }

        Ok(())
    }

    pub fn max_count(&self) -> usize {
        sanitize_count(self.max_questions)
    }

    pub fn failed_cap(&self) -> Duration {
        Duration::seconds(sanitize_interval_secs(self.failed_review_cap_secs))
    }
}

/// 解析环境变量值，缺失或非法时回退到默认值
fn parse_or(value: Option<String>, default: i64) -> i64 {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(default)
}
