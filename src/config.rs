#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Evaluation criteria: the target difficulty mix and discrimination
//! thresholds an exam is judged against.

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    classify::DifficultyLevel,
    constants::{
        DEFAULT_MAX_NEGATIVE_SHARE, DEFAULT_MIN_GOOD_SHARE, DEFAULT_TARGET_EASY,
        DEFAULT_TARGET_HARD, DEFAULT_TARGET_MEDIUM, DEFAULT_TOLERANCE,
    },
    error::ConfigError,
};

/// Target share of questions per difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMix {
    /// Share of easy questions.
    pub easy:   f64,
    /// Share of medium questions.
    pub medium: f64,
    /// Share of hard questions, very hard included.
    pub hard:   f64,
}

impl Default for TargetMix {
    fn default() -> Self {
        Self {
            easy:   DEFAULT_TARGET_EASY,
            medium: DEFAULT_TARGET_MEDIUM,
            hard:   DEFAULT_TARGET_HARD,
        }
    }
}

impl TargetMix {
    /// Target share of the bucket `level` falls into.
    pub fn target_for(&self, level: DifficultyLevel) -> f64 {
        match level.bucket() {
            DifficultyLevel::Easy => self.easy,
            DifficultyLevel::Medium => self.medium,
            _ => self.hard,
        }
    }
}

/// Criteria an exam is evaluated against.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct MixCriteria {
    /// Target difficulty mix.
    #[builder(default)]
    target:               TargetMix,
    /// Allowed deviation from each target share.
    #[builder(default = DEFAULT_TOLERANCE)]
    tolerance:            f64,
    /// Whether discrimination quality is part of the verdict.
    #[builder(default = false)]
    check_discrimination: bool,
    /// Minimum share of questions with D >= 0.2.
    #[builder(default = DEFAULT_MIN_GOOD_SHARE)]
    min_good_share:       f64,
    /// Maximum share of questions with D < 0.
    #[builder(default = DEFAULT_MAX_NEGATIVE_SHARE)]
    max_negative_share:   f64,
}

impl Default for MixCriteria {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Reads an optional numeric environment override.
fn env_f64(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value: raw }),
        _ => Ok(None),
    }
}

impl MixCriteria {
    /// Target difficulty mix.
    pub fn target(&self) -> &TargetMix {
        &self.target
    }

    /// Allowed deviation from each target share.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether discrimination quality is part of the verdict.
    pub fn check_discrimination(&self) -> bool {
        self.check_discrimination
    }

    /// Minimum share of questions with D >= 0.2.
    pub fn min_good_share(&self) -> f64 {
        self.min_good_share
    }

    /// Maximum share of questions with D < 0.
    pub fn max_negative_share(&self) -> f64 {
        self.max_negative_share
    }

    /// Returns a copy with a different tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns a copy with the discrimination check switched on or off.
    pub fn with_check_discrimination(mut self, check: bool) -> Self {
        self.check_discrimination = check;
        self
    }

    /// Defaults, overridden by any `ITEM_ANALYSIS_*` environment variables
    /// that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut criteria = Self::default();
        if let Some(v) = env_f64("ITEM_ANALYSIS_TARGET_EASY")? {
            criteria.target.easy = v;
        }
        if let Some(v) = env_f64("ITEM_ANALYSIS_TARGET_MEDIUM")? {
            criteria.target.medium = v;
        }
        if let Some(v) = env_f64("ITEM_ANALYSIS_TARGET_HARD")? {
            criteria.target.hard = v;
        }
        if let Some(v) = env_f64("ITEM_ANALYSIS_TOLERANCE")? {
            criteria.tolerance = v;
        }
        if let Some(v) = env_f64("ITEM_ANALYSIS_MIN_GOOD_SHARE")? {
            criteria.min_good_share = v;
        }
        if let Some(v) = env_f64("ITEM_ANALYSIS_MAX_NEGATIVE_SHARE")? {
            criteria.max_negative_share = v;
        }
        debug!(?criteria, "Loaded evaluation criteria");
        criteria.validate()?;
        Ok(criteria)
    }

    /// Checks that every share and the tolerance lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("target.easy", self.target.easy),
            ("target.medium", self.target.medium),
            ("target.hard", self.target.hard),
            ("tolerance", self.tolerance),
            ("min_good_share", self.min_good_share),
            ("max_negative_share", self.max_negative_share),
        ];
        match checks
            .into_iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
        {
            Some((name, value)) => Err(ConfigError::OutOfRange { name, value }),
            None => Ok(()),
        }
    }
}
