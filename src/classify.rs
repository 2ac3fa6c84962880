#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Qualitative bands for the difficulty and discrimination indices.

use serde::{Deserialize, Serialize};

use crate::types::QuestionKind;

/// Difficulty band of a question, from its P index (percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// P >= 80
    Easy,
    /// 60 <= P < 80
    Medium,
    /// 40 <= P < 60
    Hard,
    /// P < 40
    VeryHard,
}

impl DifficultyLevel {
    /// Returns the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
            DifficultyLevel::VeryHard => "Very Hard",
        }
    }

    /// Folds very hard questions into the hard bucket.
    pub fn bucket(self) -> DifficultyLevel {
        match self {
            DifficultyLevel::VeryHard => DifficultyLevel::Hard,
            other => other,
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a difficulty index to its band.
pub fn classify_difficulty(p: f64) -> DifficultyLevel {
    if p >= 80.0 {
        DifficultyLevel::Easy
    } else if p >= 60.0 {
        DifficultyLevel::Medium
    } else if p >= 40.0 {
        DifficultyLevel::Hard
    } else {
        DifficultyLevel::VeryHard
    }
}

/// Discrimination band of a question, from its D index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscriminationLevel {
    /// D >= 0.4
    Excellent,
    /// 0.3 <= D < 0.4
    Good,
    /// 0.2 <= D < 0.3
    Acceptable,
    /// 0 <= D < 0.2
    Poor,
    /// D < 0
    Negative,
    /// D could not be computed.
    Undefined,
}

impl DiscriminationLevel {
    /// Returns the label used for questions of the given kind.
    ///
    /// Multiple-choice and essay reports word the middle and bottom bands
    /// differently; both wordings are kept so existing reports stay
    /// comparable.
    pub fn label(self, kind: QuestionKind) -> &'static str {
        match (self, kind) {
            (DiscriminationLevel::Excellent, _) => "Excellent",
            (DiscriminationLevel::Good, _) => "Good",
            (DiscriminationLevel::Acceptable, QuestionKind::MultipleChoice) => "Acceptable",
            (DiscriminationLevel::Acceptable, QuestionKind::Essay) => "Medium",
            (DiscriminationLevel::Poor, _) => "Poor",
            (DiscriminationLevel::Negative, QuestionKind::MultipleChoice) => "Fail/Negative",
            (DiscriminationLevel::Negative, QuestionKind::Essay) => "Fail",
            (DiscriminationLevel::Undefined, _) => "Undefined",
        }
    }
}

/// Maps a discrimination index to its band.
pub fn classify_discrimination(d: f64) -> DiscriminationLevel {
    if d >= 0.4 {
        DiscriminationLevel::Excellent
    } else if d >= 0.3 {
        DiscriminationLevel::Good
    } else if d >= 0.2 {
        DiscriminationLevel::Acceptable
    } else if d >= 0.0 {
        DiscriminationLevel::Poor
    } else {
        DiscriminationLevel::Negative
    }
}

/// Like [`classify_discrimination`], with an undefined index mapped to
/// [`DiscriminationLevel::Undefined`].
pub fn classify_discrimination_opt(d: Option<f64>) -> DiscriminationLevel {
    d.map_or(DiscriminationLevel::Undefined, classify_discrimination)
}
