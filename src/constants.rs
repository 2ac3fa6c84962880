#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Share of students (in percent) placed in each of the high and low groups.
pub const GROUP_PERCENT: usize = 27;

/// Default name of the column holding the student identifier.
pub const DEFAULT_ID_COLUMN: &str = "STT";

/// Default header prefix marking question columns in legacy score sheets.
pub const DEFAULT_QUESTION_PREFIX: &str = "Câu";

/// Prefix applied to multiple-choice question ids in a mixed table.
pub const MC_ID_PREFIX: &str = "MC_";

/// Prefix applied to essay question ids in a mixed table.
pub const ESSAY_ID_PREFIX: &str = "Essay_";

/// Default target share of easy questions.
pub const DEFAULT_TARGET_EASY: f64 = 0.50;

/// Default target share of medium questions.
pub const DEFAULT_TARGET_MEDIUM: f64 = 0.30;

/// Default target share of hard questions (very hard included).
pub const DEFAULT_TARGET_HARD: f64 = 0.20;

/// Default allowed deviation from each target share.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Minimum share of questions with D >= [`GOOD_DISCRIMINATION`].
pub const DEFAULT_MIN_GOOD_SHARE: f64 = 0.60;

/// Maximum share of questions with a negative D.
pub const DEFAULT_MAX_NEGATIVE_SHARE: f64 = 0.10;

/// Discrimination index from which a question counts as discriminating well.
pub const GOOD_DISCRIMINATION: f64 = 0.2;

/// Slack used when comparing realized shares against acceptance bounds.
pub const SHARE_EPSILON: f64 = 1e-9;
