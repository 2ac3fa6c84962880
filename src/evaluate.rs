#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Judges a whole exam: does its difficulty mix match the target, and do its
//! questions discriminate well enough?

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tracing::info;

use crate::{
    analysis::{EssayRecord, MultipleChoiceRecord},
    classify::DifficultyLevel,
    config::MixCriteria,
    constants::{GOOD_DISCRIMINATION, SHARE_EPSILON},
    error::{AnalysisError, EvaluationError},
    mix::MixedRecord,
    types::round_to,
};

/// What the evaluator needs from a question record.
pub trait ItemStatistic {
    /// Difficulty band of the question.
    fn difficulty_level(&self) -> DifficultyLevel;

    /// Discrimination index, `None` when undefined.
    fn discrimination(&self) -> Option<f64>;
}

impl ItemStatistic for MultipleChoiceRecord {
    fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }

    fn discrimination(&self) -> Option<f64> {
        self.discrimination
    }
}

impl ItemStatistic for EssayRecord {
    fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }

    fn discrimination(&self) -> Option<f64> {
        self.discrimination
    }
}

impl ItemStatistic for MixedRecord {
    fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }

    fn discrimination(&self) -> Option<f64> {
        self.discrimination
    }
}

#[derive(Tabled, Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Realized versus target share of one difficulty bucket.
pub struct BucketSummary {
    #[tabled(rename = "Bucket")]
    /// * `bucket`: Easy, Medium or Hard (very hard folded in)
    pub bucket:   DifficultyLevel,
    #[tabled(rename = "Questions")]
    /// * `count`: questions in the bucket
    pub count:    usize,
    #[tabled(rename = "Realized")]
    /// * `realized`: share of questions, rounded to 4 places
    pub realized: f64,
    #[tabled(rename = "Target")]
    /// * `target`: target share
    pub target:   f64,
    #[tabled(rename = "Accepted range", display = "display_interval")]
    /// * `interval`: `[target - tolerance, target + tolerance]`
    pub interval: (f64, f64),
    #[tabled(rename = "Pass?")]
    /// * `passed`: whether `realized` lies within `interval`
    pub passed:   bool,
}

/// Renders an acceptance interval with 3 decimal places at most.
fn display_interval(interval: &(f64, f64)) -> String {
    format!("[{}, {}]", round_to(interval.0, 3), round_to(interval.1, 3))
}

/// Discrimination quality across all questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscriminationStats {
    /// Share of questions with D >= 0.2, rounded to 4 places.
    pub good_share:     f64,
    /// Share of questions with D < 0, rounded to 4 places.
    pub negative_share: f64,
    /// Whether both shares meet the criteria.
    pub passed:         bool,
}

impl DiscriminationStats {
    /// Labeled metrics, for key/value rendering.
    pub fn entries(&self) -> [(&'static str, String); 3] {
        [
            ("Share D >= 0.2", format!("{}", self.good_share)),
            ("Share D < 0", format!("{}", self.negative_share)),
            ("Meets discrimination criteria?", format!("{}", self.passed)),
        ]
    }
}

/// Outcome of evaluating an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamEvaluation {
    /// One row per bucket: Easy, Medium, Hard.
    pub summary:        Vec<BucketSummary>,
    /// Whether every bucket passed.
    pub mix_passed:     bool,
    /// Discrimination statistics; `None` when not checked.
    pub discrimination: Option<DiscriminationStats>,
    /// Whether the exam passed every enabled check.
    pub passed:         bool,
    /// Human-readable verdict.
    pub conclusion:     String,
}

/// Mix verdict when the exam matches its target.
const MIX_PASS: &str = "Meets difficulty-mix standard";
/// Mix verdict when it does not.
const MIX_FAIL: &str = "Does not meet difficulty-mix standard";
/// Discrimination verdict when the criteria hold.
const DISC_PASS: &str = "Meets discrimination criteria";
/// Discrimination verdict when they do not.
const DISC_FAIL: &str = "Does not meet discrimination criteria";
/// Verdict when every enabled check passes.
const OVERALL_PASS: &str = "Meets overall standard";

/// Prefixes a partial verdict with a pass/fail mark.
fn marked(passed: bool, pass: &str, fail: &str) -> String {
    if passed {
        format!("✅ {pass}")
    } else {
        format!("❌ {fail}")
    }
}

/// Evaluates `records` against `criteria`.
pub fn evaluate_exam<R: ItemStatistic>(
    records: &[R],
    criteria: &MixCriteria,
) -> Result<ExamEvaluation, AnalysisError> {
    criteria.validate()?;
    let total = records.len();
    if total == 0 {
        return Err(EvaluationError::NoQuestions.into());
    }

    let tolerance = criteria.tolerance();
    let summary = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ]
    .into_iter()
    .map(|bucket| {
        let count = records
            .iter()
            .filter(|r| r.difficulty_level().bucket() == bucket)
            .count();
        let realized = round_to(count as f64 / total as f64, 4);
        let target = criteria.target().target_for(bucket);
        let interval = (target - tolerance, target + tolerance);
        let passed =
            realized >= interval.0 - SHARE_EPSILON && realized <= interval.1 + SHARE_EPSILON;
        BucketSummary {
            bucket,
            count,
            realized,
            target,
            interval,
            passed,
        }
    })
    .collect::<Vec<_>>();
    let mix_passed = summary.iter().all(|b| b.passed);

    let discrimination = criteria.check_discrimination().then(|| {
        let share = |pred: fn(f64) -> bool| {
            let hits = records
                .iter()
                .filter(|r| r.discrimination().is_some_and(pred))
                .count();
            hits as f64 / total as f64
        };
        let good_share = share(|d| d >= GOOD_DISCRIMINATION);
        let negative_share = share(|d| d < 0.0);
        DiscriminationStats {
            good_share:     round_to(good_share, 4),
            negative_share: round_to(negative_share, 4),
            passed:         good_share >= criteria.min_good_share()
                && negative_share <= criteria.max_negative_share(),
        }
    });

    let (passed, conclusion) = match &discrimination {
        None => {
            let conclusion = if mix_passed { MIX_PASS } else { MIX_FAIL };
            (mix_passed, conclusion.to_string())
        }
        Some(stats) if mix_passed && stats.passed => (true, OVERALL_PASS.to_string()),
        Some(stats) => (
            false,
            format!(
                "{} | {}",
                marked(mix_passed, MIX_PASS, MIX_FAIL),
                marked(stats.passed, DISC_PASS, DISC_FAIL)
            ),
        ),
    };

    info!(questions = total, mix_passed, passed, "Evaluated exam difficulty mix");

    Ok(ExamEvaluation {
        summary,
        mix_passed,
        discrimination,
        passed,
        conclusion,
    })
}
