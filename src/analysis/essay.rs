#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tracing::debug;

use super::{QuestionScores, ScoringStrategy, mean};
use crate::{
    classify::{
        DifficultyLevel, DiscriminationLevel, classify_difficulty, classify_discrimination_opt,
    },
    sheet::MaxScoreReference,
    types::{QuestionKind, display_opt, round_to},
};

/// Scores questions on a continuous scale, normalized by each question's
/// maximum attainable score.
#[derive(Debug, Clone, Default)]
pub struct Essay {
    /// Known maxima; questions missing here use their observed maximum.
    reference: MaxScoreReference,
}

impl Essay {
    /// Creates the strategy with the given maxima.
    pub fn new(reference: MaxScoreReference) -> Self {
        Self { reference }
    }

    /// Maxima in use.
    pub fn reference(&self) -> &MaxScoreReference {
        &self.reference
    }
}

#[derive(Tabled, Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Item statistics of one essay question.
pub struct EssayRecord {
    #[tabled(rename = "#")]
    /// * `position`: 1-based position in the schema
    pub position:             usize,
    #[tabled(rename = "Question")]
    /// * `question`: column name
    pub question:             String,
    #[tabled(rename = "Students")]
    /// * `total_students`: kept students
    pub total_students:       usize,
    #[tabled(rename = "Mean", display = "display_opt")]
    /// * `mean_score`: mean of the present scores, rounded to 2 places
    pub mean_score:           Option<f64>,
    #[tabled(rename = "Max possible", display = "display_opt")]
    /// * `max_possible`: reference maximum, or the observed one
    pub max_possible:         Option<f64>,
    #[tabled(rename = "Max (observed)", display = "display_opt")]
    /// * `actual_max`: highest score in the sample
    pub actual_max:           Option<f64>,
    #[tabled(rename = "Min", display = "display_opt")]
    /// * `min_score`: lowest score in the sample
    pub min_score:            Option<f64>,
    #[tabled(rename = "Std dev", display = "display_opt")]
    /// * `std_dev`: sample standard deviation, rounded to 2 places
    pub std_dev:              Option<f64>,
    #[tabled(rename = "P (%)")]
    /// * `difficulty`: mean over max possible, in percent
    pub difficulty:           f64,
    #[tabled(rename = "Level")]
    /// * `difficulty_level`: band of `difficulty`
    pub difficulty_level:     DifficultyLevel,
    #[tabled(rename = "Mean (high)", display = "display_opt")]
    /// * `mean_high`: mean score of the high group, rounded to 2 places
    pub mean_high:            Option<f64>,
    #[tabled(rename = "Mean (low)", display = "display_opt")]
    /// * `mean_low`: mean score of the low group, rounded to 2 places
    pub mean_low:             Option<f64>,
    #[tabled(rename = "D", display = "display_opt")]
    /// * `discrimination`: `None` when the groups are empty or hold no scores
    pub discrimination:       Option<f64>,
    #[tabled(rename = "Discrimination", display = "essay_label")]
    /// * `discrimination_level`: band of `discrimination`
    pub discrimination_level: DiscriminationLevel,
}

impl EssayRecord {
    /// Discrimination label in essay wording.
    pub fn discrimination_label(&self) -> &'static str {
        self.discrimination_level.label(QuestionKind::Essay)
    }
}

/// Table rendering of an essay discrimination band.
fn essay_label(level: &DiscriminationLevel) -> String {
    level.label(QuestionKind::Essay).to_string()
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
fn sample_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

impl ScoringStrategy for Essay {
    type Record = EssayRecord;

    fn kind(&self) -> QuestionKind {
        QuestionKind::Essay
    }

    fn score_question(&self, question: &QuestionScores<'_>) -> EssayRecord {
        let present = question.present().collect::<Vec<_>>();
        let mean_score = mean(present.iter().copied());
        let actual_max = present.iter().copied().reduce(f64::max);
        let min_score = present.iter().copied().reduce(f64::min);
        let std_dev = mean_score.and_then(|m| sample_std_dev(&present, m));

        let max_possible = match self.reference.get(question.name) {
            Some(max) => Some(max),
            None => {
                debug!(question = question.name, "No reference maximum; using observed maximum");
                actual_max
            }
        };
        let usable_max = max_possible.filter(|&m| m > 0.0);

        let difficulty = match (mean_score, usable_max) {
            (Some(m), Some(max)) => round_to(m / max * 100.0, 2),
            _ => 0.0,
        };

        let (mean_high, mean_low) = if question.split.is_defined() {
            (mean(question.high().flatten()), mean(question.low().flatten()))
        } else {
            (None, None)
        };

        let discrimination = match (mean_high, mean_low, usable_max) {
            (Some(high), Some(low), Some(max)) => Some(round_to((high - low) / max, 2)),
            (Some(_), Some(_), None) => Some(0.0),
            _ => None,
        };

        EssayRecord {
            position: question.position,
            question: question.name.to_string(),
            total_students: question.student_count(),
            mean_score: mean_score.map(|m| round_to(m, 2)),
            max_possible,
            actual_max,
            min_score,
            std_dev: std_dev.map(|s| round_to(s, 2)),
            difficulty,
            difficulty_level: classify_difficulty(difficulty),
            mean_high: mean_high.map(|m| round_to(m, 2)),
            mean_low: mean_low.map(|m| round_to(m, 2)),
            discrimination,
            discrimination_level: classify_discrimination_opt(discrimination),
        }
    }
}
