#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use super::{QuestionScores, ScoringStrategy};
use crate::{
    classify::{
        DifficultyLevel, DiscriminationLevel, classify_difficulty, classify_discrimination_opt,
    },
    types::{QuestionKind, display_opt, round_to},
};

/// Scores a question as correct when the score is above zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleChoice;

#[derive(Tabled, Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Item statistics of one multiple-choice question.
pub struct MultipleChoiceRecord {
    #[tabled(rename = "#")]
    /// * `position`: 1-based position in the schema
    pub position:             usize,
    #[tabled(rename = "Question")]
    /// * `question`: column name
    pub question:             String,
    #[tabled(rename = "Students")]
    /// * `total_students`: kept students
    pub total_students:       usize,
    #[tabled(rename = "Correct")]
    /// * `num_correct`: students scoring above zero
    pub num_correct:          usize,
    #[tabled(rename = "P (%)")]
    /// * `difficulty`: share of correct answers, in percent
    pub difficulty:           f64,
    #[tabled(rename = "Level")]
    /// * `difficulty_level`: band of `difficulty`
    pub difficulty_level:     DifficultyLevel,
    #[tabled(rename = "Correct (high)")]
    /// * `high_correct`: correct answers in the high group
    pub high_correct:         usize,
    #[tabled(rename = "Correct (low)")]
    /// * `low_correct`: correct answers in the low group
    pub low_correct:          usize,
    #[tabled(rename = "D", display = "display_opt")]
    /// * `discrimination`: `None` when the groups are empty
    pub discrimination:       Option<f64>,
    #[tabled(rename = "Discrimination", display = "mc_label")]
    /// * `discrimination_level`: band of `discrimination`
    pub discrimination_level: DiscriminationLevel,
}

impl MultipleChoiceRecord {
    /// Discrimination label in multiple-choice wording.
    pub fn discrimination_label(&self) -> &'static str {
        self.discrimination_level.label(QuestionKind::MultipleChoice)
    }
}

/// Table rendering of a multiple-choice discrimination band.
fn mc_label(level: &DiscriminationLevel) -> String {
    level.label(QuestionKind::MultipleChoice).to_string()
}

impl ScoringStrategy for MultipleChoice {
    type Record = MultipleChoiceRecord;

    fn kind(&self) -> QuestionKind {
        QuestionKind::MultipleChoice
    }

    fn score_question(&self, question: &QuestionScores<'_>) -> MultipleChoiceRecord {
        let is_correct = |s: &Option<f64>| s.is_some_and(|v| v > 0.0);

        let total_students = question.student_count();
        let num_correct = question.scores.iter().filter(|s| is_correct(*s)).count();
        let difficulty = if total_students > 0 {
            round_to(num_correct as f64 / total_students as f64 * 100.0, 2)
        } else {
            0.0
        };

        let high_correct = question.high().filter(is_correct).count();
        let low_correct = question.low().filter(is_correct).count();
        let g = question.split.group_size();
        let discrimination = (g > 0)
            .then(|| round_to((high_correct as f64 - low_correct as f64) / g as f64, 2));

        MultipleChoiceRecord {
            position: question.position,
            question: question.name.to_string(),
            total_students,
            num_correct,
            difficulty,
            difficulty_level: classify_difficulty(difficulty),
            high_correct,
            low_correct,
            discrimination,
            discrimination_level: classify_discrimination_opt(discrimination),
        }
    }
}
