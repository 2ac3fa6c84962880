#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-question item analysis.
//!
//! [`Analyzer`] does the work shared by every question type: it splits the
//! class into groups once, then hands each question column to a
//! [`ScoringStrategy`] that computes the type-specific record.

/// Continuous-score (essay) questions
pub mod essay;
/// Correct/incorrect (multiple-choice) questions
pub mod multiple_choice;

use tracing::{debug, info, warn};

pub use self::{
    essay::{Essay, EssayRecord},
    multiple_choice::{MultipleChoice, MultipleChoiceRecord},
};
use crate::{
    error::SheetError,
    grouping::GroupSplit,
    sheet::{MaxScoreReference, QuestionSchema, ScoreSheet, ScoreTable},
    types::QuestionKind,
};

/// Everything a strategy needs to know about one question.
#[derive(Debug, Clone)]
pub struct QuestionScores<'a> {
    /// 1-based position of the question in the schema.
    pub position: usize,
    /// Column name of the question.
    pub name:     &'a str,
    /// Score of every kept student, in table order.
    pub scores:   Vec<Option<f64>>,
    /// Group split shared by all questions of the table.
    pub split:    &'a GroupSplit,
}

impl QuestionScores<'_> {
    /// Number of kept students, blank cells included.
    pub fn student_count(&self) -> usize {
        self.scores.len()
    }

    /// Non-blank scores.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().flatten().copied()
    }

    /// Scores of the high group.
    pub fn high(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.split.high().iter().map(|&i| self.scores[i])
    }

    /// Scores of the low group.
    pub fn low(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.split.low().iter().map(|&i| self.scores[i])
    }
}

/// Computes the record of a single question for one question type.
pub trait ScoringStrategy {
    /// Per-question output of this strategy.
    type Record;

    /// The question type this strategy scores.
    fn kind(&self) -> QuestionKind;

    /// Computes the record for `question`.
    fn score_question(&self, question: &QuestionScores<'_>) -> Self::Record;
}

/// Runs a [`ScoringStrategy`] over every question of a score table.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<S> {
    /// Strategy applied to each question column.
    strategy: S,
}

impl<S: ScoringStrategy> Analyzer<S> {
    /// Creates an analyzer for `strategy`.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Analyzes every question of `table`, in schema order.
    pub fn analyze(&self, table: &ScoreTable) -> Vec<S::Record> {
        let kind = self.strategy.kind();
        if table.questions().is_empty() {
            info!(%kind, "No question columns to analyze");
            return Vec::new();
        }
        if table.is_empty() {
            warn!(%kind, "No eligible students; difficulty defaults to 0 and discrimination is undefined");
        }

        let split = GroupSplit::from_totals(&table.totals());
        if !split.is_defined() {
            debug!(%kind, students = table.len(), "Too few students to form groups; discrimination is undefined");
        }

        table
            .questions()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let question = QuestionScores {
                    position: index + 1,
                    name,
                    scores: table.column(index),
                    split: &split,
                };
                self.strategy.score_question(&question)
            })
            .collect()
    }

    /// Validates `sheet` against `schema`, then analyzes it.
    pub fn analyze_sheet(
        &self,
        sheet: &ScoreSheet,
        schema: &QuestionSchema,
    ) -> Result<Vec<S::Record>, SheetError> {
        let table = ScoreTable::from_sheet(sheet, schema)?;
        Ok(self.analyze(&table))
    }
}

/// Analyzes `table` as multiple-choice questions.
pub fn analyze_multiple_choice(table: &ScoreTable) -> Vec<MultipleChoiceRecord> {
    Analyzer::new(MultipleChoice).analyze(table)
}

/// Analyzes `table` as essay questions.
pub fn analyze_essay(table: &ScoreTable, reference: &MaxScoreReference) -> Vec<EssayRecord> {
    Analyzer::new(Essay::new(reference.clone())).analyze(table)
}

/// Arithmetic mean, `None` for no values.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0f64, 0usize), |acc, v| (acc.0 + v, acc.1 + 1));
    (count > 0).then(|| sum / count as f64)
}
