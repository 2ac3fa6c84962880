#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Combines multiple-choice and essay analyses of one exam into a single
//! type-tagged table.

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tracing::info;

use crate::{
    analysis::{EssayRecord, MultipleChoiceRecord, analyze_essay, analyze_multiple_choice, mean},
    classify::{DifficultyLevel, DiscriminationLevel},
    constants::{ESSAY_ID_PREFIX, MC_ID_PREFIX},
    error::SheetError,
    sheet::{MaxScoreReference, QuestionSchema, ScoreSheet, ScoreTable},
    types::{QuestionKind, display_opt},
};

#[derive(Tabled, Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A question of either type, projected onto the columns both types share.
pub struct MixedRecord {
    #[tabled(rename = "Question")]
    /// * `question`: id prefixed with its type, e.g. `MC_Q1`
    pub question:             String,
    #[tabled(rename = "Type")]
    /// * `kind`: question type
    pub kind:                 QuestionKind,
    #[tabled(rename = "P (%)")]
    /// * `difficulty`: difficulty index
    pub difficulty:           f64,
    #[tabled(rename = "Level")]
    /// * `difficulty_level`: band of `difficulty`
    pub difficulty_level:     DifficultyLevel,
    #[tabled(rename = "D", display = "display_opt")]
    /// * `discrimination`: discrimination index, if defined
    pub discrimination:       Option<f64>,
    #[tabled(rename = "Discrimination")]
    /// * `discrimination_label`: band label in the wording of `kind`
    pub discrimination_label: String,
}

impl MixedRecord {
    /// Builds a mixed row from its type-specific parts.
    fn new(
        kind: QuestionKind,
        question: &str,
        difficulty: f64,
        difficulty_level: DifficultyLevel,
        discrimination: Option<f64>,
        level: DiscriminationLevel,
    ) -> Self {
        let prefix = match kind {
            QuestionKind::MultipleChoice => MC_ID_PREFIX,
            QuestionKind::Essay => ESSAY_ID_PREFIX,
        };
        Self {
            question: format!("{prefix}{question}"),
            kind,
            difficulty,
            difficulty_level,
            discrimination,
            discrimination_label: level.label(kind).to_string(),
        }
    }
}

impl From<&MultipleChoiceRecord> for MixedRecord {
    fn from(r: &MultipleChoiceRecord) -> Self {
        Self::new(
            QuestionKind::MultipleChoice,
            &r.question,
            r.difficulty,
            r.difficulty_level,
            r.discrimination,
            r.discrimination_level,
        )
    }
}

impl From<&EssayRecord> for MixedRecord {
    fn from(r: &EssayRecord) -> Self {
        Self::new(
            QuestionKind::Essay,
            &r.question,
            r.difficulty,
            r.difficulty_level,
            r.discrimination,
            r.discrimination_level,
        )
    }
}

/// Diagnostic totals of a mixed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixOverview {
    /// All questions.
    pub total_questions:           usize,
    /// Multiple-choice questions.
    pub mc_questions:              usize,
    /// Essay questions.
    pub essay_questions:           usize,
    /// Mean P of the multiple-choice questions.
    pub mc_mean_difficulty:        Option<f64>,
    /// Mean P of the essay questions.
    pub essay_mean_difficulty:     Option<f64>,
    /// Mean D of the multiple-choice questions with a defined D.
    pub mc_mean_discrimination:    Option<f64>,
    /// Mean D of the essay questions with a defined D.
    pub essay_mean_discrimination: Option<f64>,
}

impl MixOverview {
    /// Labeled metrics, for key/value rendering; undefined means are left
    /// out.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("Total questions", self.total_questions.to_string()),
            ("MC questions", self.mc_questions.to_string()),
            ("Essay questions", self.essay_questions.to_string()),
        ];
        let means = [
            ("Mean P (MC)", self.mc_mean_difficulty),
            ("Mean P (Essay)", self.essay_mean_difficulty),
            ("Mean D (MC)", self.mc_mean_discrimination),
            ("Mean D (Essay)", self.essay_mean_discrimination),
        ];
        entries.extend(
            means
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, format!("{v:.3}")))),
        );
        entries
    }
}

/// Both analyses of an exam plus their combined table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedAnalysis {
    /// Combined rows, multiple-choice first.
    pub records:         Vec<MixedRecord>,
    /// Diagnostic totals.
    pub overview:        MixOverview,
    /// Full multiple-choice records.
    pub multiple_choice: Vec<MultipleChoiceRecord>,
    /// Full essay records.
    pub essay:           Vec<EssayRecord>,
}

/// Merges already computed analyses.
pub fn combine(mc: Vec<MultipleChoiceRecord>, essay: Vec<EssayRecord>) -> MixedAnalysis {
    let records = mc
        .iter()
        .map(MixedRecord::from)
        .chain(essay.iter().map(MixedRecord::from))
        .collect::<Vec<_>>();

    let overview = MixOverview {
        total_questions:           records.len(),
        mc_questions:              mc.len(),
        essay_questions:           essay.len(),
        mc_mean_difficulty:        mean(mc.iter().map(|r| r.difficulty)),
        essay_mean_difficulty:     mean(essay.iter().map(|r| r.difficulty)),
        mc_mean_discrimination:    mean(mc.iter().filter_map(|r| r.discrimination)),
        essay_mean_discrimination: mean(essay.iter().filter_map(|r| r.discrimination)),
    };

    info!(
        total = overview.total_questions,
        mc = overview.mc_questions,
        essay = overview.essay_questions,
        mc_mean_p = ?overview.mc_mean_difficulty,
        essay_mean_p = ?overview.essay_mean_difficulty,
        mc_mean_d = ?overview.mc_mean_discrimination,
        essay_mean_d = ?overview.essay_mean_discrimination,
        "Combined exam overview"
    );

    MixedAnalysis {
        records,
        overview,
        multiple_choice: mc,
        essay,
    }
}

/// Analyzes the multiple-choice and essay tables of one exam and merges the
/// results.
pub fn analyze_mixed(
    mc: &ScoreTable,
    essay: &ScoreTable,
    reference: &MaxScoreReference,
) -> MixedAnalysis {
    combine(analyze_multiple_choice(mc), analyze_essay(essay, reference))
}

/// Validates both sheets against their schemas, then runs
/// [`analyze_mixed`].
pub fn analyze_mixed_sheets(
    mc: (&ScoreSheet, &QuestionSchema),
    essay: (&ScoreSheet, &QuestionSchema),
    reference: &MaxScoreReference,
) -> Result<MixedAnalysis, SheetError> {
    let mc = ScoreTable::from_sheet(mc.0, mc.1)?;
    let essay = ScoreTable::from_sheet(essay.0, essay.1)?;
    Ok(analyze_mixed(&mc, &essay, reference))
}
