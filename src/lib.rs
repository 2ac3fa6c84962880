//! # item-analysis
//!
//! Classical item analysis for exams: the difficulty index (P) and the
//! discrimination index (D) of every question, for multiple-choice and essay
//! questions, and a verdict on whether the exam's difficulty mix meets a
//! target.
//!
//! ```no_run
//! use item_analysis::{
//!     analysis::analyze_multiple_choice, config::MixCriteria, evaluate::evaluate_exam,
//!     sheet::{QuestionSchema, ScoreSheet, ScoreTable},
//! };
//!
//! # fn main() -> Result<(), item_analysis::error::AnalysisError> {
//! let sheet: ScoreSheet = ScoreSheet::default();
//! let table = ScoreTable::from_sheet(&sheet, &QuestionSchema::legacy(&sheet))?;
//! let records = analyze_multiple_choice(&table);
//! let verdict = evaluate_exam(&records, &MixCriteria::default())?;
//! println!("{}", verdict.conclusion);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Per-question analyzers for multiple-choice and essay questions
pub mod analysis;
/// Difficulty and discrimination bands
pub mod classify;
/// Evaluation criteria and their environment overrides
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Error types
pub mod error;
/// Exam-level evaluation against a target difficulty mix
pub mod evaluate;
/// High/low/middle group splitting
pub mod grouping;
/// Merging multiple-choice and essay analyses
pub mod mix;
/// Rendering of results
pub mod report;
/// Score sheets, question schemas, and validated score tables
pub mod sheet;
/// Small shared types and helpers
pub mod types;
