#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Error types surfaced by the analysis core.

/// Problems found while turning a raw score sheet into an analyzable table.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    /// A question column named by the schema is not in the sheet.
    #[error("Question column `{0}` is not present in the score sheet.")]
    MissingColumn(String),
    /// The same question column was listed twice.
    #[error("Question column `{0}` is listed more than once.")]
    DuplicateColumn(String),
    /// A row is shorter or longer than the header.
    #[error("Row {row} has {found} cells but the sheet has {expected} columns.")]
    RaggedRow {
        /// Zero-based row position in the raw sheet.
        row:      usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells in the row.
        found:    usize,
    },
    /// A score cell could not be read as a number.
    #[error("Score `{value}` for student `{student}` in column `{column}` is not a number.")]
    InvalidScore {
        /// Identifier of the student the row belongs to.
        student: String,
        /// Question column holding the cell.
        column:  String,
        /// Raw cell content.
        value:   String,
    },
}

/// Problems found while evaluating an exam against its target mix.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// There are no questions to evaluate, so no proportions exist.
    #[error("Cannot evaluate the difficulty mix of an exam with no questions.")]
    NoQuestions,
}

/// Invalid evaluation criteria.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A share or tolerance lies outside `[0, 1]`.
    #[error("`{name}` must be between 0 and 1, got {value}.")]
    OutOfRange {
        /// Name of the offending setting.
        name:  &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An environment override could not be parsed.
    #[error("Environment variable `{name}` has non-numeric value `{value}`.")]
    InvalidEnv {
        /// Name of the environment variable.
        name:  &'static str,
        /// Its raw value.
        value: String,
    },
}

/// Any failure the analysis core can report.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The score sheet could not be read.
    #[error(transparent)]
    Sheet(#[from] SheetError),
    /// The exam could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// The criteria are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
