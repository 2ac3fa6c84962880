#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Raw score sheets, the question schema, and the validated score table the
//! analyzers work on.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    constants::{DEFAULT_ID_COLUMN, DEFAULT_QUESTION_PREFIX},
    error::SheetError,
};

/// A raw table as handed over by whatever read the spreadsheet: a header row
/// and rows of loosely typed cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// Column headers, in sheet order.
    pub columns: Vec<String>,
    /// Data rows; each row has one cell per column.
    pub rows:    Vec<Vec<Value>>,
}

impl ScoreSheet {
    /// Creates a sheet from headers and rows.
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    /// Position of the column named `name`, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Declares which sheet columns hold the student identifier and the question
/// scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSchema {
    /// Name of the identifier column.
    id_column: String,
    /// Question columns, in analysis order.
    questions: Vec<String>,
}

impl QuestionSchema {
    /// Creates a schema from an explicit list of question columns.
    pub fn new<I, S>(id_column: impl Into<String>, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id_column: id_column.into(),
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a schema from every header of `sheet` starting with `prefix`.
    pub fn from_prefix(sheet: &ScoreSheet, id_column: impl Into<String>, prefix: &str) -> Self {
        let questions = sheet
            .columns
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect::<Vec<_>>();
        debug!(prefix, count = questions.len(), "Discovered question columns by prefix");
        Self::new(id_column, questions)
    }

    /// Schema following the legacy sheet layout: `STT` identifiers and
    /// questions headed `Câu ...`.
    pub fn legacy(sheet: &ScoreSheet) -> Self {
        Self::from_prefix(sheet, DEFAULT_ID_COLUMN, DEFAULT_QUESTION_PREFIX)
    }

    /// Name of the identifier column.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Question columns, in analysis order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Checks the schema against `sheet` and returns the column position of
    /// every question.
    fn resolve(&self, sheet: &ScoreSheet) -> Result<Vec<usize>, SheetError> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(|q| {
                if !seen.insert(q.as_str()) {
                    return Err(SheetError::DuplicateColumn(q.clone()));
                }
                sheet
                    .column_index(q)
                    .ok_or_else(|| SheetError::MissingColumn(q.clone()))
            })
            .collect()
    }
}

/// One student's row after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentScores {
    /// Positive integer identifier.
    pub id:     u64,
    /// One entry per question; `None` for a blank cell.
    pub scores: Vec<Option<f64>>,
}

impl StudentScores {
    /// Sum of the present scores; `0.0` when every cell is blank.
    pub fn total(&self) -> f64 {
        self.scores.iter().flatten().fold(0.0, |acc, s| acc + s)
    }
}

/// A validated table of numeric scores, ready for analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Question names, in analysis order.
    questions:    Vec<String>,
    /// Kept students, in sheet order.
    students:     Vec<StudentScores>,
    /// Rows dropped because their identifier was not a positive integer.
    dropped_rows: usize,
}

impl ScoreTable {
    /// Creates a table from already validated students.
    ///
    /// Every student must carry one score per question.
    pub fn new<I, S>(questions: I, students: Vec<StudentScores>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            questions: questions.into_iter().map(Into::into).collect(),
            students,
            dropped_rows: 0,
        }
    }

    /// Validates `sheet` against `schema`.
    ///
    /// Rows whose identifier is not a positive integer are dropped and
    /// counted. When the sheet has no identifier column, rows are numbered
    /// from 1 and all of them are kept.
    pub fn from_sheet(sheet: &ScoreSheet, schema: &QuestionSchema) -> Result<Self, SheetError> {
        let positions = schema.resolve(sheet)?;
        let id_position = sheet.column_index(schema.id_column());
        if id_position.is_none() {
            debug!(
                id_column = schema.id_column(),
                "Identifier column absent; numbering rows sequentially"
            );
        }

        let mut students = Vec::with_capacity(sheet.rows.len());
        let mut dropped_rows = 0;

        for (row_index, row) in sheet.rows.iter().enumerate() {
            if row.len() != sheet.columns.len() {
                return Err(SheetError::RaggedRow {
                    row:      row_index,
                    expected: sheet.columns.len(),
                    found:    row.len(),
                });
            }

            let id = match id_position {
                Some(pos) => match parse_identifier(&row[pos]) {
                    Some(id) => id,
                    None => {
                        debug!(row = row_index, value = %row[pos], "Dropping row with invalid identifier");
                        dropped_rows += 1;
                        continue;
                    }
                },
                None => row_index as u64 + 1,
            };

            let scores = positions
                .iter()
                .map(|&pos| {
                    parse_score(&row[pos]).ok_or_else(|| SheetError::InvalidScore {
                        student: id.to_string(),
                        column:  sheet.columns[pos].clone(),
                        value:   cell_text(&row[pos]),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            students.push(StudentScores { id, scores });
        }

        if dropped_rows > 0 {
            warn!(
                dropped_rows,
                kept_rows = students.len(),
                "Dropped rows whose identifier is not a positive integer"
            );
        }

        Ok(Self {
            questions: schema.questions().to_vec(),
            students,
            dropped_rows,
        })
    }

    /// Question names, in analysis order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Kept students, in sheet order.
    pub fn students(&self) -> &[StudentScores] {
        &self.students
    }

    /// Number of kept students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether no student survived validation.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Number of rows dropped during validation.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Total score of each student, in table order.
    pub fn totals(&self) -> Vec<f64> {
        self.students.iter().map(StudentScores::total).collect()
    }

    /// Scores of every student for the question at `index`.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.students
            .iter()
            .map(|s| s.scores.get(index).copied().flatten())
            .collect()
    }
}

/// Maximum attainable score per essay question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxScoreReference(BTreeMap<String, f64>);

impl MaxScoreReference {
    /// An empty reference; every question falls back to its observed maximum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the first data row of `sheet`, whose headers are question names.
    ///
    /// Blank or non-numeric cells are skipped.
    pub fn from_sheet(sheet: &ScoreSheet) -> Self {
        let Some(first) = sheet.rows.first() else {
            warn!("Max-score sheet has no data row; observed maxima will be used");
            return Self::default();
        };

        if first.len() < sheet.columns.len() {
            warn!(
                missing = ?&sheet.columns[first.len()..],
                "Max-score row is shorter than the header; trailing maxima ignored"
            );
        }

        let mut reference = Self::default();
        for (column, cell) in sheet.columns.iter().zip(first) {
            match parse_score(cell).flatten() {
                Some(max) => {
                    reference.0.insert(column.clone(), max);
                }
                None => warn!(column, value = %cell, "Ignoring unusable maximum score"),
            }
        }
        reference
    }

    /// Sets the maximum score of `question`.
    pub fn insert(&mut self, question: impl Into<String>, max: f64) {
        self.0.insert(question.into(), max);
    }

    /// The maximum score of `question`, if known.
    pub fn get(&self, question: &str) -> Option<f64> {
        self.0.get(question).copied()
    }

    /// Whether no maximum is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for MaxScoreReference {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(q, m)| (q.into(), m)).collect())
    }
}

/// Reads a positive integer identifier; `None` when the cell is anything
/// else.
fn parse_identifier(cell: &Value) -> Option<u64> {
    let id = match cell {
        Value::Number(n) => match n.as_u64() {
            Some(id) => id,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 1.0 || f > u64::MAX as f64 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<u64>().ok()?
        }
        _ => return None,
    };
    (id > 0).then_some(id)
}

/// Reads a score cell.
///
/// The outer `Option` is `None` when the cell is not a number; the inner one
/// is `None` for a blank cell.
fn parse_score(cell: &Value) -> Option<Option<f64>> {
    match cell {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some),
        _ => None,
    }
}

/// Plain text of a cell, without JSON quoting for strings.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
