#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Terminal and JSON rendering of analysis results.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{evaluate::ExamEvaluation, mix::MixOverview};

/// Renders `records` as a titled table.
pub fn records_table<T: Tabled>(title: &str, records: &[T]) -> String {
    Table::new(records)
        .with(Panel::header(title))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

/// Renders labeled values as a two-column table.
pub fn entries_table(title: &str, entries: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record([String::from("Metric"), String::from("Value")]);
    for (name, value) in entries {
        builder.push_record([name.to_string(), value.clone()]);
    }

    builder
        .build()
        .with(Panel::header(title))
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Style::modern())
        .to_string()
}

/// Renders the bucket summary, discrimination stats and the verdict.
pub fn evaluation_text(evaluation: &ExamEvaluation) -> String {
    let mut out = vec![records_table("Difficulty mix vs. target", &evaluation.summary)];

    if let Some(stats) = &evaluation.discrimination {
        out.push(entries_table("Discrimination", &stats.entries()));
    }

    let conclusion = if evaluation.passed {
        evaluation.conclusion.green().bold()
    } else {
        evaluation.conclusion.red().bold()
    };
    out.push(format!("Conclusion: {conclusion}"));
    out.join("\n")
}

/// Renders the overview of a mixed analysis.
pub fn overview_text(overview: &MixOverview) -> String {
    entries_table("Exam overview", &overview.entries())
}

/// Everything an analysis produced, in one serializable document.
#[derive(Serialize)]
pub struct JsonReport<'a, R: Serialize> {
    /// Per-question records.
    pub records:    &'a [R],
    /// Mixed-analysis totals, when the exam mixes question types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview:   Option<&'a MixOverview>,
    /// Exam verdict; absent when there was nothing to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<&'a ExamEvaluation>,
}

impl<R: Serialize> JsonReport<'_, R> {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Could not serialize the analysis report")
    }
}
