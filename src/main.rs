#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # item-analysis
//!
//! Command line front end: reads score sheets exported as JSON
//! (`{"columns": [...], "rows": [[...], ...]}`), computes per-question
//! difficulty and discrimination, and judges the exam's difficulty mix.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use item_analysis::{
    analysis::{Analyzer, Essay, MultipleChoice},
    config::MixCriteria,
    constants::{DEFAULT_ID_COLUMN, DEFAULT_QUESTION_PREFIX},
    evaluate::{ItemStatistic, evaluate_exam},
    mix::{MixOverview, analyze_mixed_sheets},
    report::{JsonReport, evaluation_text, overview_text, records_table},
    sheet::{MaxScoreReference, QuestionSchema, ScoreSheet},
};
use serde::Serialize;
use tabled::Tabled;
use tracing::{Level, info, metadata::LevelFilter, warn};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// How question columns are picked from a sheet.
#[derive(Debug, Clone)]
struct SchemaOpts {
    /// Identifier column name.
    id_column: String,
    /// Header prefix used when no question is listed explicitly.
    prefix:    String,
    /// Explicit question columns.
    questions: Vec<String>,
}

impl SchemaOpts {
    /// Builds the schema for `sheet`.
    fn schema_for(&self, sheet: &ScoreSheet, questions: &[String]) -> QuestionSchema {
        if questions.is_empty() {
            QuestionSchema::from_prefix(sheet, &self.id_column, &self.prefix)
        } else {
            QuestionSchema::new(&self.id_column, questions)
        }
    }
}

/// Overrides for the evaluation criteria.
#[derive(Debug, Clone)]
struct EvalOpts {
    /// Tolerance around each target share.
    tolerance:            Option<f64>,
    /// Whether to judge discrimination quality too.
    check_discrimination: bool,
}

impl EvalOpts {
    /// Environment criteria with the command line overrides applied.
    fn criteria(&self) -> Result<MixCriteria> {
        let mut criteria = MixCriteria::from_env().context("Invalid ITEM_ANALYSIS_* setting")?;
        if let Some(tolerance) = self.tolerance {
            criteria = criteria.with_tolerance(tolerance);
        }
        if self.check_discrimination {
            criteria = criteria.with_check_discrimination(true);
        }
        Ok(criteria)
    }
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Analyze a multiple-choice sheet
    Mc {
        /// Score sheet path.
        scores: PathBuf,
        /// Question selection.
        schema: SchemaOpts,
        /// Criteria overrides.
        eval:   EvalOpts,
        /// Print JSON instead of tables.
        json:   bool,
    },
    /// Analyze an essay sheet
    Essay {
        /// Score sheet path.
        scores:     PathBuf,
        /// Optional sheet of maximum scores.
        max_scores: Option<PathBuf>,
        /// Question selection.
        schema:     SchemaOpts,
        /// Criteria overrides.
        eval:       EvalOpts,
        /// Print JSON instead of tables.
        json:       bool,
    },
    /// Analyze an exam with both question types
    Mix {
        /// Multiple-choice score sheet path.
        mc:              PathBuf,
        /// Essay score sheet path.
        essay:           PathBuf,
        /// Optional sheet of essay maximum scores.
        max_scores:      Option<PathBuf>,
        /// Question selection; `questions` applies to the MC sheet.
        schema:          SchemaOpts,
        /// Explicit essay question columns.
        essay_questions: Vec<String>,
        /// Criteria overrides.
        eval:            EvalOpts,
        /// Print JSON instead of tables.
        json:            bool,
    },
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Options {
    /// Log at debug level.
    verbose: bool,
    /// Command to run.
    cmd:     Cmd,
}

/// Parse the command line arguments
fn options() -> Options {
    /// parses the identifier column and question selection
    fn schema() -> impl Parser<SchemaOpts> {
        let id_column = long("id-column")
            .help("Column holding student identifiers")
            .argument::<String>("NAME")
            .fallback(DEFAULT_ID_COLUMN.to_string());
        let prefix = long("prefix")
            .help("Header prefix of question columns, used when no --question is given")
            .argument::<String>("TEXT")
            .fallback(DEFAULT_QUESTION_PREFIX.to_string());
        let questions = long("question")
            .short('q')
            .help("Question column to analyze, in order; repeatable")
            .argument::<String>("NAME")
            .many();
        construct!(SchemaOpts {
            id_column,
            prefix,
            questions
        })
    }

    /// parses evaluation overrides
    fn eval() -> impl Parser<EvalOpts> {
        let tolerance = long("tolerance")
            .help("Allowed deviation from each target share")
            .argument::<f64>("F")
            .optional();
        let check_discrimination = long("check-discrimination")
            .help("Also require enough well-discriminating questions")
            .switch();
        construct!(EvalOpts {
            tolerance,
            check_discrimination
        })
    }

    /// parses the JSON output switch
    fn json() -> impl Parser<bool> {
        long("json").help("Print one JSON document").switch()
    }

    /// parses a sheet of maximum essay scores
    fn max_scores() -> impl Parser<Option<PathBuf>> {
        long("max-scores")
            .help("JSON sheet whose first row holds each essay question's maximum score")
            .argument::<PathBuf>("FILE")
            .optional()
    }

    let mc = {
        let scores = long("scores")
            .short('s')
            .help("JSON score sheet")
            .argument::<PathBuf>("FILE");
        let schema = schema();
        let eval = eval();
        let json = json();
        construct!(Cmd::Mc {
            scores,
            schema,
            eval,
            json
        })
        .to_options()
        .command("mc")
        .help("Analyze multiple-choice questions")
    };

    let essay = {
        let scores = long("scores")
            .short('s')
            .help("JSON score sheet")
            .argument::<PathBuf>("FILE");
        let max_scores = max_scores();
        let schema = schema();
        let eval = eval();
        let json = json();
        construct!(Cmd::Essay {
            scores,
            max_scores,
            schema,
            eval,
            json
        })
        .to_options()
        .command("essay")
        .help("Analyze essay questions")
    };

    let mix = {
        let mc = long("mc")
            .help("JSON score sheet of the multiple-choice part")
            .argument::<PathBuf>("FILE");
        let essay = long("essay")
            .help("JSON score sheet of the essay part")
            .argument::<PathBuf>("FILE");
        let max_scores = max_scores();
        let schema = schema();
        let essay_questions = long("essay-question")
            .help("Essay question column to analyze, in order; repeatable")
            .argument::<String>("NAME")
            .many();
        let eval = eval();
        let json = json();
        construct!(Cmd::Mix {
            mc,
            essay,
            max_scores,
            schema,
            essay_questions,
            eval,
            json
        })
        .to_options()
        .command("mix")
        .help("Analyze an exam with multiple-choice and essay parts")
    };

    let verbose = short('v')
        .long("verbose")
        .help("Log debug details")
        .switch();
    let cmd = construct!([mc, essay, mix]);

    construct!(Options { verbose, cmd })
        .to_options()
        .descr("Difficulty and discrimination analysis of exam questions")
        .run()
}

/// Reads a JSON score sheet.
fn load_sheet(path: &Path) -> Result<ScoreSheet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid score sheet", path.display()))
}

/// Reads the optional max-score sheet.
fn load_reference(path: Option<&Path>) -> Result<MaxScoreReference> {
    match path {
        Some(path) => Ok(MaxScoreReference::from_sheet(&load_sheet(path)?)),
        None => {
            info!("No max-score sheet given; observed maxima will be used");
            Ok(MaxScoreReference::new())
        }
    }
}

/// Evaluates and prints an analysis.
fn emit<R>(
    title: &str,
    records: &[R],
    overview: Option<&MixOverview>,
    eval: &EvalOpts,
    json: bool,
) -> Result<()>
where
    R: Tabled + Serialize + ItemStatistic,
{
    let evaluation = if records.is_empty() {
        warn!("No question columns found; skipping exam evaluation");
        None
    } else {
        Some(evaluate_exam(records, &eval.criteria()?)?)
    };

    if json {
        let report = JsonReport {
            records,
            overview,
            evaluation: evaluation.as_ref(),
        };
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", records_table(title, records));
    if let Some(overview) = overview {
        println!("{}", overview_text(overview));
    }
    if let Some(evaluation) = &evaluation {
        println!("{}", evaluation_text(evaluation));
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();

    match opts.cmd {
        Cmd::Mc {
            scores,
            schema,
            eval,
            json,
        } => {
            let sheet = load_sheet(&scores)?;
            let records = Analyzer::new(MultipleChoice)
                .analyze_sheet(&sheet, &schema.schema_for(&sheet, &schema.questions))
                .with_context(|| format!("Could not analyze {}", scores.display()))?;
            emit("Multiple-choice questions", &records, None, &eval, json)?;
        }
        Cmd::Essay {
            scores,
            max_scores,
            schema,
            eval,
            json,
        } => {
            let sheet = load_sheet(&scores)?;
            let reference = load_reference(max_scores.as_deref())?;
            let records = Analyzer::new(Essay::new(reference))
                .analyze_sheet(&sheet, &schema.schema_for(&sheet, &schema.questions))
                .with_context(|| format!("Could not analyze {}", scores.display()))?;
            emit("Essay questions", &records, None, &eval, json)?;
        }
        Cmd::Mix {
            mc,
            essay,
            max_scores,
            schema,
            essay_questions,
            eval,
            json,
        } => {
            let mc_sheet = load_sheet(&mc)?;
            let essay_sheet = load_sheet(&essay)?;
            let reference = load_reference(max_scores.as_deref())?;
            let mc_schema = schema.schema_for(&mc_sheet, &schema.questions);
            let essay_schema = schema.schema_for(&essay_sheet, &essay_questions);
            let analysis = analyze_mixed_sheets(
                (&mc_sheet, &mc_schema),
                (&essay_sheet, &essay_schema),
                &reference,
            )
            .context("Could not analyze the mixed exam")?;
            emit(
                "Mixed exam questions",
                &analysis.records,
                Some(&analysis.overview),
                &eval,
                json,
            )?;
        }
    };

    Ok(())
}
