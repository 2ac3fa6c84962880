use item_analysis::{
    mix::{analyze_mixed, analyze_mixed_sheets},
    sheet::{MaxScoreReference, QuestionSchema, ScoreSheet, ScoreTable, StudentScores},
    types::QuestionKind,
};
use serde_json::json;

fn table(questions: &[&str], rows: Vec<Vec<f64>>) -> ScoreTable {
    let students = rows
        .into_iter()
        .enumerate()
        .map(|(i, scores)| StudentScores {
            id:     i as u64 + 1,
            scores: scores.into_iter().map(Some).collect(),
        })
        .collect();
    ScoreTable::new(questions.iter().copied(), students)
}

fn exam() -> (ScoreTable, ScoreTable, MaxScoreReference) {
    let mc = table(
        &["Q1", "Q2"],
        vec![
            vec![1.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ],
    );
    let essay = table(&["Q1"], vec![vec![8.0], vec![6.0], vec![4.0], vec![2.0]]);
    let reference = [("Q1", 10.0)].into_iter().collect();
    (mc, essay, reference)
}

#[test]
fn rows_are_tagged_prefixed_and_ordered() {
    let (mc, essay, reference) = exam();
    let analysis = analyze_mixed(&mc, &essay, &reference);

    let ids = analysis
        .records
        .iter()
        .map(|r| r.question.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["MC_Q1", "MC_Q2", "Essay_Q1"]);

    let kinds = analysis.records.iter().map(|r| r.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [QuestionKind::MultipleChoice, QuestionKind::MultipleChoice, QuestionKind::Essay]
    );
}

#[test]
fn common_columns_carry_type_specific_values() {
    let (mc, essay, reference) = exam();
    let analysis = analyze_mixed(&mc, &essay, &reference);

    let mc_q1 = &analysis.records[0];
    assert_eq!(mc_q1.difficulty, analysis.multiple_choice[0].difficulty);
    assert_eq!(mc_q1.discrimination, analysis.multiple_choice[0].discrimination);
    assert_eq!(
        mc_q1.discrimination_label,
        analysis.multiple_choice[0].discrimination_label()
    );

    let essay_q1 = &analysis.records[2];
    assert_eq!(essay_q1.difficulty, 50.0);
    assert_eq!(essay_q1.discrimination, Some(0.6));
    assert_eq!(essay_q1.discrimination_label, "Excellent");
}

#[test]
fn overview_counts_and_means() {
    let (mc, essay, reference) = exam();
    let analysis = analyze_mixed(&mc, &essay, &reference);
    let overview = &analysis.overview;

    assert_eq!(overview.total_questions, 3);
    assert_eq!(overview.mc_questions, 2);
    assert_eq!(overview.essay_questions, 1);
    assert_eq!(overview.mc_mean_difficulty, Some(62.5));
    assert_eq!(overview.essay_mean_difficulty, Some(50.0));
    assert_eq!(overview.essay_mean_discrimination, Some(0.6));

    let labels = overview
        .entries()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert!(labels.contains(&"Mean D (Essay)"));
}

#[test]
fn empty_side_has_undefined_means() {
    let (mc, _, reference) = exam();
    let essay = table(&[], vec![vec![]; 4]);
    let analysis = analyze_mixed(&mc, &essay, &reference);

    assert_eq!(analysis.records.len(), 2);
    assert_eq!(analysis.overview.essay_questions, 0);
    assert_eq!(analysis.overview.essay_mean_difficulty, None);
    assert_eq!(analysis.overview.essay_mean_discrimination, None);
}

#[test]
fn sheets_are_validated_before_merging() {
    let mc: ScoreSheet = serde_json::from_value(json!({
        "columns": ["STT", "Câu 1"],
        "rows": [[1, 1], [2, 0]]
    }))
    .expect("parse mc");
    let essay: ScoreSheet = serde_json::from_value(json!({
        "columns": ["STT", "Câu 1"],
        "rows": [[1, 5], [2, 3]]
    }))
    .expect("parse essay");

    let ok = analyze_mixed_sheets(
        (&mc, &QuestionSchema::legacy(&mc)),
        (&essay, &QuestionSchema::legacy(&essay)),
        &MaxScoreReference::new(),
    )
    .expect("analyze");
    assert_eq!(ok.records.len(), 2);

    let missing = QuestionSchema::new("STT", ["Câu 2"]);
    let err = analyze_mixed_sheets(
        (&mc, &QuestionSchema::legacy(&mc)),
        (&essay, &missing),
        &MaxScoreReference::new(),
    )
    .expect_err("missing column");
    assert!(err.to_string().contains("Câu 2"));
}
