use item_analysis::{
    analysis::{Analyzer, Essay, analyze_essay},
    classify::{DifficultyLevel, DiscriminationLevel},
    sheet::{MaxScoreReference, QuestionSchema, ScoreSheet, ScoreTable, StudentScores},
};
use serde_json::json;

fn table(questions: &[&str], rows: Vec<Vec<Option<f64>>>) -> ScoreTable {
    let students = rows
        .into_iter()
        .enumerate()
        .map(|(i, scores)| StudentScores {
            id: i as u64 + 1,
            scores,
        })
        .collect();
    ScoreTable::new(questions.iter().copied(), students)
}

fn column(values: &[f64]) -> Vec<Vec<Option<f64>>> {
    values.iter().map(|v| vec![Some(*v)]).collect()
}

#[test]
fn mean_of_three_quarters_is_medium() {
    let reference = [("Q1", 10.0)].into_iter().collect::<MaxScoreReference>();
    let records = analyze_essay(&table(&["Q1"], column(&[5.0, 10.0, 7.5, 7.5])), &reference);

    let r = &records[0];
    assert_eq!(r.mean_score, Some(7.5));
    assert_eq!(r.max_possible, Some(10.0));
    assert_eq!(r.actual_max, Some(10.0));
    assert_eq!(r.min_score, Some(5.0));
    assert_eq!(r.std_dev, Some(2.04));
    assert_eq!(r.difficulty, 75.0);
    assert_eq!(r.difficulty_level, DifficultyLevel::Medium);
    assert_eq!(r.mean_high, Some(10.0));
    assert_eq!(r.mean_low, Some(5.0));
    assert_eq!(r.discrimination, Some(0.5));
    assert_eq!(r.discrimination_label(), "Excellent");
}

#[test]
fn reference_maximum_takes_precedence() {
    let reference = [("Q1", 20.0)].into_iter().collect::<MaxScoreReference>();
    let records = analyze_essay(&table(&["Q1"], column(&[5.0, 10.0, 7.5, 7.5])), &reference);

    let r = &records[0];
    assert_eq!(r.max_possible, Some(20.0));
    assert_eq!(r.actual_max, Some(10.0));
    assert_eq!(r.difficulty, 37.5);
    assert_eq!(r.difficulty_level, DifficultyLevel::VeryHard);
    assert_eq!(r.discrimination, Some(0.25));
    assert_eq!(r.discrimination_level, DiscriminationLevel::Acceptable);
    assert_eq!(r.discrimination_label(), "Medium");
}

#[test]
fn missing_reference_falls_back_to_observed_maximum() {
    let reference = [("Other", 20.0)].into_iter().collect::<MaxScoreReference>();
    let records = analyze_essay(&table(&["Q1"], column(&[2.0, 4.0, 6.0, 8.0])), &reference);

    let r = &records[0];
    assert_eq!(r.max_possible, Some(8.0));
    assert_eq!(r.difficulty, 62.5);
    assert_eq!(r.discrimination, Some(0.75));
}

#[test]
fn zero_maximum_short_circuits_to_zero() {
    let records = analyze_essay(
        &table(&["Q1"], column(&[0.0, 0.0, 0.0, 0.0, 0.0])),
        &MaxScoreReference::new(),
    );

    let r = &records[0];
    assert_eq!(r.max_possible, Some(0.0));
    assert_eq!(r.difficulty, 0.0);
    assert_eq!(r.discrimination, Some(0.0));
    assert_eq!(r.discrimination_label(), "Poor");
}

#[test]
fn three_students_leave_discrimination_undefined() {
    let records = analyze_essay(&table(&["Q1"], column(&[1.0, 2.0, 3.0])), &MaxScoreReference::new());

    let r = &records[0];
    assert_eq!(r.difficulty, 66.67);
    assert_eq!(r.mean_high, None);
    assert_eq!(r.mean_low, None);
    assert_eq!(r.discrimination, None);
    assert_eq!(r.discrimination_label(), "Undefined");
}

#[test]
fn negative_discrimination_uses_essay_wording() {
    let rows = vec![
        vec![Some(0.0), Some(10.0)],
        vec![Some(2.0), Some(5.0)],
        vec![Some(2.0), Some(4.0)],
        vec![Some(4.0), Some(0.0)],
    ];
    let reference = [("E1", 4.0), ("E2", 10.0)]
        .into_iter()
        .collect::<MaxScoreReference>();
    let records = analyze_essay(&table(&["E1", "E2"], rows), &reference);

    assert_eq!(records[0].discrimination, Some(-1.0));
    assert_eq!(records[0].discrimination_label(), "Fail");
}

#[test]
fn blank_scores_are_skipped() {
    let rows = vec![
        vec![Some(4.0)],
        vec![None],
        vec![Some(2.0)],
        vec![Some(0.0)],
    ];
    let records = analyze_essay(&table(&["Q1"], rows), &MaxScoreReference::new());

    let r = &records[0];
    assert_eq!(r.total_students, 4);
    assert_eq!(r.mean_score, Some(2.0));
    assert_eq!(r.std_dev, Some(2.0));
    assert_eq!(r.difficulty, 50.0);
}

#[test]
fn question_without_scores_has_no_statistics() {
    let rows = vec![vec![Some(1.0), None]; 4];
    let records = analyze_essay(&table(&["Q1", "Q2"], rows), &MaxScoreReference::new());

    let r = &records[1];
    assert_eq!(r.mean_score, None);
    assert_eq!(r.max_possible, None);
    assert_eq!(r.std_dev, None);
    assert_eq!(r.difficulty, 0.0);
    assert_eq!(r.discrimination, None);
}

#[test]
fn analysis_is_idempotent() {
    let rows = (0..17)
        .map(|i| vec![Some((i % 4) as f64 * 2.5), Some((i % 7) as f64)])
        .collect::<Vec<_>>();
    let t = table(&["E1", "E2"], rows);
    let analyzer = Analyzer::new(Essay::new([("E1", 10.0)].into_iter().collect()));

    assert_eq!(analyzer.analyze(&t), analyzer.analyze(&t));
}

#[test]
fn max_scores_are_read_from_second_sheet() {
    let scores: ScoreSheet = serde_json::from_value(json!({
        "columns": ["STT", "Câu 1", "Câu 2"],
        "rows": [[1, 8, 3], [2, 6, 2], [3, 4, 1], [4, 2, 0]]
    }))
    .expect("parse scores");
    let maxima: ScoreSheet = serde_json::from_value(json!({
        "columns": ["Câu 1", "Câu 2"],
        "rows": [[10, ""]]
    }))
    .expect("parse maxima");

    let reference = MaxScoreReference::from_sheet(&maxima);
    assert_eq!(reference.get("Câu 1"), Some(10.0));
    assert_eq!(reference.get("Câu 2"), None);

    let records = Analyzer::new(Essay::new(reference))
        .analyze_sheet(&scores, &QuestionSchema::legacy(&scores))
        .expect("analyze");

    assert_eq!(records[0].difficulty, 50.0);
    assert_eq!(records[0].discrimination, Some(0.6));
    assert_eq!(records[1].max_possible, Some(3.0));
    assert_eq!(records[1].difficulty, 50.0);
    assert_eq!(records[1].discrimination, Some(1.0));
}

#[test]
fn student_without_scores_ties_with_zero_scorer() {
    let rows = vec![
        vec![None, None],
        vec![Some(0.0), Some(0.0)],
        vec![Some(5.0), Some(5.0)],
        vec![Some(3.0), Some(3.0)],
    ];
    let t = table(&["Q1", "Q2"], rows);
    assert_eq!(t.totals(), [0.0, 0.0, 10.0, 6.0]);
    assert!(t.totals()[0].is_sign_positive());

    let records = analyze_essay(&t, &MaxScoreReference::new());
    let r = &records[0];
    assert_eq!(r.mean_high, Some(5.0));
    assert_eq!(r.mean_low, Some(0.0));
    assert_eq!(r.discrimination, Some(1.0));
    assert_eq!(r.discrimination_level, DiscriminationLevel::Excellent);
}
