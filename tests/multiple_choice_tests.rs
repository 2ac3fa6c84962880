use item_analysis::{
    analysis::{Analyzer, MultipleChoice, analyze_multiple_choice},
    classify::{DifficultyLevel, DiscriminationLevel},
    sheet::{QuestionSchema, ScoreSheet, ScoreTable, StudentScores},
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

#[test]
fn eight_of_ten_correct_is_easy() {
    let mut rows = vec![vec![1.0]; 8];
    rows.extend(vec![vec![0.0]; 2]);
    let records = analyze_multiple_choice(&table(&["Q1"], rows));

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.total_students, 10);
    assert_eq!(r.num_correct, 8);
    assert_eq!(r.difficulty, 80.0);
    assert_eq!(r.difficulty_level, DifficultyLevel::Easy);
}

#[test]
fn perfect_separation_gives_d_of_one() {
    let mut rows = vec![vec![1.0]; 10];
    rows.extend(vec![vec![0.0]; 10]);
    let records = analyze_multiple_choice(&table(&["Q1"], rows));

    let r = &records[0];
    assert_eq!(r.high_correct, 5);
    assert_eq!(r.low_correct, 0);
    assert_eq!(r.discrimination, Some(1.0));
    assert_eq!(r.discrimination_level, DiscriminationLevel::Excellent);
    assert_eq!(r.discrimination_label(), "Excellent");
    assert_eq!(r.difficulty, 50.0);
    assert_eq!(r.difficulty_level, DifficultyLevel::Hard);
}

#[test]
fn low_group_outperforming_high_group_is_negative() {
    let rows = vec![
        vec![0.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
    ];
    let records = analyze_multiple_choice(&table(&["Q1", "Q2", "Q3"], rows));

    let q1 = &records[0];
    assert_eq!(q1.high_correct, 0);
    assert_eq!(q1.low_correct, 1);
    assert_eq!(q1.discrimination, Some(-1.0));
    assert_eq!(q1.discrimination_label(), "Fail/Negative");
}

#[test]
fn three_students_leave_discrimination_undefined() {
    let rows = vec![vec![1.0], vec![1.0], vec![0.0]];
    let records = analyze_multiple_choice(&table(&["Q1"], rows));

    let r = &records[0];
    assert_eq!(r.discrimination, None);
    assert_eq!(r.discrimination_level, DiscriminationLevel::Undefined);
    assert_eq!(r.difficulty, 66.67);
    assert_eq!(r.difficulty_level, DifficultyLevel::Medium);
}

#[test]
fn records_follow_schema_order() {
    let rows = vec![vec![1.0, 0.0, 2.0]; 5];
    let records = analyze_multiple_choice(&table(&["Q3", "Q1", "Q2"], rows));

    let names = records.iter().map(|r| r.question.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Q3", "Q1", "Q2"]);
    assert_eq!(records.iter().map(|r| r.position).collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(records[1].difficulty, 0.0);
    assert_eq!(records[2].difficulty, 100.0);
}

#[test]
fn analysis_is_idempotent() {
    let rows = (0..23)
        .map(|i| vec![(i % 2) as f64, (i % 3 == 0) as u8 as f64, (i % 5) as f64])
        .collect::<Vec<_>>();
    let t = table(&["Q1", "Q2", "Q3"], rows);
    let analyzer = Analyzer::new(MultipleChoice);

    assert_eq!(analyzer.analyze(&t), analyzer.analyze(&t));
}

#[test]
fn no_question_columns_yield_empty_result() {
    let rows = vec![vec![]; 5];
    let records = analyze_multiple_choice(&table(&[], rows));
    assert!(records.is_empty());
}

#[test]
fn no_students_use_sentinels() {
    let records = analyze_multiple_choice(&table(&["Q1"], vec![]));

    let r = &records[0];
    assert_eq!(r.total_students, 0);
    assert_eq!(r.difficulty, 0.0);
    assert_eq!(r.discrimination, None);
}

#[test]
fn blank_cells_count_as_incorrect() {
    let students = (0..4)
        .map(|i| StudentScores {
            id:     i + 1,
            scores: vec![if i == 0 { None } else { Some(1.0) }],
        })
        .collect();
    let t = ScoreTable::new(["Q1"], students);
    let records = analyze_multiple_choice(&t);

    assert_eq!(records[0].total_students, 4);
    assert_eq!(records[0].num_correct, 3);
    assert_eq!(records[0].difficulty, 75.0);
}

#[test]
fn legacy_sheet_drops_summary_rows() {
    let sheet: ScoreSheet = serde_json::from_value(json!({
        "columns": ["STT", "Họ tên", "Câu 1", "Câu 2"],
        "rows": [
            [1, "An", 1, 0],
            [2, "Bình", 1, 1],
            [3, "Chi", 0, 0],
            [4, "Dũng", 1, 0],
            ["Điểm TB", null, 0.75, 0.25]
        ]
    }))
    .expect("parse sheet");

    let schema = QuestionSchema::legacy(&sheet);
    assert_eq!(schema.questions(), ["Câu 1", "Câu 2"]);

    let records = Analyzer::new(MultipleChoice)
        .analyze_sheet(&sheet, &schema)
        .expect("analyze");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].total_students, 4);
    assert_eq!(records[0].difficulty, 75.0);
    assert_eq!(records[1].difficulty, 25.0);
    // student 2 tops the class and student 3 is last
    assert_eq!(records[0].discrimination, Some(1.0));
    assert_eq!(records[1].discrimination, Some(1.0));
}
