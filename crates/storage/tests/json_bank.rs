use std::path::PathBuf;

use storage::repository::{QuestionRepository, Storage, StorageError};
use storage::sample::sample_questions;
use storage::{parse_question_bank, render_question_bank};
use wic_core::model::{ChoiceLabel, QuestionError, QuestionId};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wic-json-bank-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn exported_samples_load_from_disk() {
    let path = temp_path("samples.json");
    let rendered = render_question_bank(&sample_questions().unwrap()).unwrap();
    tokio::fs::write(&path, rendered).await.unwrap();

    let storage = Storage::json_file(&path);
    let questions = storage.questions.list_questions().await.unwrap();
    assert_eq!(questions, sample_questions().unwrap());

    let second = &questions[1];
    assert_eq!(second.id(), QuestionId::new(2));
    assert_eq!(second.correct_label(), ChoiceLabel::B);
    assert_eq!(second.strategy_tag(), "Contrast/Despite Signal");

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn invalid_record_reports_its_position() {
    let path = temp_path("invalid.json");
    let raw = r#"[
      {
        "passage": "P",
        "blank_sentence": "S _____.",
        "choice_A": "A. one",
        "choice_B": "B. two",
        "choice_C": "C. three",
        "choice_D": "D. four",
        "correct_answer": "B. two",
        "strategy_tag": "T",
        "explanation": "E"
      },
      {
        "passage": "P",
        "blank_sentence": "S _____.",
        "choice_A": "A. one",
        "choice_B": "B. one",
        "choice_C": "C. three",
        "choice_D": "D. four",
        "correct_answer": "Z. none",
        "strategy_tag": "T",
        "explanation": "E"
      }
    ]"#;
    tokio::fs::write(&path, raw).await.unwrap();

    let err = Storage::json_file(&path)
        .questions
        .list_questions()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::InvalidRecord {
            position: 1,
            source: QuestionError::UnknownCorrectAnswer { .. }
        }
    ));

    tokio::fs::remove_file(&path).await.unwrap();
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = parse_question_bank("{ not json").unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}
