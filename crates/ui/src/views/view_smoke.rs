use std::sync::Arc;

use storage::repository::{InMemoryRepository, QuestionRepository, StorageError};
use wic_core::model::{AdvancePolicy, ChoiceLabel, Confidence, Question, QuizIntent, SessionConfig};

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_repo};

async fn loaded(view: ViewKind) -> ViewHarness {
    let mut harness = setup_view_harness(view);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    harness
}

fn advance_through_coaching(harness: &mut ViewHarness) {
    harness.dispatch(QuizIntent::NextPhase);
    harness.dispatch(QuizIntent::NextPhase);
    harness.dispatch(QuizIntent::NextQuestion);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let harness = loaded(ViewKind::Quiz).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Passage"), "missing passage card in {html}");
    assert!(
        html.contains("Her research was so _____ that it changed the entire field."),
        "missing sentence in {html}"
    );
    assert!(html.contains("A. revolutionary"), "missing choice in {html}");
    assert!(html.contains("Confidence Level: 3"), "missing confidence in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(!html.contains("Session Summary"), "history shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_walks_coaching_phases() {
    let mut harness = loaded(ViewKind::Quiz).await;

    harness.dispatch(QuizIntent::Select(ChoiceLabel::A));
    harness.dispatch(QuizIntent::SetConfidence(Confidence::clamped(4)));
    assert!(harness.render().contains("Confidence Level: 4"));
    harness.dispatch(QuizIntent::Submit);

    let html = harness.render();
    assert!(html.contains("Correct!"), "missing banner in {html}");
    assert!(html.contains("Phase 1 · Strategy"), "missing strategy in {html}");
    assert!(
        html.contains("This is a Contextual Definition item."),
        "missing strategy tag in {html}"
    );
    assert!(!html.contains("Submit Answer"), "choices still open in {html}");

    harness.dispatch(QuizIntent::NextPhase);
    let html = harness.render();
    assert!(html.contains("Phase 2 · Guided Elimination"), "missing elimination in {html}");
    assert!(html.contains("Does not fit the context."), "missing annotation in {html}");
    assert!(!html.contains("(You chose this)"), "correct pick flagged in {html}");
    assert!(!html.contains("Phase 1 · Strategy"), "previous phase still shown in {html}");

    harness.dispatch(QuizIntent::NextPhase);
    let html = harness.render();
    assert!(html.contains("Phase 3 · Final Verification"), "missing verification in {html}");
    assert!(
        html.contains("Substitution: Her research was so revolutionary that it changed the entire field."),
        "missing substitution in {html}"
    );

    harness.dispatch(QuizIntent::NextQuestion);
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing progress in {html}");
    assert!(html.contains("Session Summary"), "missing history in {html}");
    assert!(
        html.contains("1. Q1 — You chose A; correct; confidence 4"),
        "missing history row in {html}"
    );
    assert!(html.contains("Confidence Level: 3"), "confidence not reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_flags_wrong_pick() {
    let mut harness = loaded(ViewKind::Quiz).await;
    harness.dispatch(QuizIntent::Select(ChoiceLabel::D));
    harness.dispatch(QuizIntent::Submit);
    assert!(harness.render().contains("Incorrect"));

    harness.dispatch(QuizIntent::NextPhase);
    let html = harness.render();
    assert!(html.contains("(You chose this)"), "wrong pick not flagged in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_ignores_submit_without_selection() {
    let mut harness = loaded(ViewKind::Quiz).await;
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("Submit Answer"), "submit went through in {html}");
    assert!(!html.contains("Phase 1"), "coaching shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_stop_policy_offers_restart() {
    let questions: Arc<dyn QuestionRepository> =
        Arc::new(InMemoryRepository::with_questions(storage::sample::sample_questions().unwrap()));
    let config = SessionConfig::default().with_advance(AdvancePolicy::Stop);
    let mut harness = setup_view_harness_with_repo(ViewKind::Quiz, questions, config);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    for label in [ChoiceLabel::A, ChoiceLabel::B] {
        harness.dispatch(QuizIntent::Select(label));
        harness.dispatch(QuizIntent::Submit);
        advance_through_coaching(&mut harness);
    }

    let html = harness.render();
    assert!(html.contains("Quiz complete"), "missing completion in {html}");
    assert!(html.contains("Start Over"), "missing restart in {html}");

    harness.dispatch(QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "restart did not rewind in {html}");
    assert!(
        html.contains("2. Q2 — You chose B; correct; confidence 3"),
        "history lost on restart in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_bank() {
    let mut harness = setup_view_harness_with_repo(
        ViewKind::Quiz,
        Arc::new(InMemoryRepository::new()),
        SessionConfig::default(),
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No questions available."), "missing placeholder in {html}");
    assert!(!html.contains("Retry"), "retry offered for empty bank in {html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Io("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_repo(
        ViewKind::Quiz,
        Arc::new(FailingRepo),
        SessionConfig::default(),
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn summary_view_smoke_without_answers() {
    let mut harness = setup_view_harness(ViewKind::Summary);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Session Summary"), "missing title in {html}");
    assert!(html.contains("No answers yet."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn summary_view_smoke_renders_stats() {
    let mut harness = loaded(ViewKind::QuizWithSummary).await;

    harness.dispatch(QuizIntent::Select(ChoiceLabel::A));
    harness.dispatch(QuizIntent::SetConfidence(Confidence::clamped(2)));
    harness.dispatch(QuizIntent::Submit);
    advance_through_coaching(&mut harness);
    harness.dispatch(QuizIntent::Select(ChoiceLabel::C));
    harness.dispatch(QuizIntent::SetConfidence(Confidence::clamped(5)));
    harness.dispatch(QuizIntent::Submit);

    let html = harness.render();
    assert!(html.contains("Accuracy"), "missing accuracy in {html}");
    assert!(html.contains("50%"), "missing accuracy value in {html}");
    assert!(html.contains("3.5"), "missing mean confidence in {html}");
    assert!(
        html.contains("2. Q2 — You chose C; incorrect; confidence 5"),
        "missing summary row in {html}"
    );
    assert!(html.contains("22:13:20"), "missing answer time in {html}");
}
