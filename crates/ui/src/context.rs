use std::sync::Arc;

use dioxus::prelude::*;
use services::QuizLoopService;

use crate::vm::QuizVm;

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;

    /// Human-readable name of the question source, shown in the header.
    fn bank_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    bank_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            bank_label: app.bank_label(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn bank_label(&self) -> &str {
        &self.bank_label
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The running quiz, shared by the quiz and summary pages so navigating
/// between them keeps the session.
#[derive(Clone, Copy)]
pub struct SessionSlot(pub Signal<Option<QuizVm>>);

/// Provide an empty `SessionSlot` to every descendant.
pub fn use_session_slot_provider() -> SessionSlot {
    use_context_provider(|| SessionSlot(Signal::new(None)))
}

#[must_use]
pub fn use_session_slot() -> Signal<Option<QuizVm>> {
    use_context::<SessionSlot>().0
}
