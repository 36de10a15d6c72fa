use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;

use services::HistoryListItem;
use wic_core::model::{Confidence, Phase, QuizIntent};

use crate::context::{AppContext, use_session_slot};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChoiceRowVm, EliminationRowVm, QuizVm, VerificationVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let slot = use_session_slot();

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut slot = slot;

        async move {
            // Returning from the summary page keeps the running session.
            if slot.peek().is_some() {
                return Ok(());
            }
            let started = start_quiz(&quiz_loop).await?;
            slot.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut slot = slot;
            if let Some(vm) = slot.write().as_mut() {
                vm.dispatch(&quiz_loop, intent);
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, slot);
            }
        }
    }

    let retry = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let intent = {
            let guard = slot.read();
            let Some(vm) = guard.as_ref() else {
                return;
            };
            match evt.data.key() {
                Key::Enter => vm.intent_for_enter(),
                Key::Character(value) => vm.intent_for_char(&value),
                _ => None,
            }
        };
        if let Some(intent) = intent {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    });

    let mut did_focus = use_signal(|| false);
    use_effect(move || {
        if did_focus() || slot.read().is_none() {
            return;
        }
        did_focus.set(true);
        let _ = eval("document.getElementById(\"quiz-root\")?.focus();");
    });

    let vm = slot.read().clone();
    let empty_message = ViewError::EmptySession.message();
    let body = match state {
        ViewState::Idle => rsx! {
            p { "Idle" }
        },
        ViewState::Loading => rsx! {
            p { "Loading questions..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "quiz-error", "{err.message()}" }
            if err != ViewError::EmptySession {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| retry.call(()),
                    "Retry"
                }
            }
        },
        ViewState::Ready(()) => match vm.as_ref() {
            Some(vm) => render_quiz(vm, dispatch_intent),
            None => rsx! {
                p { "{empty_message}" }
            },
        },
    };

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            {body}
        }
    }
}

fn render_quiz(vm: &QuizVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let progress_label = vm.progress_label();
    let percent = vm.progress_percent();
    let passage = vm.passage().to_string();
    let sentence = vm.blank_sentence().to_string();
    let locked = vm.is_locked();
    let finished = vm.is_finished();
    let choices = vm.choice_rows();
    let confidence = vm.confidence();
    let confidence_label = vm.confidence_label();
    let can_submit = vm.can_submit();
    let result = vm.result();
    let history: Vec<String> = vm
        .history_rows()
        .iter()
        .map(HistoryListItem::label)
        .collect();

    let coaching = match vm.phase() {
        Phase::Strategy => rsx! {
            StrategyCard { line: vm.strategy_line(), on_intent }
        },
        Phase::Elimination => rsx! {
            EliminationCard { rows: vm.elimination_rows(), on_intent }
        },
        Phase::Verification => rsx! {
            VerificationCard { verification: vm.verification(), on_intent }
        },
        Phase::Answering | Phase::Feedback => rsx! {},
    };

    rsx! {
        div { class: "quiz-progress",
            div { class: "quiz-progress__track",
                div { class: "quiz-progress__bar", style: "width: {percent}%" }
            }
            p { class: "quiz-progress__label", "{progress_label}" }
        }

        if finished {
            section { class: "card quiz-complete",
                h3 { "Quiz complete" }
                p { "You have answered every question in the bank." }
                div { class: "quiz-complete__actions",
                    button {
                        class: "btn",
                        id: "quiz-restart",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Restart),
                        "Start Over"
                    }
                    Link { class: "btn btn-secondary", to: Route::Summary {}, "View Summary" }
                }
            }
        } else {
            section { class: "card quiz-passage",
                h3 { "Passage" }
                p { "{passage}" }
            }

            section { class: "card quiz-sentence",
                h3 { "Complete the sentence:" }
                p { class: "quiz-sentence__text", "{sentence}" }

                if !locked {
                    div { class: "quiz-choices",
                        for row in choices {
                            ChoiceButton { key: "{row.label}", row: row.clone(), on_intent }
                        }
                    }
                    ConfidenceSlider { confidence, label: confidence_label, on_intent }
                    button {
                        class: "btn quiz-submit",
                        id: "quiz-submit",
                        r#type: "button",
                        disabled: !can_submit,
                        onclick: move |_| on_intent.call(QuizIntent::Submit),
                        "Submit Answer"
                    }
                }

                if let Some(is_correct) = result {
                    ResultBanner { is_correct }
                }
            }

            {coaching}
        }

        if !history.is_empty() {
            section { class: "card quiz-history",
                h3 { "Session Summary" }
                ul {
                    for line in history {
                        li { "{line}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(row: ChoiceRowVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = if row.selected {
        "quiz-choice quiz-choice--selected"
    } else {
        "quiz-choice"
    };
    let label = row.label;
    rsx! {
        button {
            class: "{class}",
            id: "quiz-choice-{label}",
            r#type: "button",
            aria_pressed: "{row.selected}",
            onclick: move |_| on_intent.call(QuizIntent::Select(label)),
            "{row.text}"
        }
    }
}

#[component]
fn ConfidenceSlider(
    confidence: Confidence,
    label: String,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let value = confidence.value();
    let (min, max) = (Confidence::MIN, Confidence::MAX);
    rsx! {
        div { class: "quiz-confidence",
            label { r#for: "quiz-confidence", "{label}" }
            input {
                id: "quiz-confidence",
                r#type: "range",
                min: "{min}",
                max: "{max}",
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    let confidence = evt
                        .value()
                        .parse::<i64>()
                        .map_or(Confidence::DEFAULT, Confidence::clamped);
                    on_intent.call(QuizIntent::SetConfidence(confidence));
                },
            }
        }
    }
}

#[component]
fn ResultBanner(is_correct: bool) -> Element {
    let (class, text) = if is_correct {
        ("quiz-result quiz-result--correct", "Correct!")
    } else {
        ("quiz-result quiz-result--incorrect", "Incorrect")
    };
    rsx! {
        div { class: "{class}", role: "status", "{text}" }
    }
}

#[component]
fn StrategyCard(line: String, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "card coaching coaching--strategy",
            h3 { "Phase 1 · Strategy" }
            p { "{line}" }
            button {
                class: "btn btn-secondary",
                id: "coaching-next",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::NextPhase),
                "Next · Guided Elimination"
            }
        }
    }
}

#[component]
fn EliminationCard(rows: Vec<EliminationRowVm>, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "card coaching coaching--elimination",
            h3 { "Phase 2 · Guided Elimination" }
            ul { class: "coaching__eliminated",
                for row in rows {
                    li { key: "{row.text}",
                        span { class: "coaching__choice", "{row.text}" }
                        ": Does not fit the context."
                        if row.chosen {
                            span { class: "coaching__chosen", " (You chose this)" }
                        }
                    }
                }
            }
            button {
                class: "btn btn-secondary",
                id: "coaching-next",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::NextPhase),
                "Next · Final Verification"
            }
        }
    }
}

#[component]
fn VerificationCard(verification: VerificationVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "card coaching coaching--verification",
            h3 { "Phase 3 · Final Verification" }
            p { "Correct: " b { "{verification.correct_answer}" } }
            p { "Explanation: {verification.explanation}" }
            p { "Substitution: {verification.substitution}" }
            button {
                class: "btn",
                id: "coaching-next",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::NextQuestion),
                "Next Question"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    slot: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, slot: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.slot.borrow_mut() = Some(slot);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn slot(&self) -> Signal<Option<QuizVm>> {
        (*self.slot.borrow()).expect("quiz slot registered")
    }
}
