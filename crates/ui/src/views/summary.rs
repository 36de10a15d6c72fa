use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::use_session_slot;
use crate::routes::Route;
use crate::vm::{SummaryRowVm, SummaryVm, map_summary};

#[component]
pub fn SummaryView() -> Element {
    let slot = use_session_slot();
    let summary = slot
        .read()
        .as_ref()
        .map(|vm| map_summary(vm.session().started_at(), vm.stats(), &vm.history_rows()))
        .filter(|summary| summary.answered > 0);

    rsx! {
        div { class: "page summary-page",
            h2 { "Session Summary" }

            match summary {
                Some(summary) => rsx! {
                    SummaryDetails { summary }
                },
                None => rsx! {
                    p { "No answers yet." }
                    Link { to: Route::Quiz {}, "Start answering" }
                },
            }
        }
    }
}

#[component]
fn SummaryDetails(summary: SummaryVm) -> Element {
    rsx! {
        // Definition list reads well for label/value pairs.
        dl { class: "summary",
            dt { "Started" }
            dd { "{summary.started_at_str}" }

            dt { "Answered" }
            dd { "{summary.answered}" }

            dt { "Correct" }
            dd { "{summary.correct}" }

            dt { "Incorrect" }
            dd { "{summary.incorrect}" }

            dt { "Accuracy" }
            dd { "{summary.accuracy_str}" }

            dt { "Mean confidence" }
            dd { "{summary.mean_confidence_str}" }

            dt { "Overconfident misses" }
            dd { "{summary.overconfident}" }

            dt { "Underconfident hits" }
            dd { "{summary.underconfident}" }
        }

        ul { class: "summary-rows",
            for row in summary.rows.iter().cloned() {
                SummaryRow { row }
            }
        }

        Link { to: Route::Quiz {}, "Back to quiz" }
    }
}

#[component]
fn SummaryRow(row: SummaryRowVm) -> Element {
    let class = if row.is_correct {
        "summary-row summary-row--correct"
    } else {
        "summary-row summary-row--incorrect"
    };
    rsx! {
        li { class: "{class}",
            span { "{row.label}" }
            span { class: "summary-row__time", " at {row.answered_at_str}" }
        }
    }
}
