use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::{AppContext, use_session_slot_provider};
use crate::views::{QuizView, SummaryView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/summary", SummaryView)] Summary {},
}

#[component]
fn Layout() -> Element {
    use_session_slot_provider();

    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let bank_label = ctx.bank_label().to_string();

    rsx! {
        header { class: "app-header",
            h1 { "SAT Words in Context Quiz" }
            p { class: "app-header__subtitle", "Master vocabulary through context clues and strategic thinking" }
            nav { class: "app-header__nav",
                Link { to: Route::Quiz {}, "Quiz" }
                Link { to: Route::Summary {}, "Summary" }
            }
            p { class: "app-header__source", "Questions: {bank_label}" }
        }
    }
}
