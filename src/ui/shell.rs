use dioxus::prelude::*;

use hauling_calculator::{
    domain::AppState,
    util::version::{version_label, APP_NAME},
};

use crate::ui::theme;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let verdict = state.with(|st| st.result().verdict);

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "{APP_NAME}" }
                    p { class: "app-tagline", "Beginner mode: instant loop check, no market data needed." }
                }
                span { class: "{theme::chip_class(verdict)}", "{verdict.chip()}" }
            }
            main { class: "app-main", {children} }
            footer { class: "app-footer", "{version_label()}" }
        }
    }
}
