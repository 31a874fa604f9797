use dioxus::prelude::*;

use hauling_calculator::{
    domain::{CalculationResult, CargoRiskProfile},
    util::format::format_auec,
};

use crate::ui::theme;

#[component]
pub fn VerdictPanel(result: CalculationResult, profile: CargoRiskProfile) -> Element {
    let hint = result.reason.map(|reason| reason.hint()).unwrap_or_default();
    let thresholds = profile.thresholds();
    let risk_text = format!(
        "Risky loop: investment ≥ {} or loop ≥ {} min.",
        format_auec(thresholds.investment),
        thresholds.loop_minutes
    );
    let profile_label = profile.label();
    let verdict_label = result.verdict.label();

    rsx! {
        div {
            class: "{theme::panel()} {theme::verdict_class(result.verdict)}",
            div { class: "verdict-head",
                span { class: "{theme::label_class()}", "Verdict" }
                span { class: "verdict-profile", "Profile: {profile_label}" }
            }
            p { class: "verdict-text", "{verdict_label}" }
            if !hint.is_empty() {
                p { class: "verdict-reason", "{hint}" }
            }
            if result.risk_triggered {
                p { class: "risk-note", "{risk_text}" }
            }
        }
    }
}
