//! Class helpers shared by the calculator widgets.

use hauling_calculator::domain::Verdict;

pub fn panel() -> &'static str {
    "panel"
}

pub fn label_class() -> &'static str {
    "field-label"
}

pub fn input_class() -> &'static str {
    "field-input"
}

pub fn btn_ghost() -> &'static str {
    "btn btn-ghost"
}

pub fn verdict_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "verdict verdict-ok",
        Verdict::Fail => "verdict verdict-bad",
        Verdict::Unknown => "verdict verdict-neutral",
    }
}

pub fn chip_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "chip is-ok",
        Verdict::Unknown | Verdict::Fail => "chip",
    }
}
