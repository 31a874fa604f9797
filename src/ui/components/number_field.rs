use dioxus::prelude::*;

use hauling_calculator::util::format::{input_value, parse_number};

use crate::ui::theme;

/// Numeric input that keeps the raw text while typing and only follows
/// `value` when it changes from the outside (auto-fill, reset, restore).
#[component]
pub fn NumberField(
    label: String,
    value: f64,
    on_change: EventHandler<f64>,
    #[props(default)] suffix: Option<String>,
    #[props(default)] badge: Option<String>,
) -> Element {
    let mut text = use_signal(|| input_value(value));

    use_effect(use_reactive((&value,), move |(value,)| {
        if parse_number(&text.peek()) != value {
            text.set(input_value(value));
        }
    }));

    rsx! {
        label { class: "field",
            span { class: "{theme::label_class()}",
                "{label}"
                if let Some(badge) = badge {
                    span { class: "badge", "{badge}" }
                }
            }
            div { class: "field-row",
                input {
                    class: "{theme::input_class()}",
                    inputmode: "decimal",
                    value: "{text}",
                    oninput: move |evt| {
                        let raw = evt.value();
                        text.set(raw.clone());
                        on_change.call(parse_number(&raw));
                    },
                }
                if let Some(suffix) = suffix {
                    span { class: "field-suffix", "{suffix}" }
                }
            }
        }
    }
}
