use dioxus::prelude::*;

use hauling_calculator::domain::{AppState, CalculatorEvent, ShipSelection};

use crate::{app::dispatch_event, ui::theme};

#[derive(Clone, PartialEq)]
struct ShipOption {
    selection: ShipSelection,
    name: String,
    detail: String,
}

/// Searchable ship list. Picking an entry closes the menu and re-enables auto-fill.
#[component]
pub fn ShipPicker() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut open = use_signal(|| false);
    let mut query = use_signal(String::new);

    let label = state.with(|st| st.ship_label());
    let options: Vec<ShipOption> = state.with(|st| {
        st.catalog
            .search(&query())
            .into_iter()
            .map(|(idx, ship)| ShipOption {
                selection: ShipSelection::Catalog(idx),
                name: ship.name.clone(),
                detail: ship.capacity_label(),
            })
            .collect()
    });
    let custom = ShipOption {
        selection: ShipSelection::Custom,
        name: "Custom".to_string(),
        detail: "manual entry".to_string(),
    };

    rsx! {
        div { class: "picker",
            span { class: "{theme::label_class()}", "Ship" }
            button {
                class: "picker-button",
                r#type: "button",
                "aria-expanded": "{open}",
                onclick: move |_| open.set(!open()),
                "{label}"
            }
            if open() {
                div { class: "picker-menu",
                    input {
                        class: "{theme::input_class()}",
                        placeholder: "Search a ship",
                        autofocus: true,
                        value: "{query}",
                        oninput: move |evt| query.set(evt.value()),
                    }
                    div { class: "picker-list", role: "listbox",
                        if options.is_empty() {
                            div { class: "picker-empty", "No results." }
                        }
                        for option in options.into_iter().chain(std::iter::once(custom)) {
                            button {
                                key: "{option.selection}",
                                class: "picker-item",
                                r#type: "button",
                                role: "option",
                                onclick: move |_| {
                                    dispatch_event(state, CalculatorEvent::SelectVehicle(option.selection));
                                    open.set(false);
                                },
                                span { class: "picker-name", "{option.name}" }
                                span { class: "picker-detail", "{option.detail}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
