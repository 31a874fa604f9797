//! Beginner calculator: one loop, instant verdict, no market data.

use dioxus::prelude::*;

use hauling_calculator::{
    domain::{AppState, CalculatorEvent, CargoRiskProfile, NumericField},
    util::format::{format_auec, format_auec_per_hour},
};

use crate::{
    app::dispatch_event,
    ui::{
        components::{
            kpi_card::KpiCard,
            number_field::NumberField,
            ship_picker::ShipPicker,
            toast::{push_toast, ToastKind, ToastMessage},
            verdict_panel::VerdictPanel,
        },
        theme,
    },
};

#[component]
pub fn HaulingPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let form = state.with(|st| st.form.clone());
    let selection = state.with(|st| st.selection.clone());
    let result = state.with(|st| st.result().clone());

    let numeric = move |field: NumericField| {
        move |value: f64| dispatch_event(state, CalculatorEvent::ChangeNumericField(field, value))
    };

    let on_reset = move |_| {
        dispatch_event(state, CalculatorEvent::Reset);
        push_toast(toasts, ToastKind::Info, "Calculator reset to defaults.");
    };

    let manual_badge = selection
        .manual_override
        .then(|| "manual".to_string());

    rsx! {
        div { class: "page",
            section { class: "{theme::panel()} inputs",
                ShipPicker {}

                if selection.is_custom() {
                    div { class: "custom-ship",
                        label { class: "field",
                            span { class: "{theme::label_class()}", "Custom ship name" }
                            input {
                                class: "{theme::input_class()}",
                                value: "{selection.custom_name}",
                                placeholder: "Custom",
                                oninput: move |evt| {
                                    dispatch_event(state, CalculatorEvent::EditCustomName(evt.value()));
                                },
                            }
                        }
                        NumberField {
                            label: "Custom ship capacity".to_string(),
                            value: selection.custom_capacity,
                            suffix: Some("SCU".to_string()),
                            on_change: move |value| {
                                dispatch_event(state, CalculatorEvent::EditCustomCapacity(value));
                            },
                        }
                    }
                }

                NumberField {
                    label: "Cargo".to_string(),
                    value: form.cargo_scu,
                    suffix: Some("SCU".to_string()),
                    badge: manual_badge,
                    on_change: move |value| {
                        dispatch_event(state, CalculatorEvent::EditCapacityField(value));
                    },
                }

                label { class: "field",
                    span { class: "{theme::label_class()}", "Cargo type" }
                    select {
                        class: "{theme::input_class()}",
                        onchange: move |evt| {
                            let profile = CargoRiskProfile::from_key(&evt.value());
                            dispatch_event(state, CalculatorEvent::ChangeProfile(profile));
                        },
                        for profile in CargoRiskProfile::ALL {
                            option {
                                value: profile.key(),
                                selected: profile == form.risk_profile,
                                "{profile.label()}"
                            }
                        }
                    }
                }

                NumberField {
                    label: "Loop duration".to_string(),
                    value: form.loop_minutes,
                    suffix: Some("min".to_string()),
                    on_change: numeric(NumericField::LoopMinutes),
                }
                NumberField {
                    label: "Buy price".to_string(),
                    value: form.buy_price,
                    suffix: Some("aUEC/SCU".to_string()),
                    on_change: numeric(NumericField::BuyPrice),
                }
                NumberField {
                    label: "Sell price".to_string(),
                    value: form.sell_price,
                    suffix: Some("aUEC/SCU".to_string()),
                    on_change: numeric(NumericField::SellPrice),
                }
                NumberField {
                    label: "Target profit".to_string(),
                    value: form.target_profit_hour,
                    suffix: Some("aUEC/h".to_string()),
                    on_change: numeric(NumericField::TargetProfitHour),
                }

                button {
                    class: "{theme::btn_ghost()}",
                    r#type: "button",
                    onclick: on_reset,
                    "Reset"
                }
            }

            section { class: "kpis",
                KpiCard {
                    title: "Investment".to_string(),
                    value: format_auec(result.investment),
                    description: Some("Buy price × cargo".to_string()),
                }
                KpiCard {
                    title: "Revenue".to_string(),
                    value: format_auec(result.revenue),
                    description: Some("Sell price × cargo".to_string()),
                }
                KpiCard {
                    title: "Profit per loop".to_string(),
                    value: format_auec(result.profit_per_loop),
                    description: None,
                }
                KpiCard {
                    title: "Profit per hour".to_string(),
                    value: format_auec_per_hour(result.profit_per_hour),
                    description: None,
                }
            }

            VerdictPanel { result, profile: form.risk_profile }
        }
    }
}
