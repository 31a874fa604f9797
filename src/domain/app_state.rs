use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
    catalog::ShipCatalog,
    entities::{finite_or_zero, CalculationInput, CargoRiskProfile},
    evaluation::{evaluate, CalculationResult},
    selection::{SelectionState, ShipSelection},
};
use crate::util::persistence::SnapshotStore;

pub const DEFAULT_LOOP_MINUTES: f64 = 25.0;
pub const DEFAULT_TARGET_PROFIT_HOUR: f64 = 80_000.0;

/// Raw values of the calculator form.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopForm {
    pub cargo_scu: f64,
    pub loop_minutes: f64,
    pub buy_price: f64,
    pub sell_price: f64,
    pub target_profit_hour: f64,
    pub risk_profile: CargoRiskProfile,
}

impl Default for LoopForm {
    fn default() -> Self {
        Self {
            cargo_scu: 0.0,
            loop_minutes: DEFAULT_LOOP_MINUTES,
            buy_price: 0.0,
            sell_price: 0.0,
            target_profit_hour: DEFAULT_TARGET_PROFIT_HOUR,
            risk_profile: CargoRiskProfile::Standard,
        }
    }
}

impl LoopForm {
    pub fn to_input(&self) -> CalculationInput {
        CalculationInput {
            cargo_capacity: self.cargo_scu,
            loop_duration_minutes: self.loop_minutes,
            buy_price_per_unit: self.buy_price,
            sell_price_per_unit: self.sell_price,
            target_profit_per_hour: self.target_profit_hour,
            risk_profile: self.risk_profile,
        }
    }

    fn set(&mut self, field: NumericField, value: f64) {
        let value = finite_or_zero(value);
        match field {
            NumericField::LoopMinutes => self.loop_minutes = value,
            NumericField::BuyPrice => self.buy_price = value,
            NumericField::SellPrice => self.sell_price = value,
            NumericField::TargetProfitHour => self.target_profit_hour = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericField {
    LoopMinutes,
    BuyPrice,
    SellPrice,
    TargetProfitHour,
}

/// Everything the front-end can tell the calculator.
#[derive(Clone, Debug, PartialEq)]
pub enum CalculatorEvent {
    SelectVehicle(ShipSelection),
    EditCapacityField(f64),
    EditCustomCapacity(f64),
    EditCustomName(String),
    ChangeProfile(CargoRiskProfile),
    ChangeNumericField(NumericField, f64),
    /// Outcome of the start-up catalog load; an empty catalog on failure.
    CatalogLoaded(ShipCatalog),
    Reset,
}

/// Calculator session: form, ship selection, loaded catalog and the last result.
#[derive(Clone, Debug)]
pub struct AppState {
    pub form: LoopForm,
    pub selection: SelectionState,
    pub catalog: ShipCatalog,
    result: CalculationResult,
}

impl Default for AppState {
    fn default() -> Self {
        let form = LoopForm::default();
        let result = evaluate(&form.to_input());
        Self {
            form,
            selection: SelectionState::default(),
            catalog: ShipCatalog::default(),
            result,
        }
    }
}

impl AppState {
    pub fn restore(store: &dyn SnapshotStore) -> Self {
        let mut state = Self::default();
        if let Some(saved) = store.load() {
            state.apply_persisted(saved);
        }
        state
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    pub fn ship_label(&self) -> String {
        self.selection.label(&self.catalog)
    }

    /// Runs one full cycle for `event`: transition, capacity resolution,
    /// evaluation, then persistence when the event changed saved state.
    pub fn dispatch(&mut self, event: CalculatorEvent, store: &dyn SnapshotStore) -> &CalculationResult {
        debug!("[state] dispatch {event:?}");
        if self.apply(event) {
            if let Err(err) = store.save(&self.to_persisted()) {
                warn!("[state] Failed to persist calculator state: {err}");
            }
        }
        &self.result
    }

    /// Applies `event` and recomputes. Returns whether the snapshot is now stale.
    pub fn apply(&mut self, event: CalculatorEvent) -> bool {
        let persist = match event {
            CalculatorEvent::SelectVehicle(choice) => {
                self.selection.select_vehicle(choice);
                true
            }
            CalculatorEvent::EditCapacityField(value) => {
                self.form.cargo_scu = finite_or_zero(value);
                self.selection.edit_capacity_field();
                true
            }
            CalculatorEvent::EditCustomCapacity(value) => {
                if !self.selection.edit_custom_capacity(value) {
                    return false;
                }
                true
            }
            CalculatorEvent::EditCustomName(name) => {
                return self.selection.edit_custom_name(name);
            }
            CalculatorEvent::ChangeProfile(profile) => {
                self.form.risk_profile = profile;
                true
            }
            CalculatorEvent::ChangeNumericField(field, value) => {
                self.form.set(field, value);
                true
            }
            CalculatorEvent::CatalogLoaded(catalog) => {
                self.catalog = catalog;
                false
            }
            CalculatorEvent::Reset => {
                self.form = LoopForm::default();
                self.selection = SelectionState::default();
                true
            }
        };

        self.recompute();
        persist
    }

    fn recompute(&mut self) {
        if let Some(capacity) = self.selection.resolve_capacity(&self.catalog) {
            self.form.cargo_scu = capacity;
        }
        self.result = evaluate(&self.form.to_input());
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.selection = SelectionState {
            selection: ShipSelection::parse_lenient(&persisted.selected_ship_id),
            manual_override: persisted.manual_cargo,
            custom_name: persisted.custom_ship_name,
            custom_capacity: persisted.custom_ship_scu,
        };
        self.form = LoopForm {
            cargo_scu: persisted.cargo_scu,
            loop_minutes: persisted.loop_minutes,
            buy_price: persisted.buy_price,
            sell_price: persisted.sell_price,
            target_profit_hour: persisted.target_profit_hour,
            risk_profile: CargoRiskProfile::from_key(&persisted.cargo_type),
        };
        self.recompute();
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            selected_ship_id: self.selection.selection.to_string(),
            custom_ship_name: self.selection.custom_name.clone(),
            custom_ship_scu: self.selection.custom_capacity,
            cargo_scu: self.form.cargo_scu,
            manual_cargo: self.selection.manual_override,
            cargo_type: self.form.risk_profile.key().to_string(),
            loop_minutes: self.form.loop_minutes,
            buy_price: self.form.buy_price,
            sell_price: self.form.sell_price,
            target_profit_hour: self.form.target_profit_hour,
        }
    }
}

/// Flat snapshot written after every mutating interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(deserialize_with = "string_from_json")]
    pub selected_ship_id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub custom_ship_name: String,
    #[serde(deserialize_with = "number_from_json")]
    pub custom_ship_scu: f64,
    #[serde(deserialize_with = "number_from_json")]
    pub cargo_scu: f64,
    #[serde(deserialize_with = "flag_from_json")]
    pub manual_cargo: bool,
    #[serde(deserialize_with = "string_from_json")]
    pub cargo_type: String,
    #[serde(deserialize_with = "number_from_json")]
    pub loop_minutes: f64,
    #[serde(deserialize_with = "number_from_json")]
    pub buy_price: f64,
    #[serde(deserialize_with = "number_from_json")]
    pub sell_price: f64,
    #[serde(deserialize_with = "number_from_json")]
    pub target_profit_hour: f64,
}

impl Default for PersistedState {
    fn default() -> Self {
        AppState::default().to_persisted()
    }
}

fn number_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientNumber;

    impl<'de> serde::de::Visitor<'de> for LenientNumber {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, numeric string or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(finite_or_zero(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(finite_or_zero(value.trim().parse().unwrap_or(0.0)))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(if value { 1.0 } else { 0.0 })
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0.0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(LenientNumber)
}

/// Scalars become their text; null and containers become empty.
fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientString;

    impl<'de> serde::de::Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, number, bool or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            while map.next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Truthiness: zero, NaN, empty text and null are false.
fn flag_from_json<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientFlag;

    impl<'de> serde::de::Visitor<'de> for LenientFlag {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("any JSON value")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0.0 && !value.is_nan())
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(!value.is_empty())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(false)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(false)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(true)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            while map.next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?.is_some() {}
            Ok(true)
        }
    }

    deserializer.deserialize_any(LenientFlag)
}
