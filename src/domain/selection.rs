//! Ship selection and the capacity auto-fill / manual override rules.
//!
//! The capacity field normally follows the selected ship. As soon as the
//! user types into it, auto-fill stops until another ship is picked.

use std::{fmt, str::FromStr};

use super::catalog::ShipCatalog;

const CUSTOM_LABEL: &str = "Custom";
const NO_SHIP_LABEL: &str = "—";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShipSelection {
    #[default]
    None,
    Custom,
    /// Index into the loaded catalog.
    Catalog(usize),
}

impl fmt::Display for ShipSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipSelection::None => f.write_str("none"),
            ShipSelection::Custom => f.write_str("custom"),
            ShipSelection::Catalog(idx) => write!(f, "ship:{idx}"),
        }
    }
}

impl FromStr for ShipSelection {
    type Err = std::convert::Infallible;

    /// Anything unrecognised reads as no selection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "custom" => ShipSelection::Custom,
            other => other
                .strip_prefix("ship:")
                .and_then(|idx| idx.parse::<usize>().ok())
                .map(ShipSelection::Catalog)
                .unwrap_or(ShipSelection::None),
        };
        Ok(parsed)
    }
}

impl ShipSelection {
    pub fn parse_lenient(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    pub selection: ShipSelection,
    pub manual_override: bool,
    pub custom_name: String,
    pub custom_capacity: f64,
}

impl SelectionState {
    /// A fresh pick always returns to auto-fill mode.
    pub fn select_vehicle(&mut self, choice: ShipSelection) {
        self.selection = choice;
        self.manual_override = false;
    }

    pub fn edit_capacity_field(&mut self) {
        self.manual_override = true;
    }

    /// Returns false when the custom ship is not the current selection.
    pub fn edit_custom_capacity(&mut self, capacity: f64) -> bool {
        if self.selection != ShipSelection::Custom {
            return false;
        }
        self.custom_capacity = if capacity.is_finite() { capacity } else { 0.0 };
        true
    }

    pub fn edit_custom_name(&mut self, name: impl Into<String>) -> bool {
        if self.selection != ShipSelection::Custom {
            return false;
        }
        self.custom_name = name.into();
        true
    }

    /// Capacity the field should be set to, or `None` to leave it alone.
    pub fn resolve_capacity(&self, catalog: &ShipCatalog) -> Option<f64> {
        if self.manual_override {
            return None;
        }

        let capacity = match self.selection {
            ShipSelection::None => return None,
            ShipSelection::Custom => self.custom_capacity,
            ShipSelection::Catalog(idx) => catalog.get(idx)?.capacity,
        };

        (capacity > 0.0).then_some(capacity)
    }

    pub fn label(&self, catalog: &ShipCatalog) -> String {
        match self.selection {
            ShipSelection::Custom => {
                let trimmed = self.custom_name.trim();
                if trimmed.is_empty() {
                    CUSTOM_LABEL.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            ShipSelection::Catalog(idx) => catalog
                .get(idx)
                .map(|entry| entry.name.clone())
                .unwrap_or_else(|| NO_SHIP_LABEL.to_string()),
            ShipSelection::None => NO_SHIP_LABEL.to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.selection == ShipSelection::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::VehicleCatalogEntry;

    fn catalog() -> ShipCatalog {
        ShipCatalog::new(vec![
            VehicleCatalogEntry { name: "Caterpillar".into(), capacity: 576.0 },
            VehicleCatalogEntry { name: "Hull A".into(), capacity: 500.0 },
            VehicleCatalogEntry { name: "Pisces".into(), capacity: 0.0 },
        ])
    }

    #[test]
    fn selection_ids_round_trip() {
        for selection in [ShipSelection::None, ShipSelection::Custom, ShipSelection::Catalog(7)] {
            assert_eq!(ShipSelection::parse_lenient(&selection.to_string()), selection);
        }
    }

    #[test]
    fn malformed_ids_mean_no_selection() {
        for raw in ["", "ship:", "ship:abc", "ship:-1", "boat:3", "CUSTOM"] {
            assert_eq!(ShipSelection::parse_lenient(raw), ShipSelection::None, "{raw}");
        }
    }

    #[test]
    fn catalog_pick_auto_fills() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Catalog(1));
        assert_eq!(state.resolve_capacity(&ships), Some(500.0));
    }

    #[test]
    fn manual_edit_blocks_auto_fill_until_next_pick() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Catalog(1));
        state.edit_capacity_field();
        assert!(state.manual_override);
        assert_eq!(state.resolve_capacity(&ships), None);

        state.select_vehicle(ShipSelection::Catalog(1));
        assert!(!state.manual_override);
        assert_eq!(state.resolve_capacity(&ships), Some(500.0));

        state.edit_capacity_field();
        state.select_vehicle(ShipSelection::Catalog(0));
        assert!(!state.manual_override);
        assert_eq!(state.resolve_capacity(&ships), Some(576.0));
    }

    #[test]
    fn custom_capacity_edit_keeps_override() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Custom);
        assert!(state.edit_custom_capacity(64.0));
        assert_eq!(state.resolve_capacity(&ships), Some(64.0));

        state.edit_capacity_field();
        assert!(state.edit_custom_capacity(128.0));
        assert!(state.manual_override);
        assert_eq!(state.resolve_capacity(&ships), None);
    }

    #[test]
    fn custom_edits_ignored_for_other_selections() {
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Catalog(0));
        assert!(!state.edit_custom_capacity(64.0));
        assert!(!state.edit_custom_name("Mule"));
        assert_eq!(state.custom_capacity, 0.0);
        assert!(state.custom_name.is_empty());
    }

    #[test]
    fn zero_capacity_leaves_field_alone() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Catalog(2));
        assert_eq!(state.resolve_capacity(&ships), None);

        state.select_vehicle(ShipSelection::Custom);
        assert_eq!(state.resolve_capacity(&ships), None);
    }

    #[test]
    fn out_of_range_index_behaves_like_no_ship() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Catalog(99));
        assert_eq!(state.resolve_capacity(&ships), None);
        assert_eq!(state.label(&ships), "—");
        assert_eq!(state.resolve_capacity(&ShipCatalog::default()), None);
    }

    #[test]
    fn no_selection_never_resolves() {
        let state = SelectionState::default();
        assert_eq!(state.resolve_capacity(&catalog()), None);
    }

    #[test]
    fn labels_follow_selection() {
        let ships = catalog();
        let mut state = SelectionState::default();
        state.select_vehicle(ShipSelection::Custom);
        assert_eq!(state.label(&ships), "Custom");
        state.edit_custom_name("  My Mule ");
        assert_eq!(state.label(&ships), "My Mule");
        state.select_vehicle(ShipSelection::Catalog(0));
        assert_eq!(state.label(&ships), "Caterpillar");
    }
}
