//! Domain logic for the hauling calculator lives here.

pub mod app_state;
pub mod catalog;
pub mod entities;
pub mod evaluation;
pub mod selection;

pub use app_state::{AppState, CalculatorEvent, LoopForm, NumericField, PersistedState};
pub use catalog::ShipCatalog;
pub use entities::{CalculationInput, CargoRiskProfile, RiskThresholds, VehicleCatalogEntry};
pub use evaluation::{evaluate, CalculationResult, ReasonCode, Verdict};
pub use selection::{SelectionState, ShipSelection};
