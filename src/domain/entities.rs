use serde::{Deserialize, Serialize};

/// Threshold policy applied when deciding whether a loop is risky.
///
/// The serialized names match the values stored in older snapshots
/// (`standard`, `highValue`, `risky`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoRiskProfile {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "highValue")]
    HighValue,
    #[serde(rename = "risky")]
    Risky,
}

impl CargoRiskProfile {
    pub const ALL: [CargoRiskProfile; 3] = [
        CargoRiskProfile::Standard,
        CargoRiskProfile::HighValue,
        CargoRiskProfile::Risky,
    ];

    pub fn thresholds(&self) -> RiskThresholds {
        match self {
            CargoRiskProfile::Standard => RiskThresholds {
                investment: 150_000.0,
                loop_minutes: 45.0,
            },
            CargoRiskProfile::HighValue => RiskThresholds {
                investment: 120_000.0,
                loop_minutes: 40.0,
            },
            CargoRiskProfile::Risky => RiskThresholds {
                investment: 80_000.0,
                loop_minutes: 35.0,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CargoRiskProfile::Standard => "Standard",
            CargoRiskProfile::HighValue => "High value",
            CargoRiskProfile::Risky => "High risk",
        }
    }

    /// Stable identifier used by the picker and the snapshot.
    pub fn key(&self) -> &'static str {
        match self {
            CargoRiskProfile::Standard => "standard",
            CargoRiskProfile::HighValue => "highValue",
            CargoRiskProfile::Risky => "risky",
        }
    }

    /// Unknown keys fall back to `Standard`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "highValue" => CargoRiskProfile::HighValue,
            "risky" => CargoRiskProfile::Risky,
            _ => CargoRiskProfile::Standard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskThresholds {
    pub investment: f64,
    pub loop_minutes: f64,
}

impl RiskThresholds {
    pub fn is_triggered(&self, investment: f64, loop_minutes: f64) -> bool {
        investment >= self.investment || loop_minutes >= self.loop_minutes
    }
}

/// Inputs for one recalculation. Built fresh from the form on every event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculationInput {
    pub cargo_capacity: f64,
    pub loop_duration_minutes: f64,
    pub buy_price_per_unit: f64,
    pub sell_price_per_unit: f64,
    pub target_profit_per_hour: f64,
    pub risk_profile: CargoRiskProfile,
}

impl CalculationInput {
    /// Copy with every non-finite number replaced by zero.
    pub fn sanitized(&self) -> Self {
        Self {
            cargo_capacity: finite_or_zero(self.cargo_capacity),
            loop_duration_minutes: finite_or_zero(self.loop_duration_minutes),
            buy_price_per_unit: finite_or_zero(self.buy_price_per_unit),
            sell_price_per_unit: finite_or_zero(self.sell_price_per_unit),
            target_profit_per_hour: finite_or_zero(self.target_profit_per_hour),
            risk_profile: self.risk_profile,
        }
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// One ship of the loaded catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleCatalogEntry {
    pub name: String,
    /// Cargo hold size in SCU, never negative.
    pub capacity: f64,
}

impl VehicleCatalogEntry {
    pub fn capacity_label(&self) -> String {
        if self.capacity > 0.0 {
            format!("{} SCU", crate::util::format::format_number(self.capacity))
        } else {
            "SCU ?".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_keys_round_trip() {
        for profile in CargoRiskProfile::ALL {
            assert_eq!(CargoRiskProfile::from_key(profile.key()), profile);
        }
        assert_eq!(CargoRiskProfile::from_key("bogus"), CargoRiskProfile::Standard);
    }

    #[test]
    fn profile_serializes_with_legacy_names() {
        let json = serde_json::to_string(&CargoRiskProfile::HighValue).unwrap();
        assert_eq!(json, "\"highValue\"");
    }

    #[test]
    fn sanitized_replaces_non_finite_values() {
        let input = CalculationInput {
            cargo_capacity: f64::NAN,
            loop_duration_minutes: f64::INFINITY,
            buy_price_per_unit: f64::NEG_INFINITY,
            sell_price_per_unit: 4.0,
            target_profit_per_hour: 10.0,
            risk_profile: CargoRiskProfile::Risky,
        };
        let clean = input.sanitized();
        assert_eq!(clean.cargo_capacity, 0.0);
        assert_eq!(clean.loop_duration_minutes, 0.0);
        assert_eq!(clean.buy_price_per_unit, 0.0);
        assert_eq!(clean.sell_price_per_unit, 4.0);
        assert_eq!(clean.risk_profile, CargoRiskProfile::Risky);
    }

    #[test]
    fn capacity_label_marks_unknown_holds() {
        let entry = VehicleCatalogEntry {
            name: "Cutlass Black".into(),
            capacity: 0.0,
        };
        assert_eq!(entry.capacity_label(), "SCU ?");
    }
}
