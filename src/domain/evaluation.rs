use std::fmt;

use super::entities::CalculationInput;

/// Loops at or above this many minutes are flagged as too long in the verdict reason.
const LONG_LOOP_MINUTES: f64 = 45.0;
/// Holds strictly below this many SCU are flagged as too small.
const LOW_CAPACITY_SCU: f64 = 40.0;
/// Share of the target that the hourly profit may miss before the target counts as ambitious.
const AMBITIOUS_GAP_RATIO: f64 = 0.5;

/// Computes KPIs, verdict, risk flag and reason for one loop.
///
/// Total: non-finite inputs are treated as zero and the result is always finite
/// for finite inputs.
pub fn evaluate(input: &CalculationInput) -> CalculationResult {
    let input = input.sanitized();
    let capacity = input.cargo_capacity;
    let minutes = input.loop_duration_minutes;
    let buy = input.buy_price_per_unit;
    let sell = input.sell_price_per_unit;
    let target = input.target_profit_per_hour;

    let investment = buy * capacity;
    let revenue = sell * capacity;
    let profit_per_loop = (sell - buy) * capacity;
    let profit_per_hour = if minutes > 0.0 {
        profit_per_loop * 60.0 / minutes
    } else {
        0.0
    };

    let verdict = if minutes > 0.0 {
        if profit_per_hour >= target {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    } else {
        Verdict::Unknown
    };

    let risk_triggered = input
        .risk_profile
        .thresholds()
        .is_triggered(investment, minutes);

    let reason = if verdict == Verdict::Fail {
        verdict_reason(ReasonInputs {
            profit_per_hour,
            target,
            margin_per_unit: sell - buy,
            loop_minutes: minutes,
            capacity,
        })
    } else {
        None
    };

    CalculationResult {
        investment,
        revenue,
        profit_per_loop,
        profit_per_hour,
        meets_target: verdict == Verdict::Pass,
        verdict,
        risk_triggered,
        reason,
    }
}

struct ReasonInputs {
    profit_per_hour: f64,
    target: f64,
    margin_per_unit: f64,
    loop_minutes: f64,
    capacity: f64,
}

fn verdict_reason(inputs: ReasonInputs) -> Option<ReasonCode> {
    if !inputs.profit_per_hour.is_finite() || !inputs.target.is_finite() {
        return None;
    }
    if inputs.profit_per_hour >= inputs.target {
        return None;
    }

    let reason = if inputs.margin_per_unit <= 0.0 {
        ReasonCode::InsufficientMargin
    } else if inputs.loop_minutes >= LONG_LOOP_MINUTES {
        ReasonCode::LoopTooLong
    } else if inputs.capacity > 0.0 && inputs.capacity < LOW_CAPACITY_SCU {
        ReasonCode::CapacityTooLow
    } else if (inputs.target - inputs.profit_per_hour) > AMBITIOUS_GAP_RATIO * inputs.target {
        ReasonCode::TargetTooAmbitious
    } else {
        ReasonCode::BelowTarget
    };

    Some(reason)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub investment: f64,
    pub revenue: f64,
    pub profit_per_loop: f64,
    pub profit_per_hour: f64,
    /// Only true when the loop duration is known and the target is reached.
    pub meets_target: bool,
    pub verdict: Verdict,
    pub risk_triggered: bool,
    pub reason: Option<ReasonCode>,
}

impl Default for CalculationResult {
    fn default() -> Self {
        Self {
            investment: 0.0,
            revenue: 0.0,
            profit_per_loop: 0.0,
            profit_per_hour: 0.0,
            meets_target: false,
            verdict: Verdict::Unknown,
            risk_triggered: false,
            reason: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verdict {
    /// Loop duration not entered yet.
    #[default]
    Unknown,
    Pass,
    Fail,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Unknown => "—",
            Verdict::Pass => "OK (target met)",
            Verdict::Fail => "Avoid (below target)",
        }
    }

    pub fn chip(&self) -> &'static str {
        match self {
            Verdict::Pass => "OK",
            Verdict::Unknown | Verdict::Fail => "—",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    InsufficientMargin,
    LoopTooLong,
    CapacityTooLow,
    TargetTooAmbitious,
    BelowTarget,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::InsufficientMargin => "insufficient margin",
            ReasonCode::LoopTooLong => "loop too long",
            ReasonCode::CapacityTooLow => "capacity too low",
            ReasonCode::TargetTooAmbitious => "target too ambitious",
            ReasonCode::BelowTarget => "below target, improve margin or reduce loop time",
        }
    }

    /// Longer hint shown under the verdict.
    pub fn hint(&self) -> &'static str {
        match self {
            ReasonCode::InsufficientMargin => "Insufficient margin: sell price is not above buy price.",
            ReasonCode::LoopTooLong => "Loop too long to reach the target.",
            ReasonCode::CapacityTooLow => "Low cargo: raise the SCU or switch ship.",
            ReasonCode::TargetTooAmbitious => {
                "Target is high: lower it or improve margin/loop time."
            }
            ReasonCode::BelowTarget => "Below target: improve the margin or shorten the loop.",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CargoRiskProfile;

    fn input(capacity: f64, buy: f64, sell: f64, minutes: f64, target: f64) -> CalculationInput {
        CalculationInput {
            cargo_capacity: capacity,
            loop_duration_minutes: minutes,
            buy_price_per_unit: buy,
            sell_price_per_unit: sell,
            target_profit_per_hour: target,
            risk_profile: CargoRiskProfile::Standard,
        }
    }

    #[test]
    fn computes_kpis_for_a_short_loop() {
        let result = evaluate(&input(100.0, 10.0, 15.0, 25.0, 80_000.0));
        assert_eq!(result.investment, 1_000.0);
        assert_eq!(result.revenue, 1_500.0);
        assert_eq!(result.profit_per_loop, 500.0);
        assert_eq!(result.profit_per_hour, 1_200.0);
        assert!(!result.meets_target);
        assert_eq!(result.verdict, Verdict::Fail);
        // 80k - 1.2k misses by more than half the target, so rule 4 fires first.
        assert_eq!(result.reason, Some(ReasonCode::TargetTooAmbitious));
    }

    #[test]
    fn close_miss_reports_below_target() {
        let result = evaluate(&input(100.0, 10.0, 15.0, 25.0, 1_500.0));
        assert_eq!(result.verdict, Verdict::Fail);
        assert_eq!(result.reason, Some(ReasonCode::BelowTarget));
        assert_eq!(
            result.reason.unwrap().as_str(),
            "below target, improve margin or reduce loop time"
        );
    }

    #[test]
    fn negative_margin_is_reported_first() {
        let result = evaluate(&input(100.0, 10.0, 5.0, 25.0, 80_000.0));
        assert_eq!(result.profit_per_loop, -500.0);
        assert_eq!(result.reason, Some(ReasonCode::InsufficientMargin));
    }

    #[test]
    fn zero_margin_counts_as_insufficient() {
        let result = evaluate(&input(100.0, 10.0, 10.0, 50.0, 1.0));
        assert_eq!(result.reason, Some(ReasonCode::InsufficientMargin));
    }

    #[test]
    fn long_loop_beats_capacity_rule() {
        let result = evaluate(&input(20.0, 10.0, 20.0, 45.0, 80_000.0));
        assert_eq!(result.reason, Some(ReasonCode::LoopTooLong));
    }

    #[test]
    fn small_hold_is_reported() {
        let result = evaluate(&input(39.0, 10.0, 20.0, 30.0, 80_000.0));
        assert_eq!(result.reason, Some(ReasonCode::CapacityTooLow));
    }

    #[test]
    fn empty_hold_skips_capacity_rule() {
        let result = evaluate(&input(0.0, 10.0, 20.0, 30.0, 80_000.0));
        assert_eq!(result.reason, Some(ReasonCode::TargetTooAmbitious));
    }

    #[test]
    fn zero_loop_is_neutral() {
        let result = evaluate(&input(0.0, 0.0, 0.0, 0.0, 80_000.0));
        assert_eq!(result.investment, 0.0);
        assert_eq!(result.revenue, 0.0);
        assert_eq!(result.profit_per_loop, 0.0);
        assert_eq!(result.profit_per_hour, 0.0);
        assert!(!result.meets_target);
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn zero_loop_never_fails_even_with_cargo() {
        let result = evaluate(&input(500.0, 10.0, 5.0, 0.0, 80_000.0));
        assert_eq!(result.profit_per_hour, 0.0);
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.reason, None);
        assert_eq!(result.profit_per_loop, -2_500.0);
    }

    #[test]
    fn reaching_target_clears_reason() {
        let result = evaluate(&input(696.0, 10.0, 20.0, 5.0, 80_000.0));
        assert!(result.meets_target);
        assert_eq!(result.verdict, Verdict::Pass);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn profit_per_loop_is_exact() {
        for (capacity, buy, sell) in [(1.0, 0.5, 0.75), (32.0, 1_234.5, 987.25), (696.0, 7.0, 7.0)] {
            let result = evaluate(&input(capacity, buy, sell, 10.0, 0.0));
            assert_eq!(result.profit_per_loop, (sell - buy) * capacity);
        }
    }

    #[test]
    fn evaluation_is_pure() {
        let sample = input(123.0, 4.5, 6.25, 17.0, 9_000.0);
        assert_eq!(evaluate(&sample), evaluate(&sample));
    }

    #[test]
    fn non_finite_inputs_become_zero() {
        let result = evaluate(&input(f64::NAN, 10.0, 15.0, f64::INFINITY, 80_000.0));
        assert_eq!(result.investment, 0.0);
        assert_eq!(result.profit_per_hour, 0.0);
        assert_eq!(result.verdict, Verdict::Unknown);
    }

    #[test]
    fn risky_profile_flags_investment() {
        let mut sample = input(900.0, 100.0, 120.0, 10.0, 0.0);
        sample.risk_profile = CargoRiskProfile::Risky;
        let result = evaluate(&sample);
        assert_eq!(result.investment, 90_000.0);
        assert!(result.risk_triggered);

        sample.risk_profile = CargoRiskProfile::Standard;
        assert!(!evaluate(&sample).risk_triggered);
    }

    #[test]
    fn loop_threshold_depends_on_profile() {
        let mut sample = input(10.0, 1.0, 2.0, 40.0, 0.0);
        sample.risk_profile = CargoRiskProfile::Standard;
        assert!(!evaluate(&sample).risk_triggered);
        sample.risk_profile = CargoRiskProfile::HighValue;
        assert!(evaluate(&sample).risk_triggered);
    }

    #[test]
    fn risk_flag_is_monotonic() {
        for profile in CargoRiskProfile::ALL {
            let mut seen = false;
            for minutes in 0..120 {
                let mut sample = input(10.0, 1.0, 2.0, minutes as f64, 0.0);
                sample.risk_profile = profile;
                let flagged = evaluate(&sample).risk_triggered;
                assert!(!seen || flagged, "{profile:?} dropped the flag at {minutes} min");
                seen |= flagged;
            }

            let mut seen = false;
            for step in 0..40 {
                let mut sample = input(100.0, step as f64 * 50.0, 0.0, 5.0, 0.0);
                sample.risk_profile = profile;
                let flagged = evaluate(&sample).risk_triggered;
                assert!(!seen || flagged, "{profile:?} dropped the flag at buy {step}");
                seen |= flagged;
            }
            assert!(seen);
        }
    }
}
