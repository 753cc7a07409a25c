/// Profitability decision and risk rules.
///
/// Turns the expense figures into profit metrics, a profit zone and a final
/// recommendation, collecting advisory messages along the way.
use crate::config::Thresholds;
use crate::errors::StageFailure;
use crate::models::{Banner, Decision, ProfitZone};

pub const FLAG_LOSS: &str = "Voyage loss expected";
pub const FLAG_FUEL_DOMINANT: &str = "Fuel cost dominates (>75% of expense)";
pub const FLAG_FUEL_HEAVY: &str = "Fuel heavy voyage (>65% of expense)";
pub const FLAG_PORT_HEAVY: &str = "Port-heavy route";
pub const FLAG_FREIGHT_BELOW_FUEL: &str = "Freight below fuel cost";

pub const WARN_HIGH_SPEED: &str = "High fuel burn risk at this speed";

pub const SUGGEST_FUEL_PLAN: &str = "Renegotiate freight or adjust fuel plan";
pub const SUGGEST_SLOW_STEAMING: &str = "Monitor bunker market and consider slow steaming";
pub const SUGGEST_RENEGOTIATE: &str = "Renegotiate freight rate or adjust speed";
pub const SUGGEST_MORE_CARGO: &str = "Seek additional cargo or adjust port calls";
pub const SUGGEST_REVISIT_TERMS: &str = "Revisit commercial terms or routing";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionInputs {
    pub total_expense: f64,
    pub freight_income: f64,
    pub total_fuel_cost: f64,
    pub port_charges: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub net_profit: f64,
    pub profit_percent: f64,
    pub profit_zone: ProfitZone,
    pub fuel_percent_of_expense: f64,
    pub port_percent_of_expense: f64,
    pub decision: Decision,
    pub suggestions: Vec<String>,
    pub risk_flags: Vec<String>,
    pub warnings: Vec<String>,
    pub banners: Vec<Banner>,
}

/// Buckets a profit percentage; the first matching band wins.
pub fn classify_profit_zone(profit_percent: f64, thresholds: &Thresholds) -> ProfitZone {
    if profit_percent < thresholds.profit_risky_pct {
        ProfitZone::DoNotSail
    } else if profit_percent < thresholds.profit_caution_pct {
        ProfitZone::Risky
    } else if profit_percent < thresholds.profit_strong_pct {
        ProfitZone::GoWithCaution
    } else {
        ProfitZone::StrongGo
    }
}

/// Computes the profit metrics and evaluates every risk rule.
pub fn decide(
    inputs: &DecisionInputs,
    thresholds: &Thresholds,
) -> Result<DecisionOutcome, StageFailure> {
    let DecisionInputs {
        total_expense,
        freight_income,
        total_fuel_cost,
        port_charges,
        speed,
    } = *inputs;

    if freight_income == 0.0 {
        return Err(StageFailure::ZeroFreightIncome);
    }
    if total_expense == 0.0 {
        return Err(StageFailure::ZeroExpense);
    }

    let net_profit = freight_income - total_expense;
    // Margin on cost, not on revenue.
    let profit_percent = net_profit / total_expense * 100.0;
    let fuel_pct = total_fuel_cost / total_expense * 100.0;
    let port_pct = port_charges / total_expense * 100.0;

    for (name, value) in [
        ("net_profit", net_profit),
        ("profit_percent", profit_percent),
        ("fuel_percent_of_expense", fuel_pct),
        ("port_percent_of_expense", port_pct),
    ] {
        if !value.is_finite() {
            return Err(StageFailure::DecisionEngineFailure(format!(
                "{} is not a finite number",
                name
            )));
        }
    }

    let mut profit_zone = classify_profit_zone(profit_percent, thresholds);
    let mut suggestions = Vec::new();
    let mut risk_flags = Vec::new();
    let mut warnings = Vec::new();
    let mut banners = Vec::new();
    let mut fuel_override = false;

    if net_profit < 0.0 {
        risk_flags.push(FLAG_LOSS.to_string());
        profit_zone = ProfitZone::DoNotSail;
        banners.push(Banner::LossMaking);
    }

    if fuel_pct > thresholds.fuel_dominant_pct {
        risk_flags.push(FLAG_FUEL_DOMINANT.to_string());
        suggestions.push(SUGGEST_FUEL_PLAN.to_string());
        fuel_override = true;
    } else if fuel_pct > thresholds.fuel_heavy_pct {
        risk_flags.push(FLAG_FUEL_HEAVY.to_string());
        suggestions.push(SUGGEST_SLOW_STEAMING.to_string());
    }

    if speed > thresholds.high_speed_knots {
        warnings.push(WARN_HIGH_SPEED.to_string());
    }

    if port_pct > thresholds.port_heavy_pct {
        risk_flags.push(FLAG_PORT_HEAVY.to_string());
    }

    if freight_income < total_fuel_cost {
        risk_flags.push(FLAG_FREIGHT_BELOW_FUEL.to_string());
        suggestions.push(SUGGEST_RENEGOTIATE.to_string());
    }

    match profit_zone {
        ProfitZone::Risky => {
            suggestions.push(SUGGEST_MORE_CARGO.to_string());
            banners.push(Banner::RiskyVoyage);
        }
        ProfitZone::DoNotSail => suggestions.push(SUGGEST_REVISIT_TERMS.to_string()),
        ProfitZone::GoWithCaution | ProfitZone::StrongGo => {}
    }

    let decision = if fuel_override {
        Decision::DoNotSail
    } else {
        Decision::from(profit_zone)
    };

    tracing::debug!(
        "Decision: {} (zone {}, profit {:.2}%, fuel {:.2}%, port {:.2}%)",
        decision.as_str(),
        profit_zone.as_str(),
        profit_percent,
        fuel_pct,
        port_pct
    );

    Ok(DecisionOutcome {
        net_profit,
        profit_percent,
        profit_zone,
        fuel_percent_of_expense: fuel_pct,
        port_percent_of_expense: port_pct,
        decision,
        suggestions,
        risk_flags,
        warnings,
        banners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide_default(
        total_expense: f64,
        freight_income: f64,
        total_fuel_cost: f64,
        port_charges: f64,
        speed: f64,
    ) -> Result<DecisionOutcome, StageFailure> {
        decide(
            &DecisionInputs {
                total_expense,
                freight_income,
                total_fuel_cost,
                port_charges,
                speed,
            },
            &Thresholds::default(),
        )
    }

    #[test]
    fn test_zone_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_profit_zone(-0.01, &t), ProfitZone::DoNotSail);
        assert_eq!(classify_profit_zone(0.0, &t), ProfitZone::Risky);
        assert_eq!(classify_profit_zone(4.99, &t), ProfitZone::Risky);
        assert_eq!(classify_profit_zone(5.0, &t), ProfitZone::GoWithCaution);
        assert_eq!(classify_profit_zone(14.99, &t), ProfitZone::GoWithCaution);
        assert_eq!(classify_profit_zone(15.0, &t), ProfitZone::StrongGo);
    }

    #[test]
    fn test_strong_go_without_risks() {
        // 50% fuel, 50% port would trip port-heavy; keep port at 10%.
        let outcome = decide_default(100_000.0, 150_000.0, 60_000.0, 10_000.0, 14.0).unwrap();
        assert_eq!(outcome.net_profit, 50_000.0);
        assert_eq!(outcome.profit_percent, 50.0);
        assert_eq!(outcome.profit_zone, ProfitZone::StrongGo);
        assert_eq!(outcome.decision, Decision::StrongGo);
        assert!(outcome.risk_flags.is_empty());
        assert!(outcome.banners.is_empty());
    }

    #[test]
    fn test_loss_voyage() {
        let outcome = decide_default(500_000.0, 450_000.0, 300_000.0, 200_000.0, 14.0).unwrap();
        assert_eq!(outcome.profit_zone, ProfitZone::DoNotSail);
        assert_eq!(outcome.decision, Decision::DoNotSail);
        assert!(outcome.risk_flags.contains(&FLAG_LOSS.to_string()));
        assert!(outcome.risk_flags.contains(&FLAG_PORT_HEAVY.to_string()));
        assert!(outcome.suggestions.contains(&SUGGEST_REVISIT_TERMS.to_string()));
        assert_eq!(outcome.banners, vec![Banner::LossMaking]);
    }

    #[test]
    fn test_fuel_dominance_overrides_profitable_zone() {
        // 80% fuel share, 30% margin.
        let outcome = decide_default(100_000.0, 130_000.0, 80_000.0, 20_000.0, 14.0).unwrap();
        assert_eq!(outcome.profit_zone, ProfitZone::StrongGo);
        assert_eq!(outcome.decision, Decision::DoNotSail);
        assert!(outcome.risk_flags.contains(&FLAG_FUEL_DOMINANT.to_string()));
        assert!(outcome.suggestions.contains(&SUGGEST_FUEL_PLAN.to_string()));
        assert!(!outcome.suggestions.contains(&SUGGEST_REVISIT_TERMS.to_string()));
    }

    #[test]
    fn test_fuel_heavy_flags_without_override() {
        // 70% fuel share, 10% margin.
        let outcome = decide_default(100_000.0, 110_000.0, 70_000.0, 30_000.0, 14.0).unwrap();
        assert_eq!(outcome.decision, Decision::GoWithCaution);
        assert!(outcome.risk_flags.contains(&FLAG_FUEL_HEAVY.to_string()));
        assert!(!outcome.risk_flags.contains(&FLAG_FUEL_DOMINANT.to_string()));
        assert!(outcome.suggestions.contains(&SUGGEST_SLOW_STEAMING.to_string()));
    }

    #[test]
    fn test_exactly_75_percent_fuel_is_not_dominant() {
        let outcome = decide_default(100_000.0, 200_000.0, 75_000.0, 25_000.0, 14.0).unwrap();
        assert_eq!(outcome.decision, Decision::StrongGo);
        assert!(outcome.risk_flags.contains(&FLAG_FUEL_HEAVY.to_string()));
    }

    #[test]
    fn test_margin_is_measured_against_expense() {
        // 16,000 profit on 100,000 expense: 16% of cost, under 14% of freight.
        let outcome = decide_default(100_000.0, 116_000.0, 60_000.0, 15_000.0, 14.0).unwrap();
        assert_eq!(outcome.profit_percent, 16.0);
        assert_eq!(outcome.profit_zone, ProfitZone::StrongGo);
        assert_eq!(outcome.decision, Decision::StrongGo);
    }

    #[test]
    fn test_zero_freight_checked_before_expense() {
        assert_eq!(
            decide_default(0.0, 0.0, 0.0, 0.0, 14.0).unwrap_err(),
            StageFailure::ZeroFreightIncome
        );
    }

    #[test]
    fn test_risky_margin() {
        // 3% margin.
        let outcome = decide_default(97_000.0, 100_000.0, 50_000.0, 10_000.0, 14.0).unwrap();
        assert_eq!(outcome.decision, Decision::Risky);
        assert!(outcome.suggestions.contains(&SUGGEST_MORE_CARGO.to_string()));
        assert_eq!(outcome.banners, vec![Banner::RiskyVoyage]);
    }

    #[test]
    fn test_high_speed_is_only_a_warning() {
        let outcome = decide_default(100_000.0, 150_000.0, 60_000.0, 10_000.0, 22.0).unwrap();
        assert_eq!(outcome.warnings, vec![WARN_HIGH_SPEED.to_string()]);
        assert_eq!(outcome.decision, Decision::StrongGo);
    }

    #[test]
    fn test_freight_below_fuel_cost() {
        let outcome = decide_default(130_000.0, 90_000.0, 100_000.0, 30_000.0, 14.0).unwrap();
        assert!(outcome.risk_flags.contains(&FLAG_FREIGHT_BELOW_FUEL.to_string()));
        assert!(outcome.suggestions.contains(&SUGGEST_RENEGOTIATE.to_string()));
    }

    #[test]
    fn test_zero_freight_income_fails() {
        assert_eq!(
            decide_default(100_000.0, 0.0, 60_000.0, 40_000.0, 14.0).unwrap_err(),
            StageFailure::ZeroFreightIncome
        );
    }

    #[test]
    fn test_zero_expense_fails() {
        assert_eq!(
            decide_default(0.0, 100_000.0, 0.0, 0.0, 14.0).unwrap_err(),
            StageFailure::ZeroExpense
        );
    }

    #[test]
    fn test_non_finite_input_fails() {
        let err = decide_default(f64::INFINITY, 100_000.0, 0.0, 0.0, 14.0).unwrap_err();
        assert!(matches!(err, StageFailure::DecisionEngineFailure(_)));
    }
}
