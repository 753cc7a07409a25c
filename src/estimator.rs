/// Voyage estimation pipeline.
///
/// Runs the three stages in order:
/// 1. Resolve the route distance (route table or manual distance)
/// 2. Compute voyage days, fuel burn and expenses
/// 3. Classify profitability and evaluate risk rules
///
/// Each stage is retried once. A stage that still fails turns into a degraded
/// result with a sentinel decision and a banner rather than an error.
use crate::config::Thresholds;
use crate::decision::{self, DecisionInputs};
use crate::distance::RouteTable;
use crate::fuel::{self, FuelInputs};
use crate::models::{Banner, Decision, VoyageRequest, VoyageResult};
use crate::retry::{attempt, STAGE_RETRIES};

pub const WARN_MANUAL_DISTANCE: &str = "Used manual distance input";
pub const WARN_MANUAL_FUEL_COST: &str = "Used manual fuel cost input";
pub const SUGGEST_MANUAL_DISTANCE: &str = "Enter distance manually and resubmit";
pub const SUGGEST_MANUAL_FUEL_COST: &str = "Enter fuel cost manually and resubmit";

/// Stateless estimator over a read-only route table and thresholds.
#[derive(Debug, Clone)]
pub struct VoyageEstimator {
    routes: RouteTable,
    thresholds: Thresholds,
}

/// Accumulates the advisory lists while the stages run.
#[derive(Debug, Default)]
struct Advisories {
    suggestions: Vec<String>,
    risk_flags: Vec<String>,
    warnings: Vec<String>,
    banners: Vec<Banner>,
}

impl Advisories {
    fn banner_messages(&self) -> Vec<String> {
        self.banners.iter().map(|b| b.message().to_string()).collect()
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

impl VoyageEstimator {
    pub fn new(routes: RouteTable, thresholds: Thresholds) -> Self {
        Self { routes, thresholds }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Commercial warnings raised from the raw request before any stage runs.
    fn advisory_warnings(&self, request: &VoyageRequest) -> Vec<String> {
        let mut warnings = Vec::new();
        if request.speed > self.thresholds.advisory_speed_knots {
            warnings.push(format!(
                "Speed exceeds {} knots: fuel burn warning",
                self.thresholds.advisory_speed_knots
            ));
        }
        if request.freight_income < self.thresholds.advisory_min_freight {
            warnings.push(format!(
                "Freight below {}: commercial warning",
                format_amount(self.thresholds.advisory_min_freight)
            ));
        }
        warnings
    }

    /// Produces exactly one result for the request. Never fails.
    pub fn estimate(&self, request: &VoyageRequest) -> VoyageResult {
        let mut advisories = Advisories {
            warnings: self.advisory_warnings(request),
            ..Default::default()
        };

        // 1. Distance
        let distance = attempt("distance lookup", STAGE_RETRIES, || {
            self.routes
                .resolve(&request.start_port, &request.end_port, request.manual_distance)
        });

        let distance_nm = match distance {
            Ok(d) => {
                if positive(request.manual_distance).is_some() {
                    advisories.warnings.push(WARN_MANUAL_DISTANCE.to_string());
                }
                d
            }
            Err(_) => return self.distance_unavailable(request, advisories),
        };

        // 2. Fuel & expense
        let fuel_inputs = FuelInputs {
            distance_nm,
            speed: request.speed,
            fuel_consumption: request.fuel_consumption,
            fuel_price: request.fuel_price,
            port_charges: request.port_charges,
            manual_fuel_cost: request.manual_fuel_cost,
        };
        let manual_fuel_cost = non_negative(request.manual_fuel_cost);

        let estimate: PartialEstimate = match attempt("fuel calculation", STAGE_RETRIES, || {
            fuel::compute(&fuel_inputs)
        }) {
            Ok(estimate) => {
                if manual_fuel_cost.is_some() {
                    advisories.warnings.push(WARN_MANUAL_FUEL_COST.to_string());
                }
                estimate.into()
            }
            Err(_) => {
                let (voyage_days, total_fuel_used) = best_effort_transit(request, distance_nm);
                match manual_fuel_cost.filter(|cost| (cost + request.port_charges).is_finite()) {
                    Some(cost) => {
                        advisories.warnings.push(WARN_MANUAL_FUEL_COST.to_string());
                        PartialEstimate {
                            voyage_days,
                            total_fuel_used,
                            total_fuel_cost: cost,
                            total_expense: cost + request.port_charges,
                        }
                    }
                    None => {
                        advisories.banners.push(Banner::FuelCostUnavailable);
                        advisories
                            .suggestions
                            .push(SUGGEST_MANUAL_FUEL_COST.to_string());
                        tracing::info!("Estimate needs manual fuel cost");
                        return VoyageResult {
                            distance_nm: Some(distance_nm),
                            voyage_days,
                            total_fuel_used,
                            needs_manual_fuel_cost: true,
                            ..empty_result(request, Decision::ManualInputRequired, advisories)
                        };
                    }
                }
            }
        };

        // 3. Decision
        let decision_inputs = DecisionInputs {
            total_expense: estimate.total_expense,
            freight_income: request.freight_income,
            total_fuel_cost: estimate.total_fuel_cost,
            port_charges: request.port_charges,
            speed: request.speed,
        };

        let base = VoyageResult {
            distance_nm: Some(distance_nm),
            voyage_days: estimate.voyage_days,
            total_fuel_used: estimate.total_fuel_used,
            total_fuel_cost: Some(estimate.total_fuel_cost),
            total_expense: Some(estimate.total_expense),
            ..empty_result(request, Decision::ManualReviewRequired, Advisories::default())
        };

        match attempt("decision engine", STAGE_RETRIES, || {
            decision::decide(&decision_inputs, &self.thresholds)
        }) {
            Ok(outcome) => {
                advisories.suggestions.extend(outcome.suggestions);
                advisories.risk_flags.extend(outcome.risk_flags);
                advisories.warnings.extend(outcome.warnings);
                advisories.banners.extend(outcome.banners);

                tracing::info!(
                    "Estimate complete: {} ({} -> {}, {:.0} nm)",
                    outcome.decision.as_str(),
                    request.start_port,
                    request.end_port,
                    distance_nm
                );

                VoyageResult {
                    net_profit: Some(outcome.net_profit),
                    profit_percent: Some(outcome.profit_percent),
                    profit_zone: Some(outcome.profit_zone),
                    fuel_percent_of_expense: Some(outcome.fuel_percent_of_expense),
                    port_percent_of_expense: Some(outcome.port_percent_of_expense),
                    final_decision: outcome.decision,
                    banners: advisories.banner_messages(),
                    suggestions: advisories.suggestions,
                    risk_flags: advisories.risk_flags,
                    warnings: advisories.warnings,
                    ..base
                }
            }
            Err(_) => {
                advisories.banners.push(Banner::ManualReview);
                tracing::info!("Estimate needs manual review");
                VoyageResult {
                    final_decision: Decision::ManualReviewRequired,
                    banners: advisories.banner_messages(),
                    suggestions: advisories.suggestions,
                    risk_flags: advisories.risk_flags,
                    warnings: advisories.warnings,
                    ..base
                }
            }
        }
    }

    /// Distance could not be resolved: nothing downstream can be computed.
    ///
    /// The fuel preconditions are still probed so that a request missing both
    /// inputs learns about both in one round trip.
    fn distance_unavailable(
        &self,
        request: &VoyageRequest,
        mut advisories: Advisories,
    ) -> VoyageResult {
        advisories.banners.push(Banner::DistanceUnavailable);
        advisories
            .suggestions
            .push(SUGGEST_MANUAL_DISTANCE.to_string());

        let fuel_unresolvable = non_negative(request.manual_fuel_cost).is_none()
            && attempt("fuel precondition check", STAGE_RETRIES, || {
                fuel::check_rates(request.speed, request.fuel_consumption, request.fuel_price)
            })
            .is_err();

        if fuel_unresolvable {
            advisories.banners.push(Banner::FuelCostUnavailable);
            advisories
                .suggestions
                .push(SUGGEST_MANUAL_FUEL_COST.to_string());
        }

        tracing::info!(
            "Estimate needs manual distance for {} -> {}",
            request.start_port,
            request.end_port
        );

        VoyageResult {
            needs_manual_distance: true,
            needs_manual_fuel_cost: fuel_unresolvable,
            ..empty_result(request, Decision::ManualInputRequired, advisories)
        }
    }
}

/// Fuel stage output where transit figures may be unknown.
struct PartialEstimate {
    voyage_days: Option<f64>,
    total_fuel_used: Option<f64>,
    total_fuel_cost: f64,
    total_expense: f64,
}

impl From<fuel::FuelEstimate> for PartialEstimate {
    fn from(estimate: fuel::FuelEstimate) -> Self {
        Self {
            voyage_days: Some(estimate.voyage_days),
            total_fuel_used: Some(estimate.total_fuel_used),
            total_fuel_cost: estimate.total_fuel_cost,
            total_expense: estimate.total_expense,
        }
    }
}

/// Voyage days and fuel burn when the rates allow it.
fn best_effort_transit(request: &VoyageRequest, distance_nm: f64) -> (Option<f64>, Option<f64>) {
    if !(request.speed.is_finite() && request.speed > 0.0) {
        return (None, None);
    }
    let days = fuel::voyage_days(distance_nm, request.speed);
    let used = Some(request.fuel_consumption)
        .filter(|c| c.is_finite() && *c >= 0.0)
        .map(|c| c * days);
    (Some(days), used)
}

fn empty_result(
    request: &VoyageRequest,
    final_decision: Decision,
    advisories: Advisories,
) -> VoyageResult {
    VoyageResult {
        distance_nm: None,
        voyage_days: None,
        total_fuel_used: None,
        total_fuel_cost: None,
        total_expense: None,
        net_profit: None,
        profit_percent: None,
        profit_zone: None,
        fuel_percent_of_expense: None,
        port_percent_of_expense: None,
        final_decision,
        banners: advisories.banner_messages(),
        suggestions: advisories.suggestions,
        risk_flags: advisories.risk_flags,
        warnings: advisories.warnings,
        needs_manual_distance: false,
        needs_manual_fuel_cost: false,
        currency: request.currency,
    }
}

/// Renders a whole amount with thousands separators (50000 -> "50,000").
fn format_amount(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}
