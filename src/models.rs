use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Request Models ============

/// Currency the caller quotes prices in.
///
/// Display only: the estimator never converts between currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Inr,
}

/// Commercial and operational inputs for one voyage estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VoyageRequest {
    /// Departure port name (case and spacing insensitive).
    pub start_port: String,
    /// Arrival port name.
    pub end_port: String,
    /// Service speed in knots.
    pub speed: f64,
    /// Main engine consumption in tons per day.
    pub fuel_consumption: f64,
    /// Bunker price per ton. Zero is rejected.
    pub fuel_price: f64,
    /// Total port charges for the voyage.
    pub port_charges: f64,
    /// Freight income for the voyage.
    pub freight_income: f64,
    pub currency: Currency,
    /// Caller-supplied distance in nautical miles; bypasses the route table.
    #[serde(default)]
    pub manual_distance: Option<f64>,
    /// Caller-supplied total fuel cost; bypasses the fuel price calculation.
    #[serde(default)]
    pub manual_fuel_cost: Option<f64>,
}

// ============ Response Models ============

/// Profit classification bucket derived from the profit percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProfitZone {
    #[serde(rename = "STRONG GO")]
    StrongGo,
    #[serde(rename = "GO WITH CAUTION")]
    GoWithCaution,
    #[serde(rename = "RISKY")]
    Risky,
    #[serde(rename = "DO NOT SAIL")]
    DoNotSail,
}

impl ProfitZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitZone::StrongGo => "STRONG GO",
            ProfitZone::GoWithCaution => "GO WITH CAUTION",
            ProfitZone::Risky => "RISKY",
            ProfitZone::DoNotSail => "DO NOT SAIL",
        }
    }
}

/// Final recommendation tag, including the two degraded sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Decision {
    #[serde(rename = "STRONG GO")]
    StrongGo,
    #[serde(rename = "GO WITH CAUTION")]
    GoWithCaution,
    #[serde(rename = "RISKY")]
    Risky,
    #[serde(rename = "DO NOT SAIL")]
    DoNotSail,
    /// A pipeline stage could not resolve; the caller must supply a value.
    #[serde(rename = "MANUAL INPUT REQUIRED")]
    ManualInputRequired,
    /// The decision engine could not classify the computed numbers.
    #[serde(rename = "MANUAL REVIEW REQUIRED")]
    ManualReviewRequired,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::StrongGo => "STRONG GO",
            Decision::GoWithCaution => "GO WITH CAUTION",
            Decision::Risky => "RISKY",
            Decision::DoNotSail => "DO NOT SAIL",
            Decision::ManualInputRequired => "MANUAL INPUT REQUIRED",
            Decision::ManualReviewRequired => "MANUAL REVIEW REQUIRED",
        }
    }

    /// True for the sentinels that mean "no recommendation was produced".
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Decision::ManualInputRequired | Decision::ManualReviewRequired
        )
    }
}

impl From<ProfitZone> for Decision {
    fn from(zone: ProfitZone) -> Self {
        match zone {
            ProfitZone::StrongGo => Decision::StrongGo,
            ProfitZone::GoWithCaution => Decision::GoWithCaution,
            ProfitZone::Risky => Decision::Risky,
            ProfitZone::DoNotSail => Decision::DoNotSail,
        }
    }
}

/// Display severity of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BannerColor {
    Red,
    Amber,
    Gray,
}

/// Advisory banners shown above the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    LossMaking,
    RiskyVoyage,
    ManualReview,
    DistanceUnavailable,
    FuelCostUnavailable,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Banner::LossMaking => "Loss-making voyage detected",
            Banner::RiskyVoyage => "Risky voyage",
            Banner::ManualReview => "Manual review required",
            Banner::DistanceUnavailable => {
                "Distance lookup failed. Provide manual distance to continue."
            }
            Banner::FuelCostUnavailable => {
                "Fuel calculation failed. Provide manual fuel cost to continue."
            }
        }
    }

    pub fn color(&self) -> BannerColor {
        match self {
            Banner::LossMaking => BannerColor::Red,
            Banner::RiskyVoyage => BannerColor::Amber,
            Banner::ManualReview | Banner::DistanceUnavailable | Banner::FuelCostUnavailable => {
                BannerColor::Gray
            }
        }
    }
}

/// Unified estimate payload.
///
/// Numeric fields are `None` whenever the stage that produces them (or one it
/// depends on) could not resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VoyageResult {
    pub distance_nm: Option<f64>,
    pub voyage_days: Option<f64>,
    pub total_fuel_used: Option<f64>,
    pub total_fuel_cost: Option<f64>,
    pub total_expense: Option<f64>,
    pub net_profit: Option<f64>,
    pub profit_percent: Option<f64>,
    pub profit_zone: Option<ProfitZone>,
    pub fuel_percent_of_expense: Option<f64>,
    pub port_percent_of_expense: Option<f64>,
    pub final_decision: Decision,
    pub suggestions: Vec<String>,
    pub risk_flags: Vec<String>,
    pub warnings: Vec<String>,
    pub banners: Vec<String>,
    pub needs_manual_distance: bool,
    pub needs_manual_fuel_cost: bool,
    pub currency: Currency,
}

/// One entry of the configured route table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteEntry {
    pub from: String,
    pub to: String,
    pub distance_nm: f64,
}

/// Field-level validation failure reported before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_without_manual_fields() {
        let request: VoyageRequest = serde_json::from_value(json!({
            "start_port": "Singapore",
            "end_port": "Rotterdam",
            "speed": 14.5,
            "fuel_consumption": 25.0,
            "fuel_price": 580.0,
            "port_charges": 120000.0,
            "freight_income": 320000.0,
            "currency": "USD"
        }))
        .unwrap();

        assert_eq!(request.currency, Currency::Usd);
        assert!(request.manual_distance.is_none());
        assert!(request.manual_fuel_cost.is_none());
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let result: Result<VoyageRequest, _> = serde_json::from_value(json!({
            "start_port": "Singapore",
            "end_port": "Rotterdam",
            "speed": 14.5,
            "fuel_consumption": 25.0,
            "fuel_price": 580.0,
            "port_charges": 0.0,
            "freight_income": 0.0,
            "currency": "GBP"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_decision_labels_serialize_as_display_strings() {
        assert_eq!(
            serde_json::to_value(Decision::ManualInputRequired).unwrap(),
            json!("MANUAL INPUT REQUIRED")
        );
        assert_eq!(
            serde_json::to_value(ProfitZone::GoWithCaution).unwrap(),
            json!("GO WITH CAUTION")
        );
        assert_eq!(Decision::from(ProfitZone::DoNotSail).as_str(), "DO NOT SAIL");
    }

    #[test]
    fn test_banner_colors() {
        assert_eq!(Banner::LossMaking.color(), BannerColor::Red);
        assert_eq!(Banner::RiskyVoyage.color(), BannerColor::Amber);
        assert_eq!(Banner::ManualReview.color(), BannerColor::Gray);
    }
}
