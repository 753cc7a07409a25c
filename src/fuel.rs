use crate::errors::StageFailure;

const HOURS_PER_DAY: f64 = 24.0;

/// Inputs to the fuel and expense calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelInputs {
    pub distance_nm: f64,
    /// Knots.
    pub speed: f64,
    /// Tons per day.
    pub fuel_consumption: f64,
    /// Price per ton.
    pub fuel_price: f64,
    pub port_charges: f64,
    pub manual_fuel_cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelEstimate {
    pub voyage_days: f64,
    pub total_fuel_used: f64,
    pub total_fuel_cost: f64,
    pub total_expense: f64,
}

/// Transit time in days for a distance sailed at `speed` knots.
pub fn voyage_days(distance_nm: f64, speed: f64) -> f64 {
    distance_nm / (speed * HOURS_PER_DAY)
}

/// Checks the speed, consumption and price preconditions.
///
/// Usable without a distance, so the estimator can tell whether the fuel
/// stage would fail even when distance resolution already has.
pub fn check_rates(speed: f64, fuel_consumption: f64, fuel_price: f64) -> Result<(), StageFailure> {
    if !(speed.is_finite() && speed > 0.0) {
        return Err(StageFailure::InvalidFuelInputs(format!(
            "speed must be positive, got {}",
            speed
        )));
    }
    if !(fuel_consumption.is_finite() && fuel_consumption >= 0.0) {
        return Err(StageFailure::InvalidFuelInputs(format!(
            "fuel consumption must be non-negative, got {}",
            fuel_consumption
        )));
    }
    if !(fuel_price.is_finite() && fuel_price > 0.0) {
        return Err(StageFailure::InvalidFuelInputs(format!(
            "fuel price must be positive, got {}",
            fuel_price
        )));
    }
    Ok(())
}

/// Derives voyage duration, fuel burn, fuel cost and total expense.
pub fn compute(inputs: &FuelInputs) -> Result<FuelEstimate, StageFailure> {
    if !(inputs.distance_nm.is_finite() && inputs.distance_nm > 0.0) {
        return Err(StageFailure::InvalidFuelInputs(format!(
            "distance must be positive, got {}",
            inputs.distance_nm
        )));
    }
    check_rates(inputs.speed, inputs.fuel_consumption, inputs.fuel_price)?;

    let voyage_days = voyage_days(inputs.distance_nm, inputs.speed);
    let total_fuel_used = inputs.fuel_consumption * voyage_days;
    let total_fuel_cost = match inputs.manual_fuel_cost {
        Some(manual) if manual.is_finite() && manual >= 0.0 => manual,
        _ => total_fuel_used * inputs.fuel_price,
    };

    let total_expense = total_fuel_cost + inputs.port_charges;

    for (name, value) in [
        ("voyage days", voyage_days),
        ("fuel used", total_fuel_used),
        ("fuel cost", total_fuel_cost),
        ("total expense", total_expense),
    ] {
        if !value.is_finite() {
            return Err(StageFailure::InvalidFuelInputs(format!(
                "{} overflowed to {}",
                name, value
            )));
        }
    }

    Ok(FuelEstimate {
        voyage_days,
        total_fuel_used,
        total_fuel_cost,
        total_expense,
    })
}
