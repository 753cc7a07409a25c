use crate::models::{FieldError, VoyageRequest};

/// Field-level request checks, run before the pipeline.
///
/// Collects every problem instead of stopping at the first so the caller can
/// highlight all offending fields at once.
pub fn validate_request(request: &VoyageRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("start_port", &request.start_port),
        ("end_port", &request.end_port),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "Field is required"));
        }
    }

    for (field, value) in [
        ("speed", request.speed),
        ("fuel_consumption", request.fuel_consumption),
        ("fuel_price", request.fuel_price),
        ("port_charges", request.port_charges),
        ("freight_income", request.freight_income),
    ] {
        check_non_negative(&mut errors, field, value);
    }

    if request.fuel_price == 0.0 {
        errors.push(FieldError::new("fuel_price", "Fuel price cannot be zero"));
    }

    for (field, value) in [
        ("manual_distance", request.manual_distance),
        ("manual_fuel_cost", request.manual_fuel_cost),
    ] {
        if let Some(v) = value {
            check_non_negative(&mut errors, field, v);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_non_negative(errors: &mut Vec<FieldError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "Value must be a finite number"));
    } else if value < 0.0 {
        errors.push(FieldError::new(field, "Negative values are not allowed"));
    }
}
