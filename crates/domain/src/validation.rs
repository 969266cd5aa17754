// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entities::{InventoryItem, Vehicle};
use crate::error::DomainError;

/// Earliest accepted vehicle model year.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Trims a required text field and rejects it when empty.
///
/// # Arguments
///
/// * `field` - The field name reported in the error
/// * `value` - The raw value
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the trimmed value is empty.
pub fn require_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidField {
            field,
            reason: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field, mapping blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Validates a vehicle's field constraints.
///
/// Uniqueness of the registration number is enforced by storage.
///
/// # Arguments
///
/// * `vehicle` - The vehicle to validate
/// * `current_year` - The current calendar year; model years up to one
///   beyond it are accepted
///
/// # Errors
///
/// Returns an error if:
/// - The make or model is empty
/// - The year is outside `1900..=current_year + 1`
pub fn validate_vehicle(vehicle: &Vehicle, current_year: i32) -> Result<(), DomainError> {
    require_text("make", &vehicle.make)?;
    require_text("model", &vehicle.model)?;

    let max: i32 = current_year + 1;
    if !(MIN_VEHICLE_YEAR..=max).contains(&vehicle.year) {
        return Err(DomainError::InvalidVehicleYear {
            year: vehicle.year,
            max,
        });
    }

    Ok(())
}

/// Validates an inventory item's field constraints.
///
/// Name uniqueness is enforced by storage.
///
/// # Errors
///
/// Returns an error if:
/// - The name or unit is empty
/// - The quantity or threshold is negative
/// - Either price is negative
pub fn validate_inventory_item(item: &InventoryItem) -> Result<(), DomainError> {
    require_text("name", &item.name)?;
    require_text("unit", &item.unit)?;

    if item.quantity < 0 {
        return Err(DomainError::InvalidField {
            field: "quantity",
            reason: format!("Quantity cannot be negative, got {}", item.quantity),
        });
    }
    if item.low_stock_threshold < 0 {
        return Err(DomainError::InvalidField {
            field: "low_stock_threshold",
            reason: format!(
                "Threshold cannot be negative, got {}",
                item.low_stock_threshold
            ),
        });
    }
    if item.cost_price.cents() < 0 {
        return Err(DomainError::NegativeAmount {
            field: "cost_price",
            cents: item.cost_price.cents(),
        });
    }
    if item.sale_price.cents() < 0 {
        return Err(DomainError::NegativeAmount {
            field: "sale_price",
            cents: item.sale_price.cents(),
        });
    }

    Ok(())
}

/// Validates a quantity that must be strictly positive.
///
/// # Errors
///
/// Returns `DomainError::NonPositiveQuantity` if `value <= 0`.
pub const fn validate_positive_quantity(field: &'static str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::NonPositiveQuantity { field, value });
    }
    Ok(value)
}
