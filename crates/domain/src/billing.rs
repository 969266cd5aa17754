// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job-card arithmetic.
//!
//! All currency is held as integer cents. The stored subtotal and final cost
//! of an appointment are a cache of [`compute_billing`] over its line entries.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Discount applied to off-peak appointments, in percent.
pub const OFF_PEAK_DISCOUNT_PERCENT: i64 = 5;

/// A currency amount in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount that must not be negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` naming `field` when `cents < 0`.
    pub const fn non_negative(field: &'static str, cents: i64) -> Result<Self, DomainError> {
        if cents < 0 {
            return Err(DomainError::NegativeAmount { field, cents });
        }
        Ok(Self(cents))
    }

    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub const fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        match self.0.checked_add(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(DomainError::AmountOverflow),
        }
    }

    /// Subtracts `other` from this amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub const fn checked_sub(self, other: Self) -> Result<Self, DomainError> {
        match self.0.checked_sub(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(DomainError::AmountOverflow),
        }
    }

    /// Multiplies this amount by a quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub const fn checked_mul(self, quantity: i64) -> Result<Self, DomainError> {
        match self.0.checked_mul(quantity) {
            Some(v) => Ok(Self(v)),
            None => Err(DomainError::AmountOverflow),
        }
    }

    /// Sums an iterator of amounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Result<Self, DomainError> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.0 < 0 { "-" } else { "" };
        let abs: u64 = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// Largest quantity accepted on a single part line.
pub const MAX_PART_QUANTITY: i64 = 10_000;

/// A part consumed on a job card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUsed {
    /// The inventory item this part was drawn from, if any.
    pub inventory_item_id: Option<i64>,
    /// Display name, copied from the inventory item at time of use.
    pub name: String,
    /// Number of units used, between 1 and [`MAX_PART_QUANTITY`].
    pub quantity: i64,
    /// Unit sale price at time of use.
    pub unit_price: Money,
}

impl PartUsed {
    /// Builds a validated part line.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the quantity is outside
    /// `1..=MAX_PART_QUANTITY`, or the price is negative.
    pub fn new(
        inventory_item_id: Option<i64>,
        name: &str,
        quantity: i64,
        unit_price_cents: i64,
    ) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidField {
                field: "parts_used.name",
                reason: String::from("Part name cannot be empty"),
            });
        }
        if quantity < 1 {
            return Err(DomainError::NonPositiveQuantity {
                field: "parts_used.quantity",
                value: quantity,
            });
        }
        if quantity > MAX_PART_QUANTITY {
            return Err(DomainError::QuantityTooLarge {
                field: "parts_used.quantity",
                value: quantity,
                max: MAX_PART_QUANTITY,
            });
        }
        Ok(Self {
            inventory_item_id,
            name: name.to_string(),
            quantity,
            unit_price: Money::non_negative("parts_used.unit_price", unit_price_cents)?,
        })
    }

    /// Quantity times unit price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub const fn line_total(&self) -> Result<Money, DomainError> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// A flat labor charge on a job card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborItem {
    pub description: String,
    pub cost: Money,
}

impl LaborItem {
    /// Builds a validated labor line.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is empty or the cost is negative.
    pub fn new(description: &str, cost_cents: i64) -> Result<Self, DomainError> {
        let description: &str = description.trim();
        if description.is_empty() {
            return Err(DomainError::InvalidField {
                field: "labor_items.description",
                reason: String::from("Labor description cannot be empty"),
            });
        }
        Ok(Self {
            description: description.to_string(),
            cost: Money::non_negative("labor_items.cost", cost_cents)?,
        })
    }
}

/// The ordered parts and labor lines of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobCard {
    pub parts_used: Vec<PartUsed>,
    pub labor_items: Vec<LaborItem>,
}

impl JobCard {
    /// Sum of all part line totals.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub fn parts_total(&self) -> Result<Money, DomainError> {
        self.parts_used
            .iter()
            .try_fold(Money::ZERO, |acc, part| acc.checked_add(part.line_total()?))
    }

    /// Sum of all labor costs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub fn labor_total(&self) -> Result<Money, DomainError> {
        Money::checked_sum(self.labor_items.iter().map(|item| item.cost))
    }

    /// Parts total plus labor total.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow.
    pub fn subtotal(&self) -> Result<Money, DomainError> {
        self.parts_total()?.checked_add(self.labor_total()?)
    }
}

/// The derived billing figures of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    pub subtotal: Money,
    pub final_cost: Money,
}

/// Derives subtotal and final cost from a job card.
///
/// The final cost is the subtotal less [`OFF_PEAK_DISCOUNT_PERCENT`] when
/// the appointment is discount-eligible, rounded half up to the cent.
/// The result depends only on its inputs, so it can be recomputed at any time.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if any sum overflows.
pub fn compute_billing(job_card: &JobCard, discount_eligible: bool) -> Result<Billing, DomainError> {
    let subtotal: Money = job_card.subtotal()?;
    let final_cost: Money = if discount_eligible {
        apply_discount(subtotal)?
    } else {
        subtotal
    };
    Ok(Billing {
        subtotal,
        final_cost,
    })
}

fn apply_discount(subtotal: Money) -> Result<Money, DomainError> {
    let scaled: i64 = subtotal
        .cents()
        .checked_mul(100 - OFF_PEAK_DISCOUNT_PERCENT)
        .and_then(|v| v.checked_add(50))
        .ok_or(DomainError::AmountOverflow)?;
    Ok(Money::from_cents(scaled.div_euclid(100)))
}
