// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::{Date, Weekday};

/// The set of weekdays that qualify a booking for the off-peak discount.
///
/// Days are kept in calendar order (Monday first) without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffPeakDays {
    days: Vec<Weekday>,
}

impl Default for OffPeakDays {
    /// Monday and Tuesday, used whenever no settings record exists.
    fn default() -> Self {
        Self {
            days: vec![Weekday::Monday, Weekday::Tuesday],
        }
    }
}

impl OffPeakDays {
    /// Builds a set from weekday names such as `"Monday"` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any name is not a weekday.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, DomainError> {
        if names.is_empty() {
            return Err(DomainError::EmptyOffPeakDays);
        }

        let mut days: Vec<Weekday> = names
            .iter()
            .map(|name| parse_weekday(name.as_ref()))
            .collect::<Result<Vec<Weekday>, DomainError>>()?;
        days.sort_by_key(|day| day.number_days_from_monday());
        days.dedup();

        Ok(Self { days })
    }

    /// Returns whether `date` falls on an off-peak weekday.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.days.contains(&date.weekday())
    }

    #[must_use]
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Weekday names in calendar order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.days.iter().map(ToString::to_string).collect()
    }
}

/// Parses an English weekday name.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` for anything else.
pub fn parse_weekday(name: &str) -> Result<Weekday, DomainError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Monday),
        "tuesday" => Ok(Weekday::Tuesday),
        "wednesday" => Ok(Weekday::Wednesday),
        "thursday" => Ok(Weekday::Thursday),
        "friday" => Ok(Weekday::Friday),
        "saturday" => Ok(Weekday::Saturday),
        "sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(name.to_string())),
    }
}
