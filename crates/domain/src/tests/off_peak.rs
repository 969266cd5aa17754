// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, OffPeakDays};
use time::macros::date;

#[test]
fn test_default_is_monday_and_tuesday() {
    let days: OffPeakDays = OffPeakDays::default();
    assert_eq!(days.names(), vec!["Monday", "Tuesday"]);

    assert!(days.contains(date!(2024 - 06 - 03))); // Monday
    assert!(days.contains(date!(2024 - 06 - 04))); // Tuesday
    assert!(!days.contains(date!(2024 - 06 - 05)));
    assert!(!days.contains(date!(2024 - 06 - 09)));
}

#[test]
fn test_from_names_sorts_and_dedups() {
    let days: OffPeakDays =
        OffPeakDays::from_names(&["sunday", "Wednesday", "SUNDAY"]).unwrap();
    assert_eq!(days.names(), vec!["Wednesday", "Sunday"]);
    assert!(days.contains(date!(2024 - 06 - 09)));
    assert!(!days.contains(date!(2024 - 06 - 03)));
}

#[test]
fn test_from_names_rejects_bad_input() {
    let empty: [&str; 0] = [];
    assert_eq!(
        OffPeakDays::from_names(&empty),
        Err(DomainError::EmptyOffPeakDays)
    );
    assert!(matches!(
        OffPeakDays::from_names(&["Monday", "Funday"]),
        Err(DomainError::InvalidWeekday(name)) if name == "Funday"
    ));
}
