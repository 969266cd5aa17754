// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use servicebay_domain::OffPeakDays;

#[test]
fn test_missing_settings_fall_back_to_default() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.load_off_peak_days().unwrap(),
        OffPeakDays::default()
    );
}

#[test]
fn test_saved_off_peak_days_replace_previous_set() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .save_off_peak_days(&OffPeakDays::from_names(&["Wednesday"]).unwrap())
        .unwrap();
    persistence
        .save_off_peak_days(&OffPeakDays::from_names(&["sunday", "Thursday"]).unwrap())
        .unwrap();

    let loaded = persistence.load_off_peak_days().unwrap();
    assert_eq!(
        loaded,
        OffPeakDays::from_names(&["Thursday", "Sunday"]).unwrap()
    );
}
