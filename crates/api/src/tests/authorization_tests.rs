// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::Role;

use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, AuthError};

#[test]
fn test_customer_may_book_but_not_assign() {
    let customer = AuthenticatedUser::new(1, Role::Customer);
    assert!(AuthorizationService::authorize(&customer, Action::BookAppointment).is_ok());
    assert!(AuthorizationService::authorize(&customer, Action::AssignMechanic).is_err());
}

#[test]
fn test_mechanic_may_update_job_card_but_not_view_reports() {
    let mechanic = AuthenticatedUser::new(2, Role::Mechanic);
    assert!(AuthorizationService::authorize(&mechanic, Action::UpdateJobCard).is_ok());
    assert!(AuthorizationService::authorize(&mechanic, Action::ViewAssignedJobs).is_ok());
    assert!(AuthorizationService::authorize(&mechanic, Action::ViewReports).is_err());
}

#[test]
fn test_manager_may_not_book_for_customers() {
    let manager = AuthenticatedUser::new(3, Role::Manager);
    assert!(AuthorizationService::authorize(&manager, Action::BookAppointment).is_err());
    assert!(AuthorizationService::authorize(&manager, Action::ManageInventory).is_ok());
}

#[test]
fn test_everyone_may_read_settings() {
    for role in [Role::Customer, Role::Mechanic, Role::Manager] {
        let user = AuthenticatedUser::new(1, role);
        assert!(AuthorizationService::authorize(&user, Action::ViewSettings).is_ok());
    }
}

#[test]
fn test_unauthorized_error_names_action_and_roles() {
    let customer = AuthenticatedUser::new(1, Role::Customer);
    let err = AuthorizationService::authorize(&customer, Action::ViewInventory).unwrap_err();

    assert_eq!(
        err,
        AuthError::Unauthorized {
            action: String::from("view_inventory"),
            required_role: String::from("Mechanic or Manager"),
        }
    );

    match ApiError::from(err) {
        ApiError::Unauthorized { action, .. } => assert_eq!(action, "view_inventory"),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}
