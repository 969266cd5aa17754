// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::Role;
use time::Duration;

use super::helpers::{
    TEST_PASSWORD, create_test_customer, create_test_manager, create_test_mechanic,
    setup_test_persistence,
};
use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::handlers::accounts::{
    bootstrap_manager, create_mechanic, delete_mechanic, list_mechanics, login, logout,
    register_customer,
};
use crate::{CreateMechanicRequest, LoginRequest, RegisterRequest};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: String::from("Dilani Jayasinghe"),
        email: email.to_string(),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        phone: Some(String::from("+94771234567")),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_register_customer_normalizes_email() {
    let mut persistence = setup_test_persistence();

    let info = register_customer(&mut persistence, &register_request(" Dilani@Example.COM "))
        .unwrap();

    assert_eq!(info.email, "dilani@example.com");
    assert_eq!(info.role, "Customer");
    assert_eq!(info.phone.as_deref(), Some("+94771234567"));
}

#[test]
fn test_register_duplicate_email_conflicts() {
    let mut persistence = setup_test_persistence();
    register_customer(&mut persistence, &register_request("dilani@example.com")).unwrap();

    let result = register_customer(&mut persistence, &register_request("DILANI@example.com"));

    match result.unwrap_err() {
        ApiError::Conflict { .. } => (),
        other => panic!("Expected Conflict, got {other:?}"),
    }
}

#[test]
fn test_register_weak_password_rejected() {
    let mut persistence = setup_test_persistence();
    let mut request = register_request("dilani@example.com");
    request.password = String::from("short");
    request.password_confirmation = String::from("short");

    match register_customer(&mut persistence, &request).unwrap_err() {
        ApiError::PasswordPolicyViolation { .. } => (),
        other => panic!("Expected PasswordPolicyViolation, got {other:?}"),
    }
}

#[test]
fn test_register_malformed_email_rejected() {
    let mut persistence = setup_test_persistence();

    match register_customer(&mut persistence, &register_request("not-an-email")).unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "email"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_bootstrap_manager_only_once() {
    let mut persistence = setup_test_persistence();

    let first = bootstrap_manager(&mut persistence, &register_request("boss@example.com"))
        .unwrap();
    assert_eq!(first.role, "Manager");

    match bootstrap_manager(&mut persistence, &register_request("boss2@example.com"))
        .unwrap_err()
    {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "bootstrap_once"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_login_and_validate_session() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);

    let response = login(
        &mut persistence,
        &LoginRequest {
            email: String::from("NIMAL@example.com"),
            password: String::from(TEST_PASSWORD),
        },
        Duration::days(1),
    )
    .unwrap();

    assert_eq!(response.user.user_id, customer.user_id);

    let (authenticated, user) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();
    assert_eq!(authenticated, customer);
    assert_eq!(user.name, "Nimal Perera");
}

#[test]
fn test_login_wrong_password_fails_without_detail() {
    let mut persistence = setup_test_persistence();
    create_test_customer(&mut persistence);

    let wrong_password = login(
        &mut persistence,
        &LoginRequest {
            email: String::from("nimal@example.com"),
            password: String::from("Wrong2026!"),
        },
        Duration::days(1),
    )
    .unwrap_err();
    let unknown_email = login(
        &mut persistence,
        &LoginRequest {
            email: String::from("nobody@example.com"),
            password: String::from(TEST_PASSWORD),
        },
        Duration::days(1),
    )
    .unwrap_err();

    assert_eq!(wrong_password, unknown_email);
    match wrong_password {
        ApiError::AuthenticationFailed { .. } => (),
        other => panic!("Expected AuthenticationFailed, got {other:?}"),
    }
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence = setup_test_persistence();
    create_test_customer(&mut persistence);
    let response = login(
        &mut persistence,
        &LoginRequest {
            email: String::from("nimal@example.com"),
            password: String::from(TEST_PASSWORD),
        },
        Duration::days(1),
    )
    .unwrap();

    logout(&mut persistence, &response.session_token).unwrap();

    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .is_err()
    );
}

// ============================================================================
// Mechanic management
// ============================================================================

#[test]
fn test_manager_creates_and_lists_mechanics() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);

    let created = create_mechanic(
        &mut persistence,
        &CreateMechanicRequest {
            name: String::from("Ruwan Bandara"),
            email: String::from("ruwan@example.com"),
            password: String::from(TEST_PASSWORD),
            phone: None,
        },
        &manager,
    )
    .unwrap();
    assert_eq!(created.role, "Mechanic");

    let mechanics = list_mechanics(&mut persistence, &manager).unwrap();
    assert_eq!(mechanics.len(), 1);
    assert_eq!(mechanics[0].email, "ruwan@example.com");
}

#[test]
fn test_customer_cannot_create_mechanic() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);

    let result = create_mechanic(
        &mut persistence,
        &CreateMechanicRequest {
            name: String::from("Ruwan Bandara"),
            email: String::from("ruwan@example.com"),
            password: String::from(TEST_PASSWORD),
            phone: None,
        },
        &customer,
    );

    match result.unwrap_err() {
        ApiError::Unauthorized { .. } => (),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_delete_mechanic_rejects_other_roles() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);
    let customer = create_test_customer(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);

    match delete_mechanic(&mut persistence, customer.user_id, &manager).unwrap_err() {
        ApiError::ResourceNotFound { .. } => (),
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }

    delete_mechanic(&mut persistence, mechanic.user_id, &manager).unwrap();
    assert!(list_mechanics(&mut persistence, &manager).unwrap().is_empty());
    assert_eq!(
        persistence.count_users_by_role(Role::Customer).unwrap(),
        1
    );
}
