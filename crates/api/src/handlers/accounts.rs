// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration, sessions and mechanic account management.

use servicebay_domain::{EmailAddress, Role, optional_text, require_text};
use servicebay_persistence::{SessionData, SqlitePersistence, UserData};
use time::Duration;
use tracing::info;

use super::{load_user, not_found, user_info};
use crate::auth::{Action, AuthenticatedUser, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::{NewPassword, PasswordPolicy};
use crate::request_response::{
    CreateMechanicRequest, LoginRequest, LoginResponse, RegisterRequest, UserInfo,
};

struct NewAccount<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
    phone: Option<&'a str>,
    role: Role,
}

fn create_account(
    persistence: &mut SqlitePersistence,
    account: &NewAccount<'_>,
) -> Result<UserData, ApiError> {
    let name: String = require_text("name", account.name).map_err(translate_domain_error)?;
    let email: EmailAddress = EmailAddress::parse(account.email).map_err(translate_domain_error)?;

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(&NewPassword {
        password: account.password,
        confirmation: account.password_confirmation,
        email: email.value(),
        name: &name,
    })?;

    let phone: Option<String> = optional_text(account.phone);
    let user_id: i64 = persistence
        .create_user(
            &name,
            email.value(),
            account.password,
            account.role,
            phone.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    load_user(persistence, user_id)
}

/// Registers a new customer account.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or the email is malformed
/// - The password fails the password policy
/// - The email is already registered
pub fn register_customer(
    persistence: &mut SqlitePersistence,
    request: &RegisterRequest,
) -> Result<UserInfo, ApiError> {
    let user: UserData = create_account(
        persistence,
        &NewAccount {
            name: &request.name,
            email: &request.email,
            password: &request.password,
            password_confirmation: &request.password_confirmation,
            phone: request.phone.as_deref(),
            role: Role::Customer,
        },
    )?;

    info!(user_id = user.user_id, "Customer registered");
    Ok(user_info(&user))
}

/// Creates the first manager account.
///
/// Only allowed while no manager exists.
///
/// # Errors
///
/// Returns an error if a manager already exists or the account is invalid.
pub fn bootstrap_manager(
    persistence: &mut SqlitePersistence,
    request: &RegisterRequest,
) -> Result<UserInfo, ApiError> {
    let managers: i64 = persistence
        .count_users_by_role(Role::Manager)
        .map_err(translate_persistence_error)?;
    if managers > 0 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("bootstrap_once"),
            message: String::from("A manager account already exists"),
        });
    }

    let user: UserData = create_account(
        persistence,
        &NewAccount {
            name: &request.name,
            email: &request.email,
            password: &request.password,
            password_confirmation: &request.password_confirmation,
            phone: request.phone.as_deref(),
            role: Role::Manager,
        },
    )?;

    info!(user_id = user.user_id, "Bootstrap manager created");
    Ok(user_info(&user))
}

/// Authenticates a user and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
/// * `session_ttl` - How long the session stays valid
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the session cannot be
/// created.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
    session_ttl: Duration,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _authenticated, user): (String, AuthenticatedUser, UserData) =
        AuthenticationService::login(persistence, &request.email, &request.password, session_ttl)?;

    let session: Option<SessionData> = persistence
        .get_session_by_token(&session_token)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to retrieve session: {e}"),
        })?;

    let expires_at: String = session
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        expires_at,
        user: user_info(&user),
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the caller's own account.
#[must_use]
pub fn whoami(user: &UserData) -> UserInfo {
    user_info(user)
}

/// Creates a mechanic account. Managers only.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the account fails
/// validation, or the email is taken.
pub fn create_mechanic(
    persistence: &mut SqlitePersistence,
    request: &CreateMechanicRequest,
    user: &AuthenticatedUser,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageMechanics)?;

    let mechanic: UserData = create_account(
        persistence,
        &NewAccount {
            name: &request.name,
            email: &request.email,
            password: &request.password,
            password_confirmation: &request.password,
            phone: request.phone.as_deref(),
            role: Role::Mechanic,
        },
    )?;

    info!(
        mechanic_id = mechanic.user_id,
        created_by = user.user_id,
        "Mechanic account created"
    );
    Ok(user_info(&mechanic))
}

/// Lists mechanic accounts by name.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_mechanics(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<UserInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ManageMechanics)?;

    Ok(persistence
        .list_users_by_role(Role::Mechanic)
        .map_err(translate_persistence_error)?
        .iter()
        .map(user_info)
        .collect())
}

/// Deletes a mechanic account.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or no mechanic has that ID.
pub fn delete_mechanic(
    persistence: &mut SqlitePersistence,
    mechanic_id: i64,
    user: &AuthenticatedUser,
) -> Result<(), ApiError> {
    AuthorizationService::authorize(user, Action::ManageMechanics)?;

    let target: Option<UserData> = persistence
        .get_user_by_id(mechanic_id)
        .map_err(translate_persistence_error)?;
    if !target.is_some_and(|u| u.role == Role::Mechanic) {
        return Err(not_found(
            "Mechanic",
            format!("Mechanic with ID {mechanic_id} not found"),
        ));
    }

    persistence
        .delete_user(mechanic_id)
        .map_err(translate_persistence_error)?;

    info!(mechanic_id, deleted_by = user.user_id, "Mechanic account deleted");
    Ok(())
}
