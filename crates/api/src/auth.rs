// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use servicebay::Actor;
use servicebay_domain::Role;
use servicebay_persistence::{
    PersistenceError, SessionData, SqlitePersistence, UserData, format_timestamp, parse_timestamp,
};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The caller's user id.
    pub user_id: i64,
    /// The role assigned to this caller.
    pub role: Role,
}

impl AuthenticatedUser {
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// The workflow actor for this caller.
    #[must_use]
    pub const fn to_actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// Every guarded operation, each mapped to the roles that may perform it.
///
/// Ownership (for example, "only the booking customer may cancel") is
/// checked separately once the resource is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BookAppointment,
    ListOwnAppointments,
    ListAppointments,
    ViewAppointment,
    CancelAppointment,
    ManageVehicles,
    ViewInventory,
    ManageInventory,
    OrderStock,
    ManageMechanics,
    ViewUnassignedJobs,
    AssignMechanic,
    ViewAssignedJobs,
    UpdateJobCard,
    SubmitFeedback,
    ViewOwnFeedback,
    ViewAllFeedback,
    FileComplaint,
    ViewOwnComplaints,
    ViewComplaint,
    ManageComplaints,
    ViewSettings,
    UpdateSettings,
    ViewReports,
}

const ANYONE: &[Role] = &[Role::Customer, Role::Mechanic, Role::Manager];
const CUSTOMER: &[Role] = &[Role::Customer];
const MECHANIC: &[Role] = &[Role::Mechanic];
const MANAGER: &[Role] = &[Role::Manager];
const STAFF: &[Role] = &[Role::Mechanic, Role::Manager];
const CUSTOMER_OR_MANAGER: &[Role] = &[Role::Customer, Role::Manager];

impl Action {
    /// The name reported in authorization failures.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BookAppointment => "book_appointment",
            Self::ListOwnAppointments => "list_own_appointments",
            Self::ListAppointments => "list_appointments",
            Self::ViewAppointment => "view_appointment",
            Self::CancelAppointment => "cancel_appointment",
            Self::ManageVehicles => "manage_vehicles",
            Self::ViewInventory => "view_inventory",
            Self::ManageInventory => "manage_inventory",
            Self::OrderStock => "order_stock",
            Self::ManageMechanics => "manage_mechanics",
            Self::ViewUnassignedJobs => "view_unassigned_jobs",
            Self::AssignMechanic => "assign_mechanic",
            Self::ViewAssignedJobs => "view_assigned_jobs",
            Self::UpdateJobCard => "update_job_card",
            Self::SubmitFeedback => "submit_feedback",
            Self::ViewOwnFeedback => "view_own_feedback",
            Self::ViewAllFeedback => "view_all_feedback",
            Self::FileComplaint => "file_complaint",
            Self::ViewOwnComplaints => "view_own_complaints",
            Self::ViewComplaint => "view_complaint",
            Self::ManageComplaints => "manage_complaints",
            Self::ViewSettings => "view_settings",
            Self::UpdateSettings => "update_settings",
            Self::ViewReports => "view_reports",
        }
    }

    /// The roles allowed to perform this action.
    #[must_use]
    pub const fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::ViewAppointment | Self::ViewSettings => ANYONE,
            Self::BookAppointment
            | Self::ListOwnAppointments
            | Self::CancelAppointment
            | Self::ManageVehicles
            | Self::SubmitFeedback
            | Self::ViewOwnFeedback
            | Self::FileComplaint
            | Self::ViewOwnComplaints => CUSTOMER,
            Self::ViewAssignedJobs => MECHANIC,
            Self::ListAppointments | Self::ViewInventory | Self::UpdateJobCard => STAFF,
            Self::ViewComplaint => CUSTOMER_OR_MANAGER,
            Self::ManageInventory
            | Self::OrderStock
            | Self::ManageMechanics
            | Self::ViewUnassignedJobs
            | Self::AssignMechanic
            | Self::ViewAllFeedback
            | Self::ManageComplaints
            | Self::UpdateSettings
            | Self::ViewReports => MANAGER,
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks whether `user` may perform `action`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` naming the action and the roles
    /// that may perform it.
    pub fn authorize(user: &AuthenticatedUser, action: Action) -> Result<(), AuthError> {
        let allowed: &[Role] = action.allowed_roles();
        if allowed.contains(&user.role) {
            return Ok(());
        }

        Err(AuthError::Unauthorized {
            action: action.name().to_string(),
            required_role: allowed
                .iter()
                .map(Role::as_str)
                .collect::<Vec<&str>>()
                .join(" or "),
        })
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    pub const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Verifies credentials and creates a session.
    ///
    /// Unknown emails and wrong passwords fail with the same message.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The login email
    /// * `password` - The plain-text password
    /// * `session_ttl` - How long the new session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut SqlitePersistence,
        email: &str,
        password: &str,
        session_ttl: Duration,
    ) -> Result<(String, AuthenticatedUser, UserData), AuthError> {
        let invalid = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        };

        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(invalid)?;

        let verified: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !verified {
            debug!(user_id = user.user_id, "Password mismatch");
            return Err(invalid());
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(OffsetDateTime::now_utc() + session_ttl)
            .map_err(Self::map_persistence_error)?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(user_id = user.user_id, role = %user.role, "User logged in");

        let authenticated: AuthenticatedUser = AuthenticatedUser::new(user.user_id, user.role);
        Ok((session_token, authenticated, user))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its user
    /// no longer exists.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(Self::map_persistence_error)?;
        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedUser::new(user.user_id, user.role), user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    /// Generates an opaque session token from 128 random bits.
    fn generate_session_token() -> String {
        format!(
            "session_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
