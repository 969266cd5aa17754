// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for UI gating.
//!
//! Capabilities tell a client which actions to offer. They are advisory
//! only and never replace the checks the handlers perform.

use servicebay_domain::{Appointment, AppointmentStatus, Role};

use crate::auth::AuthenticatedUser;
use crate::request_response::{AppointmentCapabilities, Capability};

/// Computes what `user` may do with `appointment`.
///
/// Mirrors the workflow rules: only the owning customer cancels a
/// scheduled appointment or rates a completed one, managers assign
/// unassigned scheduled work, and the assigned mechanic or any manager
/// edits an open job card.
#[must_use]
pub fn compute_appointment_capabilities(
    user: &AuthenticatedUser,
    appointment: &Appointment,
) -> AppointmentCapabilities {
    let is_owner: bool = user.role == Role::Customer && appointment.is_owned_by(user.user_id);
    let is_manager: bool = user.role == Role::Manager;
    let is_assigned: bool =
        user.role == Role::Mechanic && appointment.is_assigned_to(user.user_id);

    AppointmentCapabilities {
        can_cancel: Capability::from_bool(is_owner && appointment.status.is_cancellable()),
        can_assign: Capability::from_bool(
            is_manager
                && appointment.status == AppointmentStatus::Scheduled
                && appointment.assigned_mechanic_id.is_none(),
        ),
        can_update_job_card: Capability::from_bool(
            (is_manager || is_assigned) && !appointment.status.is_terminal(),
        ),
        can_submit_feedback: Capability::from_bool(
            is_owner
                && appointment.status == AppointmentStatus::Completed
                && !appointment.feedback_submitted,
        ),
    }
}
