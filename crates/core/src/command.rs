// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::{AppointmentStatus, LaborItem, PartUsed};

/// A command represents caller intent against an existing appointment.
///
/// Commands are the only way to request appointment state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Cancel the appointment on behalf of its owner.
    Cancel,
    /// Assign a mechanic to an unassigned, scheduled appointment.
    ///
    /// The caller is responsible for checking that the id refers to a
    /// user with the `Mechanic` role.
    AssignMechanic {
        /// The mechanic's user id.
        mechanic_id: i64,
    },
    /// Edit the job card and optionally advance the status.
    UpdateJobCard(JobCardUpdate),
    /// Record post-service feedback.
    SubmitFeedback {
        /// Raw rating, validated to 1..=5.
        rating: i64,
        /// Optional free-text comment.
        comment: Option<String>,
    },
}

/// A partial job-card edit.
///
/// `None` leaves the corresponding field unchanged. Line lists replace the
/// existing lists wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobCardUpdate {
    pub status: Option<AppointmentStatus>,
    pub parts_used: Option<Vec<PartUsed>>,
    pub labor_items: Option<Vec<LaborItem>>,
    pub notes: Option<String>,
    pub description: Option<String>,
}
