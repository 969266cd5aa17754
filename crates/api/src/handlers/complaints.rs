// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer complaint tickets.

use servicebay::{
    ComplaintRequest, ComplaintUpdate, ComplaintUpdateResult, file_complaint as open_complaint,
    update_complaint as revise_complaint,
};
use servicebay_domain::{Appointment, Complaint, ComplaintPriority, ComplaintStatus};
use servicebay_notify::{
    OutboundEmail, Recipient, complaint_received_email, complaint_update_email,
};
use servicebay_persistence::{SqlitePersistence, UserData};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::{ApiResult, ContactSettings, complaint_info, load_appointment, load_user, not_found};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ComplaintInfo, ComplaintStatsResponse, CreateComplaintRequest, UpdateComplaintRequest,
};

fn load_complaint(
    persistence: &mut SqlitePersistence,
    complaint_id: i64,
) -> Result<Complaint, ApiError> {
    persistence
        .get_complaint(complaint_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Complaint",
                format!("Complaint with ID {complaint_id} not found"),
            )
        })
}

fn parse_priority(value: Option<&str>) -> Result<Option<ComplaintPriority>, ApiError> {
    value
        .map(ComplaintPriority::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

fn parse_status(value: Option<&str>) -> Result<Option<ComplaintStatus>, ApiError> {
    value
        .map(ComplaintStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

fn complaint_infos(
    persistence: &mut SqlitePersistence,
    complaints: &[Complaint],
) -> Result<Vec<ComplaintInfo>, ApiError> {
    complaints
        .iter()
        .map(|c| complaint_info(persistence, c))
        .collect()
}

/// Files a complaint, optionally linked to one of the caller's appointments.
///
/// When a manager address is configured, a notification email is returned
/// for delivery.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The complaint
/// * `user` - The filing customer
/// * `contacts` - Where staff mail goes
/// * `now` - Filing timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a customer
/// - The subject or description is empty, or the priority is unknown
/// - The linked appointment does not exist or is not the caller's
pub fn file_complaint(
    persistence: &mut SqlitePersistence,
    request: &CreateComplaintRequest,
    user: &AuthenticatedUser,
    contacts: &ContactSettings,
    now: OffsetDateTime,
) -> Result<ApiResult<ComplaintInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::FileComplaint)?;

    let priority: Option<ComplaintPriority> = parse_priority(request.priority.as_deref())?;
    let linked: Option<Appointment> = request
        .appointment_id
        .map(|id| load_appointment(persistence, id))
        .transpose()?;

    let mut complaint: Complaint = open_complaint(
        &ComplaintRequest {
            subject: request.subject.clone(),
            description: request.description.clone(),
            priority,
        },
        linked.as_ref(),
        &user.to_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    let complaint_id: i64 = persistence
        .insert_complaint(&complaint)
        .map_err(translate_persistence_error)?;
    complaint.complaint_id = Some(complaint_id);

    info!(
        complaint_id,
        customer_id = user.user_id,
        priority = %complaint.priority,
        "Complaint filed"
    );

    let mut notifications: Vec<OutboundEmail> = Vec::new();
    if let Some(manager_email) = &contacts.manager_email {
        let customer: UserData = load_user(persistence, user.user_id)?;
        notifications.push(complaint_received_email(
            &complaint,
            Recipient {
                name: &customer.name,
                email: &customer.email,
            },
            manager_email,
        ));
    } else {
        debug!(complaint_id, "No manager address configured, skipping email");
    }

    let info: ComplaintInfo = complaint_info(persistence, &complaint)?;
    Ok(ApiResult::with_notifications(info, notifications))
}

/// Lists complaints, optionally filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the status is
/// unknown, or the query fails.
pub fn list_complaints(
    persistence: &mut SqlitePersistence,
    status: Option<&str>,
    user: &AuthenticatedUser,
) -> Result<Vec<ComplaintInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ManageComplaints)?;

    let status: Option<ComplaintStatus> = parse_status(status)?;
    let complaints: Vec<Complaint> = persistence
        .list_complaints(status)
        .map_err(translate_persistence_error)?;
    complaint_infos(persistence, &complaints)
}

/// Lists the caller's own complaints.
///
/// # Errors
///
/// Returns an error if the caller is not a customer or the query fails.
pub fn list_my_complaints(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<ComplaintInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewOwnComplaints)?;

    let complaints: Vec<Complaint> = persistence
        .list_complaints_for_customer(user.user_id)
        .map_err(translate_persistence_error)?;
    complaint_infos(persistence, &complaints)
}

/// Counts complaints by status and by priority.
///
/// Every status and priority is present in the result, zero when unused.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn complaint_stats(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<ComplaintStatsResponse, ApiError> {
    AuthorizationService::authorize(user, Action::ManageComplaints)?;

    let complaints: Vec<Complaint> = persistence
        .list_complaints(None)
        .map_err(translate_persistence_error)?;

    let mut by_status: BTreeMap<String, usize> = ComplaintStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let mut by_priority: BTreeMap<String, usize> = ComplaintPriority::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), 0))
        .collect();

    for complaint in &complaints {
        *by_status
            .entry(complaint.status.as_str().to_string())
            .or_insert(0) += 1;
        *by_priority
            .entry(complaint.priority.as_str().to_string())
            .or_insert(0) += 1;
    }

    Ok(ComplaintStatsResponse {
        total: complaints.len(),
        by_status,
        by_priority,
    })
}

/// Fetches one complaint. Visible to its customer and to managers.
///
/// # Errors
///
/// Returns an error if the complaint does not exist or belongs to another
/// customer.
pub fn get_complaint(
    persistence: &mut SqlitePersistence,
    complaint_id: i64,
    user: &AuthenticatedUser,
) -> Result<ComplaintInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ViewComplaint)?;

    let complaint: Complaint = load_complaint(persistence, complaint_id)?;
    if !user.to_actor().is_manager() && complaint.customer_id != user.user_id {
        return Err(ApiError::Forbidden {
            message: String::from("You do not have access to this complaint"),
        });
    }
    complaint_info(persistence, &complaint)
}

/// Applies a manager's status, priority or response change.
///
/// Moving to Resolved or Closed records the resolver and time. The
/// customer is emailed when a response is given or the ticket is resolved.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the complaint does not
/// exist, or a status or priority is unknown.
pub fn update_complaint(
    persistence: &mut SqlitePersistence,
    complaint_id: i64,
    request: &UpdateComplaintRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<ApiResult<ComplaintInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ManageComplaints)?;

    let current: Complaint = load_complaint(persistence, complaint_id)?;
    let update: ComplaintUpdate = ComplaintUpdate {
        status: parse_status(request.status.as_deref())?,
        priority: parse_priority(request.priority.as_deref())?,
        manager_response: request.manager_response.clone(),
    };

    let result: ComplaintUpdateResult =
        revise_complaint(&current, update, &user.to_actor(), now).map_err(translate_core_error)?;

    persistence
        .update_complaint(complaint_id, &result.complaint)
        .map_err(translate_persistence_error)?;

    info!(
        complaint_id,
        status = %result.complaint.status,
        priority = %result.complaint.priority,
        updated_by = user.user_id,
        "Complaint updated"
    );

    let mut notifications: Vec<OutboundEmail> = Vec::new();
    if result.notify_customer {
        let customer: Option<UserData> = persistence
            .get_user_by_id(result.complaint.customer_id)
            .map_err(translate_persistence_error)?;
        match customer {
            Some(customer) => notifications.push(complaint_update_email(
                &result.complaint,
                Recipient {
                    name: &customer.name,
                    email: &customer.email,
                },
            )),
            None => warn!(complaint_id, "Complaint customer no longer exists, skipping email"),
        }
    }

    let info: ComplaintInfo = complaint_info(persistence, &result.complaint)?;
    Ok(ApiResult::with_notifications(info, notifications))
}

/// Deletes a complaint.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the complaint does
/// not exist.
pub fn delete_complaint(
    persistence: &mut SqlitePersistence,
    complaint_id: i64,
    user: &AuthenticatedUser,
) -> Result<(), ApiError> {
    AuthorizationService::authorize(user, Action::ManageComplaints)?;

    persistence
        .delete_complaint(complaint_id)
        .map_err(translate_persistence_error)?;

    info!(complaint_id, "Complaint deleted");
    Ok(())
}
