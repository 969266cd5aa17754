// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, JobCardUpdate};
use crate::error::CoreError;
use crate::state::{Actor, StockDebit, TransitionResult};
use servicebay_domain::{
    Appointment, AppointmentStatus, Billing, DomainError, Feedback, JobCard, Rating, Role,
    compute_billing, optional_text,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Applies a command to an appointment, producing the updated appointment.
///
/// This function is pure: it never touches storage. The input appointment
/// is left unchanged on error.
///
/// # Arguments
///
/// * `appointment` - The current appointment (immutable)
/// * `command` - The command to apply
/// * `actor` - The caller performing the action
/// * `now` - The transition timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not permitted to perform the command on this appointment
/// - The appointment's status does not allow the command
/// - A job-card line or rating fails validation
pub fn apply(
    appointment: &Appointment,
    command: Command,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::Cancel => cancel(appointment, actor),
        Command::AssignMechanic { mechanic_id } => {
            assign_mechanic(appointment, mechanic_id, actor)
        }
        Command::UpdateJobCard(update) => update_job_card(appointment, update, actor, now),
        Command::SubmitFeedback { rating, comment } => {
            submit_feedback(appointment, rating, comment.as_deref(), actor, now)
        }
    }
}

fn unchanged_result(appointment: Appointment) -> TransitionResult {
    TransitionResult {
        appointment,
        stock_debits: Vec::new(),
        feedback: None,
    }
}

fn cancel(appointment: &Appointment, actor: &Actor) -> Result<TransitionResult, CoreError> {
    if actor.role != Role::Customer || !appointment.is_owned_by(actor.user_id) {
        return Err(CoreError::NotOwner {
            resource: "appointment",
        });
    }

    if !appointment.status.is_cancellable() {
        return Err(CoreError::NotCancellable(appointment.status));
    }

    let mut next: Appointment = appointment.clone();
    next.status = AppointmentStatus::Cancelled;
    Ok(unchanged_result(next))
}

fn assign_mechanic(
    appointment: &Appointment,
    mechanic_id: i64,
    actor: &Actor,
) -> Result<TransitionResult, CoreError> {
    if !actor.is_manager() {
        return Err(CoreError::Forbidden(String::from(
            "Only managers can assign mechanics",
        )));
    }

    // Assignment is write-once.
    if appointment.assigned_mechanic_id.is_some() {
        return Err(CoreError::AlreadyAssigned);
    }
    if appointment.status != AppointmentStatus::Scheduled {
        return Err(CoreError::NotAssignable(appointment.status));
    }

    let mut next: Appointment = appointment.clone();
    next.assigned_mechanic_id = Some(mechanic_id);
    Ok(unchanged_result(next))
}

/// Edits the job card.
///
/// Line edits and the status change are applied together so that the
/// completion debit reflects the final parts list.
fn update_job_card(
    appointment: &Appointment,
    update: JobCardUpdate,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let permitted: bool = actor.is_manager()
        || (actor.role == Role::Mechanic && appointment.is_assigned_to(actor.user_id));
    if !permitted {
        return Err(CoreError::Forbidden(String::from(
            "Only the assigned mechanic or a manager can update this job card",
        )));
    }

    if appointment.status.is_terminal() {
        return Err(CoreError::AppointmentClosed(appointment.status));
    }

    let mut next: Appointment = appointment.clone();

    if let Some(parts_used) = update.parts_used {
        next.job_card.parts_used = parts_used;
    }
    if let Some(labor_items) = update.labor_items {
        next.job_card.labor_items = labor_items;
    }
    if let Some(notes) = update.notes {
        next.notes = optional_text(Some(&notes));
    }
    if let Some(description) = update.description {
        next.description = optional_text(Some(&description));
    }

    let mut stock_debits: Vec<StockDebit> = Vec::new();
    if let Some(target) = update.status
        && target != appointment.status
    {
        if !appointment.status.can_transition_to(target) || target == AppointmentStatus::Cancelled
        {
            return Err(CoreError::DomainViolation(DomainError::InvalidTransition {
                from: appointment.status,
                to: target,
            }));
        }

        match target {
            AppointmentStatus::InProgress => {
                if next.assigned_mechanic_id.is_none() {
                    return Err(CoreError::NoMechanicAssigned);
                }
                next.started_at = Some(now);
            }
            AppointmentStatus::Completed => {
                next.finished_at = Some(now);
                stock_debits = aggregate_stock_debits(&next.job_card)?;
            }
            AppointmentStatus::Scheduled | AppointmentStatus::Cancelled => {}
        }
        next.status = target;
    }

    let billing: Billing = compute_billing(&next.job_card, next.discount_eligible)?;
    next.subtotal = billing.subtotal;
    next.final_cost = billing.final_cost;

    Ok(TransitionResult {
        appointment: next,
        stock_debits,
        feedback: None,
    })
}

/// Sums inventory-backed part quantities per item, ordered by item id.
///
/// # Errors
///
/// Returns `DomainError::QuantityOverflow` if a per-item total overflows.
fn aggregate_stock_debits(job_card: &JobCard) -> Result<Vec<StockDebit>, CoreError> {
    let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
    for part in &job_card.parts_used {
        if let Some(item_id) = part.inventory_item_id {
            let total: &mut i64 = totals.entry(item_id).or_insert(0);
            *total = total
                .checked_add(part.quantity)
                .ok_or(DomainError::QuantityOverflow)?;
        }
    }
    Ok(totals
        .into_iter()
        .map(|(inventory_item_id, quantity)| StockDebit {
            inventory_item_id,
            quantity,
        })
        .collect())
}

fn submit_feedback(
    appointment: &Appointment,
    rating: i64,
    comment: Option<&str>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    // Rating is checked first so a bad rating never reaches storage.
    let rating: Rating = Rating::new(rating)?;

    if actor.role != Role::Customer || !appointment.is_owned_by(actor.user_id) {
        return Err(CoreError::NotOwner {
            resource: "appointment",
        });
    }
    if appointment.status != AppointmentStatus::Completed {
        return Err(CoreError::FeedbackNotAllowed(appointment.status));
    }
    if appointment.feedback_submitted {
        return Err(CoreError::FeedbackAlreadySubmitted);
    }

    let Some(appointment_id) = appointment.appointment_id else {
        return Err(CoreError::DomainViolation(DomainError::InvalidField {
            field: "appointment_id",
            reason: String::from("Appointment has not been persisted"),
        }));
    };

    let mut next: Appointment = appointment.clone();
    next.feedback_submitted = true;

    let feedback: Feedback = Feedback {
        feedback_id: None,
        appointment_id,
        customer_id: actor.user_id,
        mechanic_id: appointment.assigned_mechanic_id,
        rating,
        comment: optional_text(comment),
        created_at: now,
    };

    Ok(TransitionResult {
        appointment: next,
        stock_debits: Vec::new(),
        feedback: Some(feedback),
    })
}
