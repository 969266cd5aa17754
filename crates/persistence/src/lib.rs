// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the servicebay service center backend.
//!
//! Storage is `SQLite` through Diesel, with migrations embedded in the
//! binary and applied on open.
//!
//! ## Storage guarantees
//!
//! - One live appointment per `(date, time)` slot, enforced by a partial
//!   unique index that ignores cancelled rows
//! - Appointment updates are compare-and-swap on a version column
//! - Stock receipts and debits are single conditional `UPDATE` statements
//! - Completion debits and feedback inserts share the appointment's
//!   transaction, so a failed step leaves no partial write
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives each caller an isolated shared-cache
//! in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use servicebay::TransitionResult;
use servicebay_domain::{
    Appointment, Complaint, ComplaintStatus, Feedback, InventoryItem, OffPeakDays, Role, Slot,
    Vehicle,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::sqlite::StorageMode;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod timestamps;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UserData};
pub use error::PersistenceError;
pub use mutations::appointments::SLOT_TAKEN;
pub use timestamps::{format_timestamp, parse_timestamp};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter wrapping a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

pub type SqlitePersistence = Persistence;

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open(&shared_memory_url, StorageMode::InMemory)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, StorageMode::File)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users & Sessions
    // ========================================================================

    /// Creates a user account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the email is already registered.
    pub fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        phone: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, name, email, password, role, phone)
    }

    /// Retrieves a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Lists users with the given role, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users_by_role(&mut self, role: Role) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users_by_role(&mut self.conn, role)
    }

    /// Counts users with the given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users_by_role(&mut self, role: Role) -> Result<i64, PersistenceError> {
        queries::users::count_users_by_role(&mut self.conn, role)
    }

    /// Deletes a user and their sessions.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the user does not exist.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn)
    }

    // ========================================================================
    // Vehicles
    // ========================================================================

    /// Registers a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the registration number is taken.
    pub fn insert_vehicle(&mut self, vehicle: &Vehicle) -> Result<i64, PersistenceError> {
        mutations::vehicles::insert_vehicle(&mut self.conn, vehicle)
    }

    /// Retrieves a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_vehicle(&mut self, vehicle_id: i64) -> Result<Option<Vehicle>, PersistenceError> {
        queries::vehicles::get_vehicle(&mut self.conn, vehicle_id)
    }

    /// Lists a customer's vehicles.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_vehicles_for_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Vehicle>, PersistenceError> {
        queries::vehicles::list_vehicles_for_customer(&mut self.conn, customer_id)
    }

    /// Overwrites a vehicle's details.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Conflict`.
    pub fn update_vehicle(
        &mut self,
        vehicle_id: i64,
        vehicle: &Vehicle,
    ) -> Result<(), PersistenceError> {
        mutations::vehicles::update_vehicle(&mut self.conn, vehicle_id, vehicle)
    }

    /// Deletes a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the vehicle does not exist.
    pub fn delete_vehicle(&mut self, vehicle_id: i64) -> Result<(), PersistenceError> {
        mutations::vehicles::delete_vehicle(&mut self.conn, vehicle_id)
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    /// Creates an inventory item.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the name is taken.
    pub fn insert_inventory_item(&mut self, item: &InventoryItem) -> Result<i64, PersistenceError> {
        mutations::inventory::insert_inventory_item(&mut self.conn, item)
    }

    /// Retrieves an inventory item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_inventory_item(
        &mut self,
        item_id: i64,
    ) -> Result<Option<InventoryItem>, PersistenceError> {
        queries::inventory::get_inventory_item(&mut self.conn, item_id)
    }

    /// Lists all inventory items by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_inventory(&mut self) -> Result<Vec<InventoryItem>, PersistenceError> {
        queries::inventory::list_inventory(&mut self.conn)
    }

    /// Lists low-stock items, lowest quantity first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_low_stock(&mut self) -> Result<Vec<InventoryItem>, PersistenceError> {
        queries::inventory::list_low_stock(&mut self.conn)
    }

    /// Overwrites an inventory item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Conflict`.
    pub fn update_inventory_item(
        &mut self,
        item_id: i64,
        item: &InventoryItem,
    ) -> Result<(), PersistenceError> {
        mutations::inventory::update_inventory_item(&mut self.conn, item_id, item)
    }

    /// Deletes an inventory item.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the item does not exist, or
    /// `PersistenceError::Conflict` while an open job card lists it.
    pub fn delete_inventory_item(&mut self, item_id: i64) -> Result<(), PersistenceError> {
        mutations::inventory::delete_inventory_item(&mut self.conn, item_id)
    }

    /// Adds received stock to an item and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the item does not exist.
    pub fn receive_stock(
        &mut self,
        item_id: i64,
        quantity: i64,
    ) -> Result<InventoryItem, PersistenceError> {
        mutations::inventory::receive_stock(&mut self.conn, item_id, quantity)?;
        queries::inventory::get_inventory_item(&mut self.conn, item_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Inventory item with ID {item_id} not found"))
        })
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Checks whether a live appointment holds the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_slot_taken(&mut self, slot: &Slot) -> Result<bool, PersistenceError> {
        queries::appointments::is_slot_taken(&mut self.conn, slot)
    }

    /// Inserts a newly booked appointment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` with [`SLOT_TAKEN`] if the slot
    /// is already held.
    pub fn insert_appointment(&mut self, appointment: &Appointment) -> Result<i64, PersistenceError> {
        mutations::appointments::insert_appointment(&mut self.conn, appointment)
    }

    /// Retrieves an appointment with its job card.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)
    }

    /// Persists a workflow transition guarded by the version it was read at.
    ///
    /// # Errors
    ///
    /// Returns `StaleWrite`, `InsufficientStock`, or `Conflict` when the
    /// write is rejected; nothing is written in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        expected_version: i64,
    ) -> Result<Appointment, PersistenceError> {
        mutations::appointments::persist_transition(&mut self.conn, result, expected_version)
    }

    /// Lists a customer's appointments, latest slot first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_appointments_for_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments_for_customer(&mut self.conn, customer_id)
    }

    /// Lists every appointment, latest slot first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_appointments(&mut self) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_all_appointments(&mut self.conn)
    }

    /// Lists a mechanic's assigned appointments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_appointments_for_mechanic(
        &mut self,
        mechanic_id: i64,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments_for_mechanic(&mut self.conn, mechanic_id)
    }

    /// Lists scheduled appointments with no mechanic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_unassigned_appointments(&mut self) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_unassigned_appointments(&mut self.conn)
    }

    /// Lists appointments created in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_appointments_created_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments_created_between(&mut self.conn, start, end)
    }

    /// Lists completed appointments finished in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_completed_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_completed_between(&mut self.conn, start, end)
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Lists all feedback, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_feedback(&mut self) -> Result<Vec<Feedback>, PersistenceError> {
        queries::feedback::list_feedback(&mut self.conn)
    }

    /// Lists a customer's feedback.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_feedback_for_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Feedback>, PersistenceError> {
        queries::feedback::list_feedback_for_customer(&mut self.conn, customer_id)
    }

    /// Lists feedback submitted in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_feedback_created_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<Feedback>, PersistenceError> {
        queries::feedback::list_feedback_created_between(&mut self.conn, start, end)
    }

    // ========================================================================
    // Complaints
    // ========================================================================

    /// Files a complaint.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_complaint(&mut self, complaint: &Complaint) -> Result<i64, PersistenceError> {
        mutations::complaints::insert_complaint(&mut self.conn, complaint)
    }

    /// Retrieves a complaint by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_complaint(
        &mut self,
        complaint_id: i64,
    ) -> Result<Option<Complaint>, PersistenceError> {
        queries::complaints::get_complaint(&mut self.conn, complaint_id)
    }

    /// Lists complaints, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_complaints(
        &mut self,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_complaints(&mut self.conn, status)
    }

    /// Lists a customer's complaints.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_complaints_for_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_complaints_for_customer(&mut self.conn, customer_id)
    }

    /// Lists complaints filed in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_complaints_created_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_complaints_created_between(&mut self.conn, start, end)
    }

    /// Writes a manager's edits to a complaint.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the complaint does not exist.
    pub fn update_complaint(
        &mut self,
        complaint_id: i64,
        complaint: &Complaint,
    ) -> Result<(), PersistenceError> {
        mutations::complaints::update_complaint(&mut self.conn, complaint_id, complaint)
    }

    /// Deletes a complaint.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the complaint does not exist.
    pub fn delete_complaint(&mut self, complaint_id: i64) -> Result<(), PersistenceError> {
        mutations::complaints::delete_complaint(&mut self.conn, complaint_id)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Loads the off-peak day set, falling back to the default when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is unreadable.
    pub fn load_off_peak_days(&mut self) -> Result<OffPeakDays, PersistenceError> {
        queries::settings::load_off_peak_days(&mut self.conn)
    }

    /// Replaces the off-peak day set.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_off_peak_days(&mut self, days: &OffPeakDays) -> Result<(), PersistenceError> {
        mutations::settings::save_off_peak_days(&mut self.conn, days)
    }
}
