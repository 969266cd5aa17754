// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// An appointment changed since it was read.
    StaleWrite {
        appointment_id: i64,
        expected_version: i64,
    },
    /// Not enough stock on hand to consume the requested quantity.
    InsufficientStock {
        inventory_item_id: i64,
        requested: i64,
    },
    /// A job card references an inventory item that has been deleted.
    StockItemMissing { inventory_item_id: i64 },
    /// A stored value could not be decoded.
    CorruptRecord(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Conflict(msg) => write!(f, "{msg}"),
            Self::StaleWrite {
                appointment_id,
                expected_version,
            } => write!(
                f,
                "Appointment {appointment_id} was modified concurrently (expected version {expected_version})"
            ),
            Self::InsufficientStock {
                inventory_item_id,
                requested,
            } => write!(
                f,
                "Insufficient stock for inventory item {inventory_item_id}: {requested} requested"
            ),
            Self::StockItemMissing { inventory_item_id } => write!(
                f,
                "Inventory item {inventory_item_id} no longer exists. Remove it from the job card before completing the job."
            ),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<servicebay_domain::DomainError> for PersistenceError {
    fn from(err: servicebay_domain::DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}

/// Replaces the message of a unique-violation error with a caller-facing one.
pub(crate) fn conflict_as(
    err: diesel::result::Error,
    message: &str,
) -> PersistenceError {
    match PersistenceError::from(err) {
        PersistenceError::Conflict(_) => PersistenceError::Conflict(message.to_string()),
        other => other,
    }
}
