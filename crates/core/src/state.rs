// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::{Appointment, Feedback, Role};

/// The authenticated caller a transition is applied on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The caller's user id.
    pub user_id: i64,
    /// The caller's role.
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }
}

/// An inventory decrement that must be applied together with a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDebit {
    pub inventory_item_id: i64,
    pub quantity: i64,
}

/// The result of applying a command to an appointment.
///
/// Nothing is persisted by core. Storage must write `appointment` guarded by
/// the version it was read at, and apply every `stock_debits` entry in the
/// same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The appointment after the transition.
    pub appointment: Appointment,
    /// Inventory to consume, aggregated per item.
    pub stock_debits: Vec<StockDebit>,
    /// Feedback created by the transition, if any.
    pub feedback: Option<Feedback>,
}
