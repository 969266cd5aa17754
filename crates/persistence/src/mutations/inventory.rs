// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory mutations.
//!
//! Quantity changes are single `UPDATE ... SET quantity = quantity + n`
//! statements so concurrent receipts and debits never lose updates.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::{AppointmentStatus, InventoryItem};
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{appointment_parts, appointments, inventory_items};
use crate::error::{PersistenceError, conflict_as};
use crate::timestamps::now_timestamp;

const DUPLICATE_NAME: &str = "An inventory item with this name already exists";

/// Creates an inventory item.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the name is already in use.
pub fn insert_inventory_item(
    conn: &mut SqliteConnection,
    item: &InventoryItem,
) -> Result<i64, PersistenceError> {
    info!(name = %item.name, quantity = item.quantity, "Creating inventory item");

    let now: String = now_timestamp()?;
    diesel::insert_into(inventory_items::table)
        .values((
            inventory_items::name.eq(&item.name),
            inventory_items::part_number.eq(item.part_number.as_deref()),
            inventory_items::supplier.eq(item.supplier.as_deref()),
            inventory_items::quantity.eq(item.quantity),
            inventory_items::unit.eq(&item.unit),
            inventory_items::cost_price_cents.eq(item.cost_price.cents()),
            inventory_items::sale_price_cents.eq(item.sale_price.cents()),
            inventory_items::low_stock_threshold.eq(item.low_stock_threshold),
            inventory_items::created_at.eq(&now),
            inventory_items::updated_at.eq(&now),
        ))
        .execute(conn)
        .map_err(|e| conflict_as(e, DUPLICATE_NAME))?;

    get_last_insert_rowid(conn)
}

/// Overwrites every field of an inventory item.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the item does not exist, or
/// `PersistenceError::Conflict` if the new name is taken.
pub fn update_inventory_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    item: &InventoryItem,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(inventory_items::table)
        .filter(inventory_items::item_id.eq(item_id))
        .set((
            inventory_items::name.eq(&item.name),
            inventory_items::part_number.eq(item.part_number.as_deref()),
            inventory_items::supplier.eq(item.supplier.as_deref()),
            inventory_items::quantity.eq(item.quantity),
            inventory_items::unit.eq(&item.unit),
            inventory_items::cost_price_cents.eq(item.cost_price.cents()),
            inventory_items::sale_price_cents.eq(item.sale_price.cents()),
            inventory_items::low_stock_threshold.eq(item.low_stock_threshold),
            inventory_items::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)
        .map_err(|e| conflict_as(e, DUPLICATE_NAME))?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Inventory item with ID {item_id} not found"
        )));
    }
    Ok(())
}

/// Deletes an inventory item. Closed job cards keep their copied name and price.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the item does not exist, or
/// `PersistenceError::Conflict` if a scheduled or in-progress job card
/// still lists it.
pub fn delete_inventory_item(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> Result<(), PersistenceError> {
    info!(item_id, "Deleting inventory item");

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let open_job_cards: i64 = appointment_parts::table
            .inner_join(appointments::table)
            .filter(appointment_parts::inventory_item_id.eq(item_id))
            .filter(appointments::status.eq_any([
                AppointmentStatus::Scheduled.as_str(),
                AppointmentStatus::InProgress.as_str(),
            ]))
            .select(diesel::dsl::count_distinct(appointments::appointment_id))
            .first(conn)?;

        if open_job_cards > 0 {
            warn!(item_id, open_job_cards, "Inventory item still in use");
            return Err(PersistenceError::Conflict(format!(
                "Inventory item is listed on {open_job_cards} open job card(s) and cannot be deleted"
            )));
        }

        let rows_affected: usize = diesel::delete(inventory_items::table)
            .filter(inventory_items::item_id.eq(item_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Inventory item with ID {item_id} not found"
            )));
        }
        Ok(())
    })
}

/// Adds received stock to an item's on-hand quantity.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the item does not exist.
pub fn receive_stock(
    conn: &mut SqliteConnection,
    item_id: i64,
    quantity: i64,
) -> Result<(), PersistenceError> {
    info!(item_id, quantity, "Receiving stock");

    let rows_affected: usize = diesel::update(inventory_items::table)
        .filter(inventory_items::item_id.eq(item_id))
        .set((
            inventory_items::quantity.eq(inventory_items::quantity + quantity),
            inventory_items::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Inventory item with ID {item_id} not found"
        )));
    }
    Ok(())
}

/// Consumes stock, failing if fewer than `quantity` units are on hand.
///
/// Must run inside the caller's transaction so a failed debit rolls back
/// the surrounding write.
pub(crate) fn debit_stock(
    conn: &mut SqliteConnection,
    item_id: i64,
    quantity: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(inventory_items::table)
        .filter(inventory_items::item_id.eq(item_id))
        .filter(inventory_items::quantity.ge(quantity))
        .set((
            inventory_items::quantity.eq(inventory_items::quantity - quantity),
            inventory_items::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            inventory_items::table.filter(inventory_items::item_id.eq(item_id)),
        ))
        .get_result(conn)?;

        warn!(item_id, quantity, exists, "Stock debit rejected");
        if !exists {
            return Err(PersistenceError::StockItemMissing {
                inventory_item_id: item_id,
            });
        }
        return Err(PersistenceError::InsufficientStock {
            inventory_item_id: item_id,
            requested: quantity,
        });
    }
    Ok(())
}
