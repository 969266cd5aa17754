// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::{InventoryItem, Money};

use crate::diesel_schema::inventory_items;
use crate::error::PersistenceError;

/// Diesel Queryable struct for inventory rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = inventory_items)]
struct InventoryRow {
    item_id: i64,
    name: String,
    part_number: Option<String>,
    supplier: Option<String>,
    quantity: i64,
    unit: String,
    cost_price_cents: i64,
    sale_price_cents: i64,
    low_stock_threshold: i64,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            item_id: Some(row.item_id),
            name: row.name,
            part_number: row.part_number,
            supplier: row.supplier,
            quantity: row.quantity,
            unit: row.unit,
            cost_price: Money::from_cents(row.cost_price_cents),
            sale_price: Money::from_cents(row.sale_price_cents),
            low_stock_threshold: row.low_stock_threshold,
        }
    }
}

/// Retrieves an inventory item by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the item is not found.
pub fn get_inventory_item(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> Result<Option<InventoryItem>, PersistenceError> {
    let result: Result<InventoryRow, diesel::result::Error> = inventory_items::table
        .filter(inventory_items::item_id.eq(item_id))
        .select(InventoryRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(InventoryItem::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every inventory item ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_inventory(conn: &mut SqliteConnection) -> Result<Vec<InventoryItem>, PersistenceError> {
    let rows: Vec<InventoryRow> = inventory_items::table
        .order(inventory_items::name.asc())
        .select(InventoryRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(InventoryItem::from).collect())
}

/// Lists items at or below their low-stock threshold, lowest quantity first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_low_stock(conn: &mut SqliteConnection) -> Result<Vec<InventoryItem>, PersistenceError> {
    let rows: Vec<InventoryRow> = inventory_items::table
        .filter(inventory_items::quantity.le(inventory_items::low_stock_threshold))
        .order((inventory_items::quantity.asc(), inventory_items::name.asc()))
        .select(InventoryRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(InventoryItem::from).collect())
}
