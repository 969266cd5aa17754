// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory maintenance and supplier reorders.

use servicebay_domain::{
    EmailAddress, InventoryItem, Money, PhoneNumber, optional_text, require_text,
    validate_inventory_item, validate_positive_quantity,
};
use servicebay_notify::{
    NotifyError, OutboundEmail, SmsOrder, SmsReceipt, inventory_order_sms, supplier_order_email,
};
use servicebay_persistence::{SqlitePersistence, UserData};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{ApiResult, ContactSettings, inventory_item_info, load_user, not_found};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{
    ApiError, translate_domain_error, translate_notify_error, translate_persistence_error,
};
use crate::request_response::{
    CreateInventoryItemRequest, EmailOrderRequest, InventoryItemInfo, ReceiveStockRequest,
    SmsOrderRequest, SmsOrderResponse, UpdateInventoryItemRequest,
};

fn load_item(persistence: &mut SqlitePersistence, item_id: i64) -> Result<InventoryItem, ApiError> {
    persistence
        .get_inventory_item(item_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Inventory item", String::from("Item not found")))
}

fn money(field: &'static str, cents: i64) -> Result<Money, ApiError> {
    Money::non_negative(field, cents).map_err(translate_domain_error)
}

/// Lists all stock by name.
///
/// # Errors
///
/// Returns an error if the caller is a customer or the query fails.
pub fn list_inventory(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<InventoryItemInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewInventory)?;

    persistence
        .list_inventory()
        .map_err(translate_persistence_error)?
        .iter()
        .map(inventory_item_info)
        .collect()
}

/// Lists items at or below their reorder threshold.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_low_stock(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<InventoryItemInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ManageInventory)?;

    persistence
        .list_low_stock()
        .map_err(translate_persistence_error)?
        .iter()
        .map(inventory_item_info)
        .collect()
}

/// Fetches one item.
///
/// # Errors
///
/// Returns an error if the item does not exist.
pub fn get_inventory_item(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    user: &AuthenticatedUser,
) -> Result<InventoryItemInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ViewInventory)?;
    inventory_item_info(&load_item(persistence, item_id)?)
}

/// Adds a stock item.
///
/// Quantity defaults to 0, unit to `units`, and threshold to 5.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - A field fails validation
/// - An item with the same name exists
pub fn create_inventory_item(
    persistence: &mut SqlitePersistence,
    request: &CreateInventoryItemRequest,
    user: &AuthenticatedUser,
) -> Result<InventoryItemInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageInventory)?;

    let mut item: InventoryItem = InventoryItem {
        item_id: None,
        name: require_text("name", &request.name).map_err(translate_domain_error)?,
        part_number: optional_text(request.part_number.as_deref()),
        supplier: optional_text(request.supplier.as_deref()),
        quantity: request.quantity.unwrap_or(0),
        unit: optional_text(request.unit.as_deref())
            .unwrap_or_else(|| InventoryItem::DEFAULT_UNIT.to_string()),
        cost_price: money("cost_price", request.cost_price_cents)?,
        sale_price: money("sale_price", request.sale_price_cents)?,
        low_stock_threshold: request
            .low_stock_threshold
            .unwrap_or(InventoryItem::DEFAULT_LOW_STOCK_THRESHOLD),
    };
    validate_inventory_item(&item).map_err(translate_domain_error)?;

    let item_id: i64 = persistence
        .insert_inventory_item(&item)
        .map_err(translate_persistence_error)?;
    item.item_id = Some(item_id);

    info!(item_id, name = %item.name, quantity = item.quantity, "Inventory item added");
    inventory_item_info(&item)
}

/// Applies a partial update to a stock item.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the item does not
/// exist, a field fails validation, or the new name is taken.
pub fn update_inventory_item(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    request: &UpdateInventoryItemRequest,
    user: &AuthenticatedUser,
) -> Result<InventoryItemInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageInventory)?;

    let mut item: InventoryItem = load_item(persistence, item_id)?;
    if let Some(name) = &request.name {
        item.name = require_text("name", name).map_err(translate_domain_error)?;
    }
    if request.part_number.is_some() {
        item.part_number = optional_text(request.part_number.as_deref());
    }
    if request.supplier.is_some() {
        item.supplier = optional_text(request.supplier.as_deref());
    }
    if let Some(quantity) = request.quantity {
        item.quantity = quantity;
    }
    if let Some(unit) = &request.unit {
        item.unit = unit.trim().to_string();
    }
    if let Some(cents) = request.cost_price_cents {
        item.cost_price = money("cost_price", cents)?;
    }
    if let Some(cents) = request.sale_price_cents {
        item.sale_price = money("sale_price", cents)?;
    }
    if let Some(threshold) = request.low_stock_threshold {
        item.low_stock_threshold = threshold;
    }
    validate_inventory_item(&item).map_err(translate_domain_error)?;

    persistence
        .update_inventory_item(item_id, &item)
        .map_err(translate_persistence_error)?;

    info!(item_id, "Inventory item updated");
    inventory_item_info(&item)
}

/// Removes a stock item.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the item does not exist.
pub fn delete_inventory_item(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    user: &AuthenticatedUser,
) -> Result<(), ApiError> {
    AuthorizationService::authorize(user, Action::ManageInventory)?;

    persistence
        .delete_inventory_item(item_id)
        .map_err(translate_persistence_error)?;

    info!(item_id, "Inventory item deleted");
    Ok(())
}

/// Records a delivery. The increment happens in storage.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the quantity is not
/// positive, or the item does not exist.
pub fn receive_stock(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    request: &ReceiveStockRequest,
    user: &AuthenticatedUser,
) -> Result<InventoryItemInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageInventory)?;

    let quantity: i64 = validate_positive_quantity("quantity_received", request.quantity_received)
        .map_err(translate_domain_error)?;

    let item: InventoryItem = persistence
        .receive_stock(item_id, quantity)
        .map_err(translate_persistence_error)?;

    info!(item_id, received = quantity, on_hand = item.quantity, "Stock received");
    inventory_item_info(&item)
}

/// Builds a reorder email to a supplier.
///
/// The email is returned for best-effort delivery; a send failure does not
/// fail the request.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the address or
/// quantity is invalid, or the item does not exist.
pub fn email_order(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    request: &EmailOrderRequest,
    user: &AuthenticatedUser,
) -> Result<ApiResult<()>, ApiError> {
    AuthorizationService::authorize(user, Action::OrderStock)?;

    let supplier: EmailAddress =
        EmailAddress::parse(&request.supplier_email).map_err(|e| ApiError::InvalidInput {
            field: String::from("supplier_email"),
            message: e.to_string(),
        })?;
    let quantity: i64 =
        validate_positive_quantity("quantity", request.quantity).map_err(translate_domain_error)?;

    let item: InventoryItem = load_item(persistence, item_id)?;
    let email: OutboundEmail = supplier_order_email(&item, quantity, supplier.value());

    info!(item_id, quantity, supplier = %supplier, "Supplier order queued");
    Ok(ApiResult::with_notifications((), vec![email]))
}

/// A text-message reorder ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsOrderPlan {
    pub order_id: String,
    pub to: PhoneNumber,
    pub body: String,
}

/// Validates a text-message reorder and renders the message.
///
/// Sending is left to the caller so no storage lock is held while the
/// SMS provider responds.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `item_id` - The item to reorder
/// * `request` - Destination number and quantity
/// * `user` - The ordering manager
/// * `contacts` - Contact details printed in the message
/// * `now` - Used to derive the order id
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the number is not
/// E.164, the quantity is not positive, or the item does not exist.
pub fn prepare_sms_order(
    persistence: &mut SqlitePersistence,
    item_id: i64,
    request: &SmsOrderRequest,
    user: &AuthenticatedUser,
    contacts: &ContactSettings,
    now: OffsetDateTime,
) -> Result<SmsOrderPlan, ApiError> {
    AuthorizationService::authorize(user, Action::OrderStock)?;

    let to: PhoneNumber =
        PhoneNumber::parse(&request.phone_number).map_err(translate_domain_error)?;
    let quantity: i64 =
        validate_positive_quantity("quantity", request.quantity).map_err(translate_domain_error)?;

    let item: InventoryItem = load_item(persistence, item_id)?;
    let manager: UserData = load_user(persistence, user.user_id)?;

    let order_id: String = format!("ORD-{}", now.unix_timestamp_nanos() / 1_000_000);
    let body: String = inventory_order_sms(&SmsOrder {
        order_id: &order_id,
        item: &item,
        quantity,
        ordered_by: &manager.name,
        contact: contacts.contact_email.as_deref(),
    });

    Ok(SmsOrderPlan { order_id, to, body })
}

/// Turns the provider's answer into the order response.
///
/// # Errors
///
/// Returns `ApiError::NotificationFailed` if the SMS was not accepted.
pub fn finalize_sms_order(
    plan: SmsOrderPlan,
    outcome: Result<SmsReceipt, NotifyError>,
) -> Result<SmsOrderResponse, ApiError> {
    match outcome {
        Ok(receipt) => {
            info!(
                order_id = %plan.order_id,
                to = %plan.to,
                message_sid = %receipt.message_sid,
                "Order SMS sent"
            );
            Ok(SmsOrderResponse {
                order_id: plan.order_id,
                message_sid: receipt.message_sid,
                status: receipt.status,
            })
        }
        Err(e) => {
            warn!(order_id = %plan.order_id, to = %plan.to, error = %e, "Order SMS failed");
            Err(translate_notify_error(&e))
        }
    }
}
