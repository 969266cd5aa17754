// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory routes, including the text-message reorder.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    routing::{get, post},
};
use servicebay_api::handlers::inventory::{
    create_inventory_item, delete_inventory_item, finalize_sms_order, get_inventory_item,
    list_inventory, list_low_stock, prepare_sms_order, update_inventory_item,
};
use servicebay_api::{
    CreateInventoryItemRequest, InventoryItemInfo, SmsOrderPlan, SmsOrderRequest,
    SmsOrderResponse, UpdateInventoryItemRequest,
};
use servicebay_notify::{NotifyError, SmsReceipt};
use time::OffsetDateTime;

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/inventory",
            get(handle_list_inventory).post(handle_create_item),
        )
        .route("/inventory/low-stock", get(handle_low_stock))
        .route(
            "/inventory/{id}",
            get(handle_get_item)
                .put(handle_update_item)
                .delete(handle_delete_item),
        )
        .route("/inventory/{id}/order", post(handle_sms_order))
}

async fn handle_list_inventory(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let items: Vec<InventoryItemInfo> = list_inventory(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("items", &items)
}

async fn handle_low_stock(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let items: Vec<InventoryItemInfo> = list_low_stock(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("items", &items)
}

async fn handle_get_item(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let item: InventoryItemInfo = get_inventory_item(&mut persistence, item_id, &user)?;
    drop(persistence);

    Envelope::ok().with("item", &item)
}

async fn handle_create_item(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateInventoryItemRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let item: InventoryItemInfo = create_inventory_item(&mut persistence, &req, &user)?;
    drop(persistence);

    Envelope::created()
        .message("Inventory item created")
        .with("item", &item)
}

async fn handle_update_item(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
    Json(req): Json<UpdateInventoryItemRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let item: InventoryItemInfo = update_inventory_item(&mut persistence, item_id, &req, &user)?;
    drop(persistence);

    Envelope::ok()
        .message("Inventory item updated")
        .with("item", &item)
}

async fn handle_delete_item(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_inventory_item(&mut persistence, item_id, &user)?;
    drop(persistence);

    Ok(Envelope::ok().message("Inventory item deleted"))
}

/// Handler for POST `/inventory/{id}/order`.
///
/// The storage lock is released before the SMS provider is contacted. A
/// provider failure is reported as 502.
async fn handle_sms_order(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
    Json(req): Json<SmsOrderRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let plan: SmsOrderPlan = prepare_sms_order(
        &mut persistence,
        item_id,
        &req,
        &user,
        &app_state.contacts,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    let outcome: Result<SmsReceipt, NotifyError> =
        app_state.notifier.send_sms(&plan.to, &plan.body).await;
    let order: SmsOrderResponse = finalize_sms_order(plan, outcome)?;

    Envelope::ok()
        .message("Order SMS sent successfully")
        .with("order_id", &order.order_id)?
        .with("message_sid", &order.message_sid)
}
