use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{DeletedOrder, StatusUpdate, UpdateOrderStatusRequest},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel, OrderStatus},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem, order_from_entity, order_item_from_entity},
    routes::params::Pagination,
    services::catalog_service::parse_id,
    state::AppState,
};

/// A customer's order history, newest first.
pub async fn list_by_user(state: &AppState, user_id: Uuid) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;
    with_items(&state.orm, orders).await
}

/// Every order, newest first, one page at a time.
pub async fn list_all(state: &AppState, pagination: Pagination) -> AppResult<Vec<Order>> {
    let (limit, offset) = pagination.normalize();
    let orders = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?;
    with_items(&state.orm, orders).await
}

/// Move an order to a new status. `completed` purges the order instead of
/// storing the status.
pub async fn update_status(
    state: &AppState,
    actor: &AuthUser,
    raw_order_id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<StatusUpdate> {
    let raw_status = payload
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("status is required".into()))?;
    let status: OrderStatus = raw_status.parse().map_err(AppError::BadRequest)?;
    let order_id = parse_id(raw_order_id).ok_or(AppError::NotFound("Order"))?;

    let txn = state.orm.begin().await?;
    let order = Orders::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    let previous = order.status;

    if status == OrderStatus::Completed {
        OrderItems::delete_many()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .exec(&txn)
            .await?;
        order.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(order_id = %order_id, from = %previous, "order completed and removed");
        audit::record(
            &state.orm,
            Some(actor.user_id),
            "order_complete",
            "orders",
            json!({ "order_id": order_id, "from": previous }),
        )
        .await;

        return Ok(StatusUpdate::Deleted(DeletedOrder {
            deleted: true,
            id: order_id,
        }));
    }

    let mut active = order.into_active_model();
    active.status = Set(status);
    let order = active.update(&txn).await?;
    let mut orders = with_items(&txn, vec![order]).await?;
    txn.commit().await?;

    tracing::info!(order_id = %order_id, from = %previous, to = %status, "order status updated");
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "order_status",
        "orders",
        json!({ "order_id": order_id, "from": previous, "to": status }),
    )
    .await;

    orders
        .pop()
        .map(StatusUpdate::Updated)
        .ok_or(AppError::NotFound("Order"))
}

/// Attach line items and their live product details to each order,
/// preserving the order of `orders`.
async fn with_items<C>(conn: &C, orders: Vec<OrderModel>) -> AppResult<Vec<Order>>
where
    C: ConnectionTrait,
{
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let rows = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(ids))
        .find_also_related(Products)
        .all(conn)
        .await?;

    let mut items: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for (item, product) in rows {
        items
            .entry(item.order_id)
            .or_default()
            .push(order_item_from_entity(item, product));
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let lines = items.remove(&order.id).unwrap_or_default();
            order_from_entity(order, lines)
        })
        .collect())
}
