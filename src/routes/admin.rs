use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::orders::{StatusUpdate, UpdateOrderStatusRequest},
    error::{AppResult, ErrorBody},
    middleware::{
        auth::{AuthUser, ensure_admin},
        json::AppJson,
    },
    models::Order,
    routes::params::Pagination,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(list_all_orders))
        .route("/admin/orders/{id}", patch(update_order_status))
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    params(Pagination),
    responses(
        (status = 200, description = "All orders, newest first (admin only)", body = Vec<Order>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<Order>>> {
    ensure_admin(&user)?;
    let orders = order_service::list_all(&state, pagination).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    patch,
    path = "/admin/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Updated order, or `{deleted, id}` when completed", body = StatusUpdate),
        (status = 400, description = "Invalid status", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<StatusUpdate>> {
    ensure_admin(&user)?;
    let updated = order_service::update_status(&state, &user, &id, payload).await?;
    Ok(Json(updated))
}
