use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::{AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::Order,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders of the signed-in user, newest first", body = Vec<Order>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_by_user(&state, user.user_id).await?;
    Ok(Json(orders))
}
