use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::checkout::{CheckoutPreview, CheckoutRequest, CheckoutResponse},
    error::{AppResult, ErrorBody},
    middleware::{auth::MaybeUser, json::AppJson, session::CartSession},
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout/preview", get(preview))
        .route("/checkout", post(submit))
}

#[utoipa::path(
    get,
    path = "/checkout/preview",
    params(
        ("x-cart-session" = String, Header, description = "Cart session token")
    ),
    responses(
        (status = 200, description = "Current total, nothing is written", body = CheckoutPreview),
        (status = 400, description = "Session header missing", body = ErrorBody),
    ),
    tag = "Checkout"
)]
pub async fn preview(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<CheckoutPreview>> {
    let session = session.require()?;
    let preview = checkout_service::preview(&state, &session).await?;
    Ok(Json(preview))
}

#[utoipa::path(
    post,
    path = "/checkout",
    params(
        ("x-cart-session" = String, Header, description = "Cart session token")
    ),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed and cart emptied", body = CheckoutResponse),
        (status = 400, description = "Invalid form or empty cart", body = ErrorBody),
        (status = 404, description = "Cart not found", body = ErrorBody),
    ),
    security((), ("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn submit(
    State(state): State<AppState>,
    session: CartSession,
    MaybeUser(user): MaybeUser,
    AppJson(payload): AppJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutResponse>)> {
    let session = session.require()?;
    let placed = checkout_service::submit(&state, &session, payload, user.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}
