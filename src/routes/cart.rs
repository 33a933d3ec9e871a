use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{AddCartItemRequest, UpdateCartItemRequest},
    error::{AppResult, ErrorBody},
    middleware::{json::AppJson, session::CartSession},
    models::CartView,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_item).delete(clear_cart))
        .route(
            "/cart/items/{product_id}",
            patch(update_item).delete(remove_item),
        )
}

#[utoipa::path(
    get,
    path = "/cart",
    params(
        ("x-cart-session" = Option<String>, Header, description = "Cart session token; a new one is issued when absent or unknown")
    ),
    responses(
        (status = 200, description = "Cart for the session", body = CartView)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
) -> AppResult<Json<CartView>> {
    let lookup = cart_service::get_or_create(&state, session.as_deref()).await?;
    Ok(Json(lookup.into_view()))
}

#[utoipa::path(
    post,
    path = "/cart/items",
    params(
        ("x-cart-session" = Option<String>, Header, description = "Cart session token")
    ),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added, quantities accumulate", body = CartView),
        (status = 400, description = "productId missing", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    AppJson(payload): AppJson<AddCartItemRequest>,
) -> AppResult<Json<CartView>> {
    let cart = cart_service::add_item(&state, session.as_deref(), payload).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    patch,
    path = "/cart/items/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("x-cart-session" = String, Header, description = "Cart session token")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity set, 0 removes the line", body = CartView),
        (status = 400, description = "Session header missing", body = ErrorBody),
        (status = 404, description = "Cart or line not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn update_item(
    State(state): State<AppState>,
    session: CartSession,
    Path(product_id): Path<String>,
    AppJson(payload): AppJson<UpdateCartItemRequest>,
) -> AppResult<Json<CartView>> {
    let session = session.require()?;
    let cart = cart_service::set_quantity(&state, &session, &product_id, payload).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    delete,
    path = "/cart/items/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("x-cart-session" = String, Header, description = "Cart session token")
    ),
    responses(
        (status = 200, description = "Line removed", body = CartView),
        (status = 400, description = "Session header missing", body = ErrorBody),
        (status = 404, description = "Cart or line not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    session: CartSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let session = session.require()?;
    let cart = cart_service::remove_item(&state, &session, &product_id).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    delete,
    path = "/cart/items",
    params(
        ("x-cart-session" = String, Header, description = "Cart session token")
    ),
    responses(
        (status = 200, description = "Cart emptied", body = CartView),
        (status = 400, description = "Session header missing", body = ErrorBody),
        (status = 404, description = "Cart not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<CartView>> {
    let session = session.require()?;
    let cart = cart_service::clear(&state, &session).await?;
    Ok(Json(cart))
}
