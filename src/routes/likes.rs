use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::likes::AddLikeRequest,
    error::{AppResult, ErrorBody},
    middleware::{json::AppJson, session::LikesSession},
    models::LikesView,
    services::like_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/likes", get(list_likes))
        .route("/likes/items", post(add_like).delete(clear_likes))
        .route("/likes/items/{product_id}", delete(remove_like))
}

#[utoipa::path(
    get,
    path = "/likes",
    params(
        ("x-likes-session" = Option<String>, Header, description = "Likes session token")
    ),
    responses(
        (status = 200, description = "Liked products, newest first", body = LikesView)
    ),
    tag = "Likes"
)]
pub async fn list_likes(
    State(state): State<AppState>,
    LikesSession(session): LikesSession,
) -> AppResult<Json<LikesView>> {
    let likes = like_service::list(&state, session.as_deref()).await?;
    Ok(Json(likes))
}

#[utoipa::path(
    post,
    path = "/likes/items",
    params(
        ("x-likes-session" = Option<String>, Header, description = "Likes session token")
    ),
    request_body = AddLikeRequest,
    responses(
        (status = 200, description = "Product liked", body = LikesView),
        (status = 400, description = "productId missing", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Likes"
)]
pub async fn add_like(
    State(state): State<AppState>,
    LikesSession(session): LikesSession,
    AppJson(payload): AppJson<AddLikeRequest>,
) -> AppResult<Json<LikesView>> {
    let likes = like_service::add(&state, session.as_deref(), payload).await?;
    Ok(Json(likes))
}

#[utoipa::path(
    delete,
    path = "/likes/items/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("x-likes-session" = String, Header, description = "Likes session token")
    ),
    responses(
        (status = 200, description = "Like removed if it existed", body = LikesView),
        (status = 400, description = "Session header missing", body = ErrorBody),
    ),
    tag = "Likes"
)]
pub async fn remove_like(
    State(state): State<AppState>,
    session: LikesSession,
    Path(product_id): Path<String>,
) -> AppResult<Json<LikesView>> {
    let session = session.require()?;
    let likes = like_service::remove(&state, &session, &product_id).await?;
    Ok(Json(likes))
}

#[utoipa::path(
    delete,
    path = "/likes/items",
    params(
        ("x-likes-session" = String, Header, description = "Likes session token")
    ),
    responses(
        (status = 200, description = "All likes removed", body = LikesView),
        (status = 400, description = "Session header missing", body = ErrorBody),
    ),
    tag = "Likes"
)]
pub async fn clear_likes(
    State(state): State<AppState>,
    session: LikesSession,
) -> AppResult<Json<LikesView>> {
    let session = session.require()?;
    let likes = like_service::clear(&state, &session).await?;
    Ok(Json(likes))
}
