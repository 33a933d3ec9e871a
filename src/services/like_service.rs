use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::likes::AddLikeRequest,
    entity::{
        likes::{ActiveModel as LikeActive, Column as LikeCol, Entity as Likes},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    models::{LikesView, product_from_entity},
    services::{cart_service::new_session_id, catalog_service::{find_product, parse_id}},
    state::AppState,
};

/// Liked products for a session, newest first. Without a session a fresh
/// token is handed out and nothing is stored until the first like.
pub async fn list(state: &AppState, session_id: Option<&str>) -> AppResult<LikesView> {
    match session_id {
        Some(session_id) => load_view(&state.orm, session_id).await,
        None => Ok(LikesView {
            session_id: new_session_id(),
            items: Vec::new(),
        }),
    }
}

pub async fn add(
    state: &AppState,
    session_id: Option<&str>,
    payload: AddLikeRequest,
) -> AppResult<LikesView> {
    let raw_product_id = payload
        .product_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("productId is required".into()))?;

    let txn = state.orm.begin().await?;
    let product = find_product(&txn, raw_product_id).await?;
    let session_id = session_id.map_or_else(new_session_id, str::to_owned);

    Likes::insert(LikeActive {
        id: Set(Uuid::new_v4()),
        session_id: Set(session_id.clone()),
        product_id: Set(product.id),
        created_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::columns([LikeCol::SessionId, LikeCol::ProductId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    let view = load_view(&txn, &session_id).await?;
    txn.commit().await?;

    tracing::info!(session_id = %session_id, product_id = %product.id, "product liked");
    Ok(view)
}

/// Best effort: removing a like that does not exist is not an error.
pub async fn remove(state: &AppState, session_id: &str, raw_product_id: &str) -> AppResult<LikesView> {
    if let Some(product_id) = parse_id(raw_product_id) {
        Likes::delete_many()
            .filter(LikeCol::SessionId.eq(session_id))
            .filter(LikeCol::ProductId.eq(product_id))
            .exec(&state.orm)
            .await?;
    }
    load_view(&state.orm, session_id).await
}

pub async fn clear(state: &AppState, session_id: &str) -> AppResult<LikesView> {
    Likes::delete_many()
        .filter(LikeCol::SessionId.eq(session_id))
        .exec(&state.orm)
        .await?;
    Ok(LikesView {
        session_id: session_id.to_string(),
        items: Vec::new(),
    })
}

async fn load_view<C>(conn: &C, session_id: &str) -> AppResult<LikesView>
where
    C: ConnectionTrait,
{
    let items = Likes::find()
        .filter(LikeCol::SessionId.eq(session_id))
        .order_by_desc(LikeCol::CreatedAt)
        .find_also_related(Products)
        .all(conn)
        .await?
        .into_iter()
        .filter_map(|(_, product)| product.map(product_from_entity))
        .collect();

    Ok(LikesView {
        session_id: session_id.to_string(),
        items,
    })
}
