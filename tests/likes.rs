mod common;

use storefront_api::{dto::likes::AddLikeRequest, error::AppError, services::like_service};
use uuid::Uuid;

use common::{seed_catalog, setup_state};

fn like(product_id: Uuid) -> AddLikeRequest {
    AddLikeRequest {
        product_id: Some(product_id.to_string()),
    }
}

#[tokio::test]
async fn listing_without_a_session_hands_out_a_fresh_one() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let first = like_service::list(&state, None).await?;
    let second = like_service::list(&state, None).await?;
    assert!(first.items.is_empty());
    assert_ne!(first.session_id, second.session_id);
    Ok(())
}

#[tokio::test]
async fn liking_is_idempotent() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, p2) = seed_catalog(&state).await?;

    let likes = like_service::add(&state, None, like(p1.id)).await?;
    let session = likes.session_id.clone();
    like_service::add(&state, Some(&session), like(p1.id)).await?;
    let likes = like_service::add(&state, Some(&session), like(p2.id)).await?;

    assert_eq!(likes.session_id, session);
    assert_eq!(likes.items.len(), 2);
    assert!(likes.items.iter().any(|p| p.id == p1.id));

    let listed = like_service::list(&state, Some(&session)).await?;
    assert_eq!(listed.items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn liking_requires_a_known_product() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let err = like_service::add(&state, None, AddLikeRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = like_service::add(&state, None, like(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Product")));
    Ok(())
}

#[tokio::test]
async fn removing_is_best_effort() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, p2) = seed_catalog(&state).await?;
    let session = like_service::add(&state, None, like(p1.id)).await?.session_id;
    like_service::add(&state, Some(&session), like(p2.id)).await?;

    let likes = like_service::remove(&state, &session, &p1.id.to_string()).await?;
    assert_eq!(likes.items.len(), 1);
    assert_eq!(likes.items[0].id, p2.id);

    let likes = like_service::remove(&state, &session, &p1.id.to_string()).await?;
    assert_eq!(likes.items.len(), 1);
    let likes = like_service::remove(&state, &session, "garbage").await?;
    assert_eq!(likes.items.len(), 1);

    let likes = like_service::clear(&state, &session).await?;
    assert!(likes.items.is_empty());
    let likes = like_service::clear(&state, "never-used").await?;
    assert!(likes.items.is_empty());
    Ok(())
}
