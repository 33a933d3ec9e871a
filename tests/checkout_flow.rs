mod common;

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use storefront_api::{
    dto::{cart::AddCartItemRequest, checkout::CheckoutRequest},
    entity::{OrderItems, Orders, orders::OrderStatus},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::Pagination,
    services::{cart_service, checkout_service, order_service},
    state::AppState,
};
use uuid::Uuid;

use common::{
    checkout_form, create_category, create_priced_product, create_user, seed_catalog, set_price,
    setup_state,
};

async fn add(state: &AppState, session: Option<&str>, product_id: Uuid, quantity: i64) -> anyhow::Result<String> {
    let cart = cart_service::add_item(
        state,
        session,
        AddCartItemRequest {
            product_id: Some(product_id.to_string()),
            quantity: Some(quantity),
        },
    )
    .await?;
    Ok(cart.session_id)
}

async fn order_count(state: &AppState) -> anyhow::Result<u64> {
    Ok(Orders::find().count(&state.orm).await?)
}

#[tokio::test]
async fn checkout_freezes_prices_and_empties_the_cart() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, p2) = seed_catalog(&state).await?;
    let session = add(&state, None, p1.id, 1).await?;
    add(&state, Some(&session), p2.id, 2).await?;

    let preview = checkout_service::preview(&state, &session).await?;
    assert_eq!(preview.total, 110_000);
    assert_eq!(preview.currency, "VND");
    assert_eq!(preview.items.len(), 2);

    let placed = checkout_service::submit(&state, &session, checkout_form(), None).await?;
    assert!(placed.success);

    let cart = cart_service::get_or_create(&state, Some(&session)).await?;
    assert!(!cart.is_new());
    assert!(cart.view().items.is_empty());

    let order = Orders::find_by_id(placed.order_id)
        .one(&state.orm)
        .await?
        .expect("order stored");
    assert_eq!(order.total, preview.total);
    assert_eq!(order.currency, "VND");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_method, "cod");
    assert_eq!(order.session_id.as_deref(), Some(session.as_str()));
    assert_eq!(order.user_id, None);
    assert_eq!(order_count(&state).await?, 1);

    // Later catalog changes do not reach the stored order.
    set_price(&state, p1.id, 99_000).await?;
    let orders = order_service::list_all(&state, Pagination::default()).await?;
    let stored = &orders[0];
    assert_eq!(stored.id, placed.order_id);
    assert_eq!(stored.items.len(), 2);
    for item in &stored.items {
        let expected = if item.product_id == p1.id { 50_000 } else { 30_000 };
        assert_eq!(item.price_at_order.amount(), expected);
        let product = item.product.as_ref().expect("live product");
        assert_eq!(product.id, item.product_id);
    }
    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected_without_writes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, _) = seed_catalog(&state).await?;
    let session = add(&state, None, p1.id, 2).await?;
    cart_service::set_quantity(
        &state,
        &session,
        &p1.id.to_string(),
        storefront_api::dto::cart::UpdateCartItemRequest { quantity: Some(0) },
    )
    .await?;

    let err = checkout_service::submit(&state, &session, checkout_form(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Cart is empty"));
    assert_eq!(order_count(&state).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn failure_after_the_order_insert_rolls_everything_back() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, p2) = seed_catalog(&state).await?;
    let session = add(&state, None, p1.id, 1).await?;
    add(&state, Some(&session), p2.id, 2).await?;

    // Clearing the cart is the last write of a checkout; make it fail.
    state
        .orm
        .execute_unprepared(
            "CREATE TRIGGER keep_cart_items BEFORE DELETE ON cart_items \
             BEGIN SELECT RAISE(ABORT, 'cart items are locked'); END;",
        )
        .await?;

    let result = checkout_service::submit(&state, &session, checkout_form(), None).await;
    assert!(result.is_err());

    assert_eq!(order_count(&state).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    let cart = cart_service::get_or_create(&state, Some(&session)).await?;
    assert!(!cart.is_new());
    assert_eq!(cart.view().items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn unknown_cart_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let err = checkout_service::submit(&state, "nobody", checkout_form(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Cart")));
    Ok(())
}

#[tokio::test]
async fn preview_of_a_missing_or_empty_cart_is_zero() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let preview = checkout_service::preview(&state, "guest").await?;
    assert_eq!(preview.session_id, "guest");
    assert!(preview.items.is_empty());
    assert_eq!(preview.total, 0);
    assert_eq!(preview.currency, "VND");

    let session = cart_service::get_or_create(&state, None).await?.into_view().session_id;
    let preview = checkout_service::preview(&state, &session).await?;
    assert_eq!(preview.session_id, session);
    assert_eq!(preview.total, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_forms_leave_the_cart_untouched() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, _) = seed_catalog(&state).await?;
    let session = add(&state, None, p1.id, 1).await?;

    let missing_address = CheckoutRequest {
        shipping_address: Some("  ".into()),
        ..checkout_form()
    };
    let err = checkout_service::submit(&state, &session, missing_address, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let missing_phone = CheckoutRequest {
        phone: None,
        ..checkout_form()
    };
    assert!(checkout_service::submit(&state, &session, missing_phone, None).await.is_err());

    let card_without_holder = CheckoutRequest {
        payment_method: Some("card".into()),
        card_number: Some("4111111111111111".into()),
        ..checkout_form()
    };
    assert!(
        checkout_service::submit(&state, &session, card_without_holder, None)
            .await
            .is_err()
    );

    assert_eq!(order_count(&state).await?, 0);
    let cart = cart_service::get_or_create(&state, Some(&session)).await?.into_view();
    assert_eq!(cart.items.len(), 1);

    let card = CheckoutRequest {
        payment_method: Some("card".into()),
        card_holder: Some("NGUYEN VAN A".into()),
        ..checkout_form()
    };
    let placed = checkout_service::submit(&state, &session, card, None).await?;
    let order = Orders::find_by_id(placed.order_id).one(&state.orm).await?.expect("order");
    assert_eq!(order.payment_method, "card");
    Ok(())
}

#[tokio::test]
async fn signed_in_checkout_lands_in_the_users_history() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, _) = seed_catalog(&state).await?;
    let user_id = create_user(&state, "user", "demo@example.com").await?;
    let user = AuthUser {
        user_id,
        role: "user".into(),
    };

    let session = add(&state, None, p1.id, 3).await?;
    let placed = checkout_service::submit(&state, &session, checkout_form(), Some(&user)).await?;

    let history = order_service::list_by_user(&state, user_id).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, placed.order_id);
    assert_eq!(history[0].user_id, Some(user_id));
    assert_eq!(history[0].total, 150_000);
    assert_eq!(history[0].items[0].quantity, 3);
    Ok(())
}

#[tokio::test]
async fn unknown_user_in_token_leaves_the_order_anonymous() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, _) = seed_catalog(&state).await?;
    let ghost = AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    };

    let session = add(&state, None, p1.id, 1).await?;
    let placed = checkout_service::submit(&state, &session, checkout_form(), Some(&ghost)).await?;

    let order = Orders::find_by_id(placed.order_id).one(&state.orm).await?.expect("order");
    assert_eq!(order.user_id, None);
    Ok(())
}

#[tokio::test]
async fn mixed_currency_carts_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (p1, _) = seed_catalog(&state).await?;
    let category = create_category(&state, "imports", 2).await?;
    let usd = create_priced_product(&state, category.id, "usd-bear", 1_500, "USD").await?;

    let session = add(&state, None, p1.id, 1).await?;
    add(&state, Some(&session), usd.id, 1).await?;

    assert!(matches!(
        checkout_service::preview(&state, &session).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        checkout_service::submit(&state, &session, checkout_form(), None).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(order_count(&state).await?, 0);
    Ok(())
}
