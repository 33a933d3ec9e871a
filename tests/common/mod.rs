#![allow(dead_code)]

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, EntityTrait, QueryFilter, Set};
use storefront_api::{
    db::run_migrations,
    dto::{auth::Claims, checkout::CheckoutRequest},
    entity::{
        categories::{ActiveModel as CategoryActive, Model as CategoryModel},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel},
        users::ActiveModel as UserActive,
    },
    state::AppState,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh, fully migrated in-memory database per test.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = Database::connect("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, JWT_SECRET))
}

pub async fn create_category(state: &AppState, slug: &str, sort_order: i32) -> anyhow::Result<CategoryModel> {
    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug.to_string()),
        name: Set(slug.to_uppercase()),
        description: Set(None),
        sort_order: Set(sort_order),
    }
    .insert(&state.orm)
    .await?;
    Ok(category)
}

pub async fn create_product(
    state: &AppState,
    category_id: Uuid,
    slug: &str,
    price: i64,
) -> anyhow::Result<ProductModel> {
    create_priced_product(state, category_id, slug, price, "VND").await
}

pub async fn create_priced_product(
    state: &AppState,
    category_id: Uuid,
    slug: &str,
    price: i64,
    currency: &str,
) -> anyhow::Result<ProductModel> {
    let now = Utc::now();
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug.to_string()),
        name: Set(format!("Plush {slug}")),
        description: Set(Some(format!("{slug} description"))),
        category_id: Set(category_id),
        price: Set(price),
        currency: Set(currency.to_string()),
        image_url: Set(format!("/images/{slug}.jpg")),
        rating: Set(4.5),
        rating_count: Set(10),
        stock: Set(100),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

/// Two VND products at 50 000 and 30 000.
pub async fn seed_catalog(state: &AppState) -> anyhow::Result<(ProductModel, ProductModel)> {
    let category = create_category(state, "character", 1).await?;
    let p1 = create_product(state, category.id, "p1", 50_000).await?;
    let p2 = create_product(state, category.id, "p2", 30_000).await?;
    Ok((p1, p2))
}

pub async fn set_price(state: &AppState, product_id: Uuid, price: i64) -> anyhow::Result<()> {
    Products::update_many()
        .col_expr(ProdCol::Price, Expr::value(price))
        .filter(ProdCol::Id.eq(product_id))
        .exec(&state.orm)
        .await?;
    Ok(())
}

pub async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".into()),
        name: Set(None),
        role: Set(role.to_string()),
        preferred_locale: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

pub fn bearer(user_id: Uuid, role: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("sign token");
    format!("Bearer {token}")
}

pub fn checkout_form() -> CheckoutRequest {
    CheckoutRequest {
        payment_method: Some("cod".into()),
        shipping_address: Some("12 Ly Thuong Kiet, Ha Noi".into()),
        phone: Some("0901234567".into()),
        ..Default::default()
    }
}
