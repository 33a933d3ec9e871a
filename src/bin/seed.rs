use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::PgPool;
use storefront_api::{
    config::AppConfig,
    db::{connect, create_pool, run_migrations},
    pricing::DEFAULT_CURRENCY,
};
use uuid::Uuid;

const CATEGORIES: [(&str, &str, &str, i32); 3] = [
    ("character", "Character", "Plush toys inspired by characters", 1),
    ("food", "Food", "Food-shaped plush toys", 2),
    ("animal", "Animal", "Animal plush toys", 3),
];

// (slug, name, category slug, price, stock)
const PRODUCTS: [(&str, &str, &str, i64, i32); 6] = [
    ("ferris-crab-plush", "Ferris Crab Plush", "character", 250_000, 40),
    ("space-cat-plush", "Space Cat Plush", "character", 320_000, 25),
    ("banh-mi-plush", "Banh Mi Plush", "food", 50_000, 120),
    ("dumpling-plush", "Dumpling Plush", "food", 30_000, 200),
    ("sleepy-panda-plush", "Sleepy Panda Plush", "animal", 180_000, 60),
    ("shiba-plush", "Shiba Plush", "animal", 210_000, 45),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Schema is owned by the migrator; the rows below go through sqlx.
    let orm = connect(&config.database_url).await?;
    run_migrations(&orm).await?;
    orm.close().await?;

    let pool = create_pool(&config.database_url).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", "Admin", "admin").await?;
    let user_id = ensure_user(&pool, "demo@example.com", "demo123", "Demo User", "user").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, name, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}

async fn seed_catalog(pool: &PgPool) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    for (slug, name, description, sort_order) in CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (id, slug, name, description, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name, description = EXCLUDED.description, sort_order = EXCLUDED.sort_order
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(name)
        .bind(description)
        .bind(sort_order)
        .execute(&mut *tx)
        .await?;
    }

    for (slug, name, category, price, stock) in PRODUCTS {
        let (category_id,): (Uuid,) = sqlx::query_as("SELECT id FROM categories WHERE slug = $1")
            .bind(category)
            .fetch_one(&mut *tx)
            .await?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products
                (id, slug, name, description, category_id, price, currency, image_url,
                 rating, rating_count, stock, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, $9, $10, $10)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(name)
        .bind(format!("{name}, soft and huggable"))
        .bind(category_id)
        .bind(price)
        .bind(DEFAULT_CURRENCY)
        .bind(format!("/images/products/{slug}.jpg"))
        .bind(stock)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    println!("Seeded {} categories and {} products", CATEGORIES.len(), PRODUCTS.len());
    Ok(())
}
