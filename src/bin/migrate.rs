use storefront_api::{
    config::AppConfig,
    db::{connect, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = connect(&config.database_url).await?;
    run_migrations(&orm).await?;
    println!("Migrations applied");
    orm.close().await?;
    Ok(())
}
