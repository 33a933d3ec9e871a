use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    error::{AppResult, ErrorBody},
    models::{Category, Product},
    routes::params::ProductQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
        .route("/products/{slug}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories in display order", body = Vec<Category>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products ordered by name", body = Vec<Product>)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::list_products(&state, query).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    let product = catalog_service::get_product(&state, &slug).await?;
    Ok(Json(product))
}
