use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Category, Product, category_from_entity, product_from_entity},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_asc(CategoryCol::SortOrder)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    Ok(categories)
}

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Vec<Product>> {
    let mut condition = Condition::all();

    if let Some(slug) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let category = Categories::find()
            .filter(CategoryCol::Slug.eq(slug))
            .one(&state.orm)
            .await?;
        match category {
            Some(c) => condition = condition.add(ProdCol::CategoryId.eq(c.id)),
            None => return Ok(Vec::new()),
        }
    }

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(ProdCol::Name.contains(search));
    }

    let items = Products::find()
        .filter(condition)
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(items)
}

pub async fn get_product(state: &AppState, slug: &str) -> AppResult<Product> {
    let product = Products::find()
        .filter(ProdCol::Slug.eq(slug))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(product_from_entity(product))
}

/// Resolve a client-supplied product id against the live catalog.
///
/// Text that is not a UUID cannot name a product, so it is reported the same
/// way as an unknown id.
pub async fn find_product<C>(conn: &C, raw_id: &str) -> AppResult<ProductModel>
where
    C: ConnectionTrait,
{
    let id = parse_id(raw_id).ok_or(AppError::NotFound("Product"))?;
    Products::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Product"))
}

pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
