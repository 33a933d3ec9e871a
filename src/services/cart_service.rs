use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use uuid::Uuid;

use crate::{
    dto::cart::{AddCartItemRequest, UpdateCartItemRequest},
    entity::{
        cart_items::{ActiveModel as CartItemActive, Column as CartItemCol, Entity as CartItems},
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    models::{CartLine, CartView, cart_line_from_entity},
    services::catalog_service::{find_product, parse_id},
    state::AppState,
};

/// Outcome of looking a cart up by session token.
///
/// `Created` means the caller's token was absent or unknown and a new
/// session was issued; the client has to switch to the returned id.
#[derive(Debug, Clone)]
pub enum CartLookup {
    Found(CartView),
    Created(CartView),
}

impl CartLookup {
    pub fn is_new(&self) -> bool {
        matches!(self, CartLookup::Created(_))
    }

    pub fn view(&self) -> &CartView {
        match self {
            CartLookup::Found(view) | CartLookup::Created(view) => view,
        }
    }

    pub fn into_view(self) -> CartView {
        match self {
            CartLookup::Found(view) | CartLookup::Created(view) => view,
        }
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub async fn get_or_create(state: &AppState, session_id: Option<&str>) -> AppResult<CartLookup> {
    let txn = state.orm.begin().await?;
    let (cart, created) = resolve_cart(&txn, session_id).await?;
    let view = load_view(&txn, &cart).await?;
    txn.commit().await?;

    if created {
        Ok(CartLookup::Created(view))
    } else {
        Ok(CartLookup::Found(view))
    }
}

/// Add `quantity` of a product, accumulating onto an existing line.
pub async fn add_item(
    state: &AppState,
    session_id: Option<&str>,
    payload: AddCartItemRequest,
) -> AppResult<CartView> {
    let raw_product_id = payload
        .product_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("productId is required".into()))?;
    let quantity = added_quantity(payload.quantity);

    let txn = state.orm.begin().await?;
    let (cart, _) = resolve_cart(&txn, session_id).await?;
    let product = find_product(&txn, raw_product_id).await?;

    // A single upsert so two concurrent adds cannot lose an increment.
    // The stored quantity saturates at the column maximum.
    let current = Expr::col((CartItems, CartItemCol::Quantity));
    let accumulated = Expr::case(current.clone().gt(i32::MAX - quantity), Expr::val(i32::MAX))
        .finally(current.add(quantity));
    let on_conflict = OnConflict::columns([CartItemCol::CartId, CartItemCol::ProductId])
        .value(CartItemCol::Quantity, accumulated)
        .to_owned();
    CartItems::insert(CartItemActive {
        id: Set(Uuid::new_v4()),
        cart_id: Set(cart.id),
        product_id: Set(product.id),
        quantity: Set(quantity),
        created_at: Set(Utc::now().into()),
    })
    .on_conflict(on_conflict)
    .exec_without_returning(&txn)
    .await?;

    let view = load_view(&txn, &cart).await?;
    txn.commit().await?;

    tracing::info!(
        session_id = %cart.session_id,
        product_id = %product.id,
        quantity,
        "cart item added"
    );
    Ok(view)
}

/// Overwrite a line's quantity; zero removes it.
pub async fn set_quantity(
    state: &AppState,
    session_id: &str,
    raw_product_id: &str,
    payload: UpdateCartItemRequest,
) -> AppResult<CartView> {
    let quantity = updated_quantity(payload.quantity);

    let txn = state.orm.begin().await?;
    let cart = find_cart(&txn, session_id, Some(LockType::Share))
        .await?
        .ok_or(AppError::NotFound("Cart"))?;
    let product_id = parse_id(raw_product_id).ok_or(AppError::NotFound("Cart item"))?;
    let line = line_condition(cart.id, product_id);

    let affected = if quantity == 0 {
        CartItems::delete_many()
            .filter(line)
            .exec(&txn)
            .await?
            .rows_affected
    } else {
        CartItems::update_many()
            .col_expr(CartItemCol::Quantity, Expr::value(quantity))
            .filter(line)
            .exec(&txn)
            .await?
            .rows_affected
    };
    if affected == 0 {
        return Err(AppError::NotFound("Cart item"));
    }

    let view = load_view(&txn, &cart).await?;
    txn.commit().await?;

    tracing::info!(session_id, product_id = %product_id, quantity, "cart item updated");
    Ok(view)
}

pub async fn remove_item(
    state: &AppState,
    session_id: &str,
    raw_product_id: &str,
) -> AppResult<CartView> {
    let txn = state.orm.begin().await?;
    let cart = find_cart(&txn, session_id, Some(LockType::Share))
        .await?
        .ok_or(AppError::NotFound("Cart"))?;
    let product_id = parse_id(raw_product_id).ok_or(AppError::NotFound("Cart item"))?;

    let result = CartItems::delete_many()
        .filter(line_condition(cart.id, product_id))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Cart item"));
    }

    let view = load_view(&txn, &cart).await?;
    txn.commit().await?;

    tracing::info!(session_id, product_id = %product_id, "cart item removed");
    Ok(view)
}

pub async fn clear(state: &AppState, session_id: &str) -> AppResult<CartView> {
    let txn = state.orm.begin().await?;
    let cart = find_cart(&txn, session_id, Some(LockType::Share))
        .await?
        .ok_or(AppError::NotFound("Cart"))?;

    CartItems::delete_many()
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    let view = load_view(&txn, &cart).await?;
    txn.commit().await?;

    tracing::info!(session_id, "cart cleared");
    Ok(view)
}

/// Cart row for a session token.
///
/// Mutators take a shared row lock so that they queue behind a checkout,
/// which holds the exclusive lock while it copies and empties the cart.
pub(crate) async fn find_cart<C>(
    conn: &C,
    session_id: &str,
    lock: Option<LockType>,
) -> AppResult<Option<CartModel>>
where
    C: ConnectionTrait,
{
    let mut query = Carts::find().filter(CartCol::SessionId.eq(session_id));
    if let Some(lock) = lock {
        query = query.lock(lock);
    }
    Ok(query.one(conn).await?)
}

/// Cart lines joined with their live products, oldest line first.
pub(crate) async fn load_lines<C>(conn: &C, cart_id: Uuid) -> AppResult<Vec<CartLine>>
where
    C: ConnectionTrait,
{
    let rows = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart_id))
        .order_by_asc(CartItemCol::CreatedAt)
        .find_also_related(Products)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, product)| product.map(|p| cart_line_from_entity(item, p)))
        .collect())
}

async fn load_view<C>(conn: &C, cart: &CartModel) -> AppResult<CartView>
where
    C: ConnectionTrait,
{
    Ok(CartView {
        session_id: cart.session_id.clone(),
        items: load_lines(conn, cart.id).await?,
    })
}

/// Existing cart for `session_id`, or a fresh cart under a newly minted token.
async fn resolve_cart<C>(conn: &C, session_id: Option<&str>) -> AppResult<(CartModel, bool)>
where
    C: ConnectionTrait,
{
    if let Some(session_id) = session_id {
        if let Some(cart) = find_cart(conn, session_id, Some(LockType::Share)).await? {
            return Ok((cart, false));
        }
    }

    let cart = CartActive {
        id: Set(Uuid::new_v4()),
        session_id: Set(new_session_id()),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    tracing::debug!(session_id = %cart.session_id, "cart session issued");
    Ok((cart, true))
}

fn line_condition(cart_id: Uuid, product_id: Uuid) -> Condition {
    Condition::all()
        .add(CartItemCol::CartId.eq(cart_id))
        .add(CartItemCol::ProductId.eq(product_id))
}

fn added_quantity(requested: Option<i64>) -> i32 {
    requested.unwrap_or(1).clamp(1, i64::from(i32::MAX)) as i32
}

fn updated_quantity(requested: Option<i64>) -> i32 {
    requested.unwrap_or(0).clamp(0, i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_quantity_is_at_least_one() {
        assert_eq!(added_quantity(None), 1);
        assert_eq!(added_quantity(Some(0)), 1);
        assert_eq!(added_quantity(Some(-4)), 1);
        assert_eq!(added_quantity(Some(3)), 3);
    }

    #[test]
    fn updated_quantity_floors_at_zero() {
        assert_eq!(updated_quantity(None), 0);
        assert_eq!(updated_quantity(Some(-2)), 0);
        assert_eq!(updated_quantity(Some(7)), 7);
        assert_eq!(updated_quantity(Some(i64::MAX)), i32::MAX);
    }

    #[test]
    fn lookup_reports_new_sessions() {
        let view = CartView {
            session_id: "s".into(),
            items: Vec::new(),
        };
        assert!(CartLookup::Created(view.clone()).is_new());
        assert!(!CartLookup::Found(view).is_new());
    }
}
