use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::checkout::{CheckoutPreview, CheckoutRequest, CheckoutResponse},
    entity::{
        cart_items::{Column as CartItemCol, Entity as CartItems},
        order_items::{ActiveModel as OrderItemActive, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, OrderStatus},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartLine,
    pricing::{CatalogPrice, Total, sum_lines},
    services::cart_service::{find_cart, load_lines},
    state::AppState,
};

pub const DEFAULT_PAYMENT_METHOD: &str = "cod";
pub const CARD_PAYMENT_METHOD: &str = "card";
const ORDER_PLACED_MESSAGE: &str = "Order created (simulated payment)";

/// Checkout form after trimming and defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShippingDetails {
    payment_method: String,
    shipping_address: String,
    phone: String,
}

/// What the cart would cost right now. Nothing is written.
pub async fn preview(state: &AppState, session_id: &str) -> AppResult<CheckoutPreview> {
    let Some(cart) = find_cart(&state.orm, session_id, None).await? else {
        return Ok(empty_preview(session_id));
    };
    let items = load_lines(&state.orm, cart.id).await?;
    if items.is_empty() {
        return Ok(empty_preview(&cart.session_id));
    }

    let total = total_of(&items)?;
    Ok(CheckoutPreview {
        session_id: cart.session_id,
        items,
        total: total.amount,
        currency: total.currency,
    })
}

/// Turn the session's cart into a pending order.
///
/// The order row, its items and the emptied cart are committed together.
/// Each item keeps the catalog price it had at this moment.
pub async fn submit(
    state: &AppState,
    session_id: &str,
    payload: CheckoutRequest,
    user: Option<&AuthUser>,
) -> AppResult<CheckoutResponse> {
    let details = shipping_details(payload)?;

    let txn = state.orm.begin().await?;

    let cart = find_cart(&txn, session_id, Some(LockType::Update))
        .await?
        .ok_or(AppError::NotFound("Cart"))?;
    let lines = load_lines(&txn, cart.id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    let total = total_of(&lines)?;

    let user_id = match user {
        Some(user) => Users::find_by_id(user.user_id)
            .one(&txn)
            .await?
            .map(|u| u.id),
        None => None,
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        session_id: Set(Some(cart.session_id.clone())),
        user_id: Set(user_id),
        total: Set(total.amount),
        currency: Set(total.currency.clone()),
        payment_method: Set(details.payment_method.clone()),
        shipping_address: Set(details.shipping_address),
        phone: Set(details.phone),
        status: Set(OrderStatus::Pending),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    let items = lines.iter().map(|line| OrderItemActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        product_id: Set(line.product_id),
        quantity: Set(line.quantity),
        price_at_order: Set(line.catalog_price().snapshot().amount()),
    });
    OrderItems::insert_many(items).exec_without_returning(&txn).await?;

    CartItems::delete_many()
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        session_id = %cart.session_id,
        total = order.total,
        currency = %order.currency,
        lines = lines.len(),
        "order placed"
    );
    audit::record(
        &state.orm,
        user_id,
        "checkout",
        "orders",
        json!({
            "order_id": order.id,
            "total": order.total,
            "payment_method": details.payment_method,
        }),
    )
    .await;

    Ok(CheckoutResponse {
        success: true,
        order_id: order.id,
        message: ORDER_PLACED_MESSAGE.to_string(),
    })
}

fn empty_preview(session_id: &str) -> CheckoutPreview {
    let total = Total::zero();
    CheckoutPreview {
        session_id: session_id.to_string(),
        items: Vec::new(),
        total: total.amount,
        currency: total.currency,
    }
}

fn total_of(lines: &[CartLine]) -> AppResult<Total> {
    let prices: Vec<CatalogPrice> = lines.iter().map(CartLine::catalog_price).collect();
    sum_lines(prices.iter().zip(lines.iter().map(|line| line.quantity)))
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

fn shipping_details(payload: CheckoutRequest) -> AppResult<ShippingDetails> {
    let shipping_address = required(payload.shipping_address, "shippingAddress")?;
    let phone = required(payload.phone, "phone")?;
    let payment_method = payload
        .payment_method
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

    if payment_method == CARD_PAYMENT_METHOD {
        required(payload.card_holder, "cardHolder")?;
    }

    Ok(ShippingDetails {
        payment_method,
        shipping_address,
        phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CheckoutRequest {
        CheckoutRequest {
            shipping_address: Some(" 12 Ly Thuong Kiet, Ha Noi ".into()),
            phone: Some("0901234567".into()),
            ..Default::default()
        }
    }

    #[test]
    fn payment_method_defaults_to_cod() {
        let details = shipping_details(form()).unwrap();
        assert_eq!(details.payment_method, "cod");
        assert_eq!(details.shipping_address, "12 Ly Thuong Kiet, Ha Noi");
    }

    #[test]
    fn address_and_phone_are_required() {
        let err = shipping_details(CheckoutRequest {
            shipping_address: Some("   ".into()),
            ..form()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "shippingAddress is required");

        let err = shipping_details(CheckoutRequest { phone: None, ..form() }).unwrap_err();
        assert_eq!(err.to_string(), "phone is required");
    }

    #[test]
    fn card_payment_needs_a_holder() {
        let err = shipping_details(CheckoutRequest {
            payment_method: Some("Card".into()),
            ..form()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "cardHolder is required");

        let details = shipping_details(CheckoutRequest {
            payment_method: Some("card".into()),
            card_holder: Some("NGUYEN VAN A".into()),
            card_number: Some("4111111111111111".into()),
            ..form()
        })
        .unwrap();
        assert_eq!(details.payment_method, "card");
    }

    #[test]
    fn empty_preview_is_priced_in_default_currency() {
        let preview = empty_preview("abc");
        assert_eq!(preview.total, 0);
        assert_eq!(preview.currency, "VND");
        assert!(preview.items.is_empty());
    }
}
