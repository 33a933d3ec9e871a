use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{
        cart_items, categories, order_items, orders::{self, OrderStatus}, products,
    },
    pricing::{CatalogPrice, OrderedPrice},
};

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub price: i64,
    pub currency: String,
    pub image_url: String,
    pub rating: f64,
    pub rating_count: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cart line joined with the live product it points at.
#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: Uuid,
    pub slug: String,
    pub name: String,
    pub price: i64,
    pub currency: String,
    pub image_url: String,
    pub quantity: i32,
}

impl CartLine {
    pub fn catalog_price(&self) -> CatalogPrice {
        CatalogPrice::new(self.price, self.currency.clone())
    }
}

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub session_id: String,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LikesView {
    pub session_id: String,
    pub items: Vec<Product>,
}

/// Live product fields shown next to an order line. Only the price on the
/// line itself is frozen.
#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub currency: String,
}

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price_at_order: OrderedPrice,
    pub product: Option<ProductSnapshot>,
}

#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub session_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub total: i64,
    pub currency: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

pub fn category_from_entity(model: categories::Model) -> Category {
    Category {
        id: model.id,
        slug: model.slug,
        name: model.name,
        description: model.description,
        sort_order: model.sort_order,
    }
}

pub fn product_from_entity(model: products::Model) -> Product {
    Product {
        id: model.id,
        slug: model.slug,
        name: model.name,
        description: model.description,
        category_id: model.category_id,
        price: model.price,
        currency: model.currency,
        image_url: model.image_url,
        rating: model.rating,
        rating_count: model.rating_count,
        stock: model.stock,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn cart_line_from_entity(item: cart_items::Model, product: products::Model) -> CartLine {
    CartLine {
        product_id: product.id,
        slug: product.slug,
        name: product.name,
        price: product.price,
        currency: product.currency,
        image_url: product.image_url,
        quantity: item.quantity,
    }
}

pub fn order_item_from_entity(
    model: order_items::Model,
    product: Option<products::Model>,
) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price_at_order: OrderedPrice::from_stored(model.price_at_order),
        product: product.map(|p| ProductSnapshot {
            id: p.id,
            slug: p.slug,
            name: p.name,
            image_url: p.image_url,
            currency: p.currency,
        }),
    }
}

pub fn order_from_entity(model: orders::Model, items: Vec<OrderItem>) -> Order {
    Order {
        id: model.id,
        session_id: model.session_id,
        user_id: model.user_id,
        total: model.total,
        currency: model.currency,
        payment_method: model.payment_method,
        shipping_address: model.shipping_address,
        phone: model.phone,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        items,
    }
}
