use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddCartItemRequest, UpdateCartItemRequest},
        checkout::{CheckoutPreview, CheckoutRequest, CheckoutResponse},
        likes::AddLikeRequest,
        orders::{DeletedOrder, StatusUpdate, UpdateOrderStatusRequest},
    },
    entity::orders::OrderStatus,
    error::ErrorBody,
    models::{Category, CartLine, CartView, LikesView, Order, OrderItem, Product, ProductSnapshot},
    pricing::OrderedPrice,
    routes::{admin, cart, checkout, health, likes, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_categories,
        products::list_products,
        products::get_product,
        cart::get_cart,
        cart::add_item,
        cart::update_item,
        cart::remove_item,
        cart::clear_cart,
        likes::list_likes,
        likes::add_like,
        likes::remove_like,
        likes::clear_likes,
        checkout::preview,
        checkout::submit,
        orders::list_orders,
        admin::list_all_orders,
        admin::update_order_status
    ),
    components(
        schemas(
            health::HealthData,
            Category,
            Product,
            CartLine,
            CartView,
            LikesView,
            Order,
            OrderItem,
            OrderStatus,
            OrderedPrice,
            ProductSnapshot,
            AddCartItemRequest,
            UpdateCartItemRequest,
            AddLikeRequest,
            CheckoutRequest,
            CheckoutPreview,
            CheckoutResponse,
            UpdateOrderStatusRequest,
            DeletedOrder,
            StatusUpdate,
            params::Pagination,
            params::ProductQuery,
            ErrorBody
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Categories and products"),
        (name = "Cart", description = "Session cart, keyed by the x-cart-session header"),
        (name = "Likes", description = "Session likes, keyed by the x-likes-session header"),
        (name = "Checkout", description = "Preview and place orders"),
        (name = "Orders", description = "Order history of the signed-in user"),
        (name = "Admin", description = "Order administration"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
