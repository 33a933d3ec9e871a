use axum::{Router, routing::get};

use crate::state::AppState;

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod likes;
pub mod orders;
pub mod params;
pub mod products;

// State is supplied once at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(products::router())
        .merge(cart::router())
        .merge(likes::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(admin::router())
}
