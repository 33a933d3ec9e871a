use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::CartLine;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// `cod` when omitted.
    pub payment_method: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
    /// Required when `paymentMethod` is `card`.
    pub card_holder: Option<String>,
    // Accepted for the simulated card form, never validated or stored.
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvc: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreview {
    pub session_id: String,
    pub items: Vec<CartLine>,
    pub total: i64,
    pub currency: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: Uuid,
    pub message: String,
}
