use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Order;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedOrder {
    pub deleted: bool,
    pub id: Uuid,
}

/// Result of an admin status change: `completed` removes the order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StatusUpdate {
    Updated(Order),
    Deleted(DeletedOrder),
}
