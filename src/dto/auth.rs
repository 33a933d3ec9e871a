use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by the bearer tokens this service accepts.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
