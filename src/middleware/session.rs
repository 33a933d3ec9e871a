//! Anonymous session tokens carried in request headers.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const CART_SESSION_HEADER: &str = "x-cart-session";
pub const LIKES_SESSION_HEADER: &str = "x-likes-session";

/// Value of `x-cart-session`, if present and non-blank.
#[derive(Debug, Clone, Default)]
pub struct CartSession(pub Option<String>);

/// Value of `x-likes-session`, if present and non-blank.
#[derive(Debug, Clone, Default)]
pub struct LikesSession(pub Option<String>);

impl CartSession {
    pub fn require(self) -> Result<String, AppError> {
        self.0
            .ok_or_else(|| AppError::BadRequest("X-Cart-Session header is required".into()))
    }
}

impl LikesSession {
    pub fn require(self) -> Result<String, AppError> {
        self.0
            .ok_or_else(|| AppError::BadRequest("X-Likes-Session header is required".into()))
    }
}

fn header_token(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CartSession(header_token(parts, CART_SESSION_HEADER)))
    }
}

impl<S> FromRequestParts<S> for LikesSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(LikesSession(header_token(parts, LIKES_SESSION_HEADER)))
    }
}
