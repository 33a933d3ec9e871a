use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page size, default 50, clamped to 1..=100.
    pub limit: Option<i64>,
    /// Rows to skip, default 0.
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Returns `(limit, offset)` ready for a query.
    pub fn normalize(&self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit as u64, offset as u64)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Category slug.
    pub category: Option<String>,
    /// Substring of the product name.
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fifty_from_the_start() {
        assert_eq!(Pagination::default().normalize(), (50, 0));
    }

    #[test]
    fn clamps_limit_and_offset() {
        assert_eq!(Pagination::new(Some(500), Some(-3)).normalize(), (100, 0));
        assert_eq!(Pagination::new(Some(0), Some(20)).normalize(), (1, 20));
        assert_eq!(Pagination::new(Some(-7), None).normalize(), (1, 0));
    }
}
