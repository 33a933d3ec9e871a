//! Money values used by carts and orders.
//!
//! A [`CatalogPrice`] is the live price of a product and may change at any
//! time. An [`OrderedPrice`] is the copy frozen into an order line; the only
//! way to obtain one for a new order is [`CatalogPrice::snapshot`].

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const DEFAULT_CURRENCY: &str = "VND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPrice {
    amount: i64,
    currency: String,
}

impl CatalogPrice {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Freeze the current amount for an order line.
    pub fn snapshot(&self) -> OrderedPrice {
        OrderedPrice(self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderedPrice(i64);

impl OrderedPrice {
    /// Rehydrate a snapshot read back from `order_items`.
    pub(crate) fn from_stored(amount: i64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Total {
    pub amount: i64,
    pub currency: String,
}

impl Total {
    pub fn zero() -> Self {
        Self {
            amount: 0,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Sum `price × quantity` over the lines of a cart.
///
/// An empty iterator yields [`Total::zero`]. Lines priced in different
/// currencies are rejected rather than added together.
pub fn sum_lines<'a, I>(lines: I) -> AppResult<Total>
where
    I: IntoIterator<Item = (&'a CatalogPrice, i32)>,
{
    let mut total: Option<Total> = None;
    for (price, quantity) in lines {
        let line = price
            .amount()
            .checked_mul(i64::from(quantity))
            .ok_or_else(out_of_range)?;
        match total.as_mut() {
            None => {
                total = Some(Total {
                    amount: line,
                    currency: price.currency().to_string(),
                })
            }
            Some(acc) => {
                if acc.currency != price.currency() {
                    return Err(AppError::BadRequest(
                        "Cart contains items in more than one currency".into(),
                    ));
                }
                acc.amount = acc.amount.checked_add(line).ok_or_else(out_of_range)?;
            }
        }
    }
    Ok(total.unwrap_or_else(Total::zero))
}

fn out_of_range() -> AppError {
    AppError::BadRequest("Cart total is out of range".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_price_times_quantity() {
        let a = CatalogPrice::new(50_000, "VND");
        let b = CatalogPrice::new(30_000, "VND");
        let total = sum_lines([(&a, 1), (&b, 2)]).unwrap();
        assert_eq!(total.amount, 110_000);
        assert_eq!(total.currency, "VND");
    }

    #[test]
    fn empty_cart_totals_zero_in_default_currency() {
        let total = sum_lines(std::iter::empty()).unwrap();
        assert_eq!(total, Total::zero());
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let a = CatalogPrice::new(100, "VND");
        let b = CatalogPrice::new(5, "USD");
        let err = sum_lines([(&a, 1), (&b, 1)]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn overflow_is_rejected() {
        let a = CatalogPrice::new(i64::MAX, "VND");
        assert!(sum_lines([(&a, 2)]).is_err());
    }

    #[test]
    fn snapshot_does_not_follow_later_price_changes() {
        let mut live = CatalogPrice::new(50_000, "VND");
        let frozen = live.snapshot();
        live = CatalogPrice::new(70_000, live.currency().to_string());
        assert_eq!(frozen.amount(), 50_000);
        assert_eq!(live.amount(), 70_000);
    }
}
