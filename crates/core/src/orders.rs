//! Order status values, checkout outcomes, and order total arithmetic.

use crate::error::CoreError;
use crate::types::Cents;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_CANCELED: &str = "canceled";
pub const STATUS_FULFILLED: &str = "fulfilled";

/// All valid order statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_PAID,
    STATUS_CANCELED,
    STATUS_FULFILLED,
];

pub const CHECKOUT_SUCCESS: &str = "success";
pub const CHECKOUT_CANCEL: &str = "cancel";

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid order status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Whether `status` is a checkout-result page the provider redirects to.
pub fn is_checkout_status(status: &str) -> bool {
    status == CHECKOUT_SUCCESS || status == CHECKOUT_CANCEL
}

/// Price of one order line.
pub fn line_total(unit_price_cents: Cents, quantity: i32) -> Cents {
    unit_price_cents * i64::from(quantity)
}

/// Order total: the sum of every line's unit price times quantity.
pub fn order_total<I>(lines: I) -> Cents
where
    I: IntoIterator<Item = (Cents, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_total(price, quantity))
        .sum()
}

/// Parse a purchased quantity carried as checkout metadata.
///
/// Absent means one unit; anything that is not a positive integer is rejected.
pub fn parse_purchase_quantity(raw: Option<&str>) -> Result<i32, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(1);
    };
    match raw.parse::<i32>() {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err(CoreError::Validation(format!("Invalid quantity '{raw}'"))),
    }
}
