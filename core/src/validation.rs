//! Client-side checks run before anything is sent to the API.
//!
//! The server stays the source of truth; these only stop obviously bad input
//! from leaving the form.

use validator::Validate;

use crate::types::Customer;

pub const INVALID_FORM_MESSAGE: &str = "Please fill out all fields with valid data.";
pub const INVALID_CREDIT_AMOUNT_MESSAGE: &str =
    "Please enter a valid positive integer credit amount.";

/// Name and email present, credit a finite non-negative number.
pub fn is_valid_customer(customer: &Customer) -> bool {
    customer.available_credit.is_finite() && customer.validate().is_ok()
}

/// Parse a credit amount typed by the user. Only positive whole numbers are
/// accepted; `"10.0"` counts as `10`.
pub fn parse_credit_amount(input: &str) -> Option<f64> {
    let amount: f64 = input.trim().parse().ok()?;
    (amount.is_finite() && amount.fract() == 0.0 && amount > 0.0).then_some(amount)
}
