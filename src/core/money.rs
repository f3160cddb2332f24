//! Currencies and exact decimal amounts.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Currencies offered by the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::INR,
        Currency::JPY,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Digits after the decimal point in the currency's natural precision.
    pub fn minor_units(self) -> u32 {
        match self {
            Currency::JPY => 0,
            Currency::USD | Currency::EUR | Currency::GBP | Currency::INR => 2,
        }
    }

    /// Round to the currency's natural precision.
    pub fn round(self, amount: Decimal) -> Decimal {
        amount.round_dp(self.minor_units())
    }

    /// `1234.50 USD` style rendering.
    pub fn format(self, amount: Decimal) -> String {
        format!(
            "{:.*} {}",
            self.minor_units() as usize,
            self.round(amount),
            self.code()
        )
    }

    /// Like [`Currency::format`] but always signed, for surpluses and shortfalls.
    pub fn format_signed(self, amount: Decimal) -> String {
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            ""
        } else {
            "+"
        };
        format!("{sign}{}", self.format(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| PlannerError::invalid("currency", format!("unsupported currency `{s}`")))
    }
}

/// Largest magnitude accepted for a single amount (one trillion).
///
/// Keeps ledger sums far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Parse a user-entered amount into an exact decimal.
///
/// Rejects empty, non-numeric and out-of-range text; the sign is left for the caller to judge.
pub fn parse_amount(field: &'static str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::invalid(field, "amount is required"));
    }
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| PlannerError::invalid(field, format!("`{trimmed}` is not a number")))?;
    if amount.abs() > MAX_AMOUNT {
        return Err(PlannerError::invalid(
            field,
            format!("`{trimmed}` exceeds the maximum of {MAX_AMOUNT}"),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_is_exact() {
        let amount = parse_amount("amount", "0.1").unwrap() + parse_amount("amount", "0.2").unwrap();
        assert_eq!(amount, parse_amount("amount", "0.3").unwrap());
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("amount", "").is_err());
        assert!(parse_amount("amount", "twelve").is_err());
        assert!(parse_amount("budget", "12,50").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount_rejects_out_of_range() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_i64));
        assert_eq!(parse_amount("amount", "1000000000000").unwrap(), MAX_AMOUNT);
        assert!(parse_amount("amount", "1000000000000.01").unwrap_err().is_validation());
        assert!(parse_amount("amount", "-79228162514264337593543950335").is_err());
    }

    #[test]
    fn test_currency_precision_and_format() {
        assert_eq!(Currency::JPY.format(Decimal::new(123456, 1)), "12346 JPY");
        assert_eq!(Currency::USD.format(Decimal::from(1000)), "1000.00 USD");
        assert_eq!(Currency::EUR.format_signed(Decimal::from(-200)), "-200.00 EUR");
        assert_eq!(Currency::EUR.format_signed(Decimal::ZERO), "+0.00 EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::INR);
        assert!("BTC".parse::<Currency>().is_err());
    }
}
