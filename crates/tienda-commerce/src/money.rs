//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues when multiplying unit and box prices by quantities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Argentine peso, the store's selling currency.
    #[default]
    ARS,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "ARS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ARS => "ARS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ARS => "$",
            Currency::USD => "US$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "ARS" => Some(Currency::ARS),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Largest amount, in minor units, that converts to and from an `f64`
/// decimal without rounding.
pub const MAX_DECIMAL_CENTS: i64 = 1 << 53;

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for ARS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Returns `None` for non-finite input and for amounts beyond
    /// [`MAX_DECIMAL_CENTS`] minor units.
    ///
    /// ```
    /// use tienda_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(1800.0, Currency::ARS).unwrap();
    /// assert_eq!(price.amount_cents, 180_000);
    /// assert!(Money::from_decimal(f64::INFINITY, Currency::ARS).is_none());
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let multiplier = 10_i64.pow(currency.decimal_places());
        let cents = (amount * multiplier as f64).round();
        if cents.abs() > MAX_DECIMAL_CENTS as f64 {
            return None;
        }
        Some(Self::new(cents as i64, currency))
    }

    /// Shorthand for whole pesos.
    pub fn ars(pesos: i64) -> Self {
        Self::new(pesos.saturating_mul(100), Currency::ARS)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Whether the amount survives a decimal round trip unchanged.
    pub fn fits_decimal(&self) -> bool {
        self.amount_cents.unsigned_abs() <= MAX_DECIMAL_CENTS as u64
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$1800.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "1800.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.saturating_multiply(i64::from(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
