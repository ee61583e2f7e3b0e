//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as a numeric amount plus a currency. Display strings such
//! as `"KSh 1,200"` are produced only when rendering, and parsed only when a
//! price arrives from markup or from data persisted in the display format.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] or [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The numeric part could not be parsed.
    #[error("invalid price amount: {0:?}")]
    InvalidAmount(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`Price::MAX_AMOUNT`].
    #[error("price exceeds the maximum of {}", Price::MAX_AMOUNT)]
    TooLarge,
    /// The currency code is not supported.
    #[error("unsupported currency code: {0:?}")]
    UnknownCurrency(String),
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Kenyan shilling.
    #[default]
    KES,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// All supported currencies.
    pub const ALL: [Self; 4] = [Self::KES, Self::USD, Self::EUR, Self::GBP];

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::KES => "KES",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// The prefix written before a formatted amount.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::KES => "KSh ",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Prefixes recognised when parsing display strings (matched case-insensitively).
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::KES => &["KSh", "KES"],
            Self::USD => &["$", "USD"],
            Self::EUR => &["€", "EUR"],
            Self::GBP => &["£", "GBP"],
        }
    }

    /// Split a recognised currency prefix off the front of `s`.
    fn strip_prefix(s: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|currency| {
            currency.aliases().iter().find_map(|alias| {
                let head = s.get(..alias.len())?;
                if head.eq_ignore_ascii_case(alias) {
                    s.get(alias.len()..).map(|rest| (currency, rest))
                } else {
                    None
                }
            })
        })
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PriceError::UnknownCurrency(trimmed.to_owned()))
    }
}

/// A price with currency information.
///
/// Serializes as `{"amount": "1200", "currency": "KES"}`. Deserialization also
/// accepts a bare display string (`"KSh 1,200"`), which is how prices were
/// persisted before the structured form existed.
///
/// ```
/// use kitchenmart_core::{CurrencyCode, Price};
///
/// let price = Price::parse_display("KSh 1,200", CurrencyCode::KES).unwrap();
/// assert_eq!(price.to_string(), "KSh 1,200");
/// assert_eq!(price.times(2).to_string(), "KSh 2,400");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr")]
pub struct Price {
    /// Amount in the currency's standard unit (shillings, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

impl Price {
    /// Largest amount accepted from markup or persisted data.
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Create a new price. The amount is expected to be non-negative.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// A zero amount in `currency`.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parse a display string such as `"KSh 1,200"` or `"1,200.50"`.
    ///
    /// A recognised currency prefix selects the currency; otherwise `fallback`
    /// is used. Every thousands separator is removed before parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or the remainder is not a
    /// decimal number. Negative amounts and amounts above
    /// [`Price::MAX_AMOUNT`] are rejected too.
    pub fn parse_display(s: &str, fallback: CurrencyCode) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let (currency, rest) = CurrencyCode::strip_prefix(trimmed).unwrap_or((fallback, trimmed));
        let digits: String = rest
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if digits.is_empty() {
            return Err(PriceError::InvalidAmount(s.to_owned()));
        }

        let amount =
            Decimal::from_str(&digits).map_err(|_| PriceError::InvalidAmount(s.to_owned()))?;
        Self::checked(amount, currency)
    }

    fn checked(amount: Decimal, currency: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX_AMOUNT {
            return Err(PriceError::TooLarge);
        }
        Ok(Self::new(amount, currency))
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// The price of `quantity` units. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX);
        Self::new(amount, self.currency)
    }

    /// Add another amount, keeping this price's currency. Saturates at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let amount = self
            .amount
            .checked_add(other.amount)
            .unwrap_or(Decimal::MAX);
        Self::new(amount, self.currency)
    }

    /// Format for display (e.g., `"KSh 2,400"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.prefix(), format_amount(self.amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Wire forms accepted when deserializing a [`Price`].
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Structured {
        amount: Decimal,
        #[serde(default)]
        currency: CurrencyCode,
    },
    Display(String),
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        match repr {
            PriceRepr::Structured { amount, currency } => Self::checked(amount, currency),
            PriceRepr::Display(text) => Self::parse_display(&text, CurrencyCode::default()),
        }
    }
}

/// Format an amount with thousands separators.
///
/// Rounds to two decimal places and drops trailing fractional zeros, so
/// `2400` becomes `"2,400"` and `1200.50` becomes `"1,200.5"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text
        .split_once('.')
        .map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let digits = whole.len();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kes(s: &str) -> Price {
        Price::parse_display(s, CurrencyCode::KES).unwrap()
    }

    #[test]
    fn test_parse_shilling_display() {
        let price = kes("KSh 1,200");
        assert_eq!(price.amount(), Decimal::from(1200));
        assert_eq!(price.currency(), CurrencyCode::KES);
    }

    #[test]
    fn test_parse_strips_every_separator() {
        assert_eq!(kes("KSh 1,200,000").amount(), Decimal::from(1_200_000));
    }

    #[test]
    fn test_parse_prefix_variants() {
        assert_eq!(kes("Ksh1,500").amount(), Decimal::from(1500));
        assert_eq!(kes("KES 99").amount(), Decimal::from(99));
        assert_eq!(kes("750").currency(), CurrencyCode::KES);

        let usd = kes("$12.50");
        assert_eq!(usd.currency(), CurrencyCode::USD);
        assert_eq!(usd.amount(), Decimal::new(1250, 2));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Price::parse_display("  ", CurrencyCode::KES),
            Err(PriceError::Empty)
        );
        assert!(matches!(
            Price::parse_display("KSh ", CurrencyCode::KES),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse_display("KSh twelve", CurrencyCode::KES),
            Err(PriceError::InvalidAmount(_))
        ));
        assert_eq!(
            Price::parse_display("KSh -5", CurrencyCode::KES),
            Err(PriceError::Negative)
        );
    }

    #[test]
    fn test_parse_rejects_amounts_over_cap() {
        assert_eq!(kes("KSh 1,000,000,000").amount(), Price::MAX_AMOUNT);
        assert_eq!(
            Price::parse_display("KSh 1,000,000,000.01", CurrencyCode::KES),
            Err(PriceError::TooLarge)
        );
        assert_eq!(
            Price::parse_display("79228162514264337593543950335", CurrencyCode::KES),
            Err(PriceError::TooLarge)
        );
        assert!(serde_json::from_str::<Price>(r#"{"amount":"5000000000"}"#).is_err());
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Price::new(Decimal::MAX, CurrencyCode::KES);
        assert_eq!(huge.times(2).amount(), Decimal::MAX);
        assert_eq!(huge.plus(&huge).amount(), Decimal::MAX);

        let capped = Price::new(Price::MAX_AMOUNT, CurrencyCode::KES);
        assert_eq!(
            capped.times(u32::MAX).amount(),
            Price::MAX_AMOUNT * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::ZERO), "0");
        assert_eq!(format_amount(Decimal::from(999)), "999");
        assert_eq!(format_amount(Decimal::from(2400)), "2,400");
        assert_eq!(format_amount(Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(format_amount(Decimal::new(120_050, 2)), "1,200.5");
        assert_eq!(format_amount(Decimal::new(19_999, 3)), "20");
    }

    #[test]
    fn test_display_and_times() {
        let price = kes("KSh 1,200");
        assert_eq!(price.display(), "KSh 1,200");
        assert_eq!(price.times(2).display(), "KSh 2,400");
        assert_eq!(Price::zero(CurrencyCode::KES).display(), "KSh 0");
        assert_eq!(kes("$5").times(3).to_string(), "$15");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("kes".parse::<CurrencyCode>().unwrap(), CurrencyCode::KES);
        assert_eq!(" GBP ".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!(matches!(
            "JPY".parse::<CurrencyCode>(),
            Err(PriceError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_serde_structured_form() {
        let price = kes("KSh 1,200");
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":"1200","currency":"KES"}"#);

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_deserialize_legacy_display_string() {
        let parsed: Price = serde_json::from_str("\"KSh 3,450\"").unwrap();
        assert_eq!(parsed.amount(), Decimal::from(3450));
        assert_eq!(parsed.currency(), CurrencyCode::KES);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Price>("\"free\"").is_err());
        assert!(serde_json::from_str::<Price>(r#"{"amount":"-1"}"#).is_err());
    }
}
