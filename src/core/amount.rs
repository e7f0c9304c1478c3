use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An amount as entered on the declaration form, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawAmount {
    /// Field left empty (null in JSON, blank in CSV)
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("amount is not finite")]
    NotFinite,
}

impl RawAmount {
    /// Strict parse: missing and blank are zero, anything else must be numeric.
    pub fn parse(&self) -> Result<Decimal, CoercionError> {
        match self {
            RawAmount::Missing => Ok(Decimal::ZERO),
            RawAmount::Number(n) => from_number(*n),
            RawAmount::Text(s) => parse_decimal(s),
        }
    }

    /// Lenient parse used by the form: anything unreadable counts as zero.
    pub fn coerce(&self) -> Decimal {
        self.parse().unwrap_or_else(|err| {
            log::debug!("Coercing amount to zero: {}", err);
            Decimal::ZERO
        })
    }
}

/// Finite numbers beyond the Decimal range saturate instead of being rejected.
fn from_number(n: f64) -> Result<Decimal, CoercionError> {
    if !n.is_finite() {
        return Err(CoercionError::NotFinite);
    }
    Ok(Decimal::from_f64(n).unwrap_or(if n.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }))
}

fn parse_decimal(s: &str) -> Result<Decimal, CoercionError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoercionError::NotANumber(trimmed.to_string()))
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        RawAmount::Text(d.to_string())
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

impl<T: Into<RawAmount>> From<Option<T>> for RawAmount {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawAmount::Missing, Into::into)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAmount::Missing => Ok(()),
            RawAmount::Number(n) => write!(f, "{}", n),
            RawAmount::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Sum that clamps to `Decimal::MAX`/`MIN` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// Round half away from zero to 2 places, always keeping both places (`125000.00`).
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
