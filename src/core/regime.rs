use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Income tax computation scheme an employee can opt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "Old Regime")]
    Old,
    #[serde(rename = "New Regime")]
    New,
}

impl Regime {
    pub fn label(&self) -> &'static str {
        match self {
            Regime::Old => "Old Regime",
            Regime::New => "New Regime",
        }
    }

    /// New regime only when it is strictly cheaper; ties stay on the old regime.
    pub fn recommend(tax_old: Decimal, tax_new: Decimal) -> Regime {
        if tax_old > tax_new {
            Regime::New
        } else {
            Regime::Old
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown tax regime: {0}")]
pub struct UnknownRegime(pub String);

impl FromStr for Regime {
    type Err = UnknownRegime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "old regime" | "old" => Ok(Regime::Old),
            "new regime" | "new" => Ok(Regime::New),
            _ => Err(UnknownRegime(s.to_string())),
        }
    }
}
