use super::amount::round2;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Start years accepted when parsing
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Indian fiscal year (runs 1 April to 31 March)
/// The year value represents the start year (e.g., 2025 = 2025-2026 fiscal year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiscalYear(pub i32);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid fiscal year: '{0}' (expected e.g. 2025-26 or 2025-2026)")]
pub struct FiscalYearError(pub String);

impl FiscalYear {
    /// Create a fiscal year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        // April onwards belongs to the fiscal year starting this calendar year
        if date.month() >= 4 {
            FiscalYear(date.year())
        } else {
            FiscalYear(date.year() - 1)
        }
    }

    /// Start date of the fiscal year (1 April), `None` outside the calendar range
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 4, 1)
    }

    /// End date of the fiscal year (31 March of the following year)
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0.checked_add(1)?, 3, 31)
    }

    /// Whether `date` falls between 1 April and 31 March of this year
    pub fn contains(&self, date: NaiveDate) -> bool {
        FiscalYear::from_date(date) == *self
    }

    /// Display as "2025-2026" format
    pub fn display(&self) -> String {
        format!("{}-{}", self.0, i64::from(self.0) + 1)
    }

    /// Months left in this fiscal year, counting the month of `date`, clamped to 1..=12.
    pub fn months_remaining(&self, date: NaiveDate) -> u32 {
        let years = i64::from(self.0) + 1 - i64::from(date.year());
        let months = years * 12 + (3 - i64::from(date.month())) + 1;
        months.clamp(1, 12) as u32
    }
}

impl FromStr for FiscalYear {
    type Err = FiscalYearError;

    /// Accepts "2025-26", "2025-2026" or a bare start year "2025".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let start = trimmed.split('-').next().unwrap_or(trimmed);
        start
            .parse::<i32>()
            .or_else(|_| trimmed.get(..4).unwrap_or(trimmed).parse::<i32>())
            .ok()
            .filter(|year| YEAR_RANGE.contains(year))
            .map(FiscalYear)
            .ok_or_else(|| FiscalYearError(s.to_string()))
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Monthly share of a declared total exemption for a salary slip starting on `slip_start`.
///
/// The total is spread evenly over the months left in the fiscal year. When no
/// fiscal year is given it is derived from the slip date.
pub fn monthly_exemption(
    total: Decimal,
    slip_start: NaiveDate,
    fiscal_year: Option<FiscalYear>,
) -> Decimal {
    if total <= Decimal::ZERO {
        return round2(Decimal::ZERO);
    }
    let fiscal_year = fiscal_year.unwrap_or_else(|| FiscalYear::from_date(slip_start));
    let months = fiscal_year.months_remaining(slip_start);
    round2(total / Decimal::from(months))
}
