use super::filters::ValidatedFilters;
use crate::core::{round2, Regime};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Employees considered per report run
pub const MAX_EMPLOYEES: usize = 1000;

const ERROR_VALUE: &str = "Error";

/// Tax liabilities for one employee under both regimes, computed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiabilityRecord {
    pub employee: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub tax_old: Option<String>,
    #[serde(default)]
    pub tax_new: Option<String>,
}

/// Display values of one report row; the last value is always the recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    values: Vec<String>,
}

impl ComparisonRow {
    pub fn new(values: Vec<String>) -> Self {
        ComparisonRow { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.values.last().map(String::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.recommendation() == Some(ERROR_VALUE)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum LiabilityError {
    #[error("{regime} tax missing")]
    Missing { regime: Regime },
    #[error("{regime} tax '{value}' is not a number")]
    Invalid { regime: Regime, value: String },
}

fn liability(value: &Option<String>, regime: Regime) -> Result<Decimal, LiabilityError> {
    let value = value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(LiabilityError::Missing { regime })?;
    Decimal::from_str(value).map_err(|_| LiabilityError::Invalid {
        regime,
        value: value.to_string(),
    })
}

/// Build a report row. Unreadable liabilities produce an error row rather than
/// failing the whole report.
pub fn build_row(record: &LiabilityRecord) -> ComparisonRow {
    let liabilities = liability(&record.tax_old, Regime::Old)
        .and_then(|old| liability(&record.tax_new, Regime::New).map(|new| (old, new)));

    let mut values = vec![
        record.employee.clone(),
        record.employee_name.clone(),
        record.company.clone(),
    ];
    match liabilities {
        Ok((old, new)) => {
            let difference = old.saturating_sub(new);
            values.extend([
                round2(old).to_string(),
                round2(new).to_string(),
                round2(difference).to_string(),
                Regime::recommend(old, new).to_string(),
            ]);
        }
        Err(err) => {
            log::warn!(
                "Tax regime comparison error for employee {}: {}",
                record.employee,
                err
            );
            values.extend(std::iter::repeat(ERROR_VALUE.to_string()).take(4));
        }
    }
    ComparisonRow::new(values)
}

/// Rows for every record matching the filters, in input order.
pub fn build_report(records: &[LiabilityRecord], filters: &ValidatedFilters) -> Vec<ComparisonRow> {
    let matching: Vec<_> = records.iter().filter(|r| filters.matches(r)).collect();
    if matching.len() > MAX_EMPLOYEES {
        log::warn!(
            "{} employees match the filters, only the first {} are reported",
            matching.len(),
            MAX_EMPLOYEES
        );
    }
    matching
        .into_iter()
        .take(MAX_EMPLOYEES)
        .map(build_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::filters::ReportFilters;
    use chrono::NaiveDate;

    fn record(employee: &str, old: Option<&str>, new: Option<&str>) -> LiabilityRecord {
        LiabilityRecord {
            employee: employee.to_string(),
            employee_name: format!("{} Name", employee),
            company: "Girman".to_string(),
            department: "Engineering".to_string(),
            tax_old: old.map(str::to_string),
            tax_new: new.map(str::to_string),
        }
    }

    fn all_dates() -> ValidatedFilters {
        ReportFilters {
            from_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            to_date: NaiveDate::from_ymd_opt(2026, 3, 31),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn cheaper_new_regime_is_recommended() {
        let row = build_row(&record("EMP-1", Some("52000"), Some("47000")));
        assert_eq!(
            row.values(),
            &[
                "EMP-1",
                "EMP-1 Name",
                "Girman",
                "52000.00",
                "47000.00",
                "5000.00",
                "New Regime"
            ]
        );
        assert_eq!(row.recommendation(), Some("New Regime"));
    }

    #[test]
    fn cheaper_old_regime_gives_negative_difference() {
        let row = build_row(&record("EMP-2", Some("30000"), Some("33000")));
        assert_eq!(row.values()[5], "-3000.00");
        assert_eq!(row.recommendation(), Some("Old Regime"));
    }

    #[test]
    fn extreme_liabilities_do_not_overflow() {
        let row = build_row(&record(
            "EMP-5",
            Some("79228162514264337593543950335"),
            Some("-79228162514264337593543950335"),
        ));
        assert_eq!(row.values()[5], Decimal::MAX.to_string());
        assert_eq!(row.recommendation(), Some("New Regime"));
    }

    #[test]
    fn unreadable_liability_becomes_error_row() {
        let row = build_row(&record("EMP-3", Some("n/a"), Some("100")));
        assert!(row.is_error());
        assert_eq!(row.values().len(), 7);
        assert_eq!(&row.values()[3..], &["Error", "Error", "Error", "Error"]);

        let missing = build_row(&record("EMP-4", Some("100"), None));
        assert!(missing.is_error());
    }

    #[test]
    fn report_applies_filters() {
        let mut other = record("EMP-9", Some("1"), Some("2"));
        other.company = "Elsewhere".to_string();
        let records = vec![record("EMP-1", Some("1"), Some("2")), other];

        let mut filters = all_dates();
        filters.company = Some("Girman".to_string());
        let rows = build_report(&records, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values()[0], "EMP-1");
    }

    #[test]
    fn report_is_capped() {
        let records: Vec<_> = (0..MAX_EMPLOYEES + 5)
            .map(|i| record(&format!("EMP-{i}"), Some("1"), Some("1")))
            .collect();
        assert_eq!(build_report(&records, &all_dates()).len(), MAX_EMPLOYEES);
    }
}
