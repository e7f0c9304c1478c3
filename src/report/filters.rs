use super::row::LiabilityRecord;
use chrono::NaiveDate;

/// Report filters as submitted; dates are required but may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub company: Option<String>,
    pub department: Option<String>,
    pub employee: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Please select both From Date and To Date before running the report.")]
    MissingDates,
    #[error("From Date ({from}) cannot be after To Date ({to}).")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

/// Filters that passed validation; only these can run a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFilters {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub company: Option<String>,
    pub department: Option<String>,
    pub employee: Option<String>,
}

impl ReportFilters {
    pub fn validate(self) -> Result<ValidatedFilters, FilterError> {
        let (Some(from_date), Some(to_date)) = (self.from_date, self.to_date) else {
            return Err(FilterError::MissingDates);
        };
        if from_date > to_date {
            return Err(FilterError::InvalidRange {
                from: from_date,
                to: to_date,
            });
        }
        Ok(ValidatedFilters {
            from_date,
            to_date,
            company: non_empty(self.company),
            department: non_empty(self.department),
            employee: non_empty(self.employee),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ValidatedFilters {
    pub fn matches(&self, record: &LiabilityRecord) -> bool {
        fn matches_field(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| f == value)
        }
        matches_field(&self.company, &record.company)
            && matches_field(&self.department, &record.department)
            && matches_field(&self.employee, &record.employee)
    }

    /// "2025-04-01 to 2026-03-31"
    pub fn period(&self) -> String {
        format!("{} to {}", self.from_date, self.to_date)
    }
}
