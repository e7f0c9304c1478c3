use super::aggregator::cap_breaches;
use super::amount::{round2, saturating_sum, RawAmount};
use super::caps::{CapTable, CapWarning};
use super::declaration::{DeclarationField, InvestmentDeclaration};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What happens when a saved declaration exceeds a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapPolicy {
    /// Reject the declaration
    Enforce,
    /// Accept it and report the breach as a warning
    #[default]
    Advise,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("{label} must be a number")]
    NotANumber { label: &'static str },
    #[error("{label} cannot be negative")]
    NegativeAmount { label: &'static str },
    #[error("Both Employee and Fiscal Year are required")]
    MissingEmployeeOrFiscalYear,
    #[error(
        "A declaration already exists for employee {employee} in fiscal year {fiscal_year}. \
         Update or delete it before creating a new one."
    )]
    Duplicate {
        employee: String,
        fiscal_year: String,
    },
    #[error("Validation Error(s):\n{}", detailed_messages(.0))]
    CapsExceeded(Vec<CapWarning>),
}

fn detailed_messages(warnings: &[CapWarning]) -> String {
    warnings
        .iter()
        .map(CapWarning::detailed_message)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A declaration that passed save-time validation, with its total recalculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedDeclaration {
    pub employee: String,
    pub fiscal_year: String,
    pub section_80c_amount: Decimal,
    pub section_80d_amount: Decimal,
    pub other_exemptions: Decimal,
    pub total_exemption: Decimal,
    /// Cap breaches accepted under the advise policy
    pub warnings: Vec<CapWarning>,
}

impl ValidatedDeclaration {
    pub fn is_same_record(&self, employee: &str, fiscal_year: &str) -> bool {
        self.employee == employee && self.fiscal_year == fiscal_year
    }
}

/// Validate a declaration before it is saved.
///
/// `existing` holds the declarations already accepted; a second one for the
/// same employee and fiscal year is rejected.
pub fn validate_declaration(
    declaration: &InvestmentDeclaration,
    existing: &[ValidatedDeclaration],
    caps: &CapTable,
    policy: CapPolicy,
) -> Result<ValidatedDeclaration, DeclarationError> {
    let section_80c = non_negative(&declaration.section_80c_amount, DeclarationField::Section80C)?;
    let section_80d = non_negative(&declaration.section_80d_amount, DeclarationField::Section80D)?;
    let other = non_negative(&declaration.other_exemptions, DeclarationField::OtherExemptions)?;
    let total = round2(saturating_sum([section_80c, section_80d, other]));

    let employee = declaration.employee.trim();
    let fiscal_year = declaration.fiscal_year.trim();
    if employee.is_empty() || fiscal_year.is_empty() {
        return Err(DeclarationError::MissingEmployeeOrFiscalYear);
    }
    if existing
        .iter()
        .any(|accepted| accepted.is_same_record(employee, fiscal_year))
    {
        return Err(DeclarationError::Duplicate {
            employee: employee.to_string(),
            fiscal_year: fiscal_year.to_string(),
        });
    }

    let breaches = cap_breaches(section_80c, section_80d, caps);
    let warnings = match policy {
        CapPolicy::Enforce if !breaches.is_empty() => {
            return Err(DeclarationError::CapsExceeded(breaches))
        }
        CapPolicy::Enforce => Vec::new(),
        CapPolicy::Advise => breaches,
    };

    Ok(ValidatedDeclaration {
        employee: employee.to_string(),
        fiscal_year: fiscal_year.to_string(),
        section_80c_amount: section_80c,
        section_80d_amount: section_80d,
        other_exemptions: other,
        total_exemption: total,
        warnings,
    })
}

fn non_negative(amount: &RawAmount, field: DeclarationField) -> Result<Decimal, DeclarationError> {
    let value = amount
        .parse()
        .map_err(|_| DeclarationError::NotANumber {
            label: field.label(),
        })?;
    if value < Decimal::ZERO {
        return Err(DeclarationError::NegativeAmount {
            label: field.label(),
        });
    }
    Ok(value)
}
