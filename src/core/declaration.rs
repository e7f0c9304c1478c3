use super::amount::RawAmount;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taxdecl_derive::FieldSchema;

/// Form metadata for a single declaration field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub read_only: bool,
    pub description: &'static str,
}

/// Input root for declaration JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeclarationInput {
    pub declarations: Vec<InvestmentDeclaration>,
}

/// Employee Investment Declaration, one per employee per fiscal year.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct InvestmentDeclaration {
    /// Employee id (e.g. "HR-EMP-00012")
    #[serde(default)]
    pub employee: String,
    /// Fiscal year the declaration applies to (e.g. "2025-2026")
    #[serde(default)]
    pub fiscal_year: String,
    /// Amount invested under section 80C
    #[serde(default)]
    #[field(label = "Section 80C Amount")]
    pub section_80c_amount: RawAmount,
    /// Health insurance premiums under section 80D
    #[serde(default)]
    #[field(label = "Section 80D Amount")]
    pub section_80d_amount: RawAmount,
    /// Any other uncapped exemptions
    #[serde(default)]
    #[field(label = "Other Exemptions")]
    pub other_exemptions: RawAmount,
    /// Sum of the three amounts, always recalculated
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    #[field(label = "Total Exemption", read_only)]
    pub total_exemption: Option<Decimal>,
}

/// Editable and derived amount fields of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationField {
    Section80C,
    Section80D,
    OtherExemptions,
    TotalExemption,
}

impl DeclarationField {
    pub const ALL: [DeclarationField; 4] = [
        DeclarationField::Section80C,
        DeclarationField::Section80D,
        DeclarationField::OtherExemptions,
        DeclarationField::TotalExemption,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeclarationField::Section80C => "section_80c_amount",
            DeclarationField::Section80D => "section_80d_amount",
            DeclarationField::OtherExemptions => "other_exemptions",
            DeclarationField::TotalExemption => "total_exemption",
        }
    }

    pub fn spec(&self) -> Option<&'static FieldSpec> {
        InvestmentDeclaration::field_schema()
            .iter()
            .find(|spec| spec.name == self.name())
    }

    pub fn label(&self) -> &'static str {
        self.spec().map_or(self.name(), |spec| spec.label)
    }

    pub fn is_read_only(&self) -> bool {
        self.spec().is_some_and(|spec| spec.read_only)
    }
}

impl fmt::Display for DeclarationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown declaration field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for DeclarationField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeclarationField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Values held by one open declaration form.
///
/// The total can only be written from within the crate, by the recompute path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationState {
    pub section_80c_amount: RawAmount,
    pub section_80d_amount: RawAmount,
    pub other_exemptions: RawAmount,
    total_exemption: Decimal,
}

impl DeclarationState {
    pub fn new(
        section_80c_amount: impl Into<RawAmount>,
        section_80d_amount: impl Into<RawAmount>,
        other_exemptions: impl Into<RawAmount>,
    ) -> Self {
        DeclarationState {
            section_80c_amount: section_80c_amount.into(),
            section_80d_amount: section_80d_amount.into(),
            other_exemptions: other_exemptions.into(),
            total_exemption: Decimal::ZERO,
        }
    }

    pub fn total_exemption(&self) -> Decimal {
        self.total_exemption
    }

    pub(crate) fn set_total(&mut self, total: Decimal) {
        self.total_exemption = total;
    }

    /// The editable amount behind a field; `None` for the derived total.
    pub fn amount(&self, field: DeclarationField) -> Option<&RawAmount> {
        match field {
            DeclarationField::Section80C => Some(&self.section_80c_amount),
            DeclarationField::Section80D => Some(&self.section_80d_amount),
            DeclarationField::OtherExemptions => Some(&self.other_exemptions),
            DeclarationField::TotalExemption => None,
        }
    }

    pub(crate) fn amount_mut(&mut self, field: DeclarationField) -> Option<&mut RawAmount> {
        match field {
            DeclarationField::Section80C => Some(&mut self.section_80c_amount),
            DeclarationField::Section80D => Some(&mut self.section_80d_amount),
            DeclarationField::OtherExemptions => Some(&mut self.other_exemptions),
            DeclarationField::TotalExemption => None,
        }
    }
}

impl From<&InvestmentDeclaration> for DeclarationState {
    fn from(declaration: &InvestmentDeclaration) -> Self {
        // a stored total is never trusted, the form recomputes it on load
        DeclarationState::new(
            declaration.section_80c_amount.clone(),
            declaration.section_80d_amount.clone(),
            declaration.other_exemptions.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_every_field_in_order() {
        let names: Vec<_> = InvestmentDeclaration::field_schema()
            .iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "employee",
                "fiscal_year",
                "section_80c_amount",
                "section_80d_amount",
                "other_exemptions",
                "total_exemption"
            ]
        );
    }

    #[test]
    fn only_total_is_read_only() {
        assert!(DeclarationField::TotalExemption.is_read_only());
        assert!(!DeclarationField::Section80C.is_read_only());
        assert!(!DeclarationField::Section80D.is_read_only());
        assert!(!DeclarationField::OtherExemptions.is_read_only());
    }

    #[test]
    fn labels_come_from_field_attributes() {
        assert_eq!(DeclarationField::Section80C.label(), "Section 80C Amount");
        assert_eq!(DeclarationField::TotalExemption.label(), "Total Exemption");
        let employee = &InvestmentDeclaration::field_schema()[0];
        assert_eq!(employee.label, "Employee");
        assert!(employee.required);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!(
            "other_exemptions".parse::<DeclarationField>(),
            Ok(DeclarationField::OtherExemptions)
        );
        assert!("section_80e_amount".parse::<DeclarationField>().is_err());
    }

    #[test]
    fn state_ignores_stored_total() {
        let declaration = InvestmentDeclaration {
            section_80c_amount: RawAmount::from("100"),
            total_exemption: Some(Decimal::from(999)),
            ..Default::default()
        };
        let state = DeclarationState::from(&declaration);
        assert_eq!(state.total_exemption(), Decimal::ZERO);
        assert!(state.amount(DeclarationField::TotalExemption).is_none());
    }
}
