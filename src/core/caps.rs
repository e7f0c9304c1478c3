use crate::money::display_inr;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Income Tax Act section an exemption is declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Investments: PPF, ELSS, life insurance premiums etc.
    #[serde(rename = "80C")]
    S80C,
    /// Health insurance premiums
    #[serde(rename = "80D")]
    S80D,
}

impl Section {
    pub fn code(&self) -> &'static str {
        match self {
            Section::S80C => "80C",
            Section::S80D => "80D",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Statutory caps per section. Sections without an entry are never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapTable(BTreeMap<Section, Decimal>);

impl Default for CapTable {
    fn default() -> Self {
        CapTable::new([(Section::S80C, dec!(150000)), (Section::S80D, dec!(50000))])
    }
}

impl CapTable {
    pub fn new(caps: impl IntoIterator<Item = (Section, Decimal)>) -> Self {
        CapTable(caps.into_iter().collect())
    }

    pub fn cap(&self, section: Section) -> Option<Decimal> {
        self.0.get(&section).copied()
    }

    pub fn with_cap(mut self, section: Section, cap: Decimal) -> Self {
        self.0.insert(section, cap);
        self
    }

    /// A breach is strictly above the cap.
    pub fn check(&self, section: Section, declared: Decimal) -> Option<CapWarning> {
        self.cap(section)
            .filter(|cap| declared > *cap)
            .map(|cap| CapWarning {
                section,
                declared,
                cap,
            })
    }
}

/// A declared amount over its section cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapWarning {
    pub section: Section,
    pub declared: Decimal,
    pub cap: Decimal,
}

impl CapWarning {
    /// Long form used when rejecting or flagging a saved declaration.
    pub fn detailed_message(&self) -> String {
        format!(
            "Section {} declared amount ({}) exceeds the cap of {}.",
            self.section,
            display_inr(self.declared),
            display_inr(self.cap)
        )
    }
}

impl fmt::Display for CapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} exceeds cap {}", self.section, display_inr(self.cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_caps_are_statutory() {
        let caps = CapTable::default();
        assert_eq!(caps.cap(Section::S80C), Some(dec!(150000)));
        assert_eq!(caps.cap(Section::S80D), Some(dec!(50000)));
    }

    #[test]
    fn breach_is_strictly_greater() {
        let caps = CapTable::default();
        assert!(caps.check(Section::S80C, dec!(150000)).is_none());
        assert!(caps.check(Section::S80C, dec!(150000.01)).is_some());
    }

    #[test]
    fn uncapped_section_never_warns() {
        let caps = CapTable::new([(Section::S80C, dec!(10))]);
        assert!(caps.check(Section::S80D, dec!(1_000_000)).is_none());
    }

    #[test]
    fn warning_message_names_section() {
        let warning = CapTable::default()
            .check(Section::S80C, dec!(160000))
            .unwrap();
        assert_eq!(warning.to_string(), "80C exceeds cap ₹1,50,000.00");
        assert_eq!(
            warning.detailed_message(),
            "Section 80C declared amount (₹1,60,000.00) exceeds the cap of ₹1,50,000.00."
        );
    }

    #[test]
    fn deserializes_from_config_shape() {
        let caps: CapTable = serde_json::from_str(r#"{"80C": 100000, "80D": 25000}"#).unwrap();
        assert_eq!(caps.cap(Section::S80C), Some(dec!(100000)));
        assert_eq!(caps.cap(Section::S80D), Some(dec!(25000)));
    }
}
