use crate::core::Regime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error(
        "Salary Structure Assignment may only reference salary structures for Old/New tax regimes. \
         Found: {found}. Please choose one of: {}", allowed.join(", ")
    )]
    StructureNotAllowed { found: String, allowed: Vec<String> },
}

/// Salary structure used for each regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegimeStructureMap(BTreeMap<Regime, String>);

impl Default for RegimeStructureMap {
    fn default() -> Self {
        RegimeStructureMap::new([
            (Regime::Old, "DEMO - Salary Structure - Old Regime"),
            (Regime::New, "DEMO - Salary Structure - New Regime"),
        ])
    }
}

impl RegimeStructureMap {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (Regime, S)>) -> Self {
        RegimeStructureMap(entries.into_iter().map(|(r, s)| (r, s.into())).collect())
    }

    pub fn structure_for(&self, regime: Regime) -> Option<&str> {
        self.0.get(&regime).map(String::as_str)
    }

    /// Mapped structure names, sorted
    pub fn allowed(&self) -> Vec<String> {
        let mut allowed: Vec<String> = self.0.values().cloned().collect();
        allowed.sort();
        allowed.dedup();
        allowed
    }

    /// An assignment may leave the structure empty, otherwise it must be one
    /// of the mapped regime structures.
    pub fn check_assignment(&self, structure: Option<&str>) -> Result<(), AssignmentError> {
        match structure.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(()),
            Some(s) if self.0.values().any(|allowed| allowed == s) => Ok(()),
            Some(s) => Err(AssignmentError::StructureNotAllowed {
                found: s.to_string(),
                allowed: self.allowed(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maps_both_regimes() {
        let map = RegimeStructureMap::default();
        assert_eq!(
            map.structure_for(Regime::New),
            Some("DEMO - Salary Structure - New Regime")
        );
        assert_eq!(map.allowed().len(), 2);
    }

    #[test]
    fn empty_structure_is_allowed() {
        let map = RegimeStructureMap::default();
        assert_eq!(map.check_assignment(None), Ok(()));
        assert_eq!(map.check_assignment(Some("")), Ok(()));
    }

    #[test]
    fn mapped_structure_is_allowed() {
        let map = RegimeStructureMap::default();
        assert_eq!(
            map.check_assignment(Some("DEMO - Salary Structure - Old Regime")),
            Ok(())
        );
    }

    #[test]
    fn unmapped_structure_is_rejected_with_choices() {
        let map = RegimeStructureMap::default();
        let err = map.check_assignment(Some("Executive Plan")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Found: Executive Plan"));
        assert!(message.contains(
            "DEMO - Salary Structure - New Regime, DEMO - Salary Structure - Old Regime"
        ));
    }

    #[test]
    fn deserializes_regime_labels() {
        let map: RegimeStructureMap =
            serde_json::from_str(r#"{"Old Regime": "Legacy", "New Regime": "Simplified"}"#).unwrap();
        assert_eq!(map.structure_for(Regime::Old), Some("Legacy"));
        assert_eq!(map.structure_for(Regime::New), Some("Simplified"));
    }
}
