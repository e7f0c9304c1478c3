use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Source of an employee's declared tax regime preference.
#[async_trait]
pub trait RegimePreferenceLookup: Send + Sync {
    /// `None` when the employee has no preference recorded.
    async fn tax_regime_preference(&self, employee: &str) -> anyhow::Result<Option<String>>;
}

/// Preferences held in memory, keyed by employee id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StaticPreferences(HashMap<String, String>);

impl StaticPreferences {
    #[cfg(test)]
    pub fn new<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        StaticPreferences(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// `{"EMP-0001": "New Regime", ...}`
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let preferences: StaticPreferences = serde_json::from_reader(reader)?;
        log::info!("Read {} regime preferences", preferences.0.len());
        Ok(preferences)
    }
}

#[async_trait]
impl RegimePreferenceLookup for StaticPreferences {
    async fn tax_regime_preference(&self, employee: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .0
            .get(employee)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_employee_has_preference() {
        let prefs = StaticPreferences::new([("EMP-1", "New Regime"), ("EMP-2", " ")]);
        assert_eq!(
            prefs.tax_regime_preference("EMP-1").await.unwrap(),
            Some("New Regime".to_string())
        );
        assert_eq!(prefs.tax_regime_preference("EMP-2").await.unwrap(), None);
        assert_eq!(prefs.tax_regime_preference("EMP-3").await.unwrap(), None);
    }

    #[test]
    fn reads_json_object() {
        let json = r#"{"EMP-1": "Old Regime"}"#;
        let prefs = StaticPreferences::from_reader(json.as_bytes()).unwrap();
        assert_eq!(prefs.0.get("EMP-1").map(String::as_str), Some("Old Regime"));
    }
}
