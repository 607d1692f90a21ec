use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::history::{CRITERION_PLACEHOLDER, DEFAULT_CRITERIA};
use crate::constants::tabs::{
    ALTA, DEFAULT_HEADER_ROW, DEFAULT_UTC_OFFSET_MINUTES, EMERGENCIAL, LIMITE_ALTA_DIARIO,
    LIMITE_EMERG_DIARIO,
};
use crate::errors::TrackerError;
use crate::types::{Criterion, SourceName};
use crate::window::WindowPolicy;

/// Top-level tracker configuration.
///
/// Every field has a default, so a JSON file only needs to list overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Current tabs, in lookup precedence order. The backup tab always follows them.
    pub primary_tabs: Vec<SourceName>,
    /// Rule used to pick the backup tab.
    pub window_policy: WindowPolicy,
    /// Offset from UTC used to decide what "today" is, in minutes.
    pub utc_offset_minutes: i32,
    /// Daily spend limit per tab, in BRL. Tabs without an entry are unlimited.
    pub daily_limits: BTreeMap<SourceName, f64>,
    /// Criteria offered for filing searches; the first entry is the placeholder.
    pub criteria: Vec<Criterion>,
    /// Row index holding column headers in every tab.
    pub header_row: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            primary_tabs: vec![ALTA.to_string(), EMERGENCIAL.to_string()],
            window_policy: WindowPolicy::default(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            daily_limits: BTreeMap::from([
                (ALTA.to_string(), LIMITE_ALTA_DIARIO),
                (EMERGENCIAL.to_string(), LIMITE_EMERG_DIARIO),
            ]),
            criteria: DEFAULT_CRITERIA.iter().map(|c| c.to_string()).collect(),
            header_row: DEFAULT_HEADER_ROW,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, TrackerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations the loader cannot work with.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.primary_tabs.is_empty() {
            return Err(TrackerError::Configuration(
                "at least one primary tab is required".into(),
            ));
        }
        if self.primary_tabs.iter().any(|tab| tab.trim().is_empty()) {
            return Err(TrackerError::Configuration(
                "primary tab names must not be blank".into(),
            ));
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(TrackerError::Configuration(format!(
                "utc_offset_minutes must be within +/-1439, got {}",
                self.utc_offset_minutes
            )));
        }
        if let Some((tab, limit)) = self
            .daily_limits
            .iter()
            .find(|(_, limit)| !limit.is_finite() || **limit < 0.0)
        {
            return Err(TrackerError::Configuration(format!(
                "daily limit for '{tab}' must be a non-negative amount, got {limit}"
            )));
        }
        Ok(())
    }

    /// Daily limit configured for `tab`, if any.
    pub fn daily_limit(&self, tab: &str) -> Option<f64> {
        self.daily_limits.get(tab).copied()
    }

    /// Criteria list with `backup_label` inserted right after the placeholder,
    /// so searches can be filed under the backup tab's name.
    pub fn criteria_with_backup(&self, backup_label: &str) -> Vec<Criterion> {
        let mut criteria = self.criteria.clone();
        if criteria.iter().any(|criterion| criterion == backup_label) {
            return criteria;
        }
        let at = match criteria.first() {
            Some(first) if first == CRITERION_PLACEHOLDER => 1,
            _ => 0,
        };
        criteria.insert(at, backup_label.to_string());
        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_primary_tabs() {
        let config = TrackerConfig::default();
        assert_eq!(config.primary_tabs, vec!["ALTA", "EMERGENCIAL"]);
        assert_eq!(config.daily_limit("ALTA"), Some(180_000.0));
        assert_eq!(config.daily_limit("EMERGENCIAL"), Some(15_000.0));
        assert_eq!(config.daily_limit("06.10 a 10.10"), None);
        assert_eq!(config.criteria[0], CRITERION_PLACEHOLDER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config = TrackerConfig::from_json_str(
            r#"{ "window_policy": "semana_anterior", "utc_offset_minutes": 0 }"#,
        )
        .unwrap();
        assert_eq!(config.window_policy, WindowPolicy::SemanaAnterior);
        assert_eq!(config.utc_offset_minutes, 0);
        assert_eq!(config.primary_tabs, vec!["ALTA", "EMERGENCIAL"]);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{ "primary_tabs": [] }"#),
            Err(TrackerError::Configuration(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{ "utc_offset_minutes": 1440 }"#),
            Err(TrackerError::Configuration(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{ "daily_limits": { "ALTA": -1.0 } }"#),
            Err(TrackerError::Configuration(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str("{ not json"),
            Err(TrackerError::Json(_))
        ));
    }

    #[test]
    fn backup_label_is_offered_after_placeholder_once() {
        let config = TrackerConfig::default();
        let criteria = config.criteria_with_backup("06.10 a 10.10");
        assert_eq!(criteria[0], CRITERION_PLACEHOLDER);
        assert_eq!(criteria[1], "06.10 a 10.10");
        assert_eq!(criteria.len(), config.criteria.len() + 1);

        let mut again = config.clone();
        again.criteria = criteria.clone();
        assert_eq!(again.criteria_with_backup("06.10 a 10.10"), criteria);
    }
}
