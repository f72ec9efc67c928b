//! Generator settings supplied by the settings collaborator.
//!
//! Settings travel in two encodings: comma-separated parameter strings
//! (the sharing channel) and RON documents (files loaded by tools).
//!
//! # Example RON
//!
//! ```ron
//! GeneratorSettings(
//!     weighted: true,
//!     resources: Some([2, 0, 3, 1, 4]),
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// Per-type cap on how many pieces one run may place.
///
/// Index `i` holds the remaining count for terrain type id `i`. Ids past the
/// end of the list have nothing left.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBudget {
    counts: Vec<u32>,
}

impl ResourceBudget {
    /// Budget from counts in type-id order.
    #[must_use]
    pub fn new(counts: impl Into<Vec<u32>>) -> Self {
        Self {
            counts: counts.into(),
        }
    }

    /// Parse `"2,0,3"` into a budget.
    pub fn from_param(raw: &str) -> Result<Self> {
        let counts = raw
            .split(',')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(GenerationError::InvalidBudget(format!(
                        "'{part}' is not a non-negative count"
                    )));
                }
                part.parse::<u32>()
                    .map_err(|e| GenerationError::InvalidBudget(format!("'{part}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { counts })
    }

    /// Format as a comma-separated parameter string.
    #[must_use]
    pub fn to_param(&self) -> String {
        self.counts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Drop entries for ids that do not exist in a catalog of `len` types.
    #[must_use]
    pub fn truncated(mut self, len: usize) -> Self {
        self.counts.truncate(len);
        self
    }

    /// Remaining count for `id`.
    #[must_use]
    pub fn remaining(&self, id: usize) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Use up one piece of `id`. Does nothing when none remain.
    pub fn consume(&mut self, id: usize) {
        if let Some(count) = self.counts.get_mut(id) {
            *count = count.saturating_sub(1);
        }
    }

    /// Sum of all remaining counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, c| acc.saturating_add(*c))
    }

    /// True if any id below `len` still has pieces left.
    #[must_use]
    pub fn has_any_below(&self, len: usize) -> bool {
        self.counts.iter().take(len).any(|c| *c > 0)
    }

    /// Counts in type-id order.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

/// Toggles and caps that shape a map run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Reject types probabilistically by their weight.
    #[serde(default)]
    pub weighted: bool,
    /// Optional per-type caps. `None` means unrestricted.
    #[serde(default)]
    pub resources: Option<ResourceBudget>,
}

impl GeneratorSettings {
    /// Enable or disable weighted selection.
    #[must_use]
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set a resource budget.
    #[must_use]
    pub fn with_resources(mut self, resources: ResourceBudget) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Restore every setting to its default.
    pub fn restore_defaults(&mut self) {
        *self = Self::default();
    }

    /// Apply settings from sharing-channel parameters.
    ///
    /// `settings_param` is a comma list of flags where `0` is false and any
    /// other number is true; its first value is `weighted`. A missing
    /// settings parameter restores the defaults. A missing resources
    /// parameter clears the budget.
    pub fn apply_query(
        &mut self,
        settings_param: Option<&str>,
        resources_param: Option<&str>,
    ) -> Result<()> {
        match settings_param.filter(|s| !s.trim().is_empty()) {
            Some(raw) => {
                let flags = raw
                    .split(',')
                    .map(|part| {
                        part.trim().parse::<f64>().map(|v| v != 0.0).map_err(|e| {
                            GenerationError::SettingsParse(format!("flag '{part}': {e}"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                if let Some(weighted) = flags.first() {
                    self.weighted = *weighted;
                }
            }
            None => {
                tracing::debug!("Settings not provided, restoring defaults");
                self.restore_defaults();
            }
        }

        self.resources = match resources_param.filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(ResourceBudget::from_param(raw)?),
            None => {
                tracing::debug!("Resources not provided, generation is unrestricted");
                None
            }
        };
        Ok(())
    }

    /// Settings as a flag parameter string (`1`/`0`).
    #[must_use]
    pub fn settings_param(&self) -> String {
        [self.weighted]
            .iter()
            .map(|flag| if *flag { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Resource budget as a parameter string; empty when unrestricted.
    #[must_use]
    pub fn resources_param(&self) -> String {
        self.resources
            .as_ref()
            .map(ResourceBudget::to_param)
            .unwrap_or_default()
    }

    /// Parse a RON settings document.
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| GenerationError::SettingsParse(e.to_string()))
    }

    /// Serialize to a pretty RON document.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GenerationError::SettingsParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_param() {
        let budget = ResourceBudget::from_param("2,0, 3").unwrap();
        assert_eq!(budget.counts(), &[2, 0, 3]);
        assert_eq!(budget.total(), 5);
        assert_eq!(budget.remaining(0), 2);
        assert_eq!(budget.remaining(1), 0);
        assert_eq!(budget.remaining(8), 0);
        assert_eq!(budget.to_param(), "2,0,3");
    }

    #[test]
    fn test_budget_rejects_bad_param() {
        assert!(ResourceBudget::from_param("2,-1").is_err());
        assert!(ResourceBudget::from_param("two").is_err());
        assert!(ResourceBudget::from_param("1,,2").is_err());
    }

    #[test]
    fn test_budget_consume_saturates() {
        let mut budget = ResourceBudget::new(vec![1, 0]);
        budget.consume(0);
        budget.consume(0);
        budget.consume(1);
        budget.consume(5);
        assert_eq!(budget.counts(), &[0, 0]);
        assert!(!budget.has_any_below(2));
    }

    #[test]
    fn test_budget_truncated_to_catalog() {
        let budget = ResourceBudget::new(vec![1, 1, 1, 1]).truncated(2);
        assert_eq!(budget.counts(), &[1, 1]);
        assert!(budget.has_any_below(1));
    }

    #[test]
    fn test_apply_query_sets_flags_and_budget() {
        let mut settings = GeneratorSettings::default();
        settings.apply_query(Some("1"), Some("2,0,3,1,4")).unwrap();
        assert!(settings.weighted);
        assert_eq!(settings.resources_param(), "2,0,3,1,4");
        assert_eq!(settings.settings_param(), "1");
    }

    #[test]
    fn test_apply_query_missing_params_restore_defaults() {
        let mut settings = GeneratorSettings::default()
            .with_weighted(true)
            .with_resources(ResourceBudget::new(vec![3]));
        settings.apply_query(None, None).unwrap();
        assert_eq!(settings, GeneratorSettings::default());
        assert_eq!(settings.resources_param(), "");
    }

    #[test]
    fn test_apply_query_rejects_garbage() {
        let mut settings = GeneratorSettings::default();
        assert!(settings.apply_query(Some("yes"), None).is_err());
        assert!(settings.apply_query(Some("0"), Some("a,b")).is_err());
    }

    #[test]
    fn test_ron_round_trip() {
        let settings = GeneratorSettings::default()
            .with_weighted(true)
            .with_resources(ResourceBudget::new(vec![2, 0, 3]));
        let text = settings.to_ron().unwrap();
        let parsed = GeneratorSettings::from_ron(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_ron_document_with_defaults() {
        let parsed = GeneratorSettings::from_ron("(resources: Some([2, 0]))").unwrap();
        assert!(!parsed.weighted);
        assert_eq!(parsed.resources, Some(ResourceBudget::new(vec![2, 0])));
        assert!(GeneratorSettings::from_ron("(weighted: maybe)").is_err());
    }
}
