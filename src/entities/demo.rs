//! Demo personalization state.
//!
//! A `DemoState` is created with defaults at startup and changed only by explicit user
//! action: choosing a preset or editing a field. It is never persisted.

use serde::{Deserialize, Serialize};

/// Horse featured by the baseline fixture data.
pub const DEFAULT_PRIMARY_HORSE: &str = "Bella";

/// Personalization input for the demo dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoState {
    /// Barn name shown in the chrome
    pub barn_name: String,
    /// Barn owner's name
    pub owner_name: String,
    /// Name (not id) of the horse to feature
    pub primary_horse: String,
    /// Display-only theme label
    pub theme: String,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            barn_name: "Sunset Stables".to_string(),
            owner_name: "Demo Barn".to_string(),
            primary_horse: DEFAULT_PRIMARY_HORSE.to_string(),
            theme: "Warm".to_string(),
        }
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUpdate {
    /// New barn name
    pub barn_name: Option<String>,
    /// New owner name
    pub owner_name: Option<String>,
    /// New primary horse
    pub primary_horse: Option<String>,
    /// New theme
    pub theme: Option<String>,
}

impl DemoState {
    /// Merges the set fields of `update` into this state.
    pub fn apply(&mut self, update: DemoUpdate) {
        if let Some(barn_name) = update.barn_name {
            self.barn_name = barn_name;
        }
        if let Some(owner_name) = update.owner_name {
            self.owner_name = owner_name;
        }
        if let Some(primary_horse) = update.primary_horse {
            self.primary_horse = primary_horse;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
    }

    /// Restores the startup defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the baseline featured horse is still the primary one.
    #[must_use]
    pub fn features_default_horse(&self) -> bool {
        self.primary_horse == DEFAULT_PRIMARY_HORSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut state = DemoState::default();
        state.apply(DemoUpdate {
            barn_name: Some("Valley View Farm".to_string()),
            primary_horse: Some("Thunder".to_string()),
            ..Default::default()
        });

        assert_eq!(state.barn_name, "Valley View Farm");
        assert_eq!(state.primary_horse, "Thunder");
        assert_eq!(state.owner_name, "Demo Barn");
        assert_eq!(state.theme, "Warm");
        assert!(!state.features_default_horse());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = DemoState {
            barn_name: "Oakwood Equestrian".to_string(),
            owner_name: "Jo".to_string(),
            primary_horse: "Storm".to_string(),
            theme: "Modern".to_string(),
        };
        state.reset();
        assert_eq!(state, DemoState::default());
        assert!(state.features_default_horse());
    }
}
