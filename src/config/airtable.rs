//! Spreadsheet API configuration.
//!
//! The base id and API key fall back to recognisable placeholders so that a missing
//! `.env` is reported by validation instead of failing at startup.

/// Env var holding the spreadsheet base id.
pub const BASE_ID_VAR: &str = "AIRTABLE_BASE_ID";
/// Env var holding the API key.
pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";
/// Env var naming the default table.
pub const TABLE_NAME_VAR: &str = "AIRTABLE_TABLE_NAME";

/// Placeholder used when no base id is configured.
pub const PLACEHOLDER_BASE_ID: &str = "app__________";
/// Placeholder used when no API key is configured.
pub const PLACEHOLDER_API_KEY: &str = "key__________";
/// Table used when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "Horses";

/// Spreadsheet connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AirtableConfig {
    /// Base identifier
    pub base_id: String,
    /// Bearer token
    pub api_key: String,
    /// Default table
    pub table_name: String,
}

// Keeps the key out of logs.
impl std::fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("base_id", &self.base_id)
            .field("api_key", &"<redacted>")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            base_id: PLACEHOLDER_BASE_ID.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

impl AirtableConfig {
    /// Reads settings through `lookup`, falling back to placeholders.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, fallback: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            base_id: read(BASE_ID_VAR, PLACEHOLDER_BASE_ID),
            api_key: read(API_KEY_VAR, PLACEHOLDER_API_KEY),
            table_name: read(TABLE_NAME_VAR, DEFAULT_TABLE_NAME),
        }
    }

    /// Whether a real base id is set.
    #[must_use]
    pub fn has_base_id(&self) -> bool {
        !self.base_id.is_empty() && self.base_id != PLACEHOLDER_BASE_ID
    }

    /// Whether a real API key is set.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// Names of the required variables that are missing.
    #[must_use]
    pub fn missing_vars(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.has_base_id() {
            missing.push(BASE_ID_VAR.to_string());
        }
        if !self.has_api_key() {
            missing.push(API_KEY_VAR.to_string());
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lookup_from;

    #[test]
    fn test_defaults_are_placeholders() {
        let config = AirtableConfig::from_lookup(|_| None);
        assert_eq!(config, AirtableConfig::default());
        assert_eq!(config.missing_vars(), [BASE_ID_VAR, API_KEY_VAR]);
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = AirtableConfig::from_lookup(lookup_from(&[
            (BASE_ID_VAR, "appReal123"),
            (API_KEY_VAR, ""),
            (TABLE_NAME_VAR, "Barns"),
        ]));
        assert_eq!(config.base_id, "appReal123");
        assert_eq!(config.api_key, PLACEHOLDER_API_KEY);
        assert_eq!(config.table_name, "Barns");
        assert_eq!(config.missing_vars(), [API_KEY_VAR]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AirtableConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "patSECRET")]));
        let debug = format!("{config:?}");
        assert!(!debug.contains("patSECRET"));
        assert!(debug.contains("<redacted>"));
    }
}
