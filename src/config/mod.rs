//! Application configuration.
//!
//! Settings come from the process environment (optionally primed from `.env`).
//! Missing credentials are reported by `validate`, never treated as fatal here; the
//! spreadsheet client refuses to build without them instead.

/// Spreadsheet API settings
pub mod airtable;

/// Payment provider keys
pub mod payments;

/// Demo presets from demo.toml
pub mod presets;

pub use airtable::AirtableConfig;
pub use payments::PaymentsConfig;

use tracing::{info, warn};

/// Env var selecting the runtime environment.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Everything the application reads from its environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Spreadsheet settings
    pub airtable: AirtableConfig,
    /// Payment provider keys
    pub payments: PaymentsConfig,
    /// `APP_ENV=production`
    pub is_production: bool,
}

/// Outcome of configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvValidation {
    /// Required variables that are not set
    pub missing_vars: Vec<String>,
}

impl EnvValidation {
    /// Whether nothing is missing.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing_vars.is_empty()
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            airtable: AirtableConfig::from_lookup(&lookup),
            payments: PaymentsConfig::from_lookup(&lookup),
            is_production: lookup(APP_ENV_VAR).is_some_and(|env| env == "production"),
        }
    }

    /// Whether this is a development run.
    #[must_use]
    pub const fn is_development(&self) -> bool {
        !self.is_production
    }

    /// Checks that the spreadsheet credentials are set.
    #[must_use]
    pub fn validate(&self) -> EnvValidation {
        EnvValidation {
            missing_vars: self.airtable.missing_vars(),
        }
    }

    /// Logs which settings are present, never their values. Silent in production.
    pub fn log_environment_status(&self) {
        if self.is_production {
            return;
        }

        let set = |present: bool| if present { "set" } else { "missing" };
        info!(
            base_id = set(self.airtable.has_base_id()),
            api_key = set(self.airtable.has_api_key()),
            table = %self.airtable.table_name,
            payments = set(self.payments.is_configured()),
            "Environment configuration"
        );

        let validation = self.validate();
        if validation.is_valid() {
            info!("All required environment variables are configured");
        } else {
            warn!(
                missing = ?validation.missing_vars,
                "Missing environment variables; set them in .env to enable live data"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lookup_from;

    #[test]
    fn test_empty_environment_is_invalid_but_loads() {
        let config = AppConfig::from_lookup(|_| None);
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert_eq!(
            validation.missing_vars,
            [airtable::BASE_ID_VAR, airtable::API_KEY_VAR]
        );
        assert!(config.is_development());
        config.log_environment_status();
    }

    #[test]
    fn test_complete_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (airtable::BASE_ID_VAR, "appBarn42"),
            (airtable::API_KEY_VAR, "patKey"),
            (payments::PUBLISHABLE_KEY_VAR, "pk_test"),
            (payments::SECRET_KEY_VAR, "sk_test"),
            (APP_ENV_VAR, "production"),
        ]));
        assert!(config.validate().is_valid());
        assert!(config.is_production);
        assert!(config.payments.is_configured());
        assert_eq!(config.airtable.table_name, airtable::DEFAULT_TABLE_NAME);
    }
}
