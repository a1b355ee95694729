//! Demo preset loading from demo.toml
//!
//! A preset bundles a barn name, a featured horse and a theme so a demo can be
//! switched in one step. Presets come from a TOML file when one is present and from
//! the built-in list otherwise.

use crate::{
    entities::DemoState,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Structure of the whole presets file
#[derive(Debug, Deserialize)]
pub struct PresetFile {
    /// Presets in display order
    pub presets: Vec<DemoPreset>,
}

/// One demo preset
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DemoPreset {
    /// Barn name, also the preset's label
    pub barn_name: String,
    /// Horse to feature
    pub horse: String,
    /// Theme label
    pub theme: String,
    /// Owner name; when absent the current owner name is kept
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl DemoPreset {
    fn new(barn_name: &str, horse: &str, theme: &str) -> Self {
        Self {
            barn_name: barn_name.to_string(),
            horse: horse.to_string(),
            theme: theme.to_string(),
            owner_name: None,
        }
    }

    /// Demo state for this preset, keeping `current.owner_name` unless the preset
    /// names an owner.
    #[must_use]
    pub fn to_demo_state(&self, current: &DemoState) -> DemoState {
        DemoState {
            barn_name: self.barn_name.clone(),
            owner_name: self
                .owner_name
                .clone()
                .unwrap_or_else(|| current.owner_name.clone()),
            primary_horse: self.horse.clone(),
            theme: self.theme.clone(),
        }
    }
}

/// Built-in presets.
#[must_use]
pub fn default_presets() -> Vec<DemoPreset> {
    vec![
        DemoPreset::new("Sunset Stables", "Bella", "Warm"),
        DemoPreset::new("Valley View Farm", "Thunder", "Professional"),
        DemoPreset::new("Meadow Ridge Barn", "Moonlight", "Classic"),
        DemoPreset::new("Oakwood Equestrian", "Storm", "Modern"),
    ]
}

/// Parses presets from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or required fields are missing.
pub fn parse_presets(contents: &str) -> Result<Vec<DemoPreset>> {
    toml::from_str::<PresetFile>(contents)
        .map(|file| file.presets)
        .map_err(|e| Error::Config {
            message: format!("Failed to parse presets: {e}"),
        })
}

/// Loads presets from a TOML file
///
/// # Errors
/// Returns `Io` if the file cannot be read and `Config` if it cannot be parsed.
pub fn load_presets<P: AsRef<Path>>(path: P) -> Result<Vec<DemoPreset>> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load demo presets from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).inspect_err(|e| {
        tracing::error!("Failed to read presets file {}: {}", path_ref.display(), e);
    })?;
    parse_presets(&contents)
}

/// Loads presets from `path` if it exists, otherwise returns the built-in ones.
///
/// # Errors
/// Returns an error only if the file exists but is invalid.
pub fn load_presets_or_default<P: AsRef<Path>>(path: P) -> Result<Vec<DemoPreset>> {
    if path.as_ref().exists() {
        load_presets(path)
    } else {
        Ok(default_presets())
    }
}

/// Finds a preset by barn name, ignoring case.
#[must_use]
pub fn find_preset<'a>(presets: &'a [DemoPreset], barn_name: &str) -> Option<&'a DemoPreset> {
    presets
        .iter()
        .find(|preset| preset.barn_name.eq_ignore_ascii_case(barn_name))
}
