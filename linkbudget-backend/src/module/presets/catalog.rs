//! Preset catalog - built-in tables plus optional overrides from a TOML file
//!
//! Loaded once at startup and shared read-only between requests.

use anyhow::{Context, Result};
use linkbudget_common::api::PresetListing;
use linkbudget_common::{EnvironmentProfile, ModulationScheme, TerminalProfile};
use serde::Deserialize;
use std::path::Path;

use super::environment::builtin_environments;
use super::modcod::builtin_modcods;
use super::terminal::builtin_terminals;
use crate::module::budget::{BudgetResult, LinkBudgetError};

/// Layout of a preset override file
#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(default)]
    terminal: Vec<TerminalProfile>,
    #[serde(default)]
    environment: Vec<EnvironmentProfile>,
    #[serde(default)]
    modcod: Vec<ModulationScheme>,
}

/// Named lookup tables feeding the link budget inputs
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    terminals: Vec<TerminalProfile>,
    environments: Vec<EnvironmentProfile>,
    modcods: Vec<ModulationScheme>,
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Replace the entry with the same name, or append
fn upsert<T>(entries: &mut Vec<T>, entry: T, name_of: impl Fn(&T) -> &str) {
    let name = name_of(&entry).to_string();
    match entries.iter_mut().find(|e| same_name(name_of(&**e), &name)) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

impl PresetCatalog {
    /// Catalog holding only the built-in tables
    pub fn builtin() -> Self {
        Self {
            terminals: builtin_terminals(),
            environments: builtin_environments(),
            modcods: builtin_modcods(),
        }
    }

    /// Built-in tables extended by the `[[terminal]]`, `[[environment]]` and
    /// `[[modcod]]` entries of a TOML file
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        tracing::info!("Loading preset overrides from: {}", path_str);

        let content = tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read preset file: {}", path_str))?;

        let mut catalog = Self::builtin();
        catalog.merge_toml(&content)?;

        tracing::info!("Preset catalog ready: {}", catalog.stats());
        Ok(catalog)
    }

    /// Merge override entries, skipping invalid ones. Returns the number skipped.
    fn merge_toml(&mut self, content: &str) -> Result<usize> {
        let file: PresetFile = toml::from_str(content).context("Failed to parse preset file")?;
        let mut skipped = 0;

        for terminal in file.terminal {
            upsert(&mut self.terminals, terminal, |t| t.name.as_str());
        }
        for environment in file.environment {
            if environment.rain_fade_db < 0.0 || environment.misc_losses_db < 0.0 {
                tracing::warn!("Skipping environment '{}': negative loss", environment.name);
                skipped += 1;
                continue;
            }
            upsert(&mut self.environments, environment, |e| e.name.as_str());
        }
        for modcod in file.modcod {
            if modcod.name.is_none() {
                tracing::warn!("Skipping unnamed MODCOD entry");
                skipped += 1;
                continue;
            }
            if !(modcod.spectral_efficiency_bps_per_hz > 0.0) {
                tracing::warn!(
                    "Skipping MODCOD '{}': spectral efficiency must be positive",
                    modcod.label()
                );
                skipped += 1;
                continue;
            }
            upsert(&mut self.modcods, modcod, |m| m.label());
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} invalid preset entries", skipped);
        }
        Ok(skipped)
    }

    pub fn terminal(&self, name: &str) -> BudgetResult<&TerminalProfile> {
        self.terminals
            .iter()
            .find(|t| same_name(&t.name, name))
            .ok_or_else(|| LinkBudgetError::unknown("terminal preset", name))
    }

    pub fn environment(&self, name: &str) -> BudgetResult<&EnvironmentProfile> {
        self.environments
            .iter()
            .find(|e| same_name(&e.name, name))
            .ok_or_else(|| LinkBudgetError::unknown("environment", name))
    }

    pub fn modcod(&self, name: &str) -> BudgetResult<&ModulationScheme> {
        self.modcods
            .iter()
            .find(|m| same_name(m.label(), name))
            .ok_or_else(|| LinkBudgetError::unknown("MODCOD", name))
    }

    pub fn listing(&self) -> PresetListing {
        PresetListing {
            terminals: self.terminals.clone(),
            environments: self.environments.clone(),
            modcods: self.modcods.clone(),
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            terminals: self.terminals.len(),
            environments: self.environments.len(),
            modcods: self.modcods.len(),
        }
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Catalog statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub terminals: usize,
    pub environments: usize,
    pub modcods: usize,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Terminals: {}, Environments: {}, MODCODs: {}",
            self.terminals, self.environments, self.modcods
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TOML: &str = r#"
[[terminal]]
name = "Manpack (Directional)"
tx_power_dbw = 12.0
tx_gain_dbi = 11.0
rx_gain_dbi = 11.0

[[terminal]]
name = "Flyaway VSAT"
tx_power_dbw = 20.0
tx_gain_dbi = 40.0
rx_gain_dbi = 40.0
frequency = 14.25
frequency_unit = "GHz"

[[environment]]
name = "Arctic"
rain_fade_db = 0.0
misc_losses_db = 1.5

[[environment]]
name = "Broken"
rain_fade_db = -1.0
misc_losses_db = 0.0

[[modcod]]
name = "16APSK 2/3"
required_ebn0_db = 8.0
spectral_efficiency_bps_per_hz = 2.67

[[modcod]]
required_ebn0_db = 1.0
spectral_efficiency_bps_per_hz = 1.0
"#;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.modcod("qpsk 1/2").unwrap().required_ebn0_db, 2.0);
        assert_eq!(catalog.environment(" urban ").unwrap().misc_losses_db, 6.0);
        assert_eq!(catalog.terminal("AN/PSC-5D").unwrap().tx_power_dbw, 13.0);
    }

    #[test]
    fn test_unknown_names_are_invalid_parameters() {
        let catalog = PresetCatalog::builtin();
        let err = catalog.modcod("QPSK 9/10").unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(catalog.terminal("PRC-152").is_err());
        assert!(catalog.environment("Lunar").is_err());
    }

    #[test]
    fn test_merge_overrides_and_extends() {
        let mut catalog = PresetCatalog::builtin();
        let before = catalog.stats();
        let skipped = catalog.merge_toml(SAMPLE_TOML).unwrap();

        assert_eq!(skipped, 2);
        let after = catalog.stats();
        assert_eq!(after.terminals, before.terminals + 1);
        assert_eq!(after.environments, before.environments + 1);
        assert_eq!(after.modcods, before.modcods + 1);

        assert_eq!(catalog.terminal("Manpack (Directional)").unwrap().tx_power_dbw, 12.0);
        assert_eq!(
            catalog.terminal("Flyaway VSAT").unwrap().frequency_hz(),
            Some(14.25e9)
        );
        assert!(catalog.environment("Broken").is_err());
    }

    #[test]
    fn test_merge_rejects_malformed_toml() {
        let mut catalog = PresetCatalog::builtin();
        assert!(catalog.merge_toml("[[terminal]]\nname = 3").is_err());
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        assert!(PresetCatalog::load_from_file("does/not/exist.toml").await.is_err());
    }
}
