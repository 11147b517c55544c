//! Link budget value records shared between the engine and its callers

use serde::{Deserialize, Serialize};

use crate::types::{Band, FrequencyUnit, OrbitRegime};

/// Normalized RF and link inputs for one computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkParameters {
    pub tx_power_dbw: f64,
    pub tx_gain_dbi: f64,
    pub rx_gain_dbi: f64,
    pub frequency_hz: f64,
    /// Slant range to the satellite
    pub distance_km: f64,
    pub noise_figure_db: f64,
    pub bandwidth_hz: f64,
    pub rain_fade_db: f64,
    pub misc_losses_db: f64,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            tx_power_dbw: 10.0,
            tx_gain_dbi: 10.0,
            rx_gain_dbi: 10.0,
            frequency_hz: 8.4e9,
            distance_km: 100.0,
            noise_figure_db: 3.0,
            bandwidth_hz: 1e6,
            rain_fade_db: 3.0,
            misc_losses_db: 2.0,
        }
    }
}

/// A modulation and coding scheme (MODCOD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationScheme {
    #[serde(default)]
    pub name: Option<String>,
    pub required_ebn0_db: f64,
    pub spectral_efficiency_bps_per_hz: f64,
}

impl ModulationScheme {
    pub fn named(name: impl Into<String>, required_ebn0_db: f64, spectral_efficiency_bps_per_hz: f64) -> Self {
        Self {
            name: Some(name.into()),
            required_ebn0_db,
            spectral_efficiency_bps_per_hz,
        }
    }

    /// Scheme given only by its numbers, not drawn from the MODCOD table
    pub fn explicit(spectral_efficiency_bps_per_hz: f64, required_ebn0_db: f64) -> Self {
        Self {
            name: None,
            required_ebn0_db,
            spectral_efficiency_bps_per_hz,
        }
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Custom")
    }
}

/// Named environment supplying default loss terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub name: String,
    pub rain_fade_db: f64,
    pub misc_losses_db: f64,
}

/// Named terminal supplying default transmitter and antenna figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalProfile {
    pub name: String,
    pub tx_power_dbw: f64,
    pub tx_gain_dbi: f64,
    pub rx_gain_dbi: f64,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub frequency_unit: Option<FrequencyUnit>,
}

impl TerminalProfile {
    /// Default operating frequency in Hz, if the terminal has one
    pub fn frequency_hz(&self) -> Option<f64> {
        self.frequency
            .map(|f| self.frequency_unit.unwrap_or(FrequencyUnit::Hz).to_hz(f))
    }
}

/// Which margin model produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginMode {
    /// Flat required SNR against received power over noise floor
    Snr,
    /// Required Eb/N0 of a modulation scheme
    Ebn0,
}

/// Output of one link budget computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBudgetResult {
    pub mode: MarginMode,
    pub free_space_path_loss_db: f64,
    pub total_loss_db: f64,
    pub eirp_dbw: f64,
    pub received_power_dbw: f64,
    pub noise_floor_dbw: f64,
    pub carrier_to_noise_density_dbhz: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate_bps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebn0_actual_db: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebn0_required_db: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snr_actual_db: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snr_required_db: Option<f64>,
    pub link_margin_db: f64,
}

/// Non-fatal warning returned next to a computed result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Frequency outside the tactical SATCOM band set
    NonTacticalBand { band: Band },
    /// Slant range shorter than the satellite altitude of the orbit regime
    DistanceBelowOrbit {
        orbit: OrbitRegime,
        distance_km: f64,
        minimum_km: f64,
    },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::NonTacticalBand { band } => format!(
                "{} is outside the typical tactical SATCOM bands (UHF, L, S, X, Ku, Ka)",
                band
            ),
            Advisory::DistanceBelowOrbit {
                orbit,
                distance_km,
                minimum_km,
            } => format!(
                "Distance {:.1} km is below the minimum plausible {} slant range of {:.0} km",
                distance_km, orbit, minimum_km
            ),
        }
    }
}

/// One bar of the loss breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossComponent {
    pub label: String,
    pub value_db: f64,
    /// Value floored for log-scale display
    pub display_db: f64,
}
