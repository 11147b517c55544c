//! Request/response bodies of the HTTP API

use serde::{Deserialize, Serialize};

use crate::model::{
    Advisory, EnvironmentProfile, LinkBudgetResult, LossComponent, ModulationScheme,
    TerminalProfile,
};
use crate::types::{Band, FrequencyInput, MarginTier, OrbitRegime};

/// Explicit modulation given by its numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitModulation {
    pub spectral_efficiency_bps_per_hz: f64,
    pub required_ebn0_db: f64,
}

/// Raw link budget request as submitted by a form or API client.
///
/// Every field is optional: values are taken from the built-in defaults,
/// then the terminal preset, then the environment preset, then the
/// explicit fields, in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkBudgetRequest {
    pub terminal: Option<String>,
    pub environment: Option<String>,

    pub tx_power_dbw: Option<f64>,
    pub tx_gain_dbi: Option<f64>,
    pub rx_gain_dbi: Option<f64>,
    /// Bare numbers are GHz
    pub frequency: Option<FrequencyInput>,
    pub distance_km: Option<f64>,
    pub noise_figure_db: Option<f64>,
    /// Bare numbers are MHz
    pub bandwidth: Option<FrequencyInput>,
    pub rain_fade_db: Option<f64>,
    pub misc_losses_db: Option<f64>,

    // At most one margin reference; none means SNR mode with the default threshold
    pub required_snr_db: Option<f64>,
    pub modcod: Option<String>,
    pub modulation: Option<ExplicitModulation>,

    pub orbit: Option<OrbitRegime>,
}

/// Computed link budget with its interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBudgetResponse {
    pub success: bool,
    pub request_id: String,
    pub frequency_hz: f64,
    pub bandwidth_hz: f64,
    pub distance_km: f64,
    pub band: Band,
    pub tier: MarginTier,
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulation: Option<ModulationScheme>,
    pub result: LinkBudgetResult,
    pub advisories: Vec<Advisory>,
    pub warnings: Vec<String>,
    pub loss_breakdown: Vec<LossComponent>,
}

/// Band lookup for a single frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandResponse {
    pub frequency_hz: f64,
    pub band: Band,
    pub tactical_satcom: bool,
}

/// All preset tables known to the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetListing {
    pub terminals: Vec<TerminalProfile>,
    pub environments: Vec<EnvironmentProfile>,
    pub modcods: Vec<ModulationScheme>,
}

/// Files written by a report export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    pub request_id: String,
    pub report_path: String,
    pub chart_path: String,
}

/// Generic status message, used for failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}
