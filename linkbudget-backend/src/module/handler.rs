//! Turns raw link budget requests into computed responses.
//!
//! Resolution order for every input: built-in defaults, then the terminal
//! preset, then the environment preset, then explicit request fields.

use linkbudget_common::api::{BandResponse, LinkBudgetRequest, LinkBudgetResponse};
use linkbudget_common::{FrequencyInput, FrequencyUnit, LinkParameters, ModulationScheme};
use std::sync::Arc;

use super::budget::{
    assess, classify_band, classify_margin, compute, try_classify_band, BudgetResult,
    LinkBudgetError, MarginReference,
};
use super::presets::PresetCatalog;
use super::report::loss_breakdown;

/// Required SNR used when a request names no margin reference
pub const DEFAULT_REQUIRED_SNR_DB: f64 = 10.0;

/// Link budget request handler backed by the preset catalog
pub struct LinkBudgetHandler {
    catalog: Arc<PresetCatalog>,
}

impl LinkBudgetHandler {
    pub fn new(catalog: Arc<PresetCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Resolve presets, units and the margin reference of a request
    pub fn resolve(&self, request: &LinkBudgetRequest) -> BudgetResult<(LinkParameters, MarginReference)> {
        let mut params = LinkParameters::default();

        if let Some(name) = &request.terminal {
            let terminal = self.catalog.terminal(name)?;
            params.tx_power_dbw = terminal.tx_power_dbw;
            params.tx_gain_dbi = terminal.tx_gain_dbi;
            params.rx_gain_dbi = terminal.rx_gain_dbi;
            if let Some(frequency_hz) = terminal.frequency_hz() {
                params.frequency_hz = frequency_hz;
            }
        }

        if let Some(name) = &request.environment {
            let environment = self.catalog.environment(name)?;
            params.rain_fade_db = environment.rain_fade_db;
            params.misc_losses_db = environment.misc_losses_db;
        }

        if let Some(frequency) = &request.frequency {
            params.frequency_hz = normalize("frequency_hz", frequency, FrequencyUnit::GHz)?;
        }
        if let Some(bandwidth) = &request.bandwidth {
            params.bandwidth_hz = normalize("bandwidth_hz", bandwidth, FrequencyUnit::MHz)?;
        }

        override_with(&mut params.tx_power_dbw, request.tx_power_dbw);
        override_with(&mut params.tx_gain_dbi, request.tx_gain_dbi);
        override_with(&mut params.rx_gain_dbi, request.rx_gain_dbi);
        override_with(&mut params.distance_km, request.distance_km);
        override_with(&mut params.noise_figure_db, request.noise_figure_db);
        override_with(&mut params.rain_fade_db, request.rain_fade_db);
        override_with(&mut params.misc_losses_db, request.misc_losses_db);

        let reference = self.margin_reference(request)?;
        Ok((params, reference))
    }

    fn margin_reference(&self, request: &LinkBudgetRequest) -> BudgetResult<MarginReference> {
        let given = [
            request.required_snr_db.is_some(),
            request.modcod.is_some(),
            request.modulation.is_some(),
        ]
        .iter()
        .filter(|given| **given)
        .count();

        if given > 1 {
            return Err(LinkBudgetError::invalid(
                "margin_reference",
                "specify only one of required_snr_db, modcod or modulation",
            ));
        }

        if let Some(name) = &request.modcod {
            return Ok(MarginReference::Modulation(self.catalog.modcod(name)?.clone()));
        }
        if let Some(explicit) = &request.modulation {
            return Ok(MarginReference::Modulation(ModulationScheme::explicit(
                explicit.spectral_efficiency_bps_per_hz,
                explicit.required_ebn0_db,
            )));
        }
        Ok(MarginReference::RequiredSnr(
            request.required_snr_db.unwrap_or(DEFAULT_REQUIRED_SNR_DB),
        ))
    }

    /// Full pipeline: resolve, compute, classify, assess
    pub fn handle(&self, request: &LinkBudgetRequest) -> BudgetResult<LinkBudgetResponse> {
        let (params, reference) = self.resolve(request)?;
        let result = compute(&params, &reference)?;

        let band = classify_band(params.frequency_hz);
        let tier = classify_margin(result.link_margin_db);
        let advisories = assess(&params, band, request.orbit);
        let warnings = advisories.iter().map(|a| a.message()).collect();
        let modulation = match reference {
            MarginReference::Modulation(scheme) => Some(scheme),
            MarginReference::RequiredSnr(_) => None,
        };

        tracing::info!(
            "Link budget: {} at {:.3} GHz over {:.1} km -> margin {:.2} dB ({})",
            band,
            params.frequency_hz / 1e9,
            params.distance_km,
            result.link_margin_db,
            tier
        );

        Ok(LinkBudgetResponse {
            success: true,
            request_id: uuid::Uuid::now_v7().to_string(),
            frequency_hz: params.frequency_hz,
            bandwidth_hz: params.bandwidth_hz,
            distance_km: params.distance_km,
            band,
            tier,
            advice: tier.advice().to_string(),
            modulation,
            loss_breakdown: loss_breakdown(&result, &params),
            result,
            advisories,
            warnings,
        })
    }

    /// Classify a single frequency for display
    pub fn band_lookup(&self, frequency: &FrequencyInput) -> BudgetResult<BandResponse> {
        let frequency_hz = normalize("frequency_hz", frequency, FrequencyUnit::Hz)?;
        let band = try_classify_band(frequency_hz)?;
        Ok(BandResponse {
            frequency_hz,
            band,
            tactical_satcom: band.is_tactical_satcom(),
        })
    }
}

fn override_with(field: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn normalize(name: &'static str, input: &FrequencyInput, default_unit: FrequencyUnit) -> BudgetResult<f64> {
    input
        .to_hz(default_unit)
        .map_err(|reason| LinkBudgetError::invalid(name, reason))
}
