//! Link budget engine
//!
//! Free-space path loss, received carrier power, noise floor, C/N0, Eb/N0,
//! throughput and link margin for a single set of inputs. Every function here
//! is pure: the same inputs always produce the same bits.

use std::f64::consts::PI;

use linkbudget_common::{LinkBudgetResult, LinkParameters, MarginMode, ModulationScheme};

use super::error::{require_finite, require_positive, BudgetResult, LinkBudgetError};

/// Speed of light used by the model (m/s). Deliberately the rounded value.
pub const SPEED_OF_LIGHT_M_S: f64 = 3e8;

/// Boltzmann's constant in dBW/Hz/K
pub const BOLTZMANN_DBW_PER_HZ_K: f64 = -228.6;

/// What the achieved link quality is measured against
#[derive(Debug, Clone, PartialEq)]
pub enum MarginReference {
    /// Flat SNR threshold in dB: margin = C - N - SNR_req
    RequiredSnr(f64),
    /// Modulation scheme: margin = Eb/N0 - Eb/N0_req
    Modulation(ModulationScheme),
}

impl MarginReference {
    pub fn mode(&self) -> MarginMode {
        match self {
            MarginReference::RequiredSnr(_) => MarginMode::Snr,
            MarginReference::Modulation(_) => MarginMode::Ebn0,
        }
    }

    fn validate(&self) -> BudgetResult<()> {
        match self {
            MarginReference::RequiredSnr(snr) => {
                require_finite("required_snr_db", *snr)?;
            }
            MarginReference::Modulation(scheme) => {
                require_finite("required_ebn0_db", scheme.required_ebn0_db)?;
                require_positive(
                    "spectral_efficiency_bps_per_hz",
                    scheme.spectral_efficiency_bps_per_hz,
                )?;
            }
        }
        Ok(())
    }
}

pub fn wavelength_m(frequency_hz: f64) -> f64 {
    SPEED_OF_LIGHT_M_S / frequency_hz
}

/// Friis free-space loss in dB over a slant range in km
pub fn free_space_path_loss_db(frequency_hz: f64, distance_km: f64) -> f64 {
    let wavelength_m = wavelength_m(frequency_hz);
    20.0 * ((4.0 * PI * distance_km * 1000.0) / wavelength_m).log10()
}

/// Thermal noise floor in dBW.
///
/// There is no separate system temperature term; the noise figure carries it.
pub fn noise_floor_dbw(bandwidth_hz: f64, noise_figure_db: f64) -> f64 {
    BOLTZMANN_DBW_PER_HZ_K + 10.0 * bandwidth_hz.log10() + noise_figure_db
}

fn validate(params: &LinkParameters) -> BudgetResult<()> {
    require_positive("frequency_hz", params.frequency_hz)?;
    require_positive("distance_km", params.distance_km)?;
    require_positive("bandwidth_hz", params.bandwidth_hz)?;
    require_finite("tx_power_dbw", params.tx_power_dbw)?;
    require_finite("tx_gain_dbi", params.tx_gain_dbi)?;
    require_finite("rx_gain_dbi", params.rx_gain_dbi)?;
    require_finite("noise_figure_db", params.noise_figure_db)?;
    require_finite("rain_fade_db", params.rain_fade_db)?;
    require_finite("misc_losses_db", params.misc_losses_db)?;
    Ok(())
}

/// Compute the full link budget.
///
/// Inputs are validated before anything is computed; an invalid input yields
/// `InvalidParameter` and no partial result. Inputs that are valid on their own
/// but push an intermediate value past the range of `f64` are rejected the same way.
pub fn compute(params: &LinkParameters, reference: &MarginReference) -> BudgetResult<LinkBudgetResult> {
    let outcome = validate(params)
        .and_then(|_| reference.validate())
        .map(|_| evaluate(params, reference))
        .and_then(|result| require_finite_outputs(params, result));

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Rejected link budget input: {}", e);
            return Err(e);
        }
    };

    tracing::debug!(
        "Link budget ({:?}): FSPL {:.2} dB, C {:.2} dBW, N {:.2} dBW, C/N0 {:.2} dB-Hz, margin {:.2} dB",
        result.mode,
        result.free_space_path_loss_db,
        result.received_power_dbw,
        result.noise_floor_dbw,
        result.carrier_to_noise_density_dbhz,
        result.link_margin_db
    );

    Ok(result)
}

fn evaluate(params: &LinkParameters, reference: &MarginReference) -> LinkBudgetResult {
    let fspl_db = free_space_path_loss_db(params.frequency_hz, params.distance_km);
    let total_loss_db = fspl_db + params.rain_fade_db + params.misc_losses_db;

    let eirp_dbw = params.tx_power_dbw + params.tx_gain_dbi;
    let received_power_dbw = eirp_dbw + params.rx_gain_dbi - total_loss_db;

    let noise_floor_dbw = noise_floor_dbw(params.bandwidth_hz, params.noise_figure_db);
    let cn0_dbhz = received_power_dbw - noise_floor_dbw + 10.0 * params.bandwidth_hz.log10();

    let mut result = LinkBudgetResult {
        mode: reference.mode(),
        free_space_path_loss_db: fspl_db,
        total_loss_db,
        eirp_dbw,
        received_power_dbw,
        noise_floor_dbw,
        carrier_to_noise_density_dbhz: cn0_dbhz,
        data_rate_bps: None,
        ebn0_actual_db: None,
        ebn0_required_db: None,
        snr_actual_db: None,
        snr_required_db: None,
        link_margin_db: 0.0,
    };

    match reference {
        MarginReference::RequiredSnr(required_snr_db) => {
            result.snr_actual_db = Some(received_power_dbw - noise_floor_dbw);
            result.snr_required_db = Some(*required_snr_db);
            result.link_margin_db = received_power_dbw - noise_floor_dbw - required_snr_db;
        }
        MarginReference::Modulation(scheme) => {
            let data_rate_bps = params.bandwidth_hz * scheme.spectral_efficiency_bps_per_hz;
            let ebn0_actual_db = cn0_dbhz - 10.0 * data_rate_bps.log10();
            result.data_rate_bps = Some(data_rate_bps);
            result.ebn0_actual_db = Some(ebn0_actual_db);
            result.ebn0_required_db = Some(scheme.required_ebn0_db);
            result.link_margin_db = ebn0_actual_db - scheme.required_ebn0_db;
        }
    }

    result
}

/// Reject a result whose chain overflowed, blaming the input that drives the first bad term
fn require_finite_outputs(params: &LinkParameters, result: LinkBudgetResult) -> BudgetResult<LinkBudgetResult> {
    let fspl_input = if wavelength_m(params.frequency_hz).is_finite() {
        ("distance_km", params.distance_km)
    } else {
        ("frequency_hz", params.frequency_hz)
    };
    let checks = [
        (result.free_space_path_loss_db, fspl_input),
        (result.eirp_dbw, ("tx_power_dbw", params.tx_power_dbw)),
        (result.total_loss_db, ("misc_losses_db", params.misc_losses_db)),
        (result.received_power_dbw, ("rx_gain_dbi", params.rx_gain_dbi)),
        (result.noise_floor_dbw, ("noise_figure_db", params.noise_figure_db)),
        (result.carrier_to_noise_density_dbhz, ("bandwidth_hz", params.bandwidth_hz)),
        (result.data_rate_bps.unwrap_or(0.0), ("bandwidth_hz", params.bandwidth_hz)),
        (result.ebn0_actual_db.unwrap_or(0.0), ("bandwidth_hz", params.bandwidth_hz)),
        (result.snr_actual_db.unwrap_or(0.0), ("noise_figure_db", params.noise_figure_db)),
        (result.link_margin_db, ("required_margin", f64::NAN)),
    ];

    for (output, (name, value)) in checks {
        if !output.is_finite() {
            let reason = if value.is_nan() {
                "inputs are out of the range the model can represent".to_string()
            } else {
                format!("{} is out of the range the model can represent", value)
            };
            return Err(LinkBudgetError::invalid(name, reason));
        }
    }
    Ok(result)
}

/// Margin against a flat required SNR
pub fn compute_snr(params: &LinkParameters, required_snr_db: f64) -> BudgetResult<LinkBudgetResult> {
    compute(params, &MarginReference::RequiredSnr(required_snr_db))
}

/// Margin against the required Eb/N0 of a modulation scheme
pub fn compute_modcod(params: &LinkParameters, scheme: &ModulationScheme) -> BudgetResult<LinkBudgetResult> {
    compute(params, &MarginReference::Modulation(scheme.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::budget::classify_margin;
    use linkbudget_common::MarginTier;

    fn manpack() -> LinkParameters {
        LinkParameters {
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

    fn qpsk_half() -> ModulationScheme {
        ModulationScheme::named("QPSK 1/2", 2.0, 1.0)
    }

    #[test]
    fn test_snr_mode_short_range_x_band() {
        let params = manpack();
        let result = compute_snr(&params, 10.0).unwrap();

        let wavelength = 3e8 / 8.4e9;
        let fspl = 20.0 * ((4.0 * PI * 100.0 * 1000.0) / wavelength).log10();
        let received = 10.0 + 10.0 + 10.0 - (fspl + 3.0 + 2.0);
        let noise = -228.6 + 10.0 * 1e6_f64.log10() + 3.0;

        assert_eq!(result.mode, MarginMode::Snr);
        assert_eq!(result.free_space_path_loss_db, fspl);
        assert!((result.free_space_path_loss_db - 150.93).abs() < 0.01);
        assert_eq!(result.total_loss_db, fspl + 3.0 + 2.0);
        assert_eq!(result.eirp_dbw, 20.0);
        assert_eq!(result.received_power_dbw, received);
        assert_eq!(result.noise_floor_dbw, noise);
        assert_eq!(result.link_margin_db, received - noise - 10.0);
        assert!((result.link_margin_db - 29.67).abs() < 0.01);
        assert_eq!(result.snr_required_db, Some(10.0));
        assert!(result.data_rate_bps.is_none());
    }

    #[test]
    fn test_modcod_mode_geo() {
        let params = LinkParameters {
            distance_km: 35_786.0,
            ..manpack()
        };
        let result = compute_modcod(&params, &qpsk_half()).unwrap();

        assert_eq!(result.mode, MarginMode::Ebn0);
        assert_eq!(result.data_rate_bps, Some(1e6));
        let expected = result.carrier_to_noise_density_dbhz - 10.0 * 1e6_f64.log10() - 2.0;
        assert_eq!(result.link_margin_db, expected);
        assert_eq!(result.ebn0_required_db, Some(2.0));
        assert!((result.free_space_path_loss_db - 202.0).abs() < 0.01);
        assert_eq!(classify_margin(result.link_margin_db), MarginTier::NonViable);
    }

    #[test]
    fn test_margin_decreases_with_distance() {
        let mut previous: Option<LinkBudgetResult> = None;
        for distance_km in [1.0, 10.0, 100.0, 500.0, 2_000.0, 35_786.0] {
            let params = LinkParameters { distance_km, ..manpack() };
            let result = compute_modcod(&params, &qpsk_half()).unwrap();
            if let Some(prev) = previous {
                assert!(result.received_power_dbw < prev.received_power_dbw);
                assert!(result.link_margin_db < prev.link_margin_db);
            }
            previous = Some(result);
        }
    }

    #[test]
    fn test_ebn0_independent_of_bandwidth() {
        let narrow = compute_modcod(&manpack(), &qpsk_half()).unwrap();
        let wide = compute_modcod(
            &LinkParameters {
                bandwidth_hz: 20e6,
                ..manpack()
            },
            &qpsk_half(),
        )
        .unwrap();

        assert!(wide.noise_floor_dbw > narrow.noise_floor_dbw);
        let diff = wide.ebn0_actual_db.unwrap() - narrow.ebn0_actual_db.unwrap();
        assert!(diff.abs() < 1e-9, "Eb/N0 moved by {} dB", diff);
        assert_eq!(wide.data_rate_bps, Some(20e6));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let cases = [
            LinkParameters { frequency_hz: 0.0, ..manpack() },
            LinkParameters { distance_km: 0.0, ..manpack() },
            LinkParameters { bandwidth_hz: 0.0, ..manpack() },
            LinkParameters { bandwidth_hz: -1e6, ..manpack() },
            LinkParameters { distance_km: -5.0, ..manpack() },
            LinkParameters { tx_power_dbw: f64::NAN, ..manpack() },
        ];
        for params in cases {
            let err = compute_snr(&params, 10.0).unwrap_err();
            assert!(err.is_invalid_parameter(), "{:?}", params);
            assert!(compute_modcod(&params, &qpsk_half()).is_err());
        }
    }

    #[test]
    fn test_invalid_modulation_rejected() {
        let zero_efficiency = ModulationScheme::explicit(0.0, 2.0);
        assert!(matches!(
            compute_modcod(&manpack(), &zero_efficiency),
            Err(LinkBudgetError::InvalidParameter {
                name: "spectral_efficiency_bps_per_hz",
                ..
            })
        ));
        assert!(compute_snr(&manpack(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_overflowing_inputs_rejected() {
        let dense = ModulationScheme::explicit(4.0, 2.0);
        let cases = [
            (LinkParameters { distance_km: 1e306, ..manpack() }, "distance_km"),
            (LinkParameters { frequency_hz: 1e-320, ..manpack() }, "frequency_hz"),
            (LinkParameters { bandwidth_hz: 1e308, ..manpack() }, "bandwidth_hz"),
            (LinkParameters { tx_power_dbw: f64::MAX, tx_gain_dbi: f64::MAX, ..manpack() }, "tx_power_dbw"),
        ];
        for (params, input) in cases {
            match compute_modcod(&params, &dense) {
                Err(LinkBudgetError::InvalidParameter { name, .. }) => assert_eq!(name, input),
                other => panic!("expected InvalidParameter for {}, got {:?}", input, other),
            }
        }
        assert!(compute_snr(&LinkParameters { distance_km: 1e306, ..manpack() }, 10.0).is_err());
        assert!(compute_snr(&LinkParameters { frequency_hz: 1e-320, ..manpack() }, 10.0).is_err());
    }

    #[test]
    fn test_explicit_scheme_matches_named() {
        let named = compute_modcod(&manpack(), &qpsk_half()).unwrap();
        let explicit = compute_modcod(&manpack(), &ModulationScheme::explicit(1.0, 2.0)).unwrap();
        assert_eq!(named, explicit);
    }

    #[test]
    fn test_repeated_compute_is_bit_identical() {
        let params = manpack();
        let reference = MarginReference::Modulation(qpsk_half());
        let first = compute(&params, &reference).unwrap();
        for _ in 0..100 {
            let again = compute(&params, &reference).unwrap();
            assert_eq!(again.link_margin_db.to_bits(), first.link_margin_db.to_bits());
            assert_eq!(again, first);
        }
    }
}
