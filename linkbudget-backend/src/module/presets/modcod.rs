//! Built-in MODCOD table
//!
//! Required Eb/N0 at a quasi-error-free operating point and the matching
//! spectral efficiency, DVB-S2 style.

use linkbudget_common::ModulationScheme;

/// (name, required Eb/N0 dB, spectral efficiency bps/Hz)
const BUILTIN_MODCODS: [(&str, f64, f64); 8] = [
    ("BPSK 1/2", 1.0, 0.5),
    ("QPSK 1/2", 2.0, 1.0),
    ("QPSK 2/3", 3.1, 1.33),
    ("QPSK 3/4", 4.0, 1.5),
    ("8PSK 2/3", 6.6, 2.0),
    ("8PSK 3/4", 7.9, 2.25),
    ("16APSK 3/4", 9.0, 3.0),
    ("32APSK 4/5", 11.0, 4.0),
];

pub fn builtin_modcods() -> Vec<ModulationScheme> {
    BUILTIN_MODCODS
        .iter()
        .map(|(name, ebn0, efficiency)| ModulationScheme::named(*name, *ebn0, *efficiency))
        .collect()
}
