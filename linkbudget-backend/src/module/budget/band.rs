//! Frequency band classification

use linkbudget_common::Band;

use super::error::{require_positive, BudgetResult};

/// Map a center frequency in Hz to its RF band.
///
/// Bands are half-open intervals closed on the left, so a frequency sitting
/// exactly on a band edge belongs to the upper band. Anything below 300 MHz,
/// including zero, falls into HF/VHF; use [`try_classify_band`] when the
/// frequency still needs validating.
pub fn classify_band(frequency_hz: f64) -> Band {
    if frequency_hz < 3e8 {
        Band::HfVhf
    } else if frequency_hz < 1e9 {
        Band::Uhf
    } else if frequency_hz < 2e9 {
        Band::L
    } else if frequency_hz < 4e9 {
        Band::S
    } else if frequency_hz < 8e9 {
        Band::C
    } else if frequency_hz < 12e9 {
        Band::X
    } else if frequency_hz < 18e9 {
        Band::Ku
    } else if frequency_hz < 26e9 {
        Band::K
    } else {
        Band::Ka
    }
}

/// Classify a frequency, rejecting zero, negative and non-finite values
pub fn try_classify_band(frequency_hz: f64) -> BudgetResult<Band> {
    require_positive("frequency_hz", frequency_hz).map(classify_band)
}
