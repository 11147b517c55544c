//! Non-blocking plausibility checks on link inputs

use linkbudget_common::{Advisory, Band, LinkParameters, OrbitRegime};

/// Collect advisories for an otherwise valid input set.
///
/// Without an explicit orbit regime the distance is checked against LEO,
/// the lowest regime.
pub fn assess(params: &LinkParameters, band: Band, orbit: Option<OrbitRegime>) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if !band.is_tactical_satcom() {
        advisories.push(Advisory::NonTacticalBand { band });
    }

    let orbit = orbit.unwrap_or_default();
    let minimum_km = orbit.min_slant_range_km();
    if params.distance_km < minimum_km {
        advisories.push(Advisory::DistanceBelowOrbit {
            orbit,
            distance_km: params.distance_km,
            minimum_km,
        });
    }

    for advisory in &advisories {
        tracing::debug!("Advisory: {}", advisory.message());
    }

    advisories
}
