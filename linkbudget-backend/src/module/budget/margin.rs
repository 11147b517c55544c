use linkbudget_common::MarginTier;

/// Margin above which a link is considered strong (dB)
pub const STRONG_MARGIN_DB: f64 = 10.0;
/// Margin above which a link is expected to work reliably (dB)
pub const SUFFICIENT_MARGIN_DB: f64 = 3.0;

/// Interpret a link margin in dB.
///
/// Thresholds are exclusive on the lower side: exactly 10 dB is
/// `Sufficient`, exactly 3 dB is `Marginal`, and 0 dB is `NonViable`.
pub fn classify_margin(link_margin_db: f64) -> MarginTier {
    if link_margin_db > STRONG_MARGIN_DB {
        MarginTier::Strong
    } else if link_margin_db > SUFFICIENT_MARGIN_DB {
        MarginTier::Sufficient
    } else if link_margin_db > 0.0 {
        MarginTier::Marginal
    } else {
        MarginTier::NonViable
    }
}
