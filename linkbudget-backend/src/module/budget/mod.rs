//! Link budget core
//!
//! Pure, stateless computation: band classification, the link budget
//! engine, margin interpretation and input advisories.

mod error;
pub use error::{BudgetResult, LinkBudgetError};

mod band;
pub use band::{classify_band, try_classify_band};

mod engine;
pub use engine::{
    compute, compute_modcod, compute_snr, free_space_path_loss_db, noise_floor_dbw,
    wavelength_m, MarginReference, BOLTZMANN_DBW_PER_HZ_K, SPEED_OF_LIGHT_M_S,
};

mod margin;
pub use margin::{classify_margin, STRONG_MARGIN_DB, SUFFICIENT_MARGIN_DB};

mod advisory;
pub use advisory::assess;
