//! Static preset data: terminals, environments and MODCODs
//!
//! These tables only pre-populate link budget inputs; the engine never
//! reads them directly.

mod modcod;
pub use modcod::builtin_modcods;

mod terminal;
pub use terminal::builtin_terminals;

mod environment;
pub use environment::builtin_environments;

mod catalog;
pub use catalog::{CatalogStats, PresetCatalog};
