pub mod budget;
pub mod handler;
pub mod presets;
pub mod report;
