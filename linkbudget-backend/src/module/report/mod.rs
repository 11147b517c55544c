//! Report and chart output for computed link budgets

mod template;
pub use template::{format_data_rate, render_report, report_fields, substitute};

mod chart;
pub use chart::{loss_breakdown, render_svg_to_png, LossChart, DISPLAY_FLOOR_DB};

mod export;
pub use export::{ExportedReport, ReportExporter};
