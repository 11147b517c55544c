//! Writes HTML reports and loss charts to the export directory

use anyhow::{Context, Result};
use chrono::Local;
use linkbudget_common::api::LinkBudgetResponse;
use std::path::{Path, PathBuf};

use super::chart::{render_svg_to_png, LossChart};
use super::template::render_report;

/// Paths written by one export
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Report exporter
pub struct ReportExporter {
    output_dir: PathBuf,
    log_scale: bool,
}

impl ReportExporter {
    pub fn new(output_dir: impl AsRef<Path>, log_scale: bool) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            log_scale,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn file_stem(response: &LinkBudgetResponse) -> String {
        let time_str = Local::now().format("%Y%m%d_%H%M%S").to_string();
        format!("link_{}_{}", time_str, response.request_id)
    }

    /// Render the report and chart for a response into the export directory
    pub async fn export(&self, response: &LinkBudgetResponse) -> Result<ExportedReport> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .context("Failed to create export directory")?;

        let stem = Self::file_stem(response);
        let report_path = self.output_dir.join(format!("{}.html", stem));
        let chart_path = self.output_dir.join(format!("{}.png", stem));

        let html = render_report(response, Local::now());
        tokio::fs::write(&report_path, html)
            .await
            .context(format!("Failed to write report: {:?}", report_path))?;

        let title = format!(
            "Loss Breakdown - {} @ {:.3} GHz",
            response.band,
            response.frequency_hz / 1e9
        );
        let svg = LossChart::new(self.log_scale).render_svg(&response.loss_breakdown, &title);
        let png_path = chart_path.clone();
        tokio::task::spawn_blocking(move || render_svg_to_png(&svg, &png_path))
            .await
            .context("Chart rendering task failed")??;

        tracing::info!("Exported link budget report: {:?}, chart: {:?}", report_path, chart_path);

        Ok(ExportedReport {
            report_path,
            chart_path,
        })
    }
}
