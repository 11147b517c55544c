//! Loss breakdown bar chart (SVG, rasterized to PNG with resvg)

use anyhow::{Context, Result};
use linkbudget_common::{LinkBudgetResult, LinkParameters, LossComponent};
use resvg::tiny_skia;
use resvg::usvg::{fontdb, Options, Tree};
use std::path::Path;

use super::template::substitute;

const CHART_SVG_TEMPLATE: &str = include_str!("../../../resources/loss_chart_template.svg");

/// Smallest value a bar is drawn with, so that log scales stay finite
pub const DISPLAY_FLOOR_DB: f64 = 0.01;

/// Free-space, rain and misc losses of a computed budget
pub fn loss_breakdown(result: &LinkBudgetResult, params: &LinkParameters) -> Vec<LossComponent> {
    [
        ("Free-Space Path Loss", result.free_space_path_loss_db),
        ("Rain Fade", params.rain_fade_db),
        ("Misc Losses", params.misc_losses_db),
    ]
    .into_iter()
    .map(|(label, value_db)| LossComponent {
        label: label.to_string(),
        value_db,
        display_db: value_db.max(DISPLAY_FLOOR_DB),
    })
    .collect()
}

/// Loss chart renderer
pub struct LossChart {
    log_scale: bool,
}

impl LossChart {
    const WIDTH: f32 = 560.0;
    const HEIGHT: f32 = 360.0;
    const AXIS_X: f32 = 60.0;
    const AXIS_TOP: f32 = 60.0;
    const AXIS_Y: f32 = 300.0;
    const BAR_WIDTH: f32 = 90.0;
    const BAR_SPACING: f32 = 60.0;
    const FOOTER_Y: f32 = 345.0;

    pub fn new(log_scale: bool) -> Self {
        Self { log_scale }
    }

    /// Bar height as a fraction of the plot height
    fn bar_fraction(&self, value: f64, max: f64) -> f64 {
        if self.log_scale {
            let span = (max / DISPLAY_FLOOR_DB).log10();
            if span <= 0.0 {
                return 0.0;
            }
            (value / DISPLAY_FLOOR_DB).log10() / span
        } else if max > 0.0 {
            value / max
        } else {
            0.0
        }
    }

    pub fn render_svg(&self, components: &[LossComponent], title: &str) -> String {
        let max = components
            .iter()
            .map(|c| c.display_db)
            .fold(DISPLAY_FLOOR_DB, f64::max);
        let plot_height = Self::AXIS_Y - Self::AXIS_TOP;

        let mut bars = String::new();
        for (i, component) in components.iter().enumerate() {
            let fraction = self.bar_fraction(component.display_db, max).clamp(0.0, 1.0) as f32;
            let height = plot_height * fraction;
            let x = Self::AXIS_X + Self::BAR_SPACING / 2.0 + i as f32 * (Self::BAR_WIDTH + Self::BAR_SPACING);
            let y = Self::AXIS_Y - height;

            bars.push_str(&format!(
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#4297f3" />
  <text x="{}" y="{}" text-anchor="middle" class="bar-value">{:.2} dB</text>
  <text x="{}" y="{}" text-anchor="middle" class="axis-text">{}</text>
"##,
                x,
                y,
                Self::BAR_WIDTH,
                height,
                x + Self::BAR_WIDTH / 2.0,
                y - 6.0,
                component.value_db,
                x + Self::BAR_WIDTH / 2.0,
                Self::AXIS_Y + 18.0,
                component.label
            ));
        }

        let scale = if self.log_scale { "log scale" } else { "linear scale" };
        let footer = format!(
            r#"  <text x="50%" y="{}" text-anchor="middle" class="axis-text">Loss (dB, {})</text>"#,
            Self::FOOTER_Y,
            scale
        );

        let axis_end = Self::AXIS_X
            + components.len() as f32 * (Self::BAR_WIDTH + Self::BAR_SPACING);

        let fields = vec![
            ("{{SVG_WIDTH}}", Self::WIDTH.to_string()),
            ("{{SVG_HEIGHT}}", Self::HEIGHT.to_string()),
            ("{{TITLE}}", title.to_string()),
            ("{{AXIS_X}}", Self::AXIS_X.to_string()),
            ("{{AXIS_TOP}}", Self::AXIS_TOP.to_string()),
            ("{{AXIS_Y}}", Self::AXIS_Y.to_string()),
            ("{{AXIS_END}}", axis_end.to_string()),
            ("{{BARS}}", bars),
            ("{{FOOTER}}", footer),
        ];
        substitute(CHART_SVG_TEMPLATE, &fields)
    }
}

/// Rasterize an SVG document to a PNG file
pub fn render_svg_to_png(svg_content: &str, output_path: &Path) -> Result<()> {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    tracing::debug!("Loaded {} font faces", fontdb.len());

    let mut options = Options::default();
    options.font_family = "Consolas".to_string();
    options.fontdb = std::sync::Arc::new(fontdb);

    let tree = Tree::from_str(svg_content, &options)
        .context("Failed to parse SVG")?;

    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.save_png(output_path)
        .context("Failed to save PNG")?;

    Ok(())
}
