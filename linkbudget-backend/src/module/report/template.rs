//! Text report built by plain placeholder substitution.
//!
//! Each `{{TOKEN}}` maps to exactly one rounded value; there are no
//! expressions or control flow in the template.

use chrono::{DateTime, Local};
use linkbudget_common::api::LinkBudgetResponse;
use linkbudget_common::MarginMode;

const REPORT_TEMPLATE: &str = include_str!("../../../resources/report_template.html");

/// Replace each token in order. Tokens absent from `fields` are left as-is.
pub fn substitute(template: &str, fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .fold(template.to_string(), |text, (token, value)| text.replace(token, value))
}

pub fn format_data_rate(bps: f64) -> String {
    if bps >= 1e9 {
        format!("{:.2} Gbps", bps / 1e9)
    } else if bps >= 1e6 {
        format!("{:.2} Mbps", bps / 1e6)
    } else if bps >= 1e3 {
        format!("{:.2} kbps", bps / 1e3)
    } else {
        format!("{:.2} bps", bps)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn db(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}

/// Ordered (token, value) pairs for one response
pub fn report_fields(response: &LinkBudgetResponse, generated_at: &str) -> Vec<(&'static str, String)> {
    let result = &response.result;
    let (mode, achieved, required) = match result.mode {
        MarginMode::Snr => ("SNR", result.snr_actual_db, result.snr_required_db),
        MarginMode::Ebn0 => ("Eb/N0", result.ebn0_actual_db, result.ebn0_required_db),
    };

    vec![
        ("{{REQUEST_ID}}", response.request_id.clone()),
        ("{{FREQ_GHZ}}", format!("{:.3}", response.frequency_hz / 1e9)),
        ("{{BAND}}", response.band.to_string()),
        ("{{DISTANCE_KM}}", format!("{:.2}", response.distance_km)),
        ("{{BANDWIDTH_MHZ}}", format!("{:.2}", response.bandwidth_hz / 1e6)),
        ("{{MODE}}", mode.to_string()),
        (
            "{{MODULATION}}",
            response
                .modulation
                .as_ref()
                .map_or_else(|| "N/A".to_string(), |m| escape_html(m.label())),
        ),
        ("{{EIRP_DBW}}", format!("{:.2}", result.eirp_dbw)),
        ("{{FSPL_DB}}", format!("{:.2}", result.free_space_path_loss_db)),
        ("{{TOTAL_LOSS_DB}}", format!("{:.2}", result.total_loss_db)),
        ("{{RX_POWER_DBW}}", format!("{:.2}", result.received_power_dbw)),
        ("{{NOISE_FLOOR_DBW}}", format!("{:.2}", result.noise_floor_dbw)),
        ("{{CN0_DBHZ}}", format!("{:.2}", result.carrier_to_noise_density_dbhz)),
        (
            "{{DATA_RATE}}",
            result
                .data_rate_bps
                .map_or_else(|| "N/A".to_string(), format_data_rate),
        ),
        ("{{ACHIEVED_DB}}", db(achieved)),
        ("{{REQUIRED_DB}}", db(required)),
        ("{{MARGIN_DB}}", format!("{:.2}", result.link_margin_db)),
        ("{{TIER}}", response.tier.to_string()),
        ("{{TIER_COLOR}}", response.tier.to_color_hex().to_string()),
        ("{{ADVICE}}", response.advice.clone()),
        ("{{WARNINGS}}", escape_html(&response.warnings.join("; "))),
        ("{{GENERATED_AT}}", generated_at.to_string()),
    ]
}

/// Render the HTML report for a computed response
pub fn render_report(response: &LinkBudgetResponse, generated_at: DateTime<Local>) -> String {
    let generated_at = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    substitute(REPORT_TEMPLATE, &report_fields(response, &generated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::handler::LinkBudgetHandler;
    use crate::module::presets::PresetCatalog;
    use linkbudget_common::api::LinkBudgetRequest;
    use std::sync::Arc;

    fn response(request: LinkBudgetRequest) -> LinkBudgetResponse {
        LinkBudgetHandler::new(Arc::new(PresetCatalog::builtin()))
            .handle(&request)
            .unwrap()
    }

    #[test]
    fn test_substitute_is_ordered_and_literal() {
        let fields = vec![
            ("{{A}}", "{{B}}".to_string()),
            ("{{B}}", "2".to_string()),
        ];
        assert_eq!(substitute("{{A}} {{B}} {{C}}", &fields), "2 2 {{C}}");
    }

    #[test]
    fn test_format_data_rate() {
        assert_eq!(format_data_rate(1e6), "1.00 Mbps");
        assert_eq!(format_data_rate(2.5e9), "2.50 Gbps");
        assert_eq!(format_data_rate(9600.0), "9.60 kbps");
        assert_eq!(format_data_rate(300.0), "300.00 bps");
    }

    #[test]
    fn test_report_has_no_unfilled_tokens() {
        let resp = response(LinkBudgetRequest {
            modcod: Some("QPSK 1/2".to_string()),
            ..Default::default()
        });
        let html = render_report(&resp, Local::now());
        assert!(!html.contains("{{"), "unfilled token in report");
        assert!(html.contains("8.400 GHz"));
        assert!(html.contains("X-band"));
        assert!(html.contains("1.00 Mbps"));
        assert!(html.contains(&format!("{:.2} dB", resp.result.link_margin_db)));
    }

    #[test]
    fn test_snr_report_marks_data_rate_unavailable() {
        let resp = response(LinkBudgetRequest::default());
        let fields = report_fields(&resp, "now");
        let lookup = |token: &str| {
            fields
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(lookup("{{MODE}}"), "SNR");
        assert_eq!(lookup("{{DATA_RATE}}"), "N/A");
        assert_eq!(lookup("{{REQUIRED_DB}}"), "10.00");
        assert_eq!(lookup("{{GENERATED_AT}}"), "now");
    }
}
