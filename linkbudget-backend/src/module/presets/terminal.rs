//! Built-in terminal profiles

use linkbudget_common::{FrequencyUnit, TerminalProfile};

fn terminal(
    name: &str,
    tx_power_dbw: f64,
    tx_gain_dbi: f64,
    rx_gain_dbi: f64,
    frequency: f64,
    frequency_unit: FrequencyUnit,
) -> TerminalProfile {
    TerminalProfile {
        name: name.to_string(),
        tx_power_dbw,
        tx_gain_dbi,
        rx_gain_dbi,
        frequency: Some(frequency),
        frequency_unit: Some(frequency_unit),
    }
}

pub fn builtin_terminals() -> Vec<TerminalProfile> {
    vec![
        terminal("Handheld (Omni)", 5.0, 2.0, 2.0, 300.0, FrequencyUnit::MHz),
        terminal("Manpack (Directional)", 10.0, 10.0, 10.0, 8.4, FrequencyUnit::GHz),
        terminal("Vehicle Relay", 15.0, 15.0, 15.0, 2.2, FrequencyUnit::GHz),
        // 20 W UHF SATCOM with the folding high-gain antenna
        terminal("PRC-117G (SATCOM)", 13.0, 8.0, 8.0, 300.0, FrequencyUnit::MHz),
        // UHF SATCOM uplink channel
        terminal("AN/PSC-5D", 13.0, 6.0, 6.0, 310.0, FrequencyUnit::MHz),
    ]
}
