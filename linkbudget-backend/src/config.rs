use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Directory HTML reports and chart PNGs are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Draw loss charts on a log scale
    #[serde(default = "default_chart_log_scale")]
    pub chart_log_scale: bool,

    /// Allow cross-origin requests from any origin
    #[serde(default)]
    pub enable_cors: bool,

    /// Optional TOML file extending the built-in presets
    #[serde(default)]
    pub preset_file: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_export_dir() -> String {
    "data/exports".to_string()
}

fn default_chart_log_scale() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            export_dir: default_export_dir(),
            chart_log_scale: default_chart_log_scale(),
            enable_cors: false,
            preset_file: None,
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: BackendConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: OnceLock<BackendConfig> = OnceLock::new();

pub const CONFIG_PATH: &str = "config.toml";

/// Load `config.toml` into [`CONFIG`]; a missing file means defaults.
pub fn read_config() -> anyhow::Result<&'static BackendConfig> {
    let config = if Path::new(CONFIG_PATH).exists() {
        BackendConfig::from_file(CONFIG_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", CONFIG_PATH, e))?
    } else {
        BackendConfig::default()
    };

    Ok(CONFIG.get_or_init(|| config))
}
