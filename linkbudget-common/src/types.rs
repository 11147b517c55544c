use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Coarse RF band of a center frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "HF/VHF")]
    HfVhf,
    #[serde(rename = "UHF")]
    Uhf,
    #[serde(rename = "L-band")]
    L,
    #[serde(rename = "S-band")]
    S,
    #[serde(rename = "C-band")]
    C,
    #[serde(rename = "X-band")]
    X,
    #[serde(rename = "Ku-band")]
    Ku,
    #[serde(rename = "K-band")]
    K,
    #[serde(rename = "Ka-band")]
    Ka,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::HfVhf => "HF/VHF",
            Band::Uhf => "UHF",
            Band::L => "L-band",
            Band::S => "S-band",
            Band::C => "C-band",
            Band::X => "X-band",
            Band::Ku => "Ku-band",
            Band::K => "K-band",
            Band::Ka => "Ka-band",
        }
    }

    /// Whether the band belongs to the usual tactical SATCOM set
    /// (UHF, L, S, X, Ku, Ka).
    pub fn is_tactical_satcom(&self) -> bool {
        matches!(
            self,
            Band::Uhf | Band::L | Band::S | Band::X | Band::Ku | Band::Ka
        )
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit a frequency or bandwidth value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[serde(rename = "Hz", alias = "hz")]
    Hz,
    #[serde(rename = "kHz", alias = "khz")]
    KHz,
    #[serde(rename = "MHz", alias = "mhz")]
    MHz,
    #[serde(rename = "GHz", alias = "ghz")]
    GHz,
}

impl FrequencyUnit {
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
        }
    }

    /// Convert a value in this unit to Hz
    pub fn to_hz(&self, value: f64) -> f64 {
        value * self.multiplier()
    }
}

impl std::fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FrequencyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hz" => Ok(FrequencyUnit::Hz),
            "khz" => Ok(FrequencyUnit::KHz),
            "mhz" => Ok(FrequencyUnit::MHz),
            "ghz" => Ok(FrequencyUnit::GHz),
            _ => Err(format!("Unknown frequency unit: {}", s)),
        }
    }
}

static FREQUENCY_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-z]*)\s*$")
        .expect("frequency pattern is valid")
});

/// Frequency or bandwidth as supplied by a caller.
///
/// Accepts a bare number (interpreted in a caller-chosen default unit),
/// an explicit `{ "value": 8.4, "unit": "GHz" }` pair, or text such as `"8.4 GHz"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyInput {
    Number(f64),
    Value {
        value: f64,
        #[serde(default)]
        unit: Option<FrequencyUnit>,
    },
    Text(String),
}

impl FrequencyInput {
    pub fn new(value: f64, unit: FrequencyUnit) -> Self {
        FrequencyInput::Value {
            value,
            unit: Some(unit),
        }
    }

    /// Normalize to Hz, using `default_unit` when none is given.
    pub fn to_hz(&self, default_unit: FrequencyUnit) -> Result<f64, String> {
        match self {
            FrequencyInput::Number(value) => Ok(default_unit.to_hz(*value)),
            FrequencyInput::Value { value, unit } => {
                Ok(unit.unwrap_or(default_unit).to_hz(*value))
            }
            FrequencyInput::Text(text) => {
                let caps = FREQUENCY_TEXT
                    .captures(text)
                    .ok_or_else(|| format!("Cannot parse frequency: '{}'", text))?;
                let value: f64 = caps[1]
                    .parse()
                    .map_err(|_| format!("Cannot parse frequency value: '{}'", &caps[1]))?;
                let unit = match caps.get(2).map(|m| m.as_str()) {
                    Some(u) if !u.is_empty() => u.parse()?,
                    _ => default_unit,
                };
                Ok(unit.to_hz(value))
            }
        }
    }
}

/// Qualitative interpretation of a link margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginTier {
    Strong,
    Sufficient,
    Marginal,
    NonViable,
}

impl MarginTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginTier::Strong => "strong",
            MarginTier::Sufficient => "sufficient",
            MarginTier::Marginal => "marginal",
            MarginTier::NonViable => "non_viable",
        }
    }

    /// User-facing interpretation of the tier
    pub fn advice(&self) -> &'static str {
        match self {
            MarginTier::Strong => "Strong link — highly reliable.",
            MarginTier::Sufficient => "Sufficient margin — expected to work reliably.",
            MarginTier::Marginal => "Marginal link — may degrade under stress.",
            MarginTier::NonViable => {
                "Link not viable — increase power/gain, reduce distance, or widen bandwidth."
            }
        }
    }

    /// Convert to hex color for rendering
    pub fn to_color_hex(&self) -> &'static str {
        match self {
            MarginTier::Strong => "#22c55e",
            MarginTier::Sufficient => "#4297f3ff",
            MarginTier::Marginal => "#f3cd36ff",
            MarginTier::NonViable => "#ed3f3fff",
        }
    }

    pub fn is_viable(&self) -> bool {
        !matches!(self, MarginTier::NonViable)
    }
}

impl std::fmt::Display for MarginTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orbit regime used to sanity-check slant range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrbitRegime {
    #[default]
    Leo,
    Meo,
    Geo,
}

impl OrbitRegime {
    /// Shortest plausible slant range in km (satellite at zenith)
    pub fn min_slant_range_km(&self) -> f64 {
        match self {
            OrbitRegime::Leo => 160.0,
            OrbitRegime::Meo => 2_000.0,
            OrbitRegime::Geo => 35_786.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitRegime::Leo => "leo",
            OrbitRegime::Meo => "meo",
            OrbitRegime::Geo => "geo",
        }
    }
}

impl std::fmt::Display for OrbitRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
