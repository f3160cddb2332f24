use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Connectivity tier. Ordered: a higher tier satisfies any lower minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WifiQuality {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl WifiQuality {
    pub const ALL: [WifiQuality; 4] = [
        WifiQuality::Poor,
        WifiQuality::Moderate,
        WifiQuality::Good,
        WifiQuality::Excellent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WifiQuality::Poor => "poor",
            WifiQuality::Moderate => "moderate",
            WifiQuality::Good => "good",
            WifiQuality::Excellent => "excellent",
        }
    }
}

impl fmt::Display for WifiQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WifiQuality {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        WifiQuality::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| PlannerError::invalid("wifiQuality", format!("unknown tier `{value}`")))
    }
}

/// Noise tier. Deliberately not `Ord`: filtering on it is exact-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Silent,
    Quiet,
    Moderate,
    Noisy,
}

impl NoiseLevel {
    pub const ALL: [NoiseLevel; 4] = [
        NoiseLevel::Silent,
        NoiseLevel::Quiet,
        NoiseLevel::Moderate,
        NoiseLevel::Noisy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoiseLevel::Silent => "silent",
            NoiseLevel::Quiet => "quiet",
            NoiseLevel::Moderate => "moderate",
            NoiseLevel::Noisy => "noisy",
        }
    }
}

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseLevel {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        NoiseLevel::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| PlannerError::invalid("noiseLevel", format!("unknown tier `{value}`")))
    }
}

/// One co-working space as stored by the directory backend (snake_case row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wifi_speed_mbps: Option<f64>,
    #[serde(default)]
    pub wifi_quality: Option<WifiQuality>,
    #[serde(default)]
    pub has_power_outlets: Option<bool>,
    #[serde(default)]
    pub power_outlet_count: Option<String>,
    #[serde(default)]
    pub noise_level: Option<NoiseLevel>,
    #[serde(default)]
    pub has_quiet_zones: Option<bool>,
    #[serde(default)]
    pub hours_open: Option<String>,
    #[serde(default)]
    pub hours_close: Option<String>,
    #[serde(default)]
    pub open_24_hours: Option<bool>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Workspace {
    /// Decode a JSON array of store rows, reporting the failing path.
    pub fn from_rows_json(json: &str) -> Result<Vec<Workspace>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            PlannerError::invalid(
                "workspaces",
                format!("row decoding failed at {}: {}", err.path(), err.inner()),
            )
        })
    }

    pub fn has_power_outlets(&self) -> bool {
        self.has_power_outlets.unwrap_or(false)
    }

    pub fn has_quiet_zones(&self) -> bool {
        self.has_quiet_zones.unwrap_or(false)
    }

    pub fn amenities(&self) -> &[String] {
        self.amenities.as_deref().unwrap_or_default()
    }

    pub fn hours_label(&self) -> String {
        if self.open_24_hours.unwrap_or(false) {
            return "24/7".to_string();
        }
        match (&self.hours_open, &self.hours_close) {
            (Some(open), Some(close)) => format!("{open} - {close}"),
            _ => "Hours vary".to_string(),
        }
    }
}
