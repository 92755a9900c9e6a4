use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::prayer::method::CalculationMethod;
use crate::prayer::params::{Adjustments, HighLatitudeRule, Madhab, ParameterOverrides};

/// Sane twilight angles; values outside fall back to the documented default.
const ANGLE_RANGE: std::ops::RangeInclusive<f64> = 12.0..=20.0;
const DEFAULT_ANGLE: f64 = 18.0;
const INTERVAL_RANGE: std::ops::RangeInclusive<i64> = 0..=120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub device: DeviceConfig,
    pub location: LocationConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    pub method: CalculationMethod,
    pub fajr_angle: Option<f64>,
    pub ishaa_angle: Option<f64>,
    pub ishaa_interval: Option<i64>,
    pub madhab: Option<Madhab>,
    pub high_latitude_rule: Option<HighLatitudeRule>,
    pub adjustments: Adjustments,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub lead_minutes: i64,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Range checks. Coordinates are hard errors; out-of-range angles and
    /// intervals are clamped to documented defaults with a warning so the
    /// calculation always has usable input.
    fn validated(mut self) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(ConfigError::LatitudeOutOfRange(self.location.latitude));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(ConfigError::LongitudeOutOfRange(self.location.longitude));
        }

        self.calculation.fajr_angle = clamp_angle("fajr_angle", self.calculation.fajr_angle);
        self.calculation.ishaa_angle = clamp_angle("ishaa_angle", self.calculation.ishaa_angle);

        if let Some(interval) = self.calculation.ishaa_interval {
            if !INTERVAL_RANGE.contains(&interval) {
                warn!(
                    "ishaa_interval {} outside {:?} min, using 0",
                    interval, INTERVAL_RANGE
                );
                self.calculation.ishaa_interval = Some(0);
            }
        }

        if self.reminder.lead_minutes < 0 {
            warn!(
                "reminder lead_minutes {} is negative, disabling reminders",
                self.reminder.lead_minutes
            );
            self.reminder.lead_minutes = 0;
        }

        Ok(self)
    }

    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            fajr_angle: self.calculation.fajr_angle,
            ishaa_angle: self.calculation.ishaa_angle,
            ishaa_interval: self.calculation.ishaa_interval,
            madhab: self.calculation.madhab,
            high_latitude_rule: self.calculation.high_latitude_rule,
            adjustments: self.calculation.adjustments,
        }
    }
}

fn clamp_angle(field: &str, angle: Option<f64>) -> Option<f64> {
    match angle {
        Some(a) if !ANGLE_RANGE.contains(&a) => {
            warn!(
                "{} {} outside {:?} degrees, using {}",
                field, a, ANGLE_RANGE, DEFAULT_ANGLE
            );
            Some(DEFAULT_ANGLE)
        }
        other => other,
    }
}
