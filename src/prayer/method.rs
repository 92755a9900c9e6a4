use serde::Deserialize;
use strum_macros::Display;

use crate::prayer::params::Adjustments;

/// Named astronomical authorities with published calculation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CalculationMethod {
    #[serde(alias = "mwl")]
    MuslimWorldLeague,
    Egyptian,
    Karachi,
    UmmAlQura,
    Dubai,
    #[serde(alias = "msc")]
    MoonSightingCommittee,
    Isna,
    Kuwait,
    Qatar,
    Singapore,
    Uoif,
    Custom,
}

impl Default for CalculationMethod {
    fn default() -> Self {
        CalculationMethod::MuslimWorldLeague
    }
}

/// Baseline parameters published by a calculation authority. Exactly one of
/// `ishaa_angle` / `ishaa_interval` is meaningful per method; a nonzero
/// interval takes precedence downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodParameters {
    pub fajr_angle: f64,
    pub ishaa_angle: f64,
    pub ishaa_interval: i64,
    pub adjustments: Adjustments,
}

impl MethodParameters {
    const fn angles(fajr_angle: f64, ishaa_angle: f64, adjustments: Adjustments) -> Self {
        Self {
            fajr_angle,
            ishaa_angle,
            ishaa_interval: 0,
            adjustments,
        }
    }

    const fn interval(fajr_angle: f64, ishaa_interval: i64) -> Self {
        Self {
            fajr_angle,
            ishaa_angle: 0.0,
            ishaa_interval,
            adjustments: Adjustments::NONE,
        }
    }
}

impl CalculationMethod {
    /// Fixed per-method parameter table. `Custom` has no baseline; every
    /// value is expected from user overrides.
    pub const fn parameters(self) -> MethodParameters {
        use CalculationMethod::*;
        match self {
            MuslimWorldLeague => MethodParameters::angles(18.0, 17.0, Adjustments::dhuhr(1)),
            Egyptian => MethodParameters::angles(19.5, 17.5, Adjustments::dhuhr(1)),
            Karachi => MethodParameters::angles(18.0, 18.0, Adjustments::dhuhr(1)),
            UmmAlQura => MethodParameters::interval(18.5, 90),
            Dubai => MethodParameters::angles(18.2, 18.2, Adjustments::new(0, -3, 3, 3, 3, 0)),
            MoonSightingCommittee => {
                MethodParameters::angles(18.0, 18.0, Adjustments::new(0, 0, 5, 0, 3, 0))
            }
            Isna => MethodParameters::angles(15.0, 15.0, Adjustments::dhuhr(1)),
            Kuwait => MethodParameters::angles(18.0, 17.5, Adjustments::NONE),
            Qatar => MethodParameters::interval(18.0, 90),
            Singapore => MethodParameters::angles(20.0, 18.0, Adjustments::dhuhr(1)),
            Uoif => MethodParameters::angles(12.0, 12.0, Adjustments::NONE),
            Custom => MethodParameters::angles(0.0, 0.0, Adjustments::NONE),
        }
    }
}
