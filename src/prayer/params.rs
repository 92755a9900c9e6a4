use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::prayer::method::CalculationMethod;

/// Jurisprudential school; affects only the Asr shadow-length multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Madhab {
    Shafi,
    Hanafi,
}

impl Default for Madhab {
    fn default() -> Self {
        Madhab::Shafi
    }
}

impl Madhab {
    pub fn shadow_length(self) -> f64 {
        match self {
            Madhab::Shafi => 1.0,
            Madhab::Hanafi => 2.0,
        }
    }
}

/// Correction strategy for latitudes where the twilight angle geometry has
/// no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HighLatitudeRule {
    MiddleOfNight,
    SeventhOfNight,
    TwilightAngle,
}

impl Default for HighLatitudeRule {
    fn default() -> Self {
        HighLatitudeRule::MiddleOfNight
    }
}

impl HighLatitudeRule {
    /// Fraction of the night allotted to twilight under this rule.
    pub fn night_portion(self, angle: f64) -> f64 {
        match self {
            HighLatitudeRule::MiddleOfNight => 1.0 / 2.0,
            HighLatitudeRule::SeventhOfNight => 1.0 / 7.0,
            HighLatitudeRule::TwilightAngle => angle / 60.0,
        }
    }
}

/// Signed minute offsets applied per prayer after all geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Adjustments {
    pub fajr: i64,
    pub shuruq: i64,
    pub dhuhr: i64,
    pub asr: i64,
    pub maghrib: i64,
    pub ishaa: i64,
}

impl Adjustments {
    pub const NONE: Self = Self::new(0, 0, 0, 0, 0, 0);

    pub const fn new(fajr: i64, shuruq: i64, dhuhr: i64, asr: i64, maghrib: i64, ishaa: i64) -> Self {
        Self {
            fajr,
            shuruq,
            dhuhr,
            asr,
            maghrib,
            ishaa,
        }
    }

    pub const fn dhuhr(minutes: i64) -> Self {
        Self::new(0, 0, minutes, 0, 0, 0)
    }

    /// Sums two adjustment sets; user offsets add on top of a method's
    /// baseline, they never replace it.
    pub fn merged(self, other: Adjustments) -> Adjustments {
        Adjustments {
            fajr: self.fajr + other.fajr,
            shuruq: self.shuruq + other.shuruq,
            dhuhr: self.dhuhr + other.dhuhr,
            asr: self.asr + other.asr,
            maghrib: self.maghrib + other.maghrib,
            ishaa: self.ishaa + other.ishaa,
        }
    }
}

/// User-supplied overrides for a calculation method. Any field left `None`
/// falls back to the method's baseline.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    pub fajr_angle: Option<f64>,
    pub ishaa_angle: Option<f64>,
    pub ishaa_interval: Option<i64>,
    pub madhab: Option<Madhab>,
    pub high_latitude_rule: Option<HighLatitudeRule>,
    pub adjustments: Adjustments,
}

/// Fully resolved parameter set consumed by the solar time engine. A nonzero
/// `ishaa_interval` overrides angle-based Ishaa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    pub fajr_angle: f64,
    pub ishaa_angle: f64,
    pub ishaa_interval: i64,
    pub madhab: Madhab,
    pub high_latitude_rule: HighLatitudeRule,
    pub adjustments: Adjustments,
}

/// Resolves a method's baseline against user overrides. Overrides always
/// win; adjustment minutes are additive. Never fails: out-of-range input is
/// handled at the configuration boundary, not here.
pub fn resolve(method: CalculationMethod, overrides: &ParameterOverrides) -> CalculationParameters {
    let base = method.parameters();

    CalculationParameters {
        fajr_angle: overrides.fajr_angle.unwrap_or(base.fajr_angle),
        ishaa_angle: overrides.ishaa_angle.unwrap_or(base.ishaa_angle),
        ishaa_interval: overrides.ishaa_interval.unwrap_or(base.ishaa_interval),
        madhab: overrides.madhab.unwrap_or_default(),
        high_latitude_rule: overrides.high_latitude_rule.unwrap_or_default(),
        adjustments: base.adjustments.merged(overrides.adjustments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_overrides_matches_table() {
        let p = resolve(CalculationMethod::Egyptian, &ParameterOverrides::default());
        assert_eq!(p.fajr_angle, 19.5);
        assert_eq!(p.ishaa_angle, 17.5);
        assert_eq!(p.ishaa_interval, 0);
        assert_eq!(p.madhab, Madhab::Shafi);
        assert_eq!(p.high_latitude_rule, HighLatitudeRule::MiddleOfNight);
        assert_eq!(p.adjustments.dhuhr, 1);
    }

    #[test]
    fn overrides_win_over_method_baseline() {
        let overrides = ParameterOverrides {
            fajr_angle: Some(16.0),
            ishaa_interval: Some(75),
            madhab: Some(Madhab::Hanafi),
            high_latitude_rule: Some(HighLatitudeRule::SeventhOfNight),
            ..Default::default()
        };
        let p = resolve(CalculationMethod::MuslimWorldLeague, &overrides);
        assert_eq!(p.fajr_angle, 16.0);
        assert_eq!(p.ishaa_angle, 17.0);
        assert_eq!(p.ishaa_interval, 75);
        assert_eq!(p.madhab, Madhab::Hanafi);
        assert_eq!(p.high_latitude_rule, HighLatitudeRule::SeventhOfNight);
    }

    #[test]
    fn user_adjustments_add_to_baseline() {
        let overrides = ParameterOverrides {
            adjustments: Adjustments::dhuhr(2),
            ..Default::default()
        };
        let p = resolve(CalculationMethod::MuslimWorldLeague, &overrides);
        assert_eq!(p.adjustments.dhuhr, 3);
    }

    #[test]
    fn negative_adjustments_offset_baseline() {
        let overrides = ParameterOverrides {
            adjustments: Adjustments::new(0, 2, -3, 0, -3, 0),
            ..Default::default()
        };
        let p = resolve(CalculationMethod::Dubai, &overrides);
        assert_eq!(p.adjustments, Adjustments::new(0, -1, 0, 3, 0, 0));
    }

    #[test]
    fn custom_without_overrides_uses_documented_defaults() {
        let p = resolve(CalculationMethod::Custom, &ParameterOverrides::default());
        assert_eq!(p.fajr_angle, 0.0);
        assert_eq!(p.ishaa_angle, 0.0);
        assert_eq!(p.ishaa_interval, 0);
        assert_eq!(p.madhab, Madhab::Shafi);
        assert_eq!(p.high_latitude_rule, HighLatitudeRule::MiddleOfNight);
        assert_eq!(p.adjustments, Adjustments::NONE);
    }

    #[test]
    fn night_portion_per_rule() {
        assert_eq!(HighLatitudeRule::MiddleOfNight.night_portion(18.0), 0.5);
        assert!((HighLatitudeRule::SeventhOfNight.night_portion(18.0) - 1.0 / 7.0).abs() < 1e-12);
        assert!((HighLatitudeRule::TwilightAngle.night_portion(18.0) - 0.3).abs() < 1e-12);
    }
}
