use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use strum_macros::Display;

use crate::astro::{
    hour_angle_for_altitude, julian_day, shadow_altitude, SolarCoordinates, HORIZON_ALTITUDE,
};
use crate::prayer::error::ComputeError;
use crate::prayer::params::CalculationParameters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ComputeError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ComputeError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ComputeError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Shuruq,
    Dhuhr,
    Asr,
    Maghrib,
    Ishaa,
    Midnight,
    LastThird,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Morning,
    Afternoon,
}

/// Solar geometry for one civil date at fixed coordinates. Times are UTC
/// fractional hours relative to the date's midnight; they may run below 0
/// or past 24 near the date line, which the instant conversion absorbs.
struct SolarDay {
    jd: f64,
    latitude: f64,
    noon: f64,
}

impl SolarDay {
    fn new(coordinates: Coordinates, date: NaiveDate) -> Self {
        let jd = julian_day(date);
        let longitude_hours = coordinates.longitude / 15.0;

        let first = SolarCoordinates::at(jd + 0.5);
        let guess = 12.0 - longitude_hours - first.equation_of_time;
        let refined = SolarCoordinates::at(jd + guess / 24.0);
        let noon = 12.0 - longitude_hours - refined.equation_of_time;

        Self {
            jd,
            latitude: coordinates.latitude,
            noon,
        }
    }

    fn crossing_at(&self, altitude: f64, side: Side, eval_hours: f64) -> Option<f64> {
        let sun = SolarCoordinates::at(self.jd + eval_hours / 24.0);
        hour_angle_for_altitude(altitude, self.latitude, sun.declination).map(|h| match side {
            Side::Morning => self.noon - h / 15.0,
            Side::Afternoon => self.noon + h / 15.0,
        })
    }

    /// Time at which the sun crosses `altitude` on the given side of noon,
    /// refined once at the first-pass estimate. When no crossing exists the
    /// fallback is a 90 degree hour angle, six hours from noon; the flag
    /// records whether the geometry converged.
    fn altitude_crossing(&self, altitude: f64, side: Side) -> (f64, bool) {
        let refined = self
            .crossing_at(altitude, side, self.noon)
            .and_then(|first| self.crossing_at(altitude, side, first));

        match refined {
            Some(hours) => (hours, true),
            None => {
                let fallback = match side {
                    Side::Morning => self.noon - 6.0,
                    Side::Afternoon => self.noon + 6.0,
                };
                (fallback, false)
            }
        }
    }

    fn asr_at(&self, shadow: f64, eval_hours: f64) -> Option<f64> {
        let sun = SolarCoordinates::at(self.jd + eval_hours / 24.0);
        let altitude = shadow_altitude(shadow, self.latitude, sun.declination);
        hour_angle_for_altitude(altitude, self.latitude, sun.declination)
            .map(|h| self.noon + h / 15.0)
    }

    fn asr(&self, shadow: f64) -> f64 {
        let refined = self
            .asr_at(shadow, self.noon)
            .and_then(|first| self.asr_at(shadow, first));

        // The shadow altitude is unreachable only in degenerate polar
        // geometry; three hours past noon keeps the instant between Dhuhr
        // and the six-hour sunset fallback.
        refined.unwrap_or(self.noon + 3.0)
    }
}

/// The six canonical instants for one civil date, plus the Maghrib-to-next-
/// Shuruq span as a diagnostic. Produced fresh per computation and never
/// mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    pub fajr: DateTime<Utc>,
    pub shuruq: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub ishaa: DateTime<Utc>,
    pub night_length: Duration,
}

impl PrayerTimes {
    /// Computes all six instants. Always succeeds: geometric non-convergence
    /// is resolved via the high-latitude rule, then a proportional fallback.
    pub fn new(coordinates: Coordinates, date: NaiveDate, params: &CalculationParameters) -> Self {
        let day = SolarDay::new(coordinates, date);

        let (shuruq_h, _) = day.altitude_crossing(HORIZON_ALTITUDE, Side::Morning);
        let (maghrib_h, _) = day.altitude_crossing(HORIZON_ALTITUDE, Side::Afternoon);

        // Night span sunset to next sunrise; the next day's sunrise is
        // approximated as today's plus 24h, which drifts by under a minute.
        let night_hours = shuruq_h + 24.0 - maghrib_h;

        let (mut fajr_h, fajr_solved) = day.altitude_crossing(-params.fajr_angle, Side::Morning);
        if !fajr_solved {
            let portion = params.high_latitude_rule.night_portion(params.fajr_angle);
            fajr_h = shuruq_h - night_hours * portion;
        }

        let asr_h = day.asr(params.madhab.shadow_length());

        let ishaa_h = if params.ishaa_interval != 0 {
            maghrib_h + params.ishaa_interval as f64 / 60.0
        } else {
            let (h, solved) = day.altitude_crossing(-params.ishaa_angle, Side::Afternoon);
            if solved {
                h
            } else {
                let portion = params.high_latitude_rule.night_portion(params.ishaa_angle);
                maghrib_h + night_hours * portion
            }
        };

        let midnight_utc = date.and_time(NaiveTime::MIN).and_utc();
        let at = |hours: f64, adjustment_minutes: i64| {
            midnight_utc
                + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
                + Duration::minutes(adjustment_minutes)
        };

        Self {
            fajr: at(fajr_h, params.adjustments.fajr),
            shuruq: at(shuruq_h, params.adjustments.shuruq),
            dhuhr: at(day.noon, params.adjustments.dhuhr),
            asr: at(asr_h, params.adjustments.asr),
            maghrib: at(maghrib_h, params.adjustments.maghrib),
            ishaa: at(ishaa_h, params.adjustments.ishaa),
            night_length: Duration::milliseconds((night_hours * 3_600_000.0).round() as i64),
        }
    }

    /// The engine's six instants in canonical order. Midnight and LastThird
    /// come from night segmentation, not from here.
    pub fn entries(&self) -> [(Prayer, DateTime<Utc>); 6] {
        [
            (Prayer::Fajr, self.fajr),
            (Prayer::Shuruq, self.shuruq),
            (Prayer::Dhuhr, self.dhuhr),
            (Prayer::Asr, self.asr),
            (Prayer::Maghrib, self.maghrib),
            (Prayer::Ishaa, self.ishaa),
        ]
    }

    pub fn time(&self, prayer: Prayer) -> Option<DateTime<Utc>> {
        match prayer {
            Prayer::Fajr => Some(self.fajr),
            Prayer::Shuruq => Some(self.shuruq),
            Prayer::Dhuhr => Some(self.dhuhr),
            Prayer::Asr => Some(self.asr),
            Prayer::Maghrib => Some(self.maghrib),
            Prayer::Ishaa => Some(self.ishaa),
            Prayer::Midnight | Prayer::LastThird => None,
        }
    }
}
