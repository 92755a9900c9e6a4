use chrono::{Datelike, NaiveDate};

/// Solar altitude for sunrise/sunset: sun's upper limb on the horizon,
/// accounting for refraction and the solar radius.
pub const HORIZON_ALTITUDE: f64 = -0.833;

/// Julian day number at 00:00 UT for a civil date.
pub fn julian_day(date: NaiveDate) -> f64 {
    let mut year = f64::from(date.year());
    let mut month = f64::from(date.month());
    let day = f64::from(date.day());

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Apparent solar coordinates from the low-accuracy almanac series
/// (mean anomaly, mean longitude, equation of center, mean obliquity).
/// Good to a fraction of a minute of time, which is plenty for horizon
/// crossings quoted to the minute.
#[derive(Debug, Clone, Copy)]
pub struct SolarCoordinates {
    /// Declination in degrees.
    pub declination: f64,
    /// Equation of time in fractional hours (apparent minus mean).
    pub equation_of_time: f64,
}

impl SolarCoordinates {
    pub fn at(julian_day: f64) -> Self {
        let d = julian_day - 2451545.0;

        let mean_anomaly = normalize_degrees(357.529 + 0.985_600_28 * d).to_radians();
        let mean_longitude = normalize_degrees(280.459 + 0.985_647_36 * d);
        let ecliptic_longitude = normalize_degrees(
            mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin(),
        )
        .to_radians();
        let obliquity = (23.439 - 0.000_000_36 * d).to_radians();

        let declination = (obliquity.sin() * ecliptic_longitude.sin())
            .asin()
            .to_degrees();

        let right_ascension_hours = normalize_hours(
            (ecliptic_longitude.sin() * obliquity.cos())
                .atan2(ecliptic_longitude.cos())
                .to_degrees()
                / 15.0,
        );
        let equation_of_time = wrap_half_day(mean_longitude / 15.0 - right_ascension_hours);

        Self {
            declination,
            equation_of_time,
        }
    }
}

/// Hour angle (degrees from solar noon) at which the sun reaches the given
/// altitude, or `None` when the sun never crosses that altitude on this day
/// at this latitude.
pub fn hour_angle_for_altitude(altitude: f64, latitude: f64, declination: f64) -> Option<f64> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let cos_h = (altitude.to_radians().sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if (-1.0..=1.0).contains(&cos_h) {
        Some(cos_h.acos().to_degrees())
    } else {
        None
    }
}

/// Afternoon solar altitude at which an object's shadow equals `shadow`
/// times its height (plus the noon shadow), per the hour-angle shadow
/// formula used for Asr.
pub fn shadow_altitude(shadow: f64, latitude: f64, declination: f64) -> f64 {
    (1.0 / (shadow + (latitude - declination).abs().to_radians().tan()))
        .atan()
        .to_degrees()
}

pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn normalize_hours(hours: f64) -> f64 {
    hours.rem_euclid(24.0)
}

/// Wraps an hour value into [-12, 12), for the equation of time.
fn wrap_half_day(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped >= 12.0 {
        wrapped - 24.0
    } else {
        wrapped
    }
}
