//! End-to-end properties of the resolver, engine, and night segmentation.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use mawaqeet::prayer::params::{HighLatitudeRule, ParameterOverrides};
use mawaqeet::{resolve, segment, CalculationMethod, Coordinates, PrayerTimes};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Kuwait carries no baseline minute adjustments, so instants come out of
/// the geometry untouched.
fn plain_params() -> mawaqeet::CalculationParameters {
    resolve(CalculationMethod::Kuwait, &ParameterOverrides::default())
}

#[test]
fn six_instants_strictly_ordered_across_latitudes() {
    let params = plain_params();
    let dates = [
        date(2024, 1, 1),
        date(2024, 3, 20),
        date(2024, 6, 21),
        date(2024, 9, 23),
        date(2024, 12, 21),
    ];

    for lat in (-60..=60).step_by(15) {
        for lon in (-150..=150).step_by(60) {
            let coordinates = Coordinates::new(f64::from(lat), f64::from(lon)).unwrap();
            for d in dates {
                let times = PrayerTimes::new(coordinates, d, &params);
                let entries = times.entries();
                for pair in entries.windows(2) {
                    assert!(
                        pair[0].1 < pair[1].1,
                        "{} !< {} at ({}, {}) on {}",
                        pair[0].0,
                        pair[1].0,
                        lat,
                        lon,
                        d
                    );
                }
            }
        }
    }
}

#[test]
fn compute_is_idempotent() {
    let coordinates = Coordinates::new(36.8, 10.2).unwrap();
    let params = plain_params();
    let d = date(2024, 4, 15);

    let a = PrayerTimes::new(coordinates, d, &params);
    let b = PrayerTimes::new(coordinates, d, &params);
    assert_eq!(a, b);
}

#[test]
fn equinox_reference_times_at_greenwich_equator() {
    // NOAA reference for (0, 0) on 2024-03-20: solar noon 12:08 UTC,
    // sunrise 06:04, sunset 18:11.
    let coordinates = Coordinates::new(0.0, 0.0).unwrap();
    let times = PrayerTimes::new(coordinates, date(2024, 3, 20), &plain_params());

    let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 8, 0).unwrap();
    let sunrise = Utc.with_ymd_and_hms(2024, 3, 20, 6, 4, 0).unwrap();
    let sunset = Utc.with_ymd_and_hms(2024, 3, 20, 18, 11, 0).unwrap();

    assert!((times.dhuhr - noon).num_seconds().abs() < 300);
    assert!((times.shuruq - sunrise).num_seconds().abs() < 300);
    assert!((times.maghrib - sunset).num_seconds().abs() < 300);
}

#[test]
fn solstice_sunrise_reference_in_london() {
    // USNO reference for London (51.48N) on 2024-06-21: sunrise 03:43 UTC,
    // sunset 20:21 UTC.
    let coordinates = Coordinates::new(51.4778, 0.0).unwrap();
    let times = PrayerTimes::new(coordinates, date(2024, 6, 21), &plain_params());

    let sunrise = Utc.with_ymd_and_hms(2024, 6, 21, 3, 43, 0).unwrap();
    let sunset = Utc.with_ymd_and_hms(2024, 6, 21, 20, 21, 0).unwrap();

    assert!((times.shuruq - sunrise).num_seconds().abs() < 300);
    assert!((times.maghrib - sunset).num_seconds().abs() < 300);
}

#[test]
fn interval_overrides_angle_for_ishaa() {
    let coordinates = Coordinates::new(36.8, 10.2).unwrap();
    let overrides = ParameterOverrides {
        fajr_angle: Some(18.0),
        ishaa_angle: Some(18.0),
        ishaa_interval: Some(90),
        ..Default::default()
    };
    let params = resolve(CalculationMethod::Custom, &overrides);
    let times = PrayerTimes::new(coordinates, date(2024, 4, 15), &params);

    let gap = times.ishaa - times.maghrib;
    assert!((gap - Duration::minutes(90)).num_milliseconds().abs() <= 2);
}

#[test]
fn polar_summer_fajr_still_exists_under_every_rule() {
    // 70N at the June solstice: an 18 degree twilight never happens, and
    // the sun does not even set.
    let coordinates = Coordinates::new(70.0, 0.0).unwrap();

    for rule in [
        HighLatitudeRule::MiddleOfNight,
        HighLatitudeRule::SeventhOfNight,
        HighLatitudeRule::TwilightAngle,
    ] {
        let overrides = ParameterOverrides {
            high_latitude_rule: Some(rule),
            ..Default::default()
        };
        let params = resolve(CalculationMethod::MuslimWorldLeague, &overrides);
        let times = PrayerTimes::new(coordinates, date(2024, 6, 21), &params);

        assert!(times.fajr < times.shuruq, "rule {}", rule);
        assert!(times.maghrib < times.ishaa, "rule {}", rule);
        assert!(times.shuruq < times.dhuhr && times.dhuhr < times.asr);
    }
}

#[test]
fn seventh_of_night_fajr_is_later_than_middle_of_night() {
    let coordinates = Coordinates::new(70.0, 0.0).unwrap();
    let d = date(2024, 6, 21);

    let fajr_for = |rule| {
        let overrides = ParameterOverrides {
            high_latitude_rule: Some(rule),
            ..Default::default()
        };
        let params = resolve(CalculationMethod::MuslimWorldLeague, &overrides);
        PrayerTimes::new(coordinates, d, &params).fajr
    };

    // A smaller night portion keeps Fajr closer to sunrise.
    assert!(fajr_for(HighLatitudeRule::SeventhOfNight) > fajr_for(HighLatitudeRule::MiddleOfNight));
    assert!(
        fajr_for(HighLatitudeRule::TwilightAngle) > fajr_for(HighLatitudeRule::MiddleOfNight)
    );
}

#[test]
fn segmentation_merges_with_engine_output() {
    let coordinates = Coordinates::new(36.8, 10.2).unwrap();
    let params = plain_params();

    let today = PrayerTimes::new(coordinates, date(2024, 4, 15), &params);
    let tomorrow = PrayerTimes::new(coordinates, date(2024, 4, 16), &params);
    let night = segment(today.maghrib, tomorrow.fajr).unwrap();

    assert!(night.duration > Duration::zero());
    assert!(today.maghrib < night.midnight);
    assert!(night.midnight < night.last_third);
    assert!(night.last_third < tomorrow.fajr);

    // Midnight sits exactly halfway.
    let half = (tomorrow.fajr - today.maghrib) / 2;
    assert_eq!(night.midnight, tomorrow.fajr - half);
}

#[test]
fn night_length_tracks_the_seasons() {
    let coordinates = Coordinates::new(48.8566, 2.3522).unwrap();
    let params = plain_params();

    let winter = PrayerTimes::new(coordinates, date(2024, 12, 21), &params);
    let summer = PrayerTimes::new(coordinates, date(2024, 6, 21), &params);
    assert!(winter.night_length > summer.night_length);
}
