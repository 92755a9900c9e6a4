use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("night interval is not positive: maghrib {maghrib}, next fajr {fajr}")]
    InvalidNightInterval {
        maghrib: DateTime<Utc>,
        fajr: DateTime<Utc>,
    },
}
