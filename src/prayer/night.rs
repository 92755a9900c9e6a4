use chrono::{DateTime, Duration, Utc};

use crate::prayer::error::ComputeError;

/// Derived night instants for one Maghrib-to-Fajr span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightSegments {
    pub duration: Duration,
    pub midnight: DateTime<Utc>,
    pub last_third: DateTime<Utc>,
}

/// Splits the night between today's Maghrib and tomorrow's Fajr into solar
/// midnight and the last third. A non-positive span means the caller paired
/// the wrong days, which is a contract violation, not a recoverable case.
pub fn segment(
    today_maghrib: DateTime<Utc>,
    tomorrow_fajr: DateTime<Utc>,
) -> Result<NightSegments, ComputeError> {
    let duration = tomorrow_fajr - today_maghrib;
    if duration <= Duration::zero() {
        return Err(ComputeError::InvalidNightInterval {
            maghrib: today_maghrib,
            fajr: tomorrow_fajr,
        });
    }

    Ok(NightSegments {
        duration,
        midnight: tomorrow_fajr - duration / 2,
        last_third: tomorrow_fajr - duration / 3,
    })
}
