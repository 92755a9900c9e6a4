//! Prayer time calculation and nightly event scheduling.
//!
//! The core is pure and synchronous: [`prayer::resolve`] turns a named
//! calculation method plus overrides into parameters, [`prayer::PrayerTimes`]
//! computes the six canonical instants for a civil date, and
//! [`prayer::segment`] derives solar midnight and the last third of the
//! night. The [`scheduler`] module turns those instants into cancellable
//! deferred events.

pub mod astro;
pub mod config;
pub mod prayer;
pub mod scheduler;

pub use config::Config;
pub use prayer::{
    resolve, segment, CalculationMethod, CalculationParameters, ComputeError, Coordinates,
    NightSegments, Prayer, PrayerTimes,
};
pub use scheduler::{PrayerEvent, Scheduler, TriggerType};
