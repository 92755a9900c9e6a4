pub mod events;
pub mod runner;
pub mod service;

pub use events::{PrayerEvent, TriggerType};
pub use service::{ScheduleHandle, Scheduler};
