pub mod error;
pub mod method;
pub mod night;
pub mod params;
pub mod times;

pub use error::ComputeError;
pub use method::CalculationMethod;
pub use night::{segment, NightSegments};
pub use params::{resolve, Adjustments, CalculationParameters, ParameterOverrides};
pub use times::{Coordinates, Prayer, PrayerTimes};
