use serde::Serialize;
use strum_macros::Display;

use crate::prayer::Prayer;

pub const MAWAQEET_EVENT: &str = "mawaqeet_event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TriggerType {
    PrayerTime,
    PrayerReminder,
}

/// Payload fired on the event bus when a scheduled instant arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrayerEvent {
    pub device_id: String,
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub prayer: Prayer,
}

impl PrayerEvent {
    pub fn new(device_id: &str, trigger_type: TriggerType, prayer: Prayer) -> Self {
        Self {
            device_id: device_id.to_string(),
            trigger_type,
            prayer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_payload_serializes_with_type_key() {
        let event = PrayerEvent::new("mosque-1", TriggerType::PrayerTime, Prayer::Fajr);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["device_id"], "mosque-1");
        assert_eq!(json["type"], "prayer_time");
        assert_eq!(json["prayer"], "fajr");
    }

    #[test]
    fn trigger_names_match_automation_spelling() {
        assert_eq!(TriggerType::PrayerTime.to_string(), "prayer_time");
        assert_eq!(TriggerType::PrayerReminder.to_string(), "prayer_reminder");
    }
}
