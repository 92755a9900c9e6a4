use chrono::{DateTime, Duration, Local, Utc};
use log::{debug, info};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::prayer::{resolve, segment, ComputeError, Coordinates, Prayer, PrayerTimes};
use crate::scheduler::events::{PrayerEvent, TriggerType, MAWAQEET_EVENT};
use crate::scheduler::service::Scheduler;

/// Runs the refresh loop: compute today's instants, schedule their events,
/// sleep until the last third of the night, recompute. Events are printed
/// as JSON lines for downstream automation.
pub async fn run(config: Config) -> Result<(), ComputeError> {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::new(sender);

    loop {
        let refresh_at = schedule_cycle(&config, &mut scheduler)?;
        info!(
            "scheduled {} events, next refresh at {}",
            scheduler.pending_count(),
            refresh_at
        );

        loop {
            let now = Utc::now();
            if now >= refresh_at {
                break;
            }
            let wait = (refresh_at - now).to_std().unwrap_or_default();
            tokio::select! {
                _ = tokio::time::sleep(wait) => break,
                received = receiver.recv() => match received {
                    Some(event) => emit(&event),
                    None => return Ok(()),
                },
            }
        }
    }
}

/// One scheduling cycle. Cancels every previously scheduled callback before
/// creating new ones, so no stale timer fires with superseded parameters.
/// Returns the instant of the next refresh.
pub fn schedule_cycle(
    config: &Config,
    scheduler: &mut Scheduler,
) -> Result<DateTime<Utc>, ComputeError> {
    let coordinates = Coordinates::new(config.location.latitude, config.location.longitude)?;
    let params = resolve(config.calculation.method, &config.overrides());

    let today = Local::now().date_naive();
    let tomorrow = today.succ_opt().unwrap_or(today);

    let today_times = PrayerTimes::new(coordinates, today, &params);
    let tomorrow_times = PrayerTimes::new(coordinates, tomorrow, &params);
    let night = segment(today_times.maghrib, tomorrow_times.fajr)?;

    scheduler.cancel_all();

    let now = Utc::now();
    let mut instants: Vec<(Prayer, DateTime<Utc>)> = today_times.entries().to_vec();
    instants.push((Prayer::Midnight, night.midnight));
    instants.push((Prayer::LastThird, night.last_third));

    for (prayer, at) in instants {
        if at <= now {
            debug!("{} already passed at {}", prayer, at);
            continue;
        }

        scheduler.schedule_at(
            at,
            PrayerEvent::new(&config.device.id, TriggerType::PrayerTime, prayer),
        );

        // Reminders exist for the six prayers, not the derived night instants.
        let has_reminder = !matches!(prayer, Prayer::Midnight | Prayer::LastThird);
        if has_reminder && config.reminder.lead_minutes > 0 {
            let reminder_at = at - Duration::minutes(config.reminder.lead_minutes);
            if reminder_at > now {
                scheduler.schedule_at(
                    reminder_at,
                    PrayerEvent::new(&config.device.id, TriggerType::PrayerReminder, prayer),
                );
            }
        }
    }

    // A refresh instant in the past (daemon started late in the night) would
    // spin the loop; push it a minute out instead.
    Ok(night.last_third.max(now + Duration::minutes(1)))
}

fn emit(event: &PrayerEvent) {
    match serde_json::to_string(event) {
        Ok(json) => {
            println!("{} {}", MAWAQEET_EVENT, json);
            info!("fired {} for {}", event.trigger_type, event.prayer);
        }
        Err(e) => log::error!("failed to serialize event: {}", e),
    }
}
