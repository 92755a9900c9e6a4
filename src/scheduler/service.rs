use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::scheduler::events::PrayerEvent;

/// Handle for one pending deferred callback. Dropping the handle does not
/// cancel the timer; `cancel` does.
#[derive(Debug)]
pub struct ScheduleHandle {
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Deferred event delivery: many simultaneous pending schedules, each
/// individually cancellable, all funnelled into one event channel.
pub struct Scheduler {
    events: mpsc::UnboundedSender<PrayerEvent>,
    pending: Vec<ScheduleHandle>,
}

impl Scheduler {
    pub fn new(events: mpsc::UnboundedSender<PrayerEvent>) -> Self {
        Self {
            events,
            pending: Vec::new(),
        }
    }

    /// Schedules `event` for delivery at `at`. Instants already in the past
    /// fire immediately.
    pub fn schedule_at(&mut self, at: DateTime<Utc>, event: PrayerEvent) {
        let delay = (at - Utc::now()).to_std().unwrap_or(StdDuration::ZERO);
        let sender = self.events.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the daemon is shutting down.
            let _ = sender.send(event);
        });

        self.pending.push(ScheduleHandle { task });
    }

    /// Cancels every pending schedule. Must run before rescheduling so no
    /// stale timer fires with superseded parameters.
    pub fn cancel_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.cancel();
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
