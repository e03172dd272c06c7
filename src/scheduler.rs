use std::time::{Duration, Instant};

/// Pause between a capture request and the snapshot, so the camera's
/// auto-exposure can settle.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

pub const AUTO_CAPTURE_TICKS: u32 = 3;
pub const AUTO_CAPTURE_INTERVAL: Duration = Duration::from_secs(1);

/// Something the host should act on now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Countdown progress; `remaining` reaches 0 on the last tick.
    CountdownTick { remaining: u32 },
    /// The countdown finished; a capture should be requested.
    CountdownFinished,
    /// The settle delay elapsed; snapshot the current frame now.
    CaptureDue,
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    remaining: u32,
    interval: Duration,
    next_due: Instant,
}

/// Timed capture actions, driven by the host through [`Scheduler::poll`].
///
/// Holds at most one pending capture and one countdown. Re-arming either
/// cancels the one in flight and starts over.
#[derive(Debug, Default)]
pub struct Scheduler {
    capture_due: Option<Instant>,
    countdown: Option<Countdown>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a capture `delay` after `now`, replacing any pending one.
    pub fn schedule_capture(&mut self, now: Instant, delay: Duration) {
        if self.capture_due.is_some() {
            tracing::debug!("Restarting pending capture");
        }
        self.capture_due = Some(now + delay);
    }

    /// Start a countdown of `ticks` steps spaced by `interval`.
    ///
    /// It reports `ticks`, `ticks - 1`, ... `0`; the zero tick finishes the
    /// countdown. A countdown already running is cancelled and restarted.
    pub fn schedule_auto_capture(&mut self, now: Instant, ticks: u32, interval: Duration) {
        if self.countdown.is_some() {
            tracing::debug!("Restarting auto-capture countdown");
        }
        self.countdown = Some(Countdown {
            remaining: ticks,
            interval,
            next_due: now + interval,
        });
    }

    pub fn cancel_capture(&mut self) -> bool {
        self.capture_due.take().is_some()
    }

    pub fn cancel_auto_capture(&mut self) -> bool {
        self.countdown.take().is_some()
    }

    pub fn capture_pending(&self) -> bool {
        self.capture_due.is_some()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// Collect every event due at or before `now`, oldest first.
    ///
    /// A stalled host gets all the ticks it missed in one call.
    pub fn poll(&mut self, now: Instant) -> Vec<ScheduledEvent> {
        let mut events = Vec::new();

        while let Some(mut countdown) = self.countdown {
            if countdown.next_due > now {
                break;
            }
            events.push(ScheduledEvent::CountdownTick {
                remaining: countdown.remaining,
            });
            if countdown.remaining == 0 {
                self.countdown = None;
                events.push(ScheduledEvent::CountdownFinished);
                // The capture it triggers settles from the tick's own deadline.
                self.schedule_capture(countdown.next_due, SETTLE_DELAY);
                break;
            }
            countdown.remaining -= 1;
            countdown.next_due += countdown.interval;
            self.countdown = Some(countdown);
        }

        if let Some(due) = self.capture_due {
            if due <= now {
                self.capture_due = None;
                events.push(ScheduledEvent::CaptureDue);
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn capture_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_capture(t0, SETTLE_DELAY);

        assert!(s.poll(t0 + ms(299)).is_empty());
        assert_eq!(s.poll(t0 + ms(300)), vec![ScheduledEvent::CaptureDue]);
        assert!(s.poll(t0 + ms(5000)).is_empty());
    }

    #[test]
    fn rescheduling_capture_restarts_the_delay() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_capture(t0, SETTLE_DELAY);
        s.schedule_capture(t0 + ms(200), SETTLE_DELAY);

        assert!(s.poll(t0 + ms(300)).is_empty());
        assert_eq!(s.poll(t0 + ms(500)), vec![ScheduledEvent::CaptureDue]);
    }

    #[test]
    fn countdown_ticks_then_captures() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_auto_capture(t0, AUTO_CAPTURE_TICKS, AUTO_CAPTURE_INTERVAL);

        assert!(s.poll(t0 + ms(999)).is_empty());
        assert_eq!(
            s.poll(t0 + ms(1000)),
            vec![ScheduledEvent::CountdownTick { remaining: 3 }]
        );
        assert_eq!(
            s.poll(t0 + ms(2000)),
            vec![ScheduledEvent::CountdownTick { remaining: 2 }]
        );
        assert_eq!(
            s.poll(t0 + ms(3000)),
            vec![ScheduledEvent::CountdownTick { remaining: 1 }]
        );
        assert_eq!(
            s.poll(t0 + ms(4000)),
            vec![
                ScheduledEvent::CountdownTick { remaining: 0 },
                ScheduledEvent::CountdownFinished,
            ]
        );
        assert!(!s.countdown_running());
        assert!(s.capture_pending());
        assert_eq!(s.poll(t0 + ms(4300)), vec![ScheduledEvent::CaptureDue]);
    }

    #[test]
    fn stalled_host_catches_up_in_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_auto_capture(t0, 2, ms(100));

        assert_eq!(
            s.poll(t0 + ms(10_000)),
            vec![
                ScheduledEvent::CountdownTick { remaining: 2 },
                ScheduledEvent::CountdownTick { remaining: 1 },
                ScheduledEvent::CountdownTick { remaining: 0 },
                ScheduledEvent::CountdownFinished,
                ScheduledEvent::CaptureDue,
            ]
        );
    }

    #[test]
    fn new_countdown_cancels_the_running_one() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_auto_capture(t0, 3, ms(1000));
        s.poll(t0 + ms(1000));
        s.schedule_auto_capture(t0 + ms(1500), 3, ms(1000));

        assert!(s.poll(t0 + ms(2000)).is_empty());
        assert_eq!(
            s.poll(t0 + ms(2500)),
            vec![ScheduledEvent::CountdownTick { remaining: 3 }]
        );
    }

    #[test]
    fn cancelled_actions_never_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_capture(t0, SETTLE_DELAY);
        s.schedule_auto_capture(t0, 1, ms(10));

        assert!(s.cancel_capture());
        assert!(s.cancel_auto_capture());
        assert!(!s.cancel_capture());
        assert!(s.poll(t0 + ms(10_000)).is_empty());
    }
}
