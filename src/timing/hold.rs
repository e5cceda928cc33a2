#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HoldState {
    Idle,
    /// Busy; shown since `since`.
    Pending { since: i64 },
    /// No longer busy but kept visible until `until`.
    PendingHeld { until: i64 },
}

/// Busy indicator that stays visible for at least `min_ms` once shown, so a
/// fast request does not flash it on and off.
#[derive(Clone, Debug)]
pub(crate) struct BusyHold {
    min_ms: i64,
    state: HoldState,
}

impl BusyHold {
    pub fn new(min_ms: i64) -> Self {
        Self {
            min_ms: min_ms.max(0),
            state: HoldState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn visible(&self) -> bool {
        self.state != HoldState::Idle
    }

    /// When the held state expires, if it is held.
    pub fn deadline(&self) -> Option<i64> {
        match self.state {
            HoldState::PendingHeld { until } => Some(until),
            _ => None,
        }
    }

    pub fn set_busy(&mut self, busy: bool, now_ms: i64) {
        self.state = match (self.state, busy) {
            (HoldState::Idle, true) => HoldState::Pending { since: now_ms },
            (HoldState::Pending { since }, false) => {
                let until = since + self.min_ms;
                if now_ms >= until {
                    HoldState::Idle
                } else {
                    HoldState::PendingHeld { until }
                }
            }
            // Busy again while held: resume without resetting the shown-at time.
            (HoldState::PendingHeld { until }, true) => HoldState::Pending {
                since: until - self.min_ms,
            },
            (s, _) => s,
        };
    }

    pub fn tick(&mut self, now_ms: i64) {
        if let HoldState::PendingHeld { until } = self.state {
            if now_ms >= until {
                self.state = HoldState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_request_is_held_for_minimum_duration() {
        let mut h = BusyHold::new(3000);
        h.set_busy(true, 0);
        assert!(h.visible());

        h.set_busy(false, 200);
        assert_eq!(h.state(), HoldState::PendingHeld { until: 3000 });
        assert_eq!(h.deadline(), Some(3000));

        h.tick(2999);
        assert!(h.visible());
        h.tick(3000);
        assert_eq!(h.state(), HoldState::Idle);
    }

    #[test]
    fn test_early_tick_keeps_deadline_for_the_next_timer() {
        let mut h = BusyHold::new(3000);
        h.set_busy(true, 0);
        h.set_busy(false, 100);

        h.tick(2999);
        assert_eq!(h.state(), HoldState::PendingHeld { until: 3000 });
        assert_eq!(h.deadline(), Some(3000));

        h.tick(3001);
        assert!(!h.visible());
        assert_eq!(h.deadline(), None);
    }

    #[test]
    fn test_slow_request_hides_immediately() {
        let mut h = BusyHold::new(3000);
        h.set_busy(true, 0);
        h.set_busy(false, 4000);
        assert!(!h.visible());
    }

    #[test]
    fn test_busy_again_while_held_keeps_original_start() {
        let mut h = BusyHold::new(3000);
        h.set_busy(true, 1000);
        h.set_busy(false, 1500);
        h.set_busy(true, 2000);
        assert_eq!(h.state(), HoldState::Pending { since: 1000 });

        h.set_busy(false, 5000);
        assert!(!h.visible());
    }

    #[test]
    fn test_idle_ignores_not_busy() {
        let mut h = BusyHold::new(3000);
        h.set_busy(false, 10);
        h.tick(10_000);
        assert_eq!(h.state(), HoldState::Idle);
    }
}
