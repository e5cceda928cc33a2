/// Value-settling state machine.
///
/// A pushed value becomes the settled value only after `delay_ms` pass with
/// no further push. Time is supplied by the caller so the machine can be
/// driven by browser timers or by tests.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    delay_ms: i64,
    settled: T,
    pending: Option<(T, i64)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay_ms: i64) -> Self {
        Self {
            delay_ms: delay_ms.max(0),
            settled: initial,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// Replaces any pending value and restarts the quiet period. Returns the
    /// new deadline.
    pub fn push(&mut self, value: T, now_ms: i64) -> i64 {
        let deadline = now_ms + self.delay_ms;
        self.pending = Some((value, deadline));
        deadline
    }

    pub fn deadline(&self) -> Option<i64> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    /// Settles the pending value if its quiet period is over. Emits only
    /// when the settled value actually changes.
    pub fn poll(&mut self, now_ms: i64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now_ms => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        self.settle(value)
    }

    fn settle(&mut self, value: T) -> Option<T> {
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_settles_after_quiet_period() {
        let mut d = Debouncer::new(String::new(), 500);
        d.push("lunch".to_string(), 0);

        assert_eq!(d.poll(499), None);
        assert_eq!(d.settled(), "");
        assert_eq!(d.poll(500).as_deref(), Some("lunch"));
        assert_eq!(d.settled(), "lunch");
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_each_push_restarts_the_window() {
        let mut d = Debouncer::new(String::new(), 500);
        d.push("l".to_string(), 0);
        d.push("lu".to_string(), 300);
        d.push("lunch".to_string(), 600);

        assert_eq!(d.poll(800), None);
        assert_eq!(d.deadline(), Some(1100));
        assert_eq!(d.poll(1100).as_deref(), Some("lunch"));
    }

    #[test]
    fn test_typed_then_cleared_within_window_never_emits() {
        let mut d = Debouncer::new(String::new(), 500);
        d.push("lunch".to_string(), 0);
        d.push(String::new(), 200);

        assert_eq!(d.poll(500), None);
        assert_eq!(d.poll(700), None);
        assert_eq!(d.settled(), "");
    }

    #[test]
    fn test_early_poll_keeps_value_pending_until_deadline() {
        let mut d = Debouncer::new(String::new(), 500);
        d.push("lunch".to_string(), 1000);

        assert_eq!(d.poll(1499), None);
        assert_eq!(d.settled(), "");
        assert_eq!(d.deadline(), Some(1500));

        assert_eq!(d.poll(1501).as_deref(), Some("lunch"));
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_repushing_settled_value_is_silent() {
        let mut d = Debouncer::new(1, 500);
        d.push(2, 0);
        assert_eq!(d.poll(500), Some(2));

        d.push(2, 600);
        assert_eq!(d.poll(1100), None);
        assert_eq!(*d.settled(), 2);
    }
}
