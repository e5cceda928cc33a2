use crate::timing::Debouncer;
use crate::util::{clear_timeout, delay_until, now_ms, set_timeout};
use leptos::prelude::*;

/// Hook that follows `source` with a settled copy.
///
/// The returned signal starts at the current value of `source` and only
/// takes a new value after `delay_ms` pass without `source` changing.
pub fn use_debounced<T>(source: Signal<T>, delay_ms: i32) -> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let initial = source.get_untracked();
    let (settled, set_settled) = signal(initial.clone());
    let machine = StoredValue::new(Debouncer::new(initial, delay_ms as i64));
    let timer: StoredValue<Option<i32>> = StoredValue::new(None);

    Effect::new(move |_| {
        let value = source.get();
        let now = now_ms();
        if machine.try_update_value(|d| d.push(value, now)).is_some() {
            arm(machine, timer, set_settled, now);
        }
    });

    on_cleanup(move || {
        if let Some(Some(id)) = timer.try_get_value() {
            clear_timeout(id);
        }
    });

    settled
}

/// Schedules a poll for the pending deadline, if any.
fn arm<T>(
    machine: StoredValue<Debouncer<T>>,
    timer: StoredValue<Option<i32>>,
    set_settled: WriteSignal<T>,
    now: i64,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    if let Some(Some(id)) = timer.try_get_value() {
        clear_timeout(id);
    }
    let Some(deadline) = machine.try_with_value(|d| d.deadline()).flatten() else {
        let _ = timer.try_set_value(None);
        return;
    };

    let id = set_timeout(delay_until(deadline, now), move || {
        let now = now_ms();
        if let Some(Some(v)) = machine.try_update_value(|d| d.poll(now)) {
            let _ = set_settled.try_set(v);
        }
        // Timers may fire early by `Date.now()`; a value still pending gets
        // another timer.
        arm(machine, timer, set_settled, now);
    });
    let _ = timer.try_set_value(id);
}
